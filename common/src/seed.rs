//! 初回起動時のサンプル蔵書

use crate::types::{Book, Category, Rating, ReadingStatus};

/// 保存データが無いときに書き込む3冊
pub fn default_books() -> Vec<Book> {
    vec![
        Book::new(
            "The Great Gatsby",
            "F. Scott Fitzgerald",
            Category::Fiction,
            Rating(4),
            ReadingStatus::Read,
        ),
        Book::new(
            "Sapiens",
            "Yuval Noah Harari",
            Category::NonFiction,
            Rating(5),
            ReadingStatus::Read,
        ),
        Book::new(
            "Dune",
            "Frank Herbert",
            Category::ScienceFiction,
            Rating(5),
            ReadingStatus::Reading,
        ),
    ]
}
