//! 絞り込み
//!
//! 指定された条件（空文字は条件なし）をすべて満たすレコードを、
//! 元の順序のまま返す。

use crate::types::Book;
use serde::{Deserialize, Serialize};

/// 絞り込み条件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
    /// ジャンル（完全一致）
    pub category: String,
    /// 読書状況（完全一致）
    pub status: String,
    /// タイトル・著者の部分一致（大文字小文字を区別しない）
    pub search: String,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// いずれかの条件が指定されているか
    pub fn is_active(&self) -> bool {
        !self.category.is_empty() || !self.status.is_empty() || !self.search.is_empty()
    }

    /// レコードが全条件を満たすか
    pub fn matches(&self, book: &Book) -> bool {
        if !self.category.is_empty() && book.category.as_str() != self.category {
            return false;
        }
        if !self.status.is_empty() && book.status.as_str() != self.status {
            return false;
        }
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            if !book.title.to_lowercase().contains(&needle)
                && !book.author.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// 条件に合うレコードを抽出（入力は変更しない）
pub fn filter_books(books: &[Book], filters: &Filters) -> Vec<Book> {
    books
        .iter()
        .filter(|book| filters.matches(book))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_books;
    use crate::types::Category;

    #[test]
    fn test_no_filters_returns_all() {
        let books = default_books();
        let result = filter_books(&books, &Filters::new());
        assert_eq!(result, books);
    }

    #[test]
    fn test_filter_by_category() {
        let books = default_books();
        let result = filter_books(&books, &Filters::new().with_category("Fiction"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "The Great Gatsby");
    }

    #[test]
    fn test_filter_by_status() {
        let books = default_books();
        let result = filter_books(&books, &Filters::new().with_status("Reading"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Dune");
    }

    #[test]
    fn test_filter_by_category_and_status() {
        let books = default_books();
        let filters = Filters::new().with_category("Fiction").with_status("Read");
        let result = filter_books(&books, &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "The Great Gatsby");

        let filters = Filters::new().with_category("Fiction").with_status("Reading");
        assert!(filter_books(&books, &filters).is_empty());
    }

    #[test]
    fn test_unknown_values_match_nothing() {
        let books = default_books();
        assert!(filter_books(&books, &Filters::new().with_category("Mystery")).is_empty());
        assert!(filter_books(&books, &Filters::new().with_status("Abandoned")).is_empty());
        // 表示名と完全一致しない値も対象外
        assert!(filter_books(&books, &Filters::new().with_category("fiction")).is_empty());
    }

    #[test]
    fn test_search_title_or_author_case_insensitive() {
        let books = default_books();

        let result = filter_books(&books, &Filters::new().with_search("GATSBY"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "The Great Gatsby");

        let result = filter_books(&books, &Filters::new().with_search("herbert"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Dune");

        let result = filter_books(&books, &Filters::new().with_search("zzz"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_search_combines_with_category_and_status() {
        let books = default_books();

        let filters = Filters::new().with_category("Science Fiction").with_search("frank");
        let result = filter_books(&books, &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Dune");

        let filters = Filters::new().with_category("Fiction").with_search("frank");
        assert!(filter_books(&books, &filters).is_empty());

        let filters = Filters::new().with_status("Read").with_search("dune");
        assert!(filter_books(&books, &filters).is_empty());

        let filters = Filters::new()
            .with_category("Non-Fiction")
            .with_status("Read")
            .with_search("harari");
        let result = filter_books(&books, &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Sapiens");
    }

    #[test]
    fn test_filter_preserves_order() {
        let books = default_books();
        let result = filter_books(&books, &Filters::new().with_status("Read"));
        let titles: Vec<&str> = result.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["The Great Gatsby", "Sapiens"]);
    }

    #[test]
    fn test_category_filter_is_complete() {
        let books = default_books();
        for category in Category::ALL {
            let result = filter_books(&books, &Filters::new().with_category(category.as_str()));
            assert!(result.iter().all(|b| b.category == category));
            let expected = books.iter().filter(|b| b.category == category).count();
            assert_eq!(result.len(), expected);
        }
    }

    #[test]
    fn test_empty_input() {
        let filters = Filters::new().with_category("Fiction");
        assert!(filter_books(&[], &filters).is_empty());
        assert!(filter_books(&[], &Filters::new()).is_empty());
    }

    #[test]
    fn test_is_active() {
        assert!(!Filters::new().is_active());
        assert!(Filters::new().with_search("a").is_active());
    }
}
