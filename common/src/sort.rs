//! 並べ替え
//!
//! - rating: 評価の降順
//! - title / author / category / status: 小文字化した文字列の昇順
//! - 不明なキー: title と同じ
//!
//! いずれも安定ソートで、同値のレコードは入力順を保つ。

use crate::types::Book;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// 並べ替えキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Title,
    Author,
    Category,
    Status,
    Rating,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Title,
        SortKey::Author,
        SortKey::Category,
        SortKey::Status,
        SortKey::Rating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::Category => "category",
            SortKey::Status => "status",
            SortKey::Rating => "rating",
        }
    }

    /// 2冊の順序を比較
    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        match self {
            SortKey::Rating => b.rating.cmp(&a.rating),
            SortKey::Title => compare_text(&a.title, &b.title),
            SortKey::Author => compare_text(&a.author, &b.author),
            SortKey::Category => compare_text(a.category.as_str(), b.category.as_str()),
            SortKey::Status => compare_text(a.status.as_str(), b.status.as_str()),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "author" => SortKey::Author,
            "category" => SortKey::Category,
            "status" => SortKey::Status,
            "rating" => SortKey::Rating,
            _ => SortKey::Title,
        }
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortKey::from(s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 並べ替えた新しいVecを返す（入力は変更しない）
pub fn sort_books(books: &[Book], key: SortKey) -> Vec<Book> {
    let mut result = books.to_vec();
    result.sort_by(|a, b| key.compare(a, b));
    result
}
