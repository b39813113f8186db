//! 蔵書の集計

use crate::types::{Book, ReadingStatus};
use serde::Serialize;
use std::fmt;

/// 読書状況ごとの冊数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStats {
    pub total: usize,
    pub read: usize,
    pub reading: usize,
    pub to_read: usize,
    pub favorites: usize,
}

impl LibraryStats {
    pub fn collect(books: &[Book]) -> Self {
        books.iter().fold(Self::default(), |mut stats, book| {
            stats.total += 1;
            match book.status {
                ReadingStatus::Read => stats.read += 1,
                ReadingStatus::Reading => stats.reading += 1,
                ReadingStatus::ToRead => stats.to_read += 1,
            }
            if book.is_favorite {
                stats.favorites += 1;
            }
            stats
        })
    }

    pub fn count(&self, status: ReadingStatus) -> usize {
        match status {
            ReadingStatus::Read => self.read,
            ReadingStatus::Reading => self.reading,
            ReadingStatus::ToRead => self.to_read,
        }
    }
}

/// 一覧上部の「N of M books (filtered)」表示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSummary {
    pub shown: usize,
    pub total: usize,
    pub filtered: bool,
}

impl fmt::Display for ViewSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} {}", self.shown, self.total, book_noun(self.total))?;
        if self.filtered {
            write!(f, " (filtered)")?;
        }
        Ok(())
    }
}

/// 冊数に合わせた単数・複数形
pub fn book_noun(count: usize) -> &'static str {
    if count == 1 {
        "book"
    } else {
        "books"
    }
}
