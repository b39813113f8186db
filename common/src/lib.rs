//! Book Library Common Library
//!
//! 蔵書レコードの型と、絞り込み・並べ替えの純粋関数

pub mod types;
pub mod error;
pub mod filter;
pub mod sort;
pub mod seed;
pub mod stats;

pub use types::{Book, BookDraft, Category, Rating, ReadingStatus};
pub use error::{Error, Result};
pub use filter::{filter_books, Filters};
pub use sort::{sort_books, SortKey};
pub use seed::default_books;
pub use stats::{book_noun, LibraryStats, ViewSummary};
