//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
