use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookLibError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ストレージエラー: {0}")]
    Storage(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("番号 {index} の本はありません（登録数: {len}）")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("入力エラー: {0}")]
    InvalidInput(String),

    #[error("入力の取得に失敗: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl From<book_library_common::Error> for BookLibError {
    fn from(err: book_library_common::Error) -> Self {
        match err {
            book_library_common::Error::InvalidRating(_) => BookLibError::InvalidInput(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BookLibError>;
