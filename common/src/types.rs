//! 蔵書レコードの型定義
//!
//! CLIとライブラリ層で共有される型:
//! - Book: 永続化される1冊分のレコード
//! - Category / ReadingStatus / Rating: 値の範囲が決まっているフィールド
//! - BookDraft: 追加・編集フォームの入力（送信前）

use crate::error::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ジャンル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Fantasy,
    Biography,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Fiction,
        Category::NonFiction,
        Category::ScienceFiction,
        Category::Fantasy,
        Category::Biography,
        Category::Other,
    ];

    /// 保存・表示に使う文字列
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fiction => "Fiction",
            Category::NonFiction => "Non-Fiction",
            Category::ScienceFiction => "Science Fiction",
            Category::Fantasy => "Fantasy",
            Category::Biography => "Biography",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fiction" => Ok(Category::Fiction),
            "non-fiction" | "nonfiction" | "non fiction" => Ok(Category::NonFiction),
            "science fiction" | "science-fiction" | "sci-fi" | "scifi" => Ok(Category::ScienceFiction),
            "fantasy" => Ok(Category::Fantasy),
            "biography" => Ok(Category::Biography),
            "other" => Ok(Category::Other),
            _ => Err(format!(
                "Unknown category: {}. Use Fiction, Non-Fiction, Science Fiction, Fantasy, Biography, or Other",
                s
            )),
        }
    }
}

/// 読書状況
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReadingStatus {
    Read,
    Reading,
    #[default]
    #[serde(rename = "To Read")]
    ToRead,
}

impl ReadingStatus {
    pub const ALL: [ReadingStatus; 3] = [
        ReadingStatus::Read,
        ReadingStatus::Reading,
        ReadingStatus::ToRead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::Read => "Read",
            ReadingStatus::Reading => "Reading",
            ReadingStatus::ToRead => "To Read",
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "read" | "done" => Ok(ReadingStatus::Read),
            "reading" | "currently reading" => Ok(ReadingStatus::Reading),
            "to read" | "to-read" | "toread" | "want to read" => Ok(ReadingStatus::ToRead),
            _ => Err(format!("Unknown status: {}. Use Read, Reading, or To Read", s)),
        }
    }
}

/// 評価（1〜5の整数）
///
/// 範囲外の値はシリアライズ経由でも構築できない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(pub(crate) u8);

impl Rating {
    pub const MIN: Rating = Rating(1);
    pub const MAX: Rating = Rating(5);
    /// 追加フォームの初期値
    pub const DEFAULT: Rating = Rating(3);

    pub fn new(value: u8) -> Result<Self, Error> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Ok(Rating(value))
        } else {
            Err(Error::InvalidRating(value))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Rating {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// 蔵書レコード
///
/// 一意なIDは持たない。コレクション内の位置で識別する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub title: String,
    pub author: String,
    pub category: Category,
    pub rating: Rating,
    pub status: ReadingStatus,

    /// 表紙画像の参照
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    /// 登録日
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<NaiveDate>,

    /// 読了日
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_read: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_favorite: bool,
}

impl Book {
    /// 必須フィールドだけを指定して作成
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        category: Category,
        rating: Rating,
        status: ReadingStatus,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            category,
            rating,
            status,
            cover_image: None,
            date_added: None,
            date_read: None,
            pages: None,
            isbn: None,
            notes: None,
            is_favorite: false,
        }
    }

    /// 読書状況を変更
    ///
    /// 読了に変わったとき、読了日が未設定なら `today` を記録する。
    pub fn set_status(&mut self, status: ReadingStatus, today: NaiveDate) {
        if status == ReadingStatus::Read && self.date_read.is_none() {
            self.date_read = Some(today);
        }
        self.status = status;
    }
}

/// 追加・編集フォームの入力値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub category: Category,
    pub rating: Rating,
    pub status: ReadingStatus,
    pub cover_image: Option<String>,
    pub date_read: Option<NaiveDate>,
    pub pages: Option<u32>,
    pub isbn: Option<String>,
    pub notes: Option<String>,
}

impl Default for BookDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            category: Category::Fiction,
            rating: Rating::DEFAULT,
            status: ReadingStatus::ToRead,
            cover_image: None,
            date_read: None,
            pages: None,
            isbn: None,
            notes: None,
        }
    }
}

impl BookDraft {
    /// タイトルと著者が空でなければ送信可能
    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty() && !self.author.trim().is_empty()
    }

    /// 新規レコードに変換（登録日は `today`）
    ///
    /// 送信不可の入力は `None`。
    pub fn into_book(self, today: NaiveDate) -> Option<Book> {
        if !self.is_submittable() {
            return None;
        }
        let mut book = Book::new(
            self.title.trim(),
            self.author.trim(),
            self.category,
            self.rating,
            self.status,
        );
        book.cover_image = non_blank(self.cover_image);
        book.date_added = Some(today);
        book.date_read = self.date_read;
        book.pages = self.pages;
        book.isbn = non_blank(self.isbn);
        book.notes = non_blank(self.notes);
        Some(book)
    }

    /// 既存レコードに編集内容を反映（登録日・お気に入りは維持）
    pub fn apply_to(self, original: &Book) -> Option<Book> {
        if !self.is_submittable() {
            return None;
        }
        Some(Book {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            category: self.category,
            rating: self.rating,
            status: self.status,
            cover_image: non_blank(self.cover_image),
            date_added: original.date_added,
            date_read: self.date_read,
            pages: self.pages,
            isbn: non_blank(self.isbn),
            notes: non_blank(self.notes),
            is_favorite: original.is_favorite,
        })
    }
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            category: book.category,
            rating: book.rating,
            status: book.status,
            cover_image: book.cover_image.clone(),
            date_read: book.date_read,
            pages: book.pages,
            isbn: book.isbn.clone(),
            notes: book.notes.clone(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
