//! 対話式入力モジュール
//!
//! 追加フォーム・編集ダイアログに相当する入力をターミナルで受け付ける。

use crate::error::Result;
use book_library_common::{BookDraft, Category, Rating, ReadingStatus};
use chrono::NaiveDate;
use dialoguer::{Confirm, Input, Select};

/// 下書きの各項目を順に入力（既存値を初期値として表示）
pub fn prompt_draft(initial: &BookDraft) -> Result<BookDraft> {
    let title = prompt_text("タイトル", &initial.title)?;
    let author = prompt_text("著者", &initial.author)?;

    let category = {
        let labels: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        let current = Category::ALL
            .iter()
            .position(|c| *c == initial.category)
            .unwrap_or(0);
        let picked = Select::new()
            .with_prompt("ジャンル")
            .items(&labels[..])
            .default(current)
            .interact()?;
        Category::ALL[picked]
    };

    let rating = {
        let labels: Vec<String> = (1..=5).map(stars).collect();
        let picked = Select::new()
            .with_prompt("評価")
            .items(&labels[..])
            .default(usize::from(initial.rating.get()) - 1)
            .interact()?;
        Rating::new(picked as u8 + 1)?
    };

    let status = {
        let labels = ["Read", "Currently Reading", "To Read"];
        let current = ReadingStatus::ALL
            .iter()
            .position(|s| *s == initial.status)
            .unwrap_or(2);
        let picked = Select::new()
            .with_prompt("読書状況")
            .items(&labels[..])
            .default(current)
            .interact()?;
        ReadingStatus::ALL[picked]
    };

    let pages = prompt_optional_parsed::<u32>(
        "ページ数（空欄で未設定）",
        initial.pages.map(|p| p.to_string()),
        "数値を入力してください",
    )?;
    let date_read = prompt_optional_parsed::<NaiveDate>(
        "読了日 YYYY-MM-DD（空欄で未設定）",
        initial.date_read.map(|d| d.to_string()),
        "YYYY-MM-DD 形式で入力してください",
    )?;
    let isbn = prompt_optional_text("ISBN（空欄で未設定）", initial.isbn.as_deref())?;
    let cover_image = prompt_optional_text("表紙画像（空欄で未設定）", initial.cover_image.as_deref())?;
    let notes = prompt_optional_text("メモ（空欄で未設定）", initial.notes.as_deref())?;

    Ok(BookDraft {
        title,
        author,
        category,
        rating,
        status,
        cover_image,
        date_read,
        pages,
        isbn,
        notes,
    })
}

/// 確認プロンプト（既定は「いいえ」）
pub fn confirm(message: &str) -> Result<bool> {
    Ok(Confirm::new().with_prompt(message).default(false).interact()?)
}

/// 評価の星表示
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn prompt_text(label: &str, initial: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(label)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

fn prompt_optional_text(label: &str, initial: Option<&str>) -> Result<Option<String>> {
    let value = prompt_text(label, initial.unwrap_or(""))?;
    let value = value.trim();
    Ok(if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    })
}

fn prompt_optional_parsed<T>(label: &str, initial: Option<String>, hint: &'static str) -> Result<Option<T>>
where
    T: std::str::FromStr + 'static,
{
    let value: String = Input::new()
        .with_prompt(label)
        .with_initial_text(initial.unwrap_or_default())
        .allow_empty(true)
        .validate_with(move |input: &String| -> std::result::Result<(), &'static str> {
            let trimmed = input.trim();
            if trimmed.is_empty() || trimmed.parse::<T>().is_ok() {
                Ok(())
            } else {
                Err(hint)
            }
        })
        .interact_text()?;

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(trimmed.parse::<T>().ok())
}
