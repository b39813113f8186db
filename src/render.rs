//! ターミナル向けの一覧・集計表示

use crate::library::LibraryEntry;
use crate::prompt::stars;
use book_library_common::{book_noun, Book, LibraryStats, ReadingStatus, ViewSummary};

/// 1冊分の表示（番号はコレクション内の位置）
pub fn format_entry(entry: &LibraryEntry<'_>) -> String {
    let book = entry.book;
    let mut line = format!(
        "[{}] {} / {}\n    {} | {} | {}",
        entry.index,
        book.title,
        book.author,
        book.category,
        status_label(book),
        stars(book.rating.get()),
    );
    if book.is_favorite {
        line.push_str(" | ♥");
    }
    if let Some(pages) = book.pages {
        line.push_str(&format!(" | {}p", pages));
    }
    if let Some(date) = book.date_read {
        line.push_str(&format!(" | 読了 {}", date));
    }
    if let Some(notes) = &book.notes {
        line.push_str(&format!("\n    {}", notes));
    }
    line
}

fn status_label(book: &Book) -> &'static str {
    match book.status {
        ReadingStatus::Reading => "Currently Reading",
        other => other.as_str(),
    }
}

/// 一覧全体の表示
pub fn format_list(entries: &[LibraryEntry<'_>], summary: &ViewSummary) -> String {
    if summary.total == 0 {
        return "蔵書がありません。`booklib add` で最初の1冊を追加してください".to_string();
    }
    let mut out = vec![summary.to_string()];
    if entries.is_empty() {
        out.push("条件に合う本がありません".to_string());
    }
    out.extend(entries.iter().map(format_entry));
    out.join("\n")
}

/// 読書状況ごとの冊数表示
pub fn format_stats(stats: &LibraryStats) -> String {
    let mut out = vec![format!("{} {}", stats.total, book_noun(stats.total))];
    for status in ReadingStatus::ALL {
        out.push(format!("  {:<8} {}", status.as_str(), stats.count(status)));
    }
    out.push(format!("  {:<8} {}", "Favorite", stats.favorites));
    out.join("\n")
}
