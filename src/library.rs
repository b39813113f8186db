//! 蔵書コントローラ
//!
//! 永続化された蔵書コレクションを唯一所有し、追加・編集・削除・お気に入り切替を
//! 番号（コレクション内の位置）指定で行う。変更はすべて即座に保存される。

use crate::error::{BookLibError, Result};
use crate::storage::KeyValueStorage;
use crate::store::{LoadOrigin, PersistedStore};
use book_library_common::{
    default_books, Book, BookDraft, Filters, LibraryStats, ReadingStatus, SortKey, ViewSummary,
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

/// 蔵書コレクションの保存キー
pub const STORAGE_KEY: &str = "books-v2";

/// 一覧表示用のエントリ
#[derive(Debug, Clone, Serialize)]
pub struct LibraryEntry<'a> {
    /// コレクション内の番号（編集・削除に使う）
    pub index: usize,
    #[serde(flatten)]
    pub book: &'a Book,
}

pub struct Library<S> {
    store: PersistedStore<Vec<Book>, S>,
}

impl<S: KeyValueStorage> Library<S> {
    /// 保存キーを開く。未保存ならサンプル蔵書を書き込む。
    pub fn open(storage: S, key: &str) -> Result<Self> {
        let mut store = PersistedStore::open(storage, key, default_books());
        match store.origin() {
            LoadOrigin::Missing => {
                info!(key, "no saved library, writing sample books");
                store.set(default_books())?;
            }
            LoadOrigin::Corrupt => {
                warn!(key, "saved library unreadable, showing sample books until next change");
            }
            LoadOrigin::Stored => {
                debug!(key, count = store.get().len(), "library loaded");
            }
        }
        Ok(Self { store })
    }

    pub fn books(&self) -> &[Book] {
        self.store.get()
    }

    pub fn len(&self) -> usize {
        self.books().len()
    }

    pub fn is_empty(&self) -> bool {
        self.books().is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Book> {
        self.books().get(index).ok_or(BookLibError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    pub fn origin(&self) -> LoadOrigin {
        self.store.origin()
    }

    /// フォーム入力から1冊追加
    ///
    /// タイトルか著者が空なら何もせず `Ok(None)`。
    pub fn add(&mut self, draft: BookDraft, today: NaiveDate) -> Result<Option<usize>> {
        let Some(book) = draft.into_book(today) else {
            warn!("book submission ignored: title and author are required");
            return Ok(None);
        };

        let index = self.store.try_modify(|books| {
            books.push(book);
            Ok(books.len() - 1)
        })?;
        info!(index, "book added");
        Ok(Some(index))
    }

    /// 番号指定でレコードを置き換え
    pub fn update(&mut self, index: usize, book: Book) -> Result<()> {
        self.modify(index, |slot| *slot = book)?;
        info!(index, "book updated");
        Ok(())
    }

    /// 編集フォームの内容を反映
    ///
    /// タイトルか著者が空なら変更せず `Ok(false)`。
    pub fn edit(&mut self, index: usize, draft: BookDraft) -> Result<bool> {
        let Some(edited) = draft.apply_to(self.get(index)?) else {
            warn!(index, "book edit ignored: title and author are required");
            return Ok(false);
        };
        self.update(index, edited)?;
        Ok(true)
    }

    /// 番号指定で削除し、削除したレコードを返す
    pub fn remove(&mut self, index: usize) -> Result<Book> {
        let removed = self.store.try_modify(|books| {
            if index >= books.len() {
                return Err(BookLibError::IndexOutOfRange {
                    index,
                    len: books.len(),
                });
            }
            Ok(books.remove(index))
        })?;
        info!(index, title = %removed.title, "book removed");
        Ok(removed)
    }

    /// お気に入りを切り替え、切替後の状態を返す
    pub fn toggle_favorite(&mut self, index: usize) -> Result<bool> {
        self.modify(index, |book| {
            book.is_favorite = !book.is_favorite;
            book.is_favorite
        })
    }

    /// 読書状況を変更（読了時は読了日を記録）
    pub fn set_status(&mut self, index: usize, status: ReadingStatus, today: NaiveDate) -> Result<()> {
        self.modify(index, |book| book.set_status(status, today))
    }

    /// 絞り込み → 並べ替えを適用した一覧
    pub fn view(&self, filters: &Filters, sort: SortKey) -> Vec<LibraryEntry<'_>> {
        let mut entries: Vec<LibraryEntry<'_>> = self
            .books()
            .iter()
            .enumerate()
            .filter(|(_, book)| filters.matches(book))
            .map(|(index, book)| LibraryEntry { index, book })
            .collect();
        entries.sort_by(|a, b| sort.compare(a.book, b.book));
        entries
    }

    pub fn summary(&self, filters: &Filters, shown: usize) -> ViewSummary {
        ViewSummary {
            shown,
            total: self.len(),
            filtered: filters.is_active(),
        }
    }

    pub fn stats(&self) -> LibraryStats {
        LibraryStats::collect(self.books())
    }

    /// 保存値を削除してサンプル蔵書から再開
    pub fn reset(&mut self) -> Result<()> {
        self.store.reset()?;
        self.store.set(default_books())?;
        info!("library reset to sample books");
        Ok(())
    }

    fn modify<F, R>(&mut self, index: usize, f: F) -> Result<R>
    where
        F: FnOnce(&mut Book) -> R,
    {
        self.store.try_modify(|books| {
            let len = books.len();
            let book = books
                .get_mut(index)
                .ok_or(BookLibError::IndexOutOfRange { index, len })?;
            Ok(f(book))
        })
    }
}
