//! 永続化ストア
//!
//! ストレージ上の1キーとメモリ上の値を同期させる。
//! 読み込みに失敗しても既定値で続行し、書き込みはストレージへの保存が
//! 成功してからメモリ上の値を置き換える。

use crate::error::Result;
use crate::storage::KeyValueStorage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// 起動時の値の出どころ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// 保存済みの値を読み込んだ
    Stored,
    /// 未保存のため既定値
    Missing,
    /// 保存値（またはストレージ自体）が読めないため既定値
    Corrupt,
}

/// キーの値を読み込む（未保存・解析失敗時は `default`）
pub fn read<T, S>(storage: &S, key: &str, default: T) -> T
where
    T: DeserializeOwned,
    S: KeyValueStorage + ?Sized,
{
    load(storage, key, default).0
}

/// 値をシリアライズしてキーに保存
pub fn write<T, S>(storage: &mut S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStorage + ?Sized,
{
    let json = serde_json::to_string(value)?;
    storage.set_item(key, &json)?;
    debug!(key, bytes = json.len(), "value persisted");
    Ok(())
}

fn load<T, S>(storage: &S, key: &str, default: T) -> (T, LoadOrigin)
where
    T: DeserializeOwned,
    S: KeyValueStorage + ?Sized,
{
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no stored value, using default");
            return (default, LoadOrigin::Missing);
        }
        Err(e) => {
            warn!(error = %e, key, "storage could not be read, using default");
            return (default, LoadOrigin::Corrupt);
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => (value, LoadOrigin::Stored),
        Err(e) => {
            warn!(error = %e, key, "stored value could not be parsed, using default");
            (default, LoadOrigin::Corrupt)
        }
    }
}

pub struct PersistedStore<T, S> {
    storage: S,
    key: String,
    default: T,
    value: T,
    origin: LoadOrigin,
}

impl<T, S> PersistedStore<T, S>
where
    T: Serialize + DeserializeOwned + Clone,
    S: KeyValueStorage,
{
    pub fn open(storage: S, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let (value, origin) = load(&storage, &key, default.clone());
        Self {
            storage,
            key,
            default,
            value,
            origin,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn origin(&self) -> LoadOrigin {
        self.origin
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// 新しい値を保存してから反映する
    ///
    /// 保存に失敗した場合はメモリ上の値を変更せずにエラーを返す。
    pub fn set(&mut self, value: T) -> Result<()> {
        write(&mut self.storage, &self.key, &value)?;
        self.value = value;
        Ok(())
    }

    /// 現在の値から次の値を計算して保存する
    pub fn update<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(&self.value);
        self.set(next)
    }

    /// 現在値の複製を変更して保存する
    ///
    /// `f` がエラーを返した場合は何も保存しない。
    pub fn try_modify<F, R>(&mut self, f: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> Result<R>,
    {
        let mut next = self.value.clone();
        let out = f(&mut next)?;
        self.set(next)?;
        Ok(out)
    }

    /// 保存値を削除して既定値に戻す
    pub fn reset(&mut self) -> Result<()> {
        self.storage.remove_item(&self.key)?;
        self.value = self.default.clone();
        self.origin = LoadOrigin::Missing;
        debug!(key = %self.key, "stored value removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookLibError;
    use crate::storage::MemoryStorage;
    use book_library_common::{default_books, Book};
    use serde::Deserialize;

    /// 常に書き込みに失敗するストレージ
    struct ReadOnlyStorage(MemoryStorage);

    impl KeyValueStorage for ReadOnlyStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>> {
            self.0.get_item(key)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(BookLibError::Storage("quota exceeded".into()))
        }

        fn remove_item(&mut self, _key: &str) -> Result<()> {
            Err(BookLibError::Storage("quota exceeded".into()))
        }
    }

    /// 読み込み自体が失敗するストレージ
    struct UnreadableStorage;

    impl KeyValueStorage for UnreadableStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Err(BookLibError::Storage("permission denied".into()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }

        fn remove_item(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_returns_default_when_empty() {
        let store = PersistedStore::open(MemoryStorage::new(), "testKey", "initialValue".to_string());
        assert_eq!(store.get(), "initialValue");
        assert_eq!(store.origin(), LoadOrigin::Missing);
    }

    #[test]
    fn test_returns_stored_value() {
        let mut storage = MemoryStorage::new();
        storage.set_item("testKey", "\"storedValue\"").unwrap();

        let store = PersistedStore::open(storage, "testKey", "initialValue".to_string());
        assert_eq!(store.get(), "storedValue");
        assert_eq!(store.origin(), LoadOrigin::Stored);
    }

    #[test]
    fn test_set_writes_through() {
        let mut store = PersistedStore::open(MemoryStorage::new(), "testKey", "initialValue".to_string());
        store.set("newValue".to_string()).unwrap();

        assert_eq!(store.get(), "newValue");
        assert_eq!(store.storage().get_item("testKey").unwrap().as_deref(), Some("\"newValue\""));
    }

    #[test]
    fn test_handles_objects() {
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        struct Person {
            name: String,
            age: u32,
        }

        let initial = Person { name: "John".into(), age: 30 };
        let mut store = PersistedStore::open(MemoryStorage::new(), "testObject", initial.clone());
        assert_eq!(store.get(), &initial);

        let next = Person { name: "Jane".into(), age: 25 };
        store.set(next.clone()).unwrap();
        assert_eq!(store.get(), &next);
        assert_eq!(
            store.storage().get_item("testObject").unwrap().as_deref(),
            Some(r#"{"name":"Jane","age":25}"#)
        );
    }

    #[test]
    fn test_handles_arrays() {
        let mut store = PersistedStore::open(MemoryStorage::new(), "testArray", vec![1, 2, 3]);
        store.set(vec![4, 5, 6]).unwrap();
        assert_eq!(store.get(), &vec![4, 5, 6]);
        assert_eq!(store.storage().get_item("testArray").unwrap().as_deref(), Some("[4,5,6]"));
    }

    #[test]
    fn test_function_updates_compose() {
        let mut store = PersistedStore::open(MemoryStorage::new(), "testCounter", 0_i32);
        store.update(|prev| prev + 1).unwrap();
        store.update(|prev| prev + 1).unwrap();
        store.update(|prev| prev * 10).unwrap();

        assert_eq!(*store.get(), 20);
        assert_eq!(store.storage().get_item("testCounter").unwrap().as_deref(), Some("20"));
    }

    #[test]
    fn test_parse_error_falls_back_to_default() {
        let mut storage = MemoryStorage::new();
        storage.set_item("testKey", "{invalid json}").unwrap();

        let store = PersistedStore::open(storage, "testKey", "initialValue".to_string());
        assert_eq!(store.get(), "initialValue");
        assert_eq!(store.origin(), LoadOrigin::Corrupt);
    }

    #[test]
    fn test_unreadable_storage_is_corrupt_not_missing() {
        let store = PersistedStore::open(UnreadableStorage, "testKey", "initialValue".to_string());
        assert_eq!(store.get(), "initialValue");
        assert_eq!(store.origin(), LoadOrigin::Corrupt);
        assert_eq!(read(&UnreadableStorage, "testKey", 7_i32), 7);
    }

    #[test]
    fn test_wrong_shape_falls_back_to_default() {
        let mut storage = MemoryStorage::new();
        storage.set_item("books", r#"[{"title":"X","rating":11}]"#).unwrap();

        let books: Vec<Book> = read(&storage, "books", Vec::new());
        assert!(books.is_empty());
    }

    #[test]
    fn test_failed_write_keeps_memory_unchanged() {
        let mut store = PersistedStore::open(ReadOnlyStorage(MemoryStorage::new()), "k", 1_i32);
        let err = store.set(2).unwrap_err();
        assert!(matches!(err, BookLibError::Storage(_)));
        assert_eq!(*store.get(), 1);

        assert!(store.update(|v| v + 5).is_err());
        assert_eq!(*store.get(), 1);
    }

    #[test]
    fn test_try_modify_error_saves_nothing() {
        let mut store = PersistedStore::open(MemoryStorage::new(), "k", vec![1]);
        let result: Result<()> = store.try_modify(|v| {
            v.push(2);
            Err(BookLibError::InvalidInput("rejected".into()))
        });
        assert!(result.is_err());
        assert_eq!(store.get(), &vec![1]);
        assert!(store.storage().get_item("k").unwrap().is_none());
    }

    #[test]
    fn test_round_trip_books_with_optional_fields() {
        let mut books = default_books();
        books[0].notes = Some("再読したい".into());
        books[1].pages = Some(443);
        books[2].is_favorite = true;

        let mut storage = MemoryStorage::new();
        write(&mut storage, "books-v2", &books).unwrap();
        let loaded: Vec<Book> = read(&storage, "books-v2", Vec::new());
        assert_eq!(loaded, books);
    }

    #[test]
    fn test_reset_restores_default() {
        let mut store = PersistedStore::open(MemoryStorage::new(), "k", "default".to_string());
        store.set("changed".into()).unwrap();
        store.reset().unwrap();
        assert_eq!(store.get(), "default");
        assert!(store.storage().get_item("k").unwrap().is_none());
    }
}
