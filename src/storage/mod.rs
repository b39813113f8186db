//! キー・バリュー型ストレージ
//!
//! 文字列キーに文字列値（シリアライズ済みJSON）を保存する最小限の契約。

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

pub trait KeyValueStorage {
    /// 値を取得（未保存なら `Ok(None)`）
    ///
    /// ストレージ自体が読めない場合はエラー。
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// 値を保存（既存値は上書き）
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// 値を削除（未保存でもエラーにしない）
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}
