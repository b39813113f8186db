use super::KeyValueStorage;
use crate::error::Result;
use std::collections::HashMap;

/// メモリ上のストレージ（テスト・一時利用）
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert!(storage.get_item("k").unwrap().is_none());

        storage.set_item("k", "\"v\"").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("\"v\""));
        assert_eq!(storage.len(), 1);

        storage.remove_item("k").unwrap();
        assert!(storage.is_empty());

        // 未保存キーの削除はエラーにならない
        storage.remove_item("missing").unwrap();
    }
}
