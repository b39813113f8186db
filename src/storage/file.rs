//! ファイル型ストレージ
//!
//! データディレクトリ直下の `storage.json` に、キー → シリアライズ済み文字列の
//! マップを丸ごと保存する。書き込みのたびに一時ファイル経由で置き換える。

use super::KeyValueStorage;
use crate::error::{BookLibError, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const STORAGE_FILE_NAME: &str = "storage.json";

#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// データディレクトリを作成して開く
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(STORAGE_FILE_NAME),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 全エントリを読み込み
    ///
    /// ファイルが無い場合は空。解析できない場合は `JsonParse`、
    /// それ以外の読み込み失敗は `Io` を返す。
    fn load_entries(&self) -> Result<BTreeMap<String, String>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| {
            if e.is_io() {
                BookLibError::Io(e.into())
            } else {
                BookLibError::JsonParse(e)
            }
        })
    }

    /// 書き込み前の読み込み
    ///
    /// 壊れたファイルは次の書き込みで置き換える。読めないファイルには書き込まない。
    fn load_entries_for_write(&self) -> Result<BTreeMap<String, String>> {
        match self.load_entries() {
            Err(BookLibError::JsonParse(e)) => {
                warn!(error = %e, path = %self.path.display(), "replacing corrupt storage file");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn save_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let tmp_path = self.path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, entries)?;
            writer.flush()?;
        }
        std::fs::rename(&tmp_path, &self.path)?;
        debug!(path = %self.path.display(), entries = entries.len(), "storage file written");
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_entries()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load_entries_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.save_entries(&entries)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let mut entries = self.load_entries_for_write()?;
        if entries.remove(key).is_some() {
            self.save_entries(&entries)?;
        }
        Ok(())
    }
}
