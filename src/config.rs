use crate::error::{BookLibError, Result};
use crate::library::STORAGE_KEY;
use book_library_common::SortKey;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// データディレクトリを上書きする環境変数
pub const DATA_DIR_ENV: &str = "BOOK_LIBRARY_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub storage_key: String,
    pub default_sort: SortKey,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: STORAGE_KEY.into(),
            default_sort: SortKey::Title,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| BookLibError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("book-library").join("config.json"))
    }

    /// 蔵書データの保存先
    ///
    /// 優先順: 引数 → 環境変数 → 設定ファイル → OS標準のデータディレクトリ
    pub fn resolve_data_dir(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = cli_override {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_dir()
            .ok_or_else(|| BookLibError::Config("データディレクトリが見つかりません".into()))?;
        Ok(base.join("book-library"))
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.data_dir = Some(dir);
        self.save()
    }

    pub fn set_default_sort(&mut self, sort: SortKey) -> Result<()> {
        self.default_sort = sort;
        self.save()
    }
}
