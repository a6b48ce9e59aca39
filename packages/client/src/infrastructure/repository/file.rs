//! File Identity Repository 実装
//!
//! 表示名を JSON ファイルに 1 つのキー（`chatUserName`）として永続化します。
//! 書き込みは一時ファイルへの書き出し後に rename するため、途中で失敗しても
//! 既存の値が壊れることはありません。

use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;

use crate::domain::{IdentityRepository, RepositoryError};

/// Key under which the display name is stored
pub const STORAGE_KEY: &str = "chatUserName";

const APP_DIR: &str = "tsudoi";
const FILE_NAME: &str = "identity.json";

#[derive(Debug, Clone)]
pub struct FileIdentityRepository {
    path: PathBuf,
}

impl FileIdentityRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/tsudoi/identity.json`, or the working directory when the
    /// platform has no config dir.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(format!(".{APP_DIR}-{FILE_NAME}")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl IdentityRepository for FileIdentityRepository {
    async fn load(&self) -> Result<Option<String>, RepositoryError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entries: BTreeMap<String, String> = serde_json::from_str(&text)?;
        Ok(entries.get(STORAGE_KEY).cloned())
    }

    async fn save(&self, name: &str) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let entries = BTreeMap::from([(STORAGE_KEY.to_string(), name.to_string())]);
        let json = serde_json::to_string_pretty(&entries)?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!("Saved display name to {}", self.path.display());
        Ok(())
    }
}
