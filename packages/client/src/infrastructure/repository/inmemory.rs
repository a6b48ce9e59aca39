//! InMemory Identity Repository 実装
//!
//! プロセス内にだけ表示名を保持する実装。テストや一時的なセッションで使用します。
//! clone したインスタンス同士は同じストレージを共有するため、
//! 「次回セッション」をテストで再現できます。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{IdentityRepository, RepositoryError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityRepository {
    name: Arc<Mutex<Option<String>>>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既に表示名が保存されている状態で作成
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Arc::new(Mutex::new(Some(name.into()))),
        }
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn load(&self) -> Result<Option<String>, RepositoryError> {
        Ok(self.name.lock().await.clone())
    }

    async fn save(&self, name: &str) -> Result<(), RepositoryError> {
        *self.name.lock().await = Some(name.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_empty() {
        // テスト項目: 何も保存されていなければ None が返る
        // given (前提条件):
        let repo = InMemoryIdentityRepository::new();

        // when (操作):
        let result = repo.load().await;

        // then (期待する結果):
        assert!(result.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        // テスト項目: clone したリポジトリは同じ値を参照する
        // given (前提条件):
        let repo = InMemoryIdentityRepository::new();
        let other = repo.clone();

        // when (操作):
        repo.save("Alice").await.unwrap();

        // then (期待する結果):
        assert_eq!(other.load().await.unwrap().as_deref(), Some("Alice"));
    }
}
