//! UseCase: 表示名の解決と確定
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - IdentityStore::resolve() / IdentityStore::commit()
//! - 保存済みの名前の読み込み、候補名の提示、確定時のフォールバック
//!
//! ### なぜこのテストが必要か
//! - 初回起動時は候補名を「提示するだけ」で、確定するまで保存してはいけない
//! - 空入力での確定は最後に提示した候補名にフォールバックする
//! - ストレージ障害は致命的ではなく「毎回名前を聞く」挙動に縮退する
//!
//! ### どのような状況を想定しているか
//! - 正常系：候補名の受け入れ、独自の名前での上書き、次回セッションでの再利用
//! - 異常系：読み込み・書き込みの失敗
//! - エッジケース：同じ名前の二重確定（冪等性）、resolve 前の commit

use std::sync::Arc;

use rand::{RngCore, SeedableRng, rngs::StdRng};

use crate::domain::{DisplayName, IdentityRepository, NAME_POOL, pick_name};

/// resolve() の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    /// 保存済みの表示名（未確定なら None）
    pub name: Option<DisplayName>,
    /// 提示する候補名（確定はされていない）
    pub suggestion: DisplayName,
}

/// 表示名の解決・永続化を行うストア
pub struct IdentityStore {
    repository: Arc<dyn IdentityRepository>,
    pool: &'static [&'static str],
    rng: Box<dyn RngCore + Send>,
    last_suggestion: Option<DisplayName>,
}

impl IdentityStore {
    /// 新しい IdentityStore を作成（標準の名前プールとエントロピー由来の乱数源）
    pub fn new(repository: Arc<dyn IdentityRepository>) -> Self {
        Self {
            repository,
            pool: NAME_POOL,
            rng: Box::new(StdRng::from_entropy()),
            last_suggestion: None,
        }
    }

    /// 候補名のプールを差し替える
    #[must_use]
    pub fn with_pool(mut self, pool: &'static [&'static str]) -> Self {
        self.pool = pool;
        self
    }

    /// 乱数源を差し替える（テストで候補名を固定するため）
    #[must_use]
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// 保存済みの名前を読み込み、候補名を 1 つ選んで返す
    ///
    /// 候補名は最後に提示した候補として記憶されるが、保存はされない。
    /// 読み込みに失敗した場合は未保存（None）として扱う。
    pub async fn resolve(&mut self) -> ResolvedIdentity {
        let suggestion = self.suggest();

        let name = match self.repository.load().await {
            Ok(Some(stored)) => match DisplayName::new(&stored) {
                Ok(name) => Some(name),
                Err(e) => {
                    tracing::warn!("Ignoring invalid stored display name '{}': {}", stored, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read stored display name: {}", e);
                None
            }
        };

        ResolvedIdentity { name, suggestion }
    }

    /// 入力された名前を確定して保存する
    ///
    /// 前後の空白は取り除かれる。空（または無効）な入力は最後に提示した候補名に
    /// フォールバックする。保存済みの値と同じなら書き込みは行わない（冪等）。
    /// 書き込みの失敗はログに残すだけで、確定した名前はそのまま返す。
    pub async fn commit(&mut self, chosen: &str) -> DisplayName {
        let name = match DisplayName::new(chosen) {
            Ok(name) => name,
            Err(e) => {
                if !chosen.trim().is_empty() {
                    tracing::warn!("Rejected display name '{}': {}", chosen.trim(), e);
                }
                self.fallback()
            }
        };

        if let Ok(Some(stored)) = self.repository.load().await
            && stored == name.as_str()
        {
            tracing::debug!("Display name '{}' is already committed", name);
            return name;
        }

        match self.repository.save(name.as_str()).await {
            Ok(()) => tracing::info!("Committed display name '{}'", name),
            Err(e) => tracing::warn!(
                "Failed to persist display name '{}', it will be asked again next session: {}",
                name,
                e
            ),
        }
        name
    }

    /// 最後に提示した候補名
    pub fn last_suggestion(&self) -> Option<&DisplayName> {
        self.last_suggestion.as_ref()
    }

    fn suggest(&mut self) -> DisplayName {
        let suggestion = pick_name(self.pool, &mut *self.rng)
            .and_then(|name| DisplayName::new(name).ok())
            .unwrap_or_else(DisplayName::anonymous);
        self.last_suggestion = Some(suggestion.clone());
        suggestion
    }

    fn fallback(&mut self) -> DisplayName {
        match &self.last_suggestion {
            Some(suggestion) => suggestion.clone(),
            None => self.suggest(),
        }
    }
}
