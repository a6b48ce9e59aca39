//! UseCase 層
//!
//! ドメインモデルとリポジトリ・トランスポートを組み合わせて、
//! 表示名の確定とチャットセッションの操作を提供します。

pub mod identity;
pub mod session;

pub use identity::{IdentityStore, ResolvedIdentity};
pub use session::{ChatSession, SessionUpdate};
