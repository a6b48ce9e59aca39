//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use std::fmt;

use tsudoi_shared::protocol::{ANONYMOUS_SENDER, SYSTEM_SENDER};

use super::error::ValueObjectError;

/// Maximum length of a display name (in characters)
pub const DISPLAY_NAME_MAX_CHARS: usize = 100;

/// Display name value object.
///
/// The name a user chats under. Always trimmed, never empty and never the
/// reserved system sender.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    /// Create a new DisplayName from user input.
    ///
    /// Surrounding whitespace is trimmed before validation.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ValueObjectError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ValueObjectError::DisplayNameEmpty);
        }
        let len = name.chars().count();
        if len > DISPLAY_NAME_MAX_CHARS {
            return Err(ValueObjectError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX_CHARS,
                actual: len,
            });
        }
        if name == SYSTEM_SENDER {
            return Err(ValueObjectError::DisplayNameReserved(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    /// The anonymous fallback name.
    pub fn anonymous() -> Self {
        Self(ANONYMOUS_SENDER.to_string())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message identifier value object.
///
/// Assigned by the message log, strictly increasing within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(u64);

impl MessageId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The id following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who a message is from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sender {
    /// System notice (join events)
    System,
    /// A chat participant
    User(String),
}

impl Sender {
    /// Map a sender name as found on the wire.
    ///
    /// Missing or empty names become the anonymous sender; the reserved
    /// system name becomes [`Sender::System`].
    pub fn from_wire(user: Option<&str>) -> Self {
        match user {
            Some(SYSTEM_SENDER) => Self::System,
            Some(name) if !name.is_empty() => Self::User(name.to_string()),
            _ => Self::User(ANONYMOUS_SENDER.to_string()),
        }
    }

    /// Name as sent on the wire and shown as a label.
    pub fn name(&self) -> &str {
        match self {
            Self::System => SYSTEM_SENDER,
            Self::User(name) => name,
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }
}

impl From<&DisplayName> for Sender {
    fn from(name: &DisplayName) -> Self {
        Self::User(name.as_str().to_string())
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Current wall clock time.
    pub fn now() -> Self {
        Self(tsudoi_shared::time::current_timestamp_millis())
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Milliseconds elapsed from `earlier` to `self` (negative if earlier is later).
    pub fn millis_since(&self, earlier: Timestamp) -> i64 {
        self.0 - earlier.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_new_trims() {
        // テスト項目: 前後の空白は取り除かれる
        // given (前提条件):
        let input = "  Alice  ";

        // when (操作):
        let result = DisplayName::new(input);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "Alice");
    }

    #[test]
    fn test_display_name_new_blank_fails() {
        // テスト項目: 空白のみの名前は作成できない
        // when (操作):
        let result = DisplayName::new("   \t");

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::DisplayNameEmpty);
    }

    #[test]
    fn test_display_name_new_too_long_fails() {
        // テスト項目: 101 文字以上の名前は作成できない
        // given (前提条件):
        let name = "あ".repeat(101);

        // when (操作):
        let result = DisplayName::new(name);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::DisplayNameTooLong {
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn test_display_name_reserved_fails() {
        // テスト項目: システム通知用の送信者名は表示名として使えない
        // when (操作):
        let result = DisplayName::new(" System ");

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::DisplayNameReserved("System".to_string())
        );
    }

    #[test]
    fn test_sender_from_wire() {
        // テスト項目: ワイヤ上の送信者名がドメインの Sender に変換される
        // then (期待する結果):
        assert_eq!(Sender::from_wire(Some("System")), Sender::System);
        assert_eq!(
            Sender::from_wire(Some("Bob")),
            Sender::User("Bob".to_string())
        );
        assert_eq!(
            Sender::from_wire(Some("")),
            Sender::User("Anonymous".to_string())
        );
        assert_eq!(
            Sender::from_wire(None),
            Sender::User("Anonymous".to_string())
        );
    }

    #[test]
    fn test_message_id_ordering() {
        // テスト項目: MessageId::next は厳密に増加する
        // given (前提条件):
        let id = MessageId::new(1);

        // then (期待する結果):
        assert!(id.next() > id);
        assert_eq!(id.next().value(), 2);
    }

    #[test]
    fn test_timestamp_millis_since() {
        // テスト項目: 2 つのタイムスタンプの差をミリ秒で取得できる
        // given (前提条件):
        let ts1 = Timestamp::new(1000);
        let ts2 = Timestamp::new(3500);

        // then (期待する結果):
        assert_eq!(ts2.millis_since(ts1), 2500);
        assert!(ts1 < ts2);
    }
}
