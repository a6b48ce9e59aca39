//! WebSocket wire protocol shared by the server and client.
//!
//! Both directions use the same JSON shape: `{"user": string, "body": string}`.

use serde::{Deserialize, Serialize};

/// Reserved sender name for system notices (join/leave).
pub const SYSTEM_SENDER: &str = "System";

/// Sender name used when an inbound frame carries no usable `user`.
pub const ANONYMOUS_SENDER: &str = "Anonymous";

/// Query parameter carrying the display name on connection.
pub const USERNAME_QUERY_PARAM: &str = "username";

/// Chat frame sent and received over the WebSocket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatFrame {
    /// Sender display name. Missing or `null` on the wire decodes to `None`.
    #[serde(default)]
    pub user: Option<String>,
    pub body: String,
}

impl ChatFrame {
    /// Create a frame sent by `user`
    pub fn new(user: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            body: body.into(),
        }
    }

    /// Create a system notice frame
    pub fn system(body: impl Into<String>) -> Self {
        Self::new(SYSTEM_SENDER, body)
    }

    /// Decode a frame from a JSON text message.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Encode the frame as a JSON text message.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Sender name with the anonymous fallback applied.
    ///
    /// An empty name counts as missing.
    pub fn sender_name(&self) -> &str {
        match self.user.as_deref() {
            Some(user) if !user.is_empty() => user,
            _ => ANONYMOUS_SENDER,
        }
    }

    /// Whether this frame is a system notice
    pub fn is_system(&self) -> bool {
        self.user.as_deref() == Some(SYSTEM_SENDER)
    }
}

/// Body of the notice announcing that `name` joined the room
pub fn join_notice(name: &str) -> String {
    format!("{name} just entered the chat room")
}

/// Body of the notice announcing that `name` left the room
pub fn leave_notice(name: &str) -> String {
    format!("{name} left the chat room")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_frame_wire_shape() {
        // テスト項目: フレームは {"user", "body"} の JSON にエンコードされる
        // given (前提条件):
        let frame = ChatFrame::new("Alice", "hi");

        // when (操作):
        let json = frame.to_json().unwrap();

        // then (期待する結果):
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!({"user": "Alice", "body": "hi"}));
    }

    #[test]
    fn test_chat_frame_missing_user_is_anonymous() {
        // テスト項目: user が欠けている・null・空文字のフレームは Anonymous 扱いになる
        // given (前提条件):
        let inputs = [
            r#"{"body": "hello"}"#,
            r#"{"user": null, "body": "hello"}"#,
            r#"{"user": "", "body": "hello"}"#,
        ];

        for input in inputs {
            // when (操作):
            let frame = ChatFrame::from_json(input).unwrap();

            // then (期待する結果):
            assert_eq!(frame.sender_name(), ANONYMOUS_SENDER, "input: {input}");
            assert_eq!(frame.body, "hello");
        }
    }

    #[test]
    fn test_chat_frame_malformed_is_error() {
        // テスト項目: JSON でない・body がない・型が違うフレームはデコードエラーになる
        // given (前提条件):
        let inputs = [
            "not json",
            r#"{"user": "Bob"}"#,
            r#"{"user": 42, "body": "x"}"#,
            r#"["Bob", "x"]"#,
        ];

        for input in inputs {
            // when (操作):
            let result = ChatFrame::from_json(input);

            // then (期待する結果):
            assert!(result.is_err(), "input should be rejected: {input}");
        }
    }

    #[test]
    fn test_system_frame() {
        // テスト項目: システム通知フレームは予約済みの送信者名を持つ
        // when (操作):
        let frame = ChatFrame::system(join_notice("Nifty Narwhal"));

        // then (期待する結果):
        assert!(frame.is_system());
        assert_eq!(frame.body, "Nifty Narwhal just entered the chat room");
    }
}
