//! Correlation of local sends with their server echo.
//!
//! The server broadcasts every frame back to all connections, including the
//! one that sent it. When suppression is enabled, the echo of a recent local
//! send is matched by `(sender, body)` within a time window and dropped.

use std::{collections::VecDeque, time::Duration};

use super::value_object::{Sender, Timestamp};

/// Default window in which an echo is expected
pub const DEFAULT_ECHO_WINDOW: Duration = Duration::from_secs(5);

/// Upper bound on sends awaiting their echo
pub const MAX_PENDING_ECHOES: usize = 256;

/// How inbound echoes of local sends are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EchoPolicy {
    /// Show both the optimistic entry and the echo
    #[default]
    Display,
    /// Drop the first matching echo received within `window`
    Suppress { window: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingEcho {
    sender: Sender,
    body: String,
    sent_at: Timestamp,
}

/// Local sends still waiting for their echo, oldest first
#[derive(Debug, Default)]
pub struct EchoTracker {
    policy: EchoPolicy,
    pending: VecDeque<PendingEcho>,
}

impl EchoTracker {
    pub fn new(policy: EchoPolicy) -> Self {
        Self {
            policy,
            pending: VecDeque::new(),
        }
    }

    /// Remember a send the transport accepted.
    ///
    /// Sends whose window has already elapsed are dropped first, and the
    /// oldest entry is evicted once [`MAX_PENDING_ECHOES`] is reached.
    pub fn record_sent(&mut self, sender: &Sender, body: &str, sent_at: Timestamp) {
        let EchoPolicy::Suppress { window } = self.policy else {
            return;
        };
        self.prune_expired(window, sent_at);
        while self.pending.len() >= MAX_PENDING_ECHOES {
            self.pending.pop_front();
        }
        self.pending.push_back(PendingEcho {
            sender: sender.clone(),
            body: body.to_string(),
            sent_at,
        });
    }

    /// Consume the pending send matching an inbound frame, if any.
    ///
    /// Returns `true` when the frame is the echo of a local send and should be
    /// dropped.
    pub fn take_echo(&mut self, sender: &Sender, body: &str, received_at: Timestamp) -> bool {
        let EchoPolicy::Suppress { window } = self.policy else {
            return false;
        };
        self.prune_expired(window, received_at);

        match self
            .pending
            .iter()
            .position(|pending| &pending.sender == sender && pending.body == body)
        {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }

    /// Forget all pending sends (e.g. after the connection dropped).
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn prune_expired(&mut self, window: Duration, now: Timestamp) {
        let window_millis = i64::try_from(window.as_millis()).unwrap_or(i64::MAX);
        self.pending.retain(|pending| now.millis_since(pending.sent_at) <= window_millis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Sender {
        Sender::User("Alice".to_string())
    }

    fn suppressing() -> EchoTracker {
        EchoTracker::new(EchoPolicy::Suppress {
            window: Duration::from_secs(5),
        })
    }

    #[test]
    fn test_display_policy_never_suppresses() {
        // テスト項目: Display ポリシーではエコーは抑制されない
        // given (前提条件):
        let mut tracker = EchoTracker::new(EchoPolicy::Display);
        tracker.record_sent(&alice(), "hi", Timestamp::new(0));

        // when (操作):
        let suppressed = tracker.take_echo(&alice(), "hi", Timestamp::new(10));

        // then (期待する結果):
        assert!(!suppressed);
        assert_eq!(tracker.pending_len(), 0);
    }

    #[test]
    fn test_suppress_matching_echo_once() {
        // テスト項目: 一致するエコーは 1 回だけ抑制される
        // given (前提条件):
        let mut tracker = suppressing();
        tracker.record_sent(&alice(), "hi", Timestamp::new(0));

        // when (操作):
        let first = tracker.take_echo(&alice(), "hi", Timestamp::new(100));
        let second = tracker.take_echo(&alice(), "hi", Timestamp::new(200));

        // then (期待する結果):
        assert!(first);
        assert!(!second);
    }

    #[test]
    fn test_other_sender_is_not_an_echo() {
        // テスト項目: 本文が同じでも送信者が違えばエコーとみなさない
        // given (前提条件):
        let mut tracker = suppressing();
        tracker.record_sent(&alice(), "hi", Timestamp::new(0));

        // when (操作):
        let suppressed =
            tracker.take_echo(&Sender::User("Bob".to_string()), "hi", Timestamp::new(100));

        // then (期待する結果):
        assert!(!suppressed);
        assert_eq!(tracker.pending_len(), 1);
    }

    #[test]
    fn test_expired_send_is_not_suppressed() {
        // テスト項目: ウィンドウを過ぎたエコーは抑制されず、保留中の送信も破棄される
        // given (前提条件):
        let mut tracker = suppressing();
        tracker.record_sent(&alice(), "hi", Timestamp::new(0));

        // when (操作):
        let suppressed = tracker.take_echo(&alice(), "hi", Timestamp::new(5_001));

        // then (期待する結果):
        assert!(!suppressed);
        assert_eq!(tracker.pending_len(), 0);
    }

    #[test]
    fn test_unanswered_sends_are_pruned_on_record() {
        // テスト項目: エコーが届かないまま送信を続けても、ウィンドウを過ぎた保留は次の送信時に破棄される
        // given (前提条件):
        let mut tracker = suppressing();

        // when (操作):
        for i in 0..1_000 {
            tracker.record_sent(&alice(), "hi", Timestamp::new(i * 6_000));
        }

        // then (期待する結果):
        assert_eq!(tracker.pending_len(), 1);
    }

    #[test]
    fn test_pending_sends_are_bounded() {
        // テスト項目: ウィンドウ内の送信が大量にあっても保留数は上限を超えず、古いものから破棄される
        // given (前提条件):
        let mut tracker = suppressing();
        tracker.record_sent(&alice(), "first", Timestamp::new(0));

        // when (操作):
        for i in 0..MAX_PENDING_ECHOES {
            tracker.record_sent(&alice(), &format!("m{i}"), Timestamp::new(1));
        }

        // then (期待する結果):
        assert_eq!(tracker.pending_len(), MAX_PENDING_ECHOES);
        assert!(!tracker.take_echo(&alice(), "first", Timestamp::new(2)));
        assert!(tracker.take_echo(&alice(), "m0", Timestamp::new(2)));
    }
}
