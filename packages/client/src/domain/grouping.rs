//! Sender grouping for rendering.
//!
//! Consecutive messages from the same sender share one visible label. This is
//! derived from log order and never stored.

use super::{entity::Message, value_object::Sender};

/// A run of consecutive messages from one sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageGroup<'a> {
    pub sender: &'a Sender,
    pub messages: Vec<&'a Message>,
}

impl MessageGroup<'_> {
    pub fn is_system(&self) -> bool {
        self.sender.is_system()
    }
}

/// Split the log into runs of equal consecutive senders.
pub fn group_by_sender(messages: &[Message]) -> Vec<MessageGroup<'_>> {
    let mut groups: Vec<MessageGroup<'_>> = Vec::new();
    for message in messages {
        match groups.last_mut() {
            Some(group) if group.sender == &message.sender => group.messages.push(message),
            _ => groups.push(MessageGroup {
                sender: &message.sender,
                messages: vec![message],
            }),
        }
    }
    groups
}

/// Whether the message at `index` starts a new group (and shows a label).
pub fn starts_group(messages: &[Message], index: usize) -> bool {
    match index.checked_sub(1) {
        None => index < messages.len(),
        Some(prev) => match (messages.get(prev), messages.get(index)) {
            (Some(prev), Some(current)) => prev.sender != current.sender,
            _ => false,
        },
    }
}
