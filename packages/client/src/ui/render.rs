//! Plain-text rendering of the message log.
//!
//! System notices are centered, local messages right-aligned and received
//! messages left-aligned. The sender label is printed only at the start of a
//! group of consecutive messages from the same sender.

use crate::domain::{ConnectionState, Message, MessageId, Origin, group_by_sender, starts_group};

pub const DEFAULT_WIDTH: usize = 72;

/// Terminal width from `COLUMNS`, falling back to [`DEFAULT_WIDTH`].
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|columns| columns.parse().ok())
        .filter(|&columns: &usize| columns >= 20)
        .unwrap_or(DEFAULT_WIDTH)
}

/// Lines for the entry at `index` of `messages`.
pub fn render_entry(messages: &[Message], index: usize, width: usize) -> Vec<String> {
    match messages.get(index) {
        Some(message) => render_message(message, starts_group(messages, index), width),
        None => Vec::new(),
    }
}

/// Lines for the entry with `id`, labelled relative to its predecessor.
pub fn render_by_id(messages: &[Message], id: MessageId, width: usize) -> Vec<String> {
    match messages.iter().position(|message| message.id == id) {
        Some(index) => render_entry(messages, index, width),
        None => Vec::new(),
    }
}

/// Lines for the whole log, one label per sender group.
pub fn render_log(messages: &[Message], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for group in group_by_sender(messages) {
        for (position, message) in group.messages.iter().enumerate() {
            let show_label = position == 0 && !group.is_system();
            lines.extend(render_message(message, show_label, width));
        }
    }
    lines
}

pub fn render_message(message: &Message, show_label: bool, width: usize) -> Vec<String> {
    if message.is_system_notice() {
        return vec![center(&format!("-- {} --", message.body), width)];
    }

    let align: fn(&str, usize) -> String = match message.origin {
        Origin::Local => align_right,
        Origin::Received => align_left,
    };

    let mut lines = Vec::with_capacity(2);
    if show_label {
        lines.push(align(message.sender.name(), width));
    }
    lines.push(align(&message.body, width));
    lines
}

pub fn render_status(state: &ConnectionState) -> String {
    format!("[{state}]")
}

fn center(text: &str, width: usize) -> String {
    format!("{text:^width$}").trim_end().to_string()
}

fn align_right(text: &str, width: usize) -> String {
    format!("{text:>width$}")
}

fn align_left(text: &str, _width: usize) -> String {
    format!("  {text}")
}
