//! Terminal chat loop.
//!
//! Line editing is blocking, so `rustyline` runs on its own thread and hands
//! finished lines to the async loop over an mpsc channel. The loop selects
//! between user input and session updates and prints each new log entry.
//! `/history` reprints the whole log grouped by sender.

use std::sync::Arc;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use super::render::{render_by_id, render_log, render_status, terminal_width};
use crate::{
    config::ClientConfig,
    domain::{DisplayName, MessageId, Transport},
    error::ClientError,
    infrastructure::{repository::FileIdentityRepository, transport::WebSocketTransport},
    usecase::{ChatSession, IdentityStore, SessionUpdate},
};

/// Leaves the chat
pub const QUIT_COMMAND: &str = "/quit";

/// Reprints the log
pub const HISTORY_COMMAND: &str = "/history";

const PROMPT: &str = "> ";

/// Run the interactive client until `/quit` or end of input.
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let repository = Arc::new(FileIdentityRepository::new(config.identity_file.clone()));
    let identity_store = IdentityStore::new(repository);
    let (transport, events) = WebSocketTransport::new(config.transport.clone());
    let mut session =
        ChatSession::new(identity_store, transport, events).with_echo_policy(config.echo_policy);

    let resolved = session.resolve_identity().await;
    let identity = match resolved.name {
        Some(name) => name,
        None => {
            let answer = prompt_name(resolved.suggestion).await?;
            session.commit_identity(&answer).await
        }
    };
    println!("Chatting as {identity}. Type {QUIT_COMMAND} to leave.");

    let mut lines = spawn_line_reader();
    let width = terminal_width();

    session.connect().await;

    loop {
        tokio::select! {
            line = lines.recv() => match line {
                Some(line) if line.trim() == QUIT_COMMAND => break,
                Some(line) if line.trim() == HISTORY_COMMAND => {
                    print_lines(render_log(session.snapshot(), width));
                }
                Some(line) => {
                    if let Some(message) = session.send_text(&line) {
                        print_entry(&session, message.id, width);
                    }
                }
                None => break,
            },
            update = session.next_update() => match update {
                Some(SessionUpdate::StateChanged(state)) => println!("{}", render_status(&state)),
                Some(SessionUpdate::MessageAppended(message)) => {
                    print_entry(&session, message.id, width);
                }
                None => break,
            },
        }
    }

    session.close();
    tracing::info!("Left the chat");
    Ok(())
}

/// Ask for a display name on a blocking thread. Empty input accepts the
/// suggestion.
async fn prompt_name(suggestion: DisplayName) -> Result<String, ClientError> {
    let answer = tokio::task::spawn_blocking(move || {
        let mut editor = DefaultEditor::new()?;
        println!("We've suggested a fun name for you, but feel free to change it!");
        editor.readline(&format!("Your name [{suggestion}]: "))
    })
    .await??;
    Ok(answer)
}

/// Read lines on a dedicated thread. The channel closes on end of input.
fn spawn_line_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                tracing::error!("Failed to open terminal input: {}", e);
                return;
            }
        };
        loop {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = editor.add_history_entry(line.as_str());
                    }
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::warn!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

fn print_entry<T: Transport>(session: &ChatSession<T>, id: MessageId, width: usize) {
    print_lines(render_by_id(session.snapshot(), id, width));
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
