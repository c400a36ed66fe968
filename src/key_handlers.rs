use crate::api::OllamaClient;
use crate::app::{App, ReplyEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Key dispatch for the chat screen. Enter fires an independent request per
/// submission; nothing blocks the input loop while a reply is pending.
pub fn handle_chat_input(
    key: KeyEvent,
    app: &mut App,
    client: &Arc<OllamaClient>,
    reply_tx: &mpsc::Sender<ReplyEvent>,
) {
    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Enter => {
            if let Some((prompt, placeholder_id)) = app.submit_input() {
                let client = Arc::clone(client);
                let reply_tx = reply_tx.clone();
                tokio::spawn(async move {
                    let result = client.generate_response(&prompt).await;
                    let _ = reply_tx
                        .send(ReplyEvent {
                            message_id: placeholder_id,
                            result,
                        })
                        .await;
                });
            }
        }
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.should_quit = true,
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    _ => {}
                }
            } else {
                app.input.push(c);
            }
        }
        _ => {}
    }
}
