use crate::chat_message::ChatMessage;
use crate::errors::SusanError;
use crate::status_indicator::StatusIndicator;

pub const GREETING: &str =
    "Hello! I'm Susan, your pocket therapist. How have you been feeling today?";

/// A resolved model call, routed back to the placeholder it belongs to.
#[derive(Debug)]
pub struct ReplyEvent {
    pub message_id: String,
    pub result: Result<String, SusanError>,
}

/// Chat surface state. Submissions are independent; several placeholders can
/// be in flight at once and each reply finds its own placeholder by id.
pub struct App {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub scroll: u16,
    pub status_indicator: StatusIndicator,
    pub should_quit: bool,
    in_flight: usize,
}

impl App {
    pub fn new() -> App {
        App {
            messages: vec![ChatMessage::from_susan(GREETING.to_string())],
            input: String::new(),
            scroll: 0,
            status_indicator: StatusIndicator::new(),
            should_quit: false,
            in_flight: 0,
        }
    }

    /// Appends the trimmed input as a user message plus a loading
    /// placeholder, and returns the prompt with the placeholder's id.
    /// Returns `None` for blank input.
    pub fn submit_input(&mut self) -> Option<(String, String)> {
        let prompt = self.input.drain(..).collect::<String>().trim().to_string();
        if prompt.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::from_user(prompt.clone()));

        let placeholder = ChatMessage::loading_placeholder();
        let placeholder_id = placeholder.id().to_string();
        self.messages.push(placeholder);

        self.in_flight += 1;
        self.status_indicator.set_busy(self.in_flight);
        self.scroll_to_bottom();

        Some((prompt, placeholder_id))
    }

    /// Resolves the matching placeholder with the reply text or the error's
    /// display message. Unknown ids are ignored.
    pub fn apply_reply(&mut self, event: ReplyEvent) {
        let content = match event.result {
            Ok(text) => text,
            Err(e) => e.to_string(),
        };

        if let Some(msg) = self
            .messages
            .iter_mut()
            .find(|m| m.id() == event.message_id)
        {
            msg.resolve(content);
            self.in_flight = self.in_flight.saturating_sub(1);
            self.status_indicator.set_busy(self.in_flight);
            self.scroll_to_bottom();
        }
    }

    pub fn is_processing(&self) -> bool {
        self.in_flight > 0
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    fn scroll_to_bottom(&mut self) {
        // Clamped against the rendered height in chat_view.
        self.scroll = u16::MAX;
    }
}
