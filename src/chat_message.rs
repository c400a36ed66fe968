use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;
use uuid::Uuid;

/// One entry in the chat transcript. Messages are append-only; the single
/// permitted mutation is resolving a loading placeholder into its final text.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    id: String,
    content: String,
    from_user: bool,
    timestamp: DateTime<Local>,
    loading: bool,
}

impl ChatMessage {
    pub fn from_user(content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            from_user: true,
            timestamp: Local::now(),
            loading: false,
        }
    }

    pub fn from_susan(content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            from_user: false,
            timestamp: Local::now(),
            loading: false,
        }
    }

    /// A placeholder marking an in-flight request.
    pub fn loading_placeholder() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: String::new(),
            from_user: false,
            timestamp: Local::now(),
            loading: true,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_from_user(&self) -> bool {
        self.from_user
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Replaces the placeholder's text with the final reply or error message.
    /// Terminal transition; resolving a non-loading message is a no-op.
    pub fn resolve(&mut self, content: String) {
        if !self.loading {
            return;
        }
        self.content = content;
        self.loading = false;
    }

    pub fn render(&self, area: Rect) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let base_style = self.get_base_style();

        self.render_header(&mut lines, base_style);
        self.render_content(&mut lines, area, base_style);
        self.render_footer(&mut lines, base_style);

        lines
    }

    fn get_base_style(&self) -> Style {
        let mut style = Style::default().fg(if self.from_user {
            Color::Rgb(255, 223, 128)
        } else {
            Color::Rgb(144, 238, 144)
        });

        if self.loading {
            style = style.add_modifier(Modifier::DIM);
        }

        style
    }

    fn render_header(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        let timestamp = self.timestamp.format("%H:%M").to_string();
        let indent = self.indent();
        let who = if self.from_user { "You" } else { "Susan" };

        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("┌─".to_string(), style),
            Span::styled(who.to_string(), style.add_modifier(Modifier::BOLD)),
            Span::styled(" ".to_string(), style),
            Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
        ]));
    }

    fn render_content(&self, lines: &mut Vec<Line<'static>>, area: Rect, style: Style) {
        let indent = self.indent();

        if self.loading {
            lines.push(Line::from(vec![
                Span::styled(indent.to_string(), style),
                Span::styled("│ ".to_string(), style),
                Span::styled("…".to_string(), style.add_modifier(Modifier::DIM)),
            ]));
            return;
        }

        let wrap_width = (area.width as usize).saturating_sub(4).max(1);
        for wrapped_line in wrap(&self.content, wrap_width) {
            lines.push(Line::from(vec![
                Span::styled(indent.to_string(), style),
                Span::styled("│ ".to_string(), style),
                Span::styled(wrapped_line.to_string(), style),
            ]));
        }
    }

    fn render_footer(&self, lines: &mut Vec<Line<'static>>, style: Style) {
        lines.push(Line::from(vec![
            Span::styled(self.indent().to_string(), style),
            Span::styled("╰─".to_string(), style),
        ]));
    }

    fn indent(&self) -> &'static str {
        if self.from_user {
            "  "
        } else {
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_resolves_once() {
        let mut msg = ChatMessage::loading_placeholder();
        assert!(msg.is_loading());
        assert!(msg.content().is_empty());

        msg.resolve("Hi there".to_string());
        assert!(!msg.is_loading());
        assert_eq!(msg.content(), "Hi there");

        // Second resolve must not overwrite the terminal state.
        msg.resolve("late body".to_string());
        assert_eq!(msg.content(), "Hi there");
    }

    #[test]
    fn test_resolve_ignores_non_placeholder() {
        let mut msg = ChatMessage::from_user("hello".to_string());
        msg.resolve("overwritten".to_string());
        assert_eq!(msg.content(), "hello");
    }

    #[test]
    fn test_render_wraps_long_content() {
        let msg = ChatMessage::from_susan("word ".repeat(40).trim_end().to_string());
        let area = Rect::new(0, 0, 24, 10);
        let lines = msg.render(area);
        // Header + several wrapped lines + footer.
        assert!(lines.len() > 3);
    }
}
