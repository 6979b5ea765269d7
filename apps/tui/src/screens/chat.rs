//! Chat screen — transcript, input line, and quick examples.

use chrono::Local;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::widgets::fenced_lines;

/// Canned prompts cycled into the input with Ctrl-E.
const QUICK_EXAMPLES: &[&str] = &[
    "Create a BankAccount class",
    "Write a recursive Fibonacci function",
    "Count lines in a text file",
    "Validate email addresses using regex",
    "Check if a number is prime",
    "Merge two dictionaries",
    "Write a list of strings to a file",
];

/// Who said a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    You,
    Tutor,
}

/// One transcript entry.
pub(crate) struct ChatMessage {
    pub role: Role,
    pub text: String,
    /// Wall-clock `HH:MM:SS` stamp taken when the message landed.
    pub timestamp: String,
}

impl ChatMessage {
    fn now(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        }
    }
}

pub(crate) struct ChatScreen {
    transcript: Vec<ChatMessage>,
    input: String,
    editing: bool,
    /// Lines scrolled up from the transcript bottom (0 = stick to bottom).
    scroll_up: u16,
    /// A query is in flight on the worker.
    pub waiting: bool,
    next_example: usize,
}

impl ChatScreen {
    pub(crate) fn new() -> Self {
        Self {
            transcript: Vec::new(),
            input: String::new(),
            editing: true,
            scroll_up: 0,
            waiting: false,
            next_example: 0,
        }
    }

    pub(crate) fn is_editing(&self) -> bool {
        self.editing
    }

    /// Record the tutor's reply and snap the view back to the bottom.
    pub(crate) fn push_reply(&mut self, response: String) {
        self.transcript.push(ChatMessage::now(Role::Tutor, response));
        self.waiting = false;
        self.scroll_up = 0;
    }

    /// Handle a key; returns the submitted query when Enter sends one.
    pub(crate) fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<String> {
        if self.editing {
            match code {
                KeyCode::Esc => self.editing = false,
                KeyCode::Enter => return self.submit(),
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Char('e') if modifiers.contains(KeyModifiers::CONTROL) => {
                    self.cycle_example();
                }
                KeyCode::Char(c) => self.input.push(c),
                KeyCode::Up => self.scroll_up = self.scroll_up.saturating_add(1),
                KeyCode::Down => self.scroll_up = self.scroll_up.saturating_sub(1),
                _ => {}
            }
        } else {
            match code {
                KeyCode::Enter => self.editing = true,
                KeyCode::Up | KeyCode::Char('k') => {
                    self.scroll_up = self.scroll_up.saturating_add(1)
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.scroll_up = self.scroll_up.saturating_sub(1)
                }
                _ => {}
            }
        }
        None
    }

    fn submit(&mut self) -> Option<String> {
        let query = self.input.trim().to_string();
        if query.is_empty() {
            return None;
        }
        self.transcript.push(ChatMessage::now(Role::You, &query));
        self.input.clear();
        self.waiting = true;
        self.scroll_up = 0;
        Some(query)
    }

    fn cycle_example(&mut self) {
        self.input = QUICK_EXAMPLES[self.next_example].to_string();
        self.next_example = (self.next_example + 1) % QUICK_EXAMPLES.len();
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Transcript
                Constraint::Length(3), // Input
                Constraint::Length(1), // Hint
            ])
            .split(area);

        // Transcript
        let mut lines: Vec<Line> = Vec::new();
        if self.transcript.is_empty() {
            lines.push(Line::from(""));
            lines.push(
                Line::from("Welcome to CodeTutor!").style(Style::default().add_modifier(Modifier::BOLD)),
            );
            lines.push(Line::from(
                "Ask about Python code, algorithms, OOP, files, regex, etc.",
            ));
            lines.push(Line::from("Ctrl-E cycles example questions into the input."));
        }
        for msg in &self.transcript {
            let (label, style) = match msg.role {
                Role::You => ("You", Style::default().fg(Color::Cyan)),
                Role::Tutor => ("Tutor", Style::default().fg(Color::Green)),
            };
            lines.push(Line::from(""));
            lines.push(Line::styled(
                format!("[{}] {label}:", msg.timestamp),
                style.add_modifier(Modifier::BOLD),
            ));
            lines.extend(fenced_lines(&msg.text, style));
        }
        if self.waiting {
            lines.push(Line::from(""));
            lines.push(Line::styled(
                "Thinking...",
                Style::default().fg(Color::DarkGray),
            ));
        }

        let height = chunks[0].height.saturating_sub(2);
        let total = lines.len() as u16;
        let offset = total
            .saturating_sub(height)
            .saturating_sub(self.scroll_up.min(total.saturating_sub(height)));

        let transcript = Paragraph::new(lines)
            .wrap(ratatui::widgets::Wrap { trim: false })
            .scroll((offset, 0))
            .block(Block::default().borders(Borders::ALL).title(" Conversation "));
        f.render_widget(transcript, chunks[0]);

        // Input
        let input_style = if self.editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let input = Paragraph::new(self.input.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" You ")
                .border_style(input_style),
        );
        f.render_widget(input, chunks[1]);

        // Hint
        let hint = if self.editing {
            "Enter to send · Ctrl-E example · Esc to leave input · ↑/↓ scroll"
        } else {
            "Enter to type · ↑/↓ scroll · Tab switch tab · q quit"
        };
        let hint_p = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(hint_p, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_submits_trimmed_input() {
        let mut screen = ChatScreen::new();
        for c in "  fibonacci  ".chars() {
            screen.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
        let query = screen.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(query.as_deref(), Some("fibonacci"));
        assert!(screen.waiting);
        assert!(screen.input.is_empty());
        assert_eq!(screen.transcript.len(), 1);
        assert_eq!(screen.transcript[0].role, Role::You);
    }

    #[test]
    fn empty_input_does_not_submit() {
        let mut screen = ChatScreen::new();
        assert!(screen.handle_key(KeyCode::Enter, KeyModifiers::NONE).is_none());
        assert!(screen.transcript.is_empty());
        assert!(!screen.waiting);
    }

    #[test]
    fn reply_clears_waiting() {
        let mut screen = ChatScreen::new();
        screen.waiting = true;
        screen.push_reply("answer".into());
        assert!(!screen.waiting);
        assert_eq!(screen.transcript.len(), 1);
        assert_eq!(screen.transcript[0].role, Role::Tutor);
    }

    #[test]
    fn ctrl_e_cycles_examples() {
        let mut screen = ChatScreen::new();
        screen.handle_key(KeyCode::Char('e'), KeyModifiers::CONTROL);
        let first = screen.input.clone();
        screen.handle_key(KeyCode::Char('e'), KeyModifiers::CONTROL);
        assert_ne!(screen.input, first);
        assert_eq!(first, QUICK_EXAMPLES[0]);
    }

    #[test]
    fn esc_leaves_editing() {
        let mut screen = ChatScreen::new();
        assert!(screen.is_editing());
        screen.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert!(!screen.is_editing());
        screen.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(screen.is_editing());
    }
}
