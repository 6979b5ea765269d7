//! Topics screen — browse the loaded table with a snippet preview.

use std::sync::Arc;

use codetutor_engine::KnowledgeStore;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::widgets::fenced_lines;

pub(crate) struct TopicsScreen {
    store: Arc<KnowledgeStore>,
    selected: usize,
}

impl TopicsScreen {
    pub(crate) fn new(store: Arc<KnowledgeStore>) -> Self {
        Self { store, selected: 0 }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([
                Constraint::Length(30), // Topic list
                Constraint::Min(1),     // Preview
            ])
            .split(area);

        let items: Vec<ListItem> = self
            .store
            .entries()
            .iter()
            .enumerate()
            .map(|(i, topic)| {
                let style = if i == self.selected {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let prefix = if i == self.selected { "▸ " } else { "  " };
                ListItem::new(format!("{prefix}{}", topic.id)).style(style)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Topics ({}) ", self.store.len())),
        );
        f.render_widget(list, chunks[0]);

        // Preview pane for the selected topic.
        let preview = match self.store.entries().get(self.selected) {
            Some(topic) => {
                let mut lines = fenced_lines(&topic.snippet, Style::default());
                lines.push(Line::from(""));
                lines.extend(fenced_lines(&topic.explanation, Style::default()));
                lines.push(Line::from(""));
                lines.push(Line::styled(
                    format!("Matched by {} pattern(s)", topic.patterns.len()),
                    Style::default().fg(Color::DarkGray),
                ));
                Paragraph::new(lines)
            }
            None => Paragraph::new("No topic selected."),
        };

        let title = self
            .store
            .entries()
            .get(self.selected)
            .map(|t| format!(" {} ", t.id))
            .unwrap_or_else(|| " Preview ".to_string());

        f.render_widget(
            preview
                .wrap(ratatui::widgets::Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title(title)),
            chunks[1],
        );
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.store.len() {
                    self.selected += 1;
                }
            }
            _ => {}
        }
    }
}
