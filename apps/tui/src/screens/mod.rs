//! TUI screen definitions.
//!
//! Each screen corresponds to a tab in the TUI and encapsulates its
//! own state and rendering logic.

mod chat;
mod topics;

use std::fmt;
use std::sync::Arc;

use codetutor_engine::KnowledgeStore;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;

pub(crate) use chat::ChatScreen;
pub(crate) use topics::TopicsScreen;

/// Screen identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScreenId {
    Chat,
    Topics,
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chat => write!(f, "Chat"),
            Self::Topics => write!(f, "Topics"),
        }
    }
}

/// Per-screen state and behaviour.
pub(crate) struct Screen {
    pub id: ScreenId,
    pub chat: ChatScreen,
    pub topics: TopicsScreen,
}

impl Screen {
    pub(crate) fn new(id: ScreenId, store: Arc<KnowledgeStore>) -> Self {
        Self {
            id,
            chat: ChatScreen::new(),
            topics: TopicsScreen::new(store),
        }
    }

    /// Whether the current screen has an active text input field.
    pub(crate) fn is_editing(&self) -> bool {
        match self.id {
            ScreenId::Chat => self.chat.is_editing(),
            ScreenId::Topics => false,
        }
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        match self.id {
            ScreenId::Chat => self.chat.draw(f, area),
            ScreenId::Topics => self.topics.draw(f, area),
        }
    }

    /// Handle a key; returns a query when the chat screen submits one.
    pub(crate) fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<String> {
        match self.id {
            ScreenId::Chat => self.chat.handle_key(code, modifiers),
            ScreenId::Topics => {
                self.topics.handle_key(code, modifiers);
                None
            }
        }
    }
}
