//! Bounded conversation history.
//!
//! Append-only FIFO of the last `max_turns` exchanges. Matching never reads
//! it; it exists so a future context-aware mode has the data to work with.

use std::collections::VecDeque;

use codetutor_shared::ConversationTurn;

/// Bounded FIFO of completed exchanges, oldest dropped first.
#[derive(Debug)]
pub struct History {
    turns: VecDeque<ConversationTurn>,
    max_turns: usize,
}

impl History {
    /// Create an empty history retaining at most `max_turns` exchanges.
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(max_turns),
            max_turns,
        }
    }

    /// Append a turn, dropping the oldest once the bound is exceeded.
    pub fn push(&mut self, turn: ConversationTurn) {
        if self.max_turns == 0 {
            return;
        }
        if self.turns.len() == self.max_turns {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    /// Retained turns, oldest first.
    pub fn turns(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    /// Number of retained turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turns are retained.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(n: usize) -> ConversationTurn {
        ConversationTurn::now(format!("q{n}"), format!("r{n}"))
    }

    #[test]
    fn retains_only_the_last_max_turns() {
        let mut history = History::new(3);
        for n in 0..5 {
            history.push(turn(n));
        }

        assert_eq!(history.len(), 3);
        let queries: Vec<&str> = history.turns().map(|t| t.query.as_str()).collect();
        assert_eq!(queries, ["q2", "q3", "q4"]);
    }

    #[test]
    fn under_bound_keeps_everything() {
        let mut history = History::new(5);
        history.push(turn(0));
        history.push(turn(1));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn zero_bound_stores_nothing() {
        let mut history = History::new(0);
        history.push(turn(0));
        assert!(history.is_empty());
    }
}
