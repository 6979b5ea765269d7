//! Core domain types for the CodeTutor knowledge table and conversations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TopicDef
// ---------------------------------------------------------------------------

/// One topic record as supplied by configuration — the input shape for
/// `KnowledgeStore::load`.
///
/// `patterns` are regular expressions authored for lowercase input; queries
/// are lowercased before matching. Definition order is load-bearing: the
/// earliest matching topic in table order wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicDef {
    /// Unique stable identifier (e.g., `fibonacci`).
    pub id: String,
    /// Detection patterns, tried in listed order.
    pub patterns: Vec<String>,
    /// Canned code example. May contain fenced-code markers for the
    /// presentation layer; stored and concatenated verbatim by the core.
    pub snippet: String,
    /// Explanation paragraph shown after the snippet.
    pub explanation: String,
}

/// Root structure of a user-supplied topic TOML file (`[[topics]]` records).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicFile {
    /// Topic records, in file order.
    #[serde(default)]
    pub topics: Vec<TopicDef>,
}

// ---------------------------------------------------------------------------
// ConversationTurn
// ---------------------------------------------------------------------------

/// One completed exchange, appended to the engine's bounded history.
///
/// The history is write-only in the current feature set; matching never
/// consults it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// The user's query, verbatim.
    pub query: String,
    /// The composed response text.
    pub response: String,
    /// When the exchange happened.
    pub asked_at: DateTime<Utc>,
}

impl ConversationTurn {
    /// Record an exchange stamped with the current time.
    pub fn now(query: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            response: response.into(),
            asked_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_def_toml_roundtrip() {
        let def = TopicDef {
            id: "fibonacci".into(),
            patterns: vec!["fibonacci".into(), "recursion".into()],
            snippet: "```python\nfib\n```".into(),
            explanation: "Recursive Fibonacci.".into(),
        };
        let file = TopicFile { topics: vec![def] };

        let toml_str = toml::to_string_pretty(&file).expect("serialize");
        let parsed: TopicFile = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.topics.len(), 1);
        assert_eq!(parsed.topics[0].id, "fibonacci");
        assert_eq!(parsed.topics[0].patterns.len(), 2);
    }

    #[test]
    fn topic_file_fixture_validates() {
        let fixture = std::fs::read_to_string("../../../fixtures/toml/topics.fixture.toml")
            .expect("read fixture");
        let parsed: TopicFile = toml::from_str(&fixture).expect("parse fixture topic file");
        assert_eq!(parsed.topics.len(), 2);
        assert_eq!(parsed.topics[0].id, "hello_world");
        assert!(!parsed.topics[0].patterns.is_empty());
    }

    #[test]
    fn conversation_turn_stamps_time() {
        let turn = ConversationTurn::now("q", "r");
        assert_eq!(turn.query, "q");
        assert_eq!(turn.response, "r");
        assert!(turn.asked_at <= Utc::now());
    }
}
