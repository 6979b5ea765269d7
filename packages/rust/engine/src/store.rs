//! The immutable topic table the response engine matches against.
//!
//! Built once at startup from [`TopicDef`] records, validated eagerly, and
//! never mutated afterwards. Safe to share read-only across threads.

use codetutor_shared::{Result, TopicDef, TutorError};
use regex::Regex;

// ---------------------------------------------------------------------------
// Topic
// ---------------------------------------------------------------------------

/// One compiled topic entry.
#[derive(Debug)]
pub struct Topic {
    /// Unique stable identifier.
    pub id: String,
    /// Detection patterns, compiled once at load. Tried in listed order;
    /// any match selects the topic.
    pub patterns: Vec<Regex>,
    /// Canned code example, stored verbatim.
    pub snippet: String,
    /// Explanation paragraph.
    pub explanation: String,
}

impl Topic {
    /// Whether any pattern matches somewhere within the (lowercased) query.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(query_lower))
    }
}

// ---------------------------------------------------------------------------
// KnowledgeStore
// ---------------------------------------------------------------------------

/// The full topic table, in definition order.
///
/// Definition order is load-bearing: the engine scans [`entries`] front to
/// back and the first matching topic wins.
///
/// [`entries`]: KnowledgeStore::entries
#[derive(Debug)]
pub struct KnowledgeStore {
    topics: Vec<Topic>,
}

impl KnowledgeStore {
    /// Build the store from topic records, validating eagerly.
    ///
    /// Fails on an empty table, an entry with no patterns, a duplicate id, or
    /// a pattern that does not compile. Startup must not proceed with a
    /// partially valid table, so errors here are fatal to the caller.
    pub fn load(defs: Vec<TopicDef>) -> Result<Self> {
        if defs.is_empty() {
            return Err(TutorError::topics("topic table is empty"));
        }

        let mut topics = Vec::with_capacity(defs.len());
        let mut seen = std::collections::HashSet::new();

        for def in defs {
            if !seen.insert(def.id.clone()) {
                return Err(TutorError::topics(format!(
                    "duplicate topic id '{}'",
                    def.id
                )));
            }
            if def.patterns.is_empty() {
                return Err(TutorError::topics(format!(
                    "topic '{}' has an empty pattern list",
                    def.id
                )));
            }

            let patterns = def
                .patterns
                .iter()
                .map(|p| {
                    Regex::new(p).map_err(|e| {
                        TutorError::topics(format!(
                            "topic '{}': invalid pattern '{p}': {e}",
                            def.id
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            topics.push(Topic {
                id: def.id,
                patterns,
                snippet: def.snippet,
                explanation: def.explanation,
            });
        }

        tracing::debug!(topics = topics.len(), "knowledge store loaded");
        Ok(Self { topics })
    }

    /// Topics in their stable definition order.
    pub fn entries(&self) -> &[Topic] {
        &self.topics
    }

    /// Look up a topic by id.
    pub fn get(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    /// Number of topics in the table.
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Whether the table is empty (never true for a loaded store).
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(id: &str, patterns: &[&str]) -> TopicDef {
        TopicDef {
            id: id.into(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            snippet: format!("snippet for {id}"),
            explanation: format!("explanation for {id}"),
        }
    }

    #[test]
    fn load_preserves_definition_order() {
        let store = KnowledgeStore::load(vec![
            def("b", &["beta"]),
            def("a", &["alpha"]),
            def("c", &["gamma"]),
        ])
        .expect("load");

        let ids: Vec<&str> = store.entries().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
        assert_eq!(store.len(), 3);
        assert!(store.get("a").is_some());
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn empty_table_rejected() {
        let err = KnowledgeStore::load(vec![]).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn empty_pattern_list_rejected() {
        let err = KnowledgeStore::load(vec![def("a", &[])]).unwrap_err();
        assert!(err.to_string().contains("empty pattern list"));
    }

    #[test]
    fn duplicate_id_rejected() {
        let err =
            KnowledgeStore::load(vec![def("a", &["x"]), def("a", &["y"])]).unwrap_err();
        assert!(err.to_string().contains("duplicate topic id 'a'"));
    }

    #[test]
    fn malformed_pattern_rejected() {
        let err = KnowledgeStore::load(vec![def("a", &["[unclosed"])]).unwrap_err();
        assert!(err.to_string().contains("invalid pattern"));
    }

    #[test]
    fn matching_is_substring_search() {
        let store = KnowledgeStore::load(vec![def("fib", &["fibonacci"])]).expect("load");
        let topic = store.get("fib").unwrap();
        assert!(topic.matches("write a recursive fibonacci function"));
        assert!(!topic.matches("write a sorting function"));
    }

    #[test]
    fn builtin_table_loads() {
        let store = KnowledgeStore::load(codetutor_topics::builtin_topics()).expect("load");
        assert_eq!(store.len(), 9);
        assert_eq!(store.entries()[0].id, "oop_classes");
    }
}
