//! Query matching and response composition.
//!
//! [`ResponseEngine::generate_response`] turns one free-text query into one
//! formatted response string. It never fails: unmatched queries get a fixed
//! fallback message, and tokenizer failures silently downgrade to a
//! whitespace word count.

use std::sync::Arc;

use codetutor_shared::ConversationTurn;
use codetutor_tokenizer::{TokenCounter, whitespace_count};

use crate::history::History;
use crate::store::{KnowledgeStore, Topic};

/// Label printed before the explanation paragraph.
const EXPLANATION_LABEL: &str = "Explanation: ";

/// The query-matching and response-composition engine.
///
/// One engine serves one conversation: the bounded history is owned here and
/// appended after each exchange. The [`KnowledgeStore`] is shared read-only;
/// multiple engines (one per session) may hold the same `Arc`.
pub struct ResponseEngine {
    store: Arc<KnowledgeStore>,
    tokenizer: Option<Box<dyn TokenCounter + Send>>,
    history: History,
}

impl ResponseEngine {
    /// Create an engine over a loaded store.
    ///
    /// `tokenizer` is the optional diagnostic token counter; `None` means the
    /// whitespace fallback is always used.
    pub fn new(
        store: Arc<KnowledgeStore>,
        tokenizer: Option<Box<dyn TokenCounter + Send>>,
        max_history: usize,
    ) -> Self {
        Self {
            store,
            tokenizer,
            history: History::new(max_history),
        }
    }

    /// Answer one query. Always returns a non-empty string.
    pub fn generate_response(&mut self, query: &str) -> String {
        let token_count = self.diagnostic_token_count(query);

        let response = match self.matched_topic(query) {
            Some(topic) => {
                tracing::debug!(topic = %topic.id, token_count, "query matched");
                format!(
                    "{}\n\n{EXPLANATION_LABEL}{}\n\n[Processed {token_count} tokens]",
                    topic.snippet, topic.explanation
                )
            }
            None => {
                tracing::debug!(token_count, "no topic matched");
                format!(
                    "Sorry, I don't have code for '{query}'. \
                     Try asking about Fibonacci, BankAccount class, file ops, etc."
                )
            }
        };

        self.history.push(ConversationTurn::now(query, &response));
        response
    }

    /// First topic in table order with any pattern matching the lowercased
    /// query, or `None`. The scan stops at the first hit.
    pub fn matched_topic(&self, query: &str) -> Option<&Topic> {
        let query_lower = query.to_lowercase();
        self.store
            .entries()
            .iter()
            .find(|topic| topic.matches(&query_lower))
    }

    /// Advisory token count; any tokenizer failure falls back to a whitespace
    /// word count and never propagates.
    fn diagnostic_token_count(&self, query: &str) -> usize {
        match &self.tokenizer {
            Some(counter) => counter.token_count(query).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "tokenizer failed, using word count");
                whitespace_count(query)
            }),
            None => whitespace_count(query),
        }
    }

    /// The shared topic table.
    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    /// The retained conversation history, oldest first.
    pub fn history(&self) -> &History {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codetutor_shared::{Result, TopicDef, TutorError};

    struct FailingCounter;

    impl TokenCounter for FailingCounter {
        fn token_count(&self, _text: &str) -> Result<usize> {
            Err(TutorError::Tokenizer("model unavailable".into()))
        }
    }

    struct FixedCounter(usize);

    impl TokenCounter for FixedCounter {
        fn token_count(&self, _text: &str) -> Result<usize> {
            Ok(self.0)
        }
    }

    fn def(id: &str, patterns: &[&str]) -> TopicDef {
        TopicDef {
            id: id.into(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            snippet: format!("```python\n# {id}\n```"),
            explanation: format!("explains {id}"),
        }
    }

    fn engine_with(defs: Vec<TopicDef>, tokenizer: Option<Box<dyn TokenCounter + Send>>) -> ResponseEngine {
        let store = Arc::new(KnowledgeStore::load(defs).expect("load"));
        ResponseEngine::new(store, tokenizer, 5)
    }

    fn builtin_engine() -> ResponseEngine {
        engine_with(codetutor_topics::builtin_topics(), None)
    }

    #[test]
    fn matched_response_composition() {
        let mut engine = engine_with(vec![def("fibonacci", &["fibonacci"])], Some(Box::new(FixedCounter(7))));
        let response = engine.generate_response("Write a recursive Fibonacci function");

        assert!(response.starts_with("```python\n# fibonacci\n```"));
        assert!(response.contains("\n\nExplanation: explains fibonacci\n\n"));
        assert!(response.ends_with("[Processed 7 tokens]"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let mut engine = builtin_engine();
        let upper = engine.generate_response("FIBONACCI sequence");
        let lower = engine.generate_response("fibonacci sequence");
        // Same topic selected; only the token count line could differ, and the
        // word count is identical here too.
        assert_eq!(upper, lower);
    }

    #[test]
    fn first_topic_in_table_order_wins() {
        let mut engine = engine_with(
            vec![def("first", &["shared"]), def("second", &["shared", "query"])],
            None,
        );
        let response = engine.generate_response("a shared query");
        assert!(response.contains("# first"));
        assert!(!response.contains("# second"));
    }

    #[test]
    fn unmatched_query_gets_fallback_with_verbatim_case() {
        let mut engine = builtin_engine();
        let response = engine.generate_response("ASDKJASDKJ nonsense");
        assert!(response.starts_with("Sorry, I don't have code for 'ASDKJASDKJ nonsense'."));
        assert!(response.contains("Try asking about Fibonacci"));
    }

    #[test]
    fn failing_tokenizer_downgrades_to_word_count() {
        let mut engine = engine_with(
            vec![def("abc", &["a b c"])],
            Some(Box::new(FailingCounter)),
        );
        let response = engine.generate_response("a b c");
        assert!(response.ends_with("[Processed 3 tokens]"));
    }

    #[test]
    fn empty_query_falls_through_to_fallback() {
        let mut engine = builtin_engine();
        let response = engine.generate_response("");
        assert!(response.starts_with("Sorry, I don't have code for ''."));
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn always_returns_non_empty() {
        let mut engine = builtin_engine();
        for query in ["", "fibonacci", "%^&*", "(((", "merge two dictionaries"] {
            assert!(!engine.generate_response(query).is_empty());
        }
    }

    #[test]
    fn regex_metacharacters_in_query_are_safe() {
        let mut engine = builtin_engine();
        // Only ever the subject of a search, never compiled.
        let response = engine.generate_response("what does (a|b)*+ mean?");
        assert!(response.starts_with("Sorry,"));
    }

    #[test]
    fn history_is_bounded_fifo() {
        let mut engine = builtin_engine();
        for n in 0..8 {
            engine.generate_response(&format!("query {n}"));
        }

        assert_eq!(engine.history().len(), 5);
        let queries: Vec<&str> = engine.history().turns().map(|t| t.query.as_str()).collect();
        assert_eq!(queries, ["query 3", "query 4", "query 5", "query 6", "query 7"]);
    }

    #[test]
    fn builtin_scenario_fibonacci() {
        let mut engine = builtin_engine();
        let response = engine.generate_response("Write a recursive Fibonacci function");
        assert!(response.starts_with("```python"));
        assert!(response.contains("def fibonacci"));
        // No tokenizer configured: the footer is the whitespace word count.
        assert!(response.ends_with("[Processed 5 tokens]"));
    }

    #[test]
    fn matched_topic_exposes_the_scan() {
        let engine = builtin_engine();
        assert_eq!(
            engine.matched_topic("check if a number is prime").map(|t| t.id.as_str()),
            Some("prime_numbers")
        );
        assert!(engine.matched_topic("completely unrelated").is_none());
    }
}
