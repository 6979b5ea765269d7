//! Topic table sources for CodeTutor.
//!
//! The table the engine matches against comes from two places: the built-in
//! entries in [`builtin`], and optionally a user-supplied TOML file appended
//! after them. Structural validation (non-empty patterns, unique ids, regex
//! compilation) happens in `KnowledgeStore::load`, not here.

pub mod builtin;

use std::path::Path;

use codetutor_shared::{Result, TopicDef, TopicFile, TutorError};

pub use builtin::builtin_topics;

/// Parse a `[[topics]]` TOML file into topic records, in file order.
pub fn load_topic_file(path: &Path) -> Result<Vec<TopicDef>> {
    let content = std::fs::read_to_string(path).map_err(|e| TutorError::io(path, e))?;

    let file: TopicFile = toml::from_str(&content).map_err(|e| {
        TutorError::topics(format!("failed to parse {}: {e}", path.display()))
    })?;

    tracing::debug!(
        path = %path.display(),
        topics = file.topics.len(),
        "loaded user topic file"
    );
    Ok(file.topics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_topic_file_loads() {
        let topics =
            load_topic_file(Path::new("../../../fixtures/toml/topics.fixture.toml"))
                .expect("load fixture");
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].id, "hello_world");
        assert!(topics[1].snippet.contains("```python"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_topic_file(Path::new("/nonexistent/topics.toml")).unwrap_err();
        assert!(matches!(err, TutorError::Io { .. }));
    }

    #[test]
    fn malformed_toml_is_topics_error() {
        let dir = std::env::temp_dir().join("codetutor-topics-test");
        std::fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join("bad.toml");
        std::fs::write(&path, "[[topics]]\nid = 42\n").expect("write");

        let err = load_topic_file(&path).unwrap_err();
        assert!(matches!(err, TutorError::Topics { .. }));
    }
}
