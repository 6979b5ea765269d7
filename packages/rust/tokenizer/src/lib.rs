//! Token counting for CodeTutor.
//!
//! The engine reports an advisory token count alongside each answer. The count
//! comes from a vocabulary loaded out of a local model directory when one is
//! configured; otherwise (or on any failure) the engine falls back to
//! [`whitespace_count`]. The count never influences matching.

use std::collections::HashSet;
use std::path::Path;

use codetutor_shared::{Result, TutorError};

/// Vocabulary file name inside a model directory.
const VOCAB_FILE_NAME: &str = "vocab.json";

// ---------------------------------------------------------------------------
// TokenCounter trait
// ---------------------------------------------------------------------------

/// Trait for token counting collaborators.
///
/// Implementations may fail (missing model files, malformed vocabulary);
/// callers are expected to degrade to a whitespace word count rather than
/// propagate the failure.
pub trait TokenCounter {
    /// Count the number of tokens in the given text.
    fn token_count(&self, text: &str) -> Result<usize>;
}

impl<T: TokenCounter + ?Sized> TokenCounter for &T {
    fn token_count(&self, text: &str) -> Result<usize> {
        (*self).token_count(text)
    }
}

/// Fallback count: whitespace-separated words.
pub fn whitespace_count(text: &str) -> usize {
    text.split_whitespace().count()
}

// ---------------------------------------------------------------------------
// VocabTokenizer
// ---------------------------------------------------------------------------

/// Token counter backed by a model vocabulary (`vocab.json`).
///
/// Counting is greedy longest-prefix matching per whitespace-separated word,
/// over the lowercased input. A leading character with no vocabulary entry
/// consumes one token. This approximates the model's BPE segmentation closely
/// enough for a diagnostic count without pulling in a full tokenizer runtime.
#[derive(Debug)]
pub struct VocabTokenizer {
    vocab: HashSet<String>,
    max_token_chars: usize,
}

impl VocabTokenizer {
    /// Load the vocabulary from `<model_dir>/vocab.json` (a token → id map).
    pub fn load(model_dir: &Path) -> Result<Self> {
        let path = model_dir.join(VOCAB_FILE_NAME);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            TutorError::Tokenizer(format!("cannot read {}: {e}", path.display()))
        })?;

        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content)
            .map_err(|e| {
                TutorError::Tokenizer(format!("malformed vocab at {}: {e}", path.display()))
            })?;

        if raw.is_empty() {
            return Err(TutorError::Tokenizer(format!(
                "empty vocabulary at {}",
                path.display()
            )));
        }

        let tokenizer = Self::from_vocab(raw.keys().map(String::as_str));
        tracing::info!(
            path = %path.display(),
            tokens = tokenizer.vocab.len(),
            "loaded model vocabulary"
        );
        Ok(tokenizer)
    }

    /// Build a tokenizer from raw vocabulary tokens.
    ///
    /// BPE vocabularies mark word-initial tokens with `Ġ` (GPT-style) or `▁`
    /// (SentencePiece); the marker is stripped so plain words match.
    pub fn from_vocab<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        let vocab: HashSet<String> = tokens
            .into_iter()
            .map(|t| {
                t.strip_prefix('Ġ')
                    .or_else(|| t.strip_prefix('▁'))
                    .unwrap_or(t)
                    .to_lowercase()
            })
            .filter(|t| !t.is_empty())
            .collect();

        let max_token_chars = vocab.iter().map(|t| t.chars().count()).max().unwrap_or(0);

        Self {
            vocab,
            max_token_chars,
        }
    }

    /// Greedily segment one word, returning the number of tokens consumed.
    fn count_word(&self, word: &str) -> usize {
        let mut count = 0;
        let mut rest = word;

        while !rest.is_empty() {
            // Candidate prefix ends at char boundaries, capped at the longest
            // token in the vocabulary.
            let ends: Vec<usize> = rest
                .char_indices()
                .map(|(i, _)| i)
                .skip(1)
                .chain(std::iter::once(rest.len()))
                .take(self.max_token_chars)
                .collect();

            let matched = ends
                .iter()
                .rev()
                .copied()
                .find(|&end| self.vocab.contains(&rest[..end]))
                // No vocabulary entry starts here; one char is one token.
                .unwrap_or_else(|| rest.chars().next().map_or(rest.len(), char::len_utf8));

            rest = &rest[matched..];
            count += 1;
        }

        count
    }
}

impl TokenCounter for VocabTokenizer {
    fn token_count(&self, text: &str) -> Result<usize> {
        let lowered = text.to_lowercase();
        Ok(lowered
            .split_whitespace()
            .map(|word| self.count_word(word))
            .sum())
    }
}
