//! Vocabulary storage and a word-level model built on it.
//!
//! This module provides efficient vocabulary storage using AHashMap for fast lookups
//! and CompactString for memory-efficient string storage. [`WordLevelModel`]
//! wraps a [`Vocabulary`] into a whitespace-splitting [`TokenizerModel`],
//! which is what a plain newline-separated vocabulary file describes.

use super::model::TokenizerModel;
use super::special::{SpecialRole, SpecialTokens};
use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;
use std::path::Path;
use tracing::debug;

/// Forward mapping: token string -> ID
pub type Vocab = AHashMap<CompactString, u32>;

/// Reverse mapping: ID -> token string
pub type VocabR = AHashMap<u32, CompactString>;

/// Vocabulary with forward and reverse mappings.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Forward mapping: token string -> ID
    pub vocab: Vocab,
    /// Reverse mapping: ID -> token string
    pub vocab_r: VocabR,
    /// One past the largest assigned ID
    next_id: u32,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new vocabulary with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vocab: Vocab::with_capacity(capacity),
            vocab_r: VocabR::with_capacity(capacity),
            next_id: 0,
        }
    }

    /// Build a vocabulary from tokens, assigning ids in order.
    ///
    /// Repeated tokens keep their first id.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = Self::new();
        for token in tokens {
            vocab.add_token(token.as_ref());
        }
        vocab
    }

    /// Load a vocabulary file with one token per line; the id of a token is
    /// its line index.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        })?;

        let mut vocab = Self::with_capacity(content.lines().count());
        for (line_num, line) in content.lines().enumerate() {
            let token = line.trim_end_matches('\r');
            if token.is_empty() {
                return Err(TokenizerError::Load(format!(
                    "Empty vocabulary entry at line {} of {}",
                    line_num + 1,
                    path.display()
                )));
            }
            let id = u32::try_from(line_num).map_err(|_| {
                TokenizerError::Load(format!("Too many entries in {}", path.display()))
            })?;
            vocab.add_token_with_id(token, id)?;
        }

        debug!(path = %path.display(), size = vocab.len(), "loaded vocabulary file");
        Ok(vocab)
    }

    /// Add a token to the vocabulary.
    ///
    /// Returns the ID assigned to the token and whether it was new.
    pub fn add_token(&mut self, token: &str) -> (u32, bool) {
        if let Some(&id) = self.vocab.get(token) {
            return (id, false);
        }

        let token = CompactString::new(token);
        let id = self.next_id;
        self.next_id += 1;
        self.vocab_r.insert(id, token.clone());
        self.vocab.insert(token, id);

        (id, true)
    }

    /// Add a token with a specific ID.
    ///
    /// Returns an error if the ID or the token is already taken.
    pub fn add_token_with_id(&mut self, token: &str, id: u32) -> Result<()> {
        let next_id = id.checked_add(1).ok_or_else(|| {
            TokenizerError::InvalidConfig(format!("Token ID {} is out of range", id))
        })?;
        if self.vocab_r.contains_key(&id) {
            return Err(TokenizerError::InvalidConfig(format!(
                "Token ID {} already exists",
                id
            )));
        }
        if self.vocab.contains_key(token) {
            return Err(TokenizerError::InvalidConfig(format!(
                "Token {} already exists",
                token
            )));
        }

        let token = CompactString::new(token);
        self.vocab_r.insert(id, token.clone());
        self.vocab.insert(token, id);
        // IDs may be sparse; later additions go past the largest
        self.next_id = self.next_id.max(next_id);

        Ok(())
    }

    /// Get the ID for a token string.
    #[inline]
    pub fn get_id(&self, token: &str) -> Option<u32> {
        self.vocab.get(token).copied()
    }

    /// Get the token string for an ID.
    #[inline]
    pub fn get_token(&self, id: u32) -> Option<&str> {
        self.vocab_r.get(&id).map(|s| s.as_str())
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }
}

/// Whitespace-splitting model over a fixed [`Vocabulary`].
///
/// Tokens outside the vocabulary map to the unknown token's id when one is
/// assigned.
#[derive(Debug, Clone)]
pub struct WordLevelModel {
    vocab: Vocabulary,
    special: SpecialTokens,
}

impl WordLevelModel {
    /// Create a model with no special roles assigned.
    pub fn new(vocab: Vocabulary) -> Self {
        Self {
            vocab,
            special: SpecialTokens::default(),
        }
    }

    /// Load a model from a one-token-per-line vocabulary file.
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::new(Vocabulary::from_file(path)?))
    }

    /// Assign special roles without touching the vocabulary.
    pub fn with_special_tokens(mut self, special: SpecialTokens) -> Self {
        self.special = special;
        self
    }

    /// Get a reference to the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    fn unk_id(&self) -> Option<u32> {
        self.special
            .get(SpecialRole::Unk)
            .and_then(|unk| self.vocab.get_id(unk))
    }
}

impl TokenizerModel for WordLevelModel {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(text.split_whitespace().map(str::to_string).collect())
    }

    fn convert_tokens_to_string(&self, tokens: &[String]) -> Result<String> {
        Ok(tokens.join(" "))
    }

    fn convert_tokens_to_ids(&self, tokens: &[String]) -> Result<Vec<u32>> {
        let unk_id = self.unk_id();
        tokens
            .iter()
            .map(|token| {
                self.vocab
                    .get_id(token)
                    .or(unk_id)
                    .ok_or_else(|| TokenizerError::UnknownToken(token.clone()))
            })
            .collect()
    }

    fn convert_ids_to_tokens(&self, ids: &[u32]) -> Result<Vec<String>> {
        ids.iter()
            .map(|&id| {
                self.vocab
                    .get_token(id)
                    .map(str::to_string)
                    .ok_or(TokenizerError::UnknownTokenId(id))
            })
            .collect()
    }

    fn add_special_tokens(&mut self, tokens: &SpecialTokens) -> Result<usize> {
        let mut added = 0;
        for (role, token) in tokens.iter() {
            if self.vocab.add_token(token).1 {
                added += 1;
            }
            self.special.set(role, token);
        }
        Ok(added)
    }

    fn special_tokens(&self) -> &SpecialTokens {
        &self.special
    }

    fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    fn name(&self) -> &str {
        "WordLevel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_add_token() {
        let mut vocab = Vocabulary::new();
        let (id1, new1) = vocab.add_token("hello");
        let (id2, new2) = vocab.add_token("world");

        assert_eq!((id1, new1), (0, true));
        assert_eq!((id2, new2), (1, true));
        assert_eq!(vocab.get_id("hello"), Some(0));
        assert_eq!(vocab.get_token(1), Some("world"));
    }

    #[test]
    fn test_add_duplicate_token() {
        let mut vocab = Vocabulary::new();
        let (id1, _) = vocab.add_token("hello");
        let (id2, new) = vocab.add_token("hello");

        assert_eq!(id1, id2);
        assert!(!new);
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn test_add_token_with_id() {
        let mut vocab = Vocabulary::new();
        vocab.add_token_with_id("hello", 5).unwrap();
        vocab.add_token_with_id("world", 10).unwrap();

        assert!(vocab.add_token_with_id("again", 5).is_err());
        assert!(vocab.add_token_with_id("hello", 11).is_err());

        // appended after the largest id
        assert_eq!(vocab.add_token("new").0, 11);
    }

    #[test]
    fn test_add_token_with_max_id() {
        let mut vocab = Vocabulary::new();

        let err = vocab.add_token_with_id("last", u32::MAX).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidConfig(_)));
        assert!(vocab.is_empty());

        vocab.add_token_with_id("near", u32::MAX - 1).unwrap();
        assert_eq!(vocab.get_id("near"), Some(u32::MAX - 1));
    }

    #[test]
    fn test_from_file() {
        let dir = std::env::temp_dir().join("autotok_test_vocab_file");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("vocab.txt");
        std::fs::write(&path, "[UNK]\nhello\r\nworld\n").unwrap();

        let vocab = Vocabulary::from_file(&path).unwrap();

        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.get_id("hello"), Some(1));
        assert_eq!(vocab.get_token(2), Some("world"));

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_from_missing_file() {
        let path = std::env::temp_dir().join("autotok_no_such_dir/vocab.txt");
        let err = Vocabulary::from_file(&path).unwrap_err();
        assert!(matches!(err, TokenizerError::Io { .. }));
    }

    #[test]
    fn test_word_level_lookup() {
        let mut special = SpecialTokens::default();
        special.set(SpecialRole::Unk, "[UNK]");
        let model = WordLevelModel::new(Vocabulary::from_tokens(["[UNK]", "hello", "world"]))
            .with_special_tokens(special);

        let tokens = model.tokenize("hello  brave world").unwrap();
        assert_eq!(tokens, words(&["hello", "brave", "world"]));

        let ids = model.convert_tokens_to_ids(&tokens).unwrap();
        assert_eq!(ids, vec![1, 0, 2]);

        let back = model.convert_ids_to_tokens(&ids).unwrap();
        assert_eq!(back, words(&["hello", "[UNK]", "world"]));
        assert!(matches!(
            model.convert_ids_to_tokens(&[99]),
            Err(TokenizerError::UnknownTokenId(99))
        ));
    }

    #[test]
    fn test_word_level_without_unk() {
        let model = WordLevelModel::new(Vocabulary::from_tokens(["hello"]));
        let err = model.convert_tokens_to_ids(&words(&["bye"])).unwrap_err();
        assert!(matches!(err, TokenizerError::UnknownToken(t) if t == "bye"));
    }

    #[test]
    fn test_add_special_tokens_counts_new_entries() {
        let mut model = WordLevelModel::new(Vocabulary::from_tokens(["[PAD]", "hello"]));

        let mut special = SpecialTokens::default();
        special.set(SpecialRole::Pad, "[PAD]");
        special.set(SpecialRole::Bos, "[CLS]");
        special.set(SpecialRole::Cls, "[CLS]");

        let added = model.add_special_tokens(&special).unwrap();

        // [PAD] already present, [CLS] shared by two roles
        assert_eq!(added, 1);
        assert_eq!(model.vocab_size(), 3);
        assert_eq!(model.special_tokens(), &special);
        assert_eq!(model.all_special_tokens(), words(&["[CLS]", "[PAD]", "[CLS]"]));
    }
}
