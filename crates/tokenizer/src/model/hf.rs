//! HuggingFace `tokenizers` backend.

use ahash::AHashSet;
use autotok_core::{Result, SpecialRole, SpecialTokens, TokenizerError, TokenizerModel};
use std::path::Path;
use tokenizers::models::wordpiece::WordPiece;
use tokenizers::models::ModelWrapper;
use tokenizers::{AddedToken, Decoder, Tokenizer};
use tracing::debug;

/// A `tokenizers::Tokenizer` with the role tokens read from its metadata.
#[derive(Debug)]
pub struct HfModel {
    inner: Tokenizer,
    special: SpecialTokens,
    /// Extra special tokens that have no role
    additional: Vec<String>,
}

impl HfModel {
    /// Wrap a tokenizer with no roles assigned.
    pub fn new(inner: Tokenizer) -> Self {
        Self {
            inner,
            special: SpecialTokens::default(),
            additional: Vec::new(),
        }
    }

    /// Load a `tokenizer.json` file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let inner = Tokenizer::from_file(path).map_err(|e| {
            TokenizerError::Load(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(Self::new(inner))
    }

    /// Set the role tokens and role-less special tokens the model declares.
    pub fn with_special_tokens(mut self, special: SpecialTokens, additional: Vec<String>) -> Self {
        self.special = special;
        self.additional = additional;
        self
    }

    /// Replace the model's vocabulary with a WordPiece vocabulary file (one
    /// token per line), keeping the rest of the pipeline.
    pub fn with_vocab_file(mut self, path: &Path) -> Result<Self> {
        let vocab = path.to_str().ok_or_else(|| {
            TokenizerError::Load(format!("Vocabulary path is not UTF-8: {}", path.display()))
        })?;
        let unk = self
            .special
            .get(SpecialRole::Unk)
            .unwrap_or("[UNK]")
            .to_string();

        let model = WordPiece::from_file(vocab)
            .unk_token(unk)
            .build()
            .map_err(|e| {
                TokenizerError::Load(format!("Failed to read vocabulary {}: {}", vocab, e))
            })?;
        self.inner.with_model(model);

        debug!(vocab, size = self.vocab_size(), "replaced vocabulary");
        Ok(self)
    }

    /// Get a reference to the wrapped tokenizer.
    pub fn inner(&self) -> &Tokenizer {
        &self.inner
    }

    fn unk_id(&self) -> Option<u32> {
        self.special
            .get(SpecialRole::Unk)
            .and_then(|unk| self.inner.token_to_id(unk))
    }
}

impl TokenizerModel for HfModel {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| TokenizerError::Tokenization(e.to_string()))?;
        Ok(encoding.get_tokens().to_vec())
    }

    fn convert_tokens_to_string(&self, tokens: &[String]) -> Result<String> {
        match self.inner.get_decoder() {
            Some(decoder) => decoder
                .decode(tokens.to_vec())
                .map_err(|e| TokenizerError::Tokenization(e.to_string())),
            None => Ok(tokens.join(" ")),
        }
    }

    fn convert_tokens_to_ids(&self, tokens: &[String]) -> Result<Vec<u32>> {
        let unk_id = self.unk_id();
        tokens
            .iter()
            .map(|token| {
                self.inner
                    .token_to_id(token)
                    .or(unk_id)
                    .ok_or_else(|| TokenizerError::UnknownToken(token.clone()))
            })
            .collect()
    }

    fn convert_ids_to_tokens(&self, ids: &[u32]) -> Result<Vec<String>> {
        ids.iter()
            .map(|&id| {
                self.inner
                    .id_to_token(id)
                    .ok_or(TokenizerError::UnknownTokenId(id))
            })
            .collect()
    }

    fn add_special_tokens(&mut self, tokens: &SpecialTokens) -> Result<usize> {
        let mut seen = AHashSet::new();
        let mut added_tokens = Vec::new();
        let mut added = 0;

        for (role, token) in tokens.iter() {
            if seen.insert(token.to_string()) {
                if self.inner.token_to_id(token).is_none() {
                    added += 1;
                }
                // Existing tokens are still registered so they are never split.
                added_tokens.push(AddedToken::from(token.to_string(), true));
            }
            self.special.set(role, token);
        }

        self.inner.add_special_tokens(&added_tokens);
        Ok(added)
    }

    fn special_tokens(&self) -> &SpecialTokens {
        &self.special
    }

    fn all_special_tokens(&self) -> Vec<String> {
        let mut all: Vec<String> = self
            .special
            .iter()
            .map(|(_, token)| token.to_string())
            .collect();
        all.extend(self.additional.iter().cloned());
        all.extend(
            self.inner
                .get_added_tokens_decoder()
                .values()
                .filter(|token| token.special)
                .map(|token| token.content.clone()),
        );
        all
    }

    fn vocab_size(&self) -> usize {
        self.inner.get_vocab_size(true)
    }

    fn name(&self) -> &str {
        match self.inner.get_model() {
            ModelWrapper::BPE(_) => "BPE",
            ModelWrapper::WordPiece(_) => "WordPiece",
            ModelWrapper::WordLevel(_) => "WordLevel",
            ModelWrapper::Unigram(_) => "Unigram",
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;

    pub(crate) const WORD_LEVEL_JSON: &str = r#"{
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": {"type": "Whitespace"},
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": {"[UNK]": 0, "[PAD]": 1, "hello": 2, "world": 3, "(": 4, ")": 5},
            "unk_token": "[UNK]"
        }
    }"#;

    pub(crate) fn write_tokenizer(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tokenizer.json");
        std::fs::write(&path, WORD_LEVEL_JSON).unwrap();
        path
    }

    fn words(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn unk_only() -> SpecialTokens {
        let mut special = SpecialTokens::default();
        special.set(SpecialRole::Unk, "[UNK]");
        special
    }

    #[test]
    fn test_tokenize_and_lookup() {
        let path = write_tokenizer("autotok_test_hf_lookup");
        let model = HfModel::from_file(&path)
            .unwrap()
            .with_special_tokens(unk_only(), Vec::new());

        assert_eq!(model.name(), "WordLevel");
        assert_eq!(model.vocab_size(), 6);

        let tokens = model.tokenize("(hello) world").unwrap();
        assert_eq!(tokens, words(&["(", "hello", ")", "world"]));

        let ids = model.convert_tokens_to_ids(&words(&["hello", "nope"])).unwrap();
        assert_eq!(ids, vec![2, 0]);
        assert_eq!(
            model.convert_ids_to_tokens(&[3, 1]).unwrap(),
            words(&["world", "[PAD]"])
        );
        assert!(matches!(
            model.convert_ids_to_tokens(&[42]),
            Err(TokenizerError::UnknownTokenId(42))
        ));

        // no decoder: tokens are joined with spaces
        assert_eq!(
            model.convert_tokens_to_string(&tokens).unwrap(),
            "( hello ) world"
        );

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_add_special_tokens_counts_only_new() {
        let path = write_tokenizer("autotok_test_hf_add_special");
        let mut model = HfModel::from_file(&path).unwrap();

        let mut special = SpecialTokens::default();
        special.set(SpecialRole::Pad, "[PAD]");
        special.set(SpecialRole::Bos, "[CLS]");
        special.set(SpecialRole::Cls, "[CLS]");
        special.set(SpecialRole::Eos, "[SEP]");

        let added = model.add_special_tokens(&special).unwrap();

        assert_eq!(added, 2);
        assert_eq!(model.vocab_size(), 8);
        assert_eq!(model.special_tokens(), &special);
        assert!(model.inner().token_to_id("[CLS]").is_some());
        // an added special token is not split by the pre-tokenizer
        assert_eq!(
            model.tokenize("[CLS] hello").unwrap(),
            words(&["[CLS]", "hello"])
        );

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_all_special_tokens_includes_additional() {
        let path = write_tokenizer("autotok_test_hf_all_special");
        let model = HfModel::from_file(&path)
            .unwrap()
            .with_special_tokens(unk_only(), words(&["<extra>"]));

        let all = model.all_special_tokens();
        assert!(all.contains(&"[UNK]".to_string()));
        assert!(all.contains(&"<extra>".to_string()));

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_vocab_file_override() {
        let path = write_tokenizer("autotok_test_hf_vocab_file");
        let vocab = path.with_file_name("vocab.txt");
        std::fs::write(&vocab, "[UNK]\nfoo\nbar\n").unwrap();

        let model = HfModel::from_file(&path)
            .unwrap()
            .with_special_tokens(unk_only(), Vec::new())
            .with_vocab_file(&vocab)
            .unwrap();

        assert_eq!(model.name(), "WordPiece");
        assert_eq!(model.vocab_size(), 3);
        assert_eq!(model.inner().token_to_id("bar"), Some(2));

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_debug_output() {
        let path = write_tokenizer("autotok_test_hf_debug");
        let model = HfModel::from_file(&path)
            .unwrap()
            .with_special_tokens(unk_only(), Vec::new());

        let debug = format!("{:?}", model);
        assert!(debug.starts_with("HfModel"));
        assert!(debug.contains("[UNK]"));

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_missing_file() {
        let err = HfModel::from_file(Path::new("/nonexistent/tokenizer.json")).unwrap_err();
        assert!(matches!(err, TokenizerError::Load(_)));
    }
}
