//! Main tokenizer implementation.
//!
//! This module provides the high-level `AutoTokenizer` facade: it loads a
//! model, fills in the special-token roles the model lacks, and maps between
//! text, tokens and ids, repairing detokenized text on the way out.

use crate::detokenize;
use crate::io::HfProvider;
use crate::model::HfModel;
use ahash::AHashSet;
use autotok_core::{
    reconcile, ModelProvider, Result, SpecialRole, SpecialTokenDefaults, SpecialTokens,
    TokenizerError, TokenizerModel,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Configuration for building an [`AutoTokenizer`].
#[derive(Debug, Clone)]
pub struct AutoTokenizerConfig {
    /// Model identifier: tokenizer file, model directory or hub id
    pub pretrained_model_name: String,
    /// Vocabulary file replacing the model's own, one token per line
    pub vocab_file: Option<PathBuf>,
    /// Fallback tokens for roles the model does not define
    pub defaults: SpecialTokenDefaults,
}

impl AutoTokenizerConfig {
    /// Configuration for `pretrained_model_name` with default role tokens.
    pub fn new(pretrained_model_name: impl Into<String>) -> Self {
        Self {
            pretrained_model_name: pretrained_model_name.into(),
            vocab_file: None,
            defaults: SpecialTokenDefaults::default(),
        }
    }
}

/// Builder for creating an [`AutoTokenizer`].
#[derive(Debug, Clone)]
pub struct AutoTokenizerBuilder {
    config: AutoTokenizerConfig,
}

impl AutoTokenizerBuilder {
    /// Create a new builder for `pretrained_model_name`.
    pub fn new(pretrained_model_name: impl Into<String>) -> Self {
        Self {
            config: AutoTokenizerConfig::new(pretrained_model_name),
        }
    }

    /// Replace the model's vocabulary with this file.
    pub fn vocab_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.vocab_file = Some(path.into());
        self
    }

    /// Set all role defaults at once.
    pub fn defaults(mut self, defaults: SpecialTokenDefaults) -> Self {
        self.config.defaults = defaults;
        self
    }

    /// Set the default token for one role.
    pub fn special_default(mut self, role: SpecialRole, token: impl Into<String>) -> Self {
        self.config.defaults.set(role, token);
        self
    }

    pub fn unk_token(self, token: impl Into<String>) -> Self {
        self.special_default(SpecialRole::Unk, token)
    }

    pub fn sep_token(self, token: impl Into<String>) -> Self {
        self.special_default(SpecialRole::Sep, token)
    }

    pub fn mask_token(self, token: impl Into<String>) -> Self {
        self.special_default(SpecialRole::Mask, token)
    }

    pub fn bos_token(self, token: impl Into<String>) -> Self {
        self.special_default(SpecialRole::Bos, token)
    }

    pub fn eos_token(self, token: impl Into<String>) -> Self {
        self.special_default(SpecialRole::Eos, token)
    }

    pub fn pad_token(self, token: impl Into<String>) -> Self {
        self.special_default(SpecialRole::Pad, token)
    }

    pub fn cls_token(self, token: impl Into<String>) -> Self {
        self.special_default(SpecialRole::Cls, token)
    }

    /// Get the configuration built so far.
    pub fn config(&self) -> &AutoTokenizerConfig {
        &self.config
    }

    /// Build the tokenizer, loading the model through HuggingFace.
    pub fn build(self) -> Result<AutoTokenizer<HfModel>> {
        self.build_with(&HfProvider::new())
    }

    /// Build the tokenizer, loading the model through `provider`.
    pub fn build_with<P: ModelProvider>(self, provider: &P) -> Result<AutoTokenizer<P::Model>> {
        AutoTokenizer::from_provider(
            provider,
            &self.config.pretrained_model_name,
            self.config.vocab_file.as_deref(),
            &self.config.defaults,
        )
    }
}

/// Uniform tokenizer interface over a wrapped model.
///
/// All seven roles are assigned once construction succeeds. Role ids are
/// looked up in the model on every call, so they follow later changes made
/// through [`AutoTokenizer::add_special_tokens`].
pub struct AutoTokenizer<M = HfModel> {
    /// Wrapped model
    model: M,
    /// Role tokens, copied from the model after every change
    special: SpecialTokens,
    /// Tokens dropped by `ids_to_text`
    never_split: AHashSet<String>,
}

impl AutoTokenizer<HfModel> {
    /// Create a tokenizer builder.
    pub fn builder(pretrained_model_name: impl Into<String>) -> AutoTokenizerBuilder {
        AutoTokenizerBuilder::new(pretrained_model_name)
    }

    /// Load `pretrained_model_name` through HuggingFace.
    ///
    /// # Arguments
    /// * `pretrained_model_name` - Tokenizer file, model directory or hub id
    /// * `vocab_file` - Vocabulary replacing the model's own
    /// * `defaults` - Fallback role tokens
    pub fn from_pretrained(
        pretrained_model_name: &str,
        vocab_file: Option<&Path>,
        defaults: &SpecialTokenDefaults,
    ) -> Result<Self> {
        Self::from_provider(&HfProvider::new(), pretrained_model_name, vocab_file, defaults)
    }
}

impl<M: TokenizerModel> AutoTokenizer<M> {
    /// Load `identifier` through `provider`, then reconcile special tokens.
    ///
    /// Every load failure surfaces as [`TokenizerError::ModelLoad`].
    pub fn from_provider<P>(
        provider: &P,
        identifier: &str,
        vocab_file: Option<&Path>,
        defaults: &SpecialTokenDefaults,
    ) -> Result<Self>
    where
        P: ModelProvider<Model = M>,
    {
        let model = provider.load(identifier, vocab_file).map_err(|e| match e {
            e @ TokenizerError::ModelLoad { .. } => e,
            other => TokenizerError::model_load(identifier, other),
        })?;
        Self::with_model(model, defaults)
    }

    /// Wrap an already loaded model, assigning defaults to the roles it lacks.
    pub fn with_model(model: M, defaults: &SpecialTokenDefaults) -> Result<Self> {
        let missing = reconcile(model.special_tokens(), defaults);

        let mut tokenizer = Self {
            model,
            special: SpecialTokens::default(),
            never_split: AHashSet::new(),
        };

        info!(tokens = ?missing, "Adding special tokens to the tokenizer");
        tokenizer.add_special_tokens(&missing)?;

        Ok(tokenizer)
    }

    /// Assign role tokens, appending the ones missing from the vocabulary.
    ///
    /// Returns the number of new vocabulary entries; any embedding table
    /// sized to the old vocabulary must be resized by that much.
    pub fn add_special_tokens(&mut self, tokens: &SpecialTokens) -> Result<usize> {
        let added = self.model.add_special_tokens(tokens)?;
        if added > 0 {
            info!(
                "{} special tokens added, resize your model accordingly.",
                added
            );
        }

        self.special = self.model.special_tokens().clone();
        self.never_split = self.model.all_special_tokens().into_iter().collect();

        Ok(added)
    }

    /// Split text into tokens.
    pub fn text_to_tokens(&self, text: &str) -> Result<Vec<String>> {
        self.model.tokenize(text)
    }

    /// Join tokens into text and repair detokenization spacing.
    pub fn tokens_to_text(&self, tokens: &[String]) -> Result<String> {
        let text = self.model.convert_tokens_to_string(tokens)?;
        Ok(detokenize::repair(&text))
    }

    /// Look up the id of a single token.
    pub fn token_to_id(&self, token: &str) -> Result<u32> {
        self.tokens_to_ids(&[token.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| TokenizerError::UnknownToken(token.to_string()))
    }

    /// Look up the id of each token.
    pub fn tokens_to_ids(&self, tokens: &[String]) -> Result<Vec<u32>> {
        self.model.convert_tokens_to_ids(tokens)
    }

    /// Look up the token for each id.
    pub fn ids_to_tokens(&self, ids: &[u32]) -> Result<Vec<String>> {
        self.model.convert_ids_to_tokens(ids)
    }

    /// Tokenize text and look up the ids.
    pub fn text_to_ids(&self, text: &str) -> Result<Vec<u32>> {
        let tokens = self.text_to_tokens(text)?;
        self.tokens_to_ids(&tokens)
    }

    /// Decode ids to repaired text, dropping every special token.
    pub fn ids_to_text(&self, ids: &[u32]) -> Result<String> {
        let tokens: Vec<String> = self
            .ids_to_tokens(ids)?
            .into_iter()
            .filter(|token| !self.never_split.contains(token))
            .collect();
        self.tokens_to_text(&tokens)
    }

    /// Token assigned to `role`.
    pub fn special_token(&self, role: SpecialRole) -> Option<&str> {
        self.special.get(role)
    }

    /// Current id of the token assigned to `role`.
    pub fn special_id(&self, role: SpecialRole) -> Result<u32> {
        let token = self
            .special
            .get(role)
            .ok_or(TokenizerError::MissingSpecialToken(role))?;
        self.token_to_id(token)
    }

    pub fn unk_id(&self) -> Result<u32> {
        self.special_id(SpecialRole::Unk)
    }

    pub fn sep_id(&self) -> Result<u32> {
        self.special_id(SpecialRole::Sep)
    }

    pub fn mask_id(&self) -> Result<u32> {
        self.special_id(SpecialRole::Mask)
    }

    pub fn bos_id(&self) -> Result<u32> {
        self.special_id(SpecialRole::Bos)
    }

    pub fn eos_id(&self) -> Result<u32> {
        self.special_id(SpecialRole::Eos)
    }

    pub fn pad_id(&self) -> Result<u32> {
        self.special_id(SpecialRole::Pad)
    }

    pub fn cls_id(&self) -> Result<u32> {
        self.special_id(SpecialRole::Cls)
    }

    /// All role tokens.
    pub fn special_tokens(&self) -> &SpecialTokens {
        &self.special
    }

    /// Check if `ids_to_text` drops `token`.
    pub fn is_never_split(&self, token: &str) -> bool {
        self.never_split.contains(token)
    }

    /// Get the vocabulary size, added tokens included.
    pub fn vocab_size(&self) -> usize {
        self.model.vocab_size()
    }

    /// Name of the wrapped model family.
    pub fn name(&self) -> &str {
        self.model.name()
    }

    /// Get a reference to the wrapped model.
    pub fn model(&self) -> &M {
        &self.model
    }
}
