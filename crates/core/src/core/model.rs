//! Contract for the wrapped tokenizer model.
//!
//! The facade never segments text itself; everything below is answered by
//! the model behind it.

use super::special::SpecialTokens;
use crate::error::Result;
use std::path::Path;

/// A loaded tokenizer model the facade delegates to.
pub trait TokenizerModel {
    /// Split text into the model's tokens.
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;

    /// Join tokens back into the model's raw surface text.
    fn convert_tokens_to_string(&self, tokens: &[String]) -> Result<String>;

    /// Look up the id of each token.
    fn convert_tokens_to_ids(&self, tokens: &[String]) -> Result<Vec<u32>>;

    /// Look up the token for each id.
    fn convert_ids_to_tokens(&self, ids: &[u32]) -> Result<Vec<String>>;

    /// Assign every role set in `tokens` and append the tokens the vocabulary
    /// does not have yet.
    ///
    /// Returns the number of new vocabulary entries.
    fn add_special_tokens(&mut self, tokens: &SpecialTokens) -> Result<usize>;

    /// Current role assignments.
    fn special_tokens(&self) -> &SpecialTokens;

    /// Every token the model treats as special, role tokens included.
    fn all_special_tokens(&self) -> Vec<String> {
        self.special_tokens()
            .iter()
            .map(|(_, token)| token.to_string())
            .collect()
    }

    /// Vocabulary size including added tokens.
    fn vocab_size(&self) -> usize;

    /// Model family name.
    fn name(&self) -> &str;
}

/// Source of [`TokenizerModel`]s addressed by identifier.
pub trait ModelProvider {
    type Model: TokenizerModel;

    /// Load the model for `identifier`, optionally overriding its vocabulary.
    fn load(&self, identifier: &str, vocab_file: Option<&Path>) -> Result<Self::Model>;
}

impl<T: TokenizerModel + ?Sized> TokenizerModel for Box<T> {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        (**self).tokenize(text)
    }

    fn convert_tokens_to_string(&self, tokens: &[String]) -> Result<String> {
        (**self).convert_tokens_to_string(tokens)
    }

    fn convert_tokens_to_ids(&self, tokens: &[String]) -> Result<Vec<u32>> {
        (**self).convert_tokens_to_ids(tokens)
    }

    fn convert_ids_to_tokens(&self, ids: &[u32]) -> Result<Vec<String>> {
        (**self).convert_ids_to_tokens(ids)
    }

    fn add_special_tokens(&mut self, tokens: &SpecialTokens) -> Result<usize> {
        (**self).add_special_tokens(tokens)
    }

    fn special_tokens(&self) -> &SpecialTokens {
        (**self).special_tokens()
    }

    fn all_special_tokens(&self) -> Vec<String> {
        (**self).all_special_tokens()
    }

    fn vocab_size(&self) -> usize {
        (**self).vocab_size()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
