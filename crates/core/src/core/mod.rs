//! Special-token roles, the wrapped-model contract, and vocabulary storage.
//!
//! This module contains the data structures shared by every model backend,
//! independent of how the model segments text.

pub mod model;
pub mod special;
pub mod vocab;

pub use model::{ModelProvider, TokenizerModel};
pub use special::{reconcile, SpecialRole, SpecialTokenDefaults, SpecialTokens};
pub use vocab::{Vocab, VocabR, Vocabulary, WordLevelModel};
