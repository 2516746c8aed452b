//! autotok-core - Shared types for the autotok tokenizer facade
//!
//! This crate provides the pieces every model backend agrees on: the error
//! type, the seven-role special-token record and its reconciliation with
//! defaults, the [`TokenizerModel`] contract, and a small in-memory
//! word-level model.
//!
//! # Example
//!
//! ```rust
//! use autotok_core::{reconcile, SpecialRole, SpecialTokenDefaults, SpecialTokens};
//!
//! let mut existing = SpecialTokens::default();
//! existing.set(SpecialRole::Cls, "<cls>");
//!
//! let missing = reconcile(&existing, &SpecialTokenDefaults::default());
//! assert_eq!(missing.get(SpecialRole::Bos), Some("<cls>"));
//! assert_eq!(missing.get(SpecialRole::Unk), Some("[UNK]"));
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

pub mod core;
pub use crate::core::{
    reconcile, ModelProvider, SpecialRole, SpecialTokenDefaults, SpecialTokens, TokenizerModel,
    Vocab, VocabR, Vocabulary, WordLevelModel,
};
