//! autotok-tokenizer - AutoTokenizer facade over HuggingFace tokenizers
//!
//! This crate wraps a `tokenizers::Tokenizer` behind a uniform tokenizer
//! interface. It fills in the special-token roles a model leaves undefined
//! and repairs the spacing artifacts of subword detokenization when ids are
//! turned back into text.
//!
//! # Features
//!
//! - Loading from a `tokenizer.json`, a model directory or the hub (`hub` feature)
//! - Special-token reconciliation with configurable defaults
//! - Token, text and id conversions delegated to the wrapped model
//! - Quote and spacing repair of detokenized text
//!
//! # Example
//!
//! ```rust,no_run
//! use autotok_tokenizer::AutoTokenizer;
//!
//! let tokenizer = AutoTokenizer::builder("bert-base-uncased")
//!     .pad_token("[PAD]")
//!     .build()?;
//!
//! let ids = tokenizer.text_to_ids("( hello ) world")?;
//! println!("{}", tokenizer.ids_to_text(&ids)?);
//! # Ok::<(), autotok_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use autotok_core::{
    reconcile, ModelProvider, Result, SpecialRole, SpecialTokenDefaults, SpecialTokens,
    TokenizerError, TokenizerModel, Vocabulary, WordLevelModel,
};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{AutoTokenizer, AutoTokenizerBuilder, AutoTokenizerConfig};

// Detokenization repair
pub mod detokenize;
pub use detokenize::{handle_quotes, remove_spaces, repair};

// Model loading
pub mod io;
pub use io::{HfProvider, ModelFiles};

// Model backends
pub mod model;
pub use model::HfModel;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
