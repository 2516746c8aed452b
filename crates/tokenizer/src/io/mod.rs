//! Model loading.
//!
//! This module resolves model identifiers to local files, downloading them
//! from the HuggingFace hub when needed, and reads the special-token
//! metadata stored beside the tokenizer.

pub mod format;
pub mod load;

pub use format::{SpecialTokensMap, TokenValue};
pub use load::{HfProvider, ModelFiles};
