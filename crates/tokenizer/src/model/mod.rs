//! Model backends.

pub mod hf;

pub use hf::HfModel;
