//! CLI commands for the autotok tokenizer.

pub mod clean;
pub mod decode;
pub mod encode;
pub mod info;
pub mod tokenize;

pub use clean::CleanCommand;
pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use info::InfoCommand;
pub use tokenize::TokenizeCommand;

use anyhow::{Context, Result as AnyhowResult};
use autotok_tokenizer::{
    AutoTokenizer, HfProvider, ModelProvider, SpecialTokenDefaults, TokenizerModel,
    WordLevelModel,
};
use clap::Args;
use std::path::PathBuf;

/// Tokenizer built from the command line, whichever backend it uses.
pub type CliTokenizer = AutoTokenizer<Box<dyn TokenizerModel>>;

/// Model selection shared by every model-backed command.
#[derive(Args)]
pub struct ModelArgs {
    /// Tokenizer file, model directory or hub id
    #[arg(short, long, required_unless_present = "word_level")]
    pub tokenizer: Option<String>,

    /// Vocabulary file, one token per line
    #[arg(long)]
    pub vocab_file: Option<PathBuf>,

    /// Use --vocab-file as a standalone whitespace word-level model
    #[arg(long, default_value_t = false, requires = "vocab_file")]
    pub word_level: bool,

    /// JSON file with default special tokens, e.g. {"bos": "<s>"}
    #[arg(long)]
    pub defaults: Option<PathBuf>,

    /// Hub revision to download
    #[arg(long)]
    pub revision: Option<String>,
}

impl ModelArgs {
    /// Load the model and wrap it in the facade.
    pub fn load(&self) -> AnyhowResult<CliTokenizer> {
        let defaults = match &self.defaults {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                serde_json::from_str::<SpecialTokenDefaults>(&content)
                    .with_context(|| format!("Failed to parse {}", path.display()))?
            }
            None => SpecialTokenDefaults::default(),
        };

        let model: Box<dyn TokenizerModel> = match (&self.tokenizer, self.word_level) {
            (_, true) => {
                let path = self
                    .vocab_file
                    .as_deref()
                    .context("--word-level needs --vocab-file")?;
                Box::new(WordLevelModel::from_file(path)?)
            }
            (Some(identifier), false) => {
                let provider = match &self.revision {
                    Some(revision) => HfProvider::new().with_revision(revision),
                    None => HfProvider::new(),
                };
                Box::new(provider.load(identifier, self.vocab_file.as_deref())?)
            }
            (None, false) => anyhow::bail!("--tokenizer is required"),
        };

        Ok(AutoTokenizer::with_model(model, &defaults)?)
    }
}

/// Read command input, from stdin when it is "-".
pub fn read_input(input: String) -> AnyhowResult<String> {
    if input == "-" {
        use std::io::Read;
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(input)
    }
}

/// Print to stdout or write to a file.
pub fn emit(output: &str, path: Option<&str>) -> AnyhowResult<()> {
    match path {
        Some(path) => {
            std::fs::write(path, output).with_context(|| format!("Failed to write {}", path))?
        }
        None => println!("{}", output),
    }
    Ok(())
}
