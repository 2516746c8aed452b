//! Tokenize command implementation.

use super::{read_input, ModelArgs};
use anyhow::Result as AnyhowResult;
use clap::Parser;

/// Tokenize command arguments.
#[derive(Parser)]
pub struct TokenizeCommand {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Text to tokenize ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,
}

pub fn run(cmd: TokenizeCommand) -> AnyhowResult<()> {
    let tokenizer = cmd.model.load()?;
    let input_text = read_input(cmd.input)?;

    for token in tokenizer.text_to_tokens(&input_text)? {
        println!("{}", token);
    }

    Ok(())
}
