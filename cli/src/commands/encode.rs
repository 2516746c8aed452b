//! Encode command implementation.

use super::{emit, read_input, ModelArgs};
use anyhow::Result as AnyhowResult;
use clap::Parser;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Text to encode ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Wrap the ids in the bos and eos tokens
    #[arg(short, long, default_value_t = false)]
    pub special_tokens: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<String>,
}

pub fn run(cmd: EncodeCommand) -> AnyhowResult<()> {
    let tokenizer = cmd.model.load()?;
    let input_text = read_input(cmd.input)?;

    let mut ids = tokenizer.text_to_ids(&input_text)?;
    if cmd.special_tokens {
        ids.insert(0, tokenizer.bos_id()?);
        ids.push(tokenizer.eos_id()?);
    }

    let ids_str: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    emit(&ids_str.join(" "), cmd.output.as_deref())?;

    if let Some(path) = &cmd.output {
        eprintln!("Encoded {} tokens to {}", ids.len(), path);
    }

    Ok(())
}
