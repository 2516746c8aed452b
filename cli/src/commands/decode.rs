//! Decode command implementation.

use super::ModelArgs;
use anyhow::Result as AnyhowResult;
use clap::Parser;

/// Decode command arguments.
#[derive(Parser)]
pub struct DecodeCommand {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Token IDs to decode (comma or space separated)
    #[arg(short, long)]
    pub ids: String,

    /// Print the raw tokens instead of repaired text
    #[arg(long, default_value_t = false)]
    pub tokens: bool,
}

pub fn run(cmd: DecodeCommand) -> AnyhowResult<()> {
    let tokenizer = cmd.model.load()?;

    let ids: Vec<u32> = cmd
        .ids
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()?;

    if cmd.tokens {
        println!("{}", tokenizer.ids_to_tokens(&ids)?.join(" "));
    } else {
        println!("{}", tokenizer.ids_to_text(&ids)?);
    }

    Ok(())
}
