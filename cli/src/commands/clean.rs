//! Clean command implementation.

use super::{emit, read_input};
use anyhow::Result as AnyhowResult;
use autotok_tokenizer::{handle_quotes, remove_spaces, repair};
use clap::Parser;

/// Clean command arguments.
#[derive(Parser)]
pub struct CleanCommand {
    /// Detokenized text to repair ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Only pair up quotes
    #[arg(long, default_value_t = false, conflicts_with = "spacing_only")]
    pub quotes_only: bool,

    /// Only remove spaces
    #[arg(long, default_value_t = false)]
    pub spacing_only: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<String>,
}

pub fn run(cmd: CleanCommand) -> AnyhowResult<()> {
    let input_text = read_input(cmd.input)?;

    let cleaned = if cmd.quotes_only {
        handle_quotes(input_text.trim())
    } else if cmd.spacing_only {
        remove_spaces(input_text.trim())
    } else {
        repair(&input_text)
    };

    emit(&cleaned, cmd.output.as_deref())
}
