//! autotok CLI - Command-line interface for the tokenizer facade.
//!
//! This is the main entry point for the `autotok` command-line tool.

mod commands;

use clap::{Parser, Subcommand};
use commands::{CleanCommand, DecodeCommand, EncodeCommand, InfoCommand, TokenizeCommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "autotok")]
#[command(about = "Tokenize and detokenize text with HuggingFace tokenizers", long_about = None)]
#[command(version)]
struct Cli {
    /// Log model loading and special-token changes
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split text into tokens
    Tokenize(TokenizeCommand),
    /// Encode text to token IDs
    Encode(EncodeCommand),
    /// Decode token IDs back to text
    Decode(DecodeCommand),
    /// Repair detokenized text without loading a model
    Clean(CleanCommand),
    /// Show vocabulary size and special tokens
    Info(InfoCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Tokenize(cmd) => commands::tokenize::run(cmd)?,
        Commands::Encode(cmd) => commands::encode::run(cmd)?,
        Commands::Decode(cmd) => commands::decode::run(cmd)?,
        Commands::Clean(cmd) => commands::clean::run(cmd)?,
        Commands::Info(cmd) => commands::info::run(cmd)?,
    }

    Ok(())
}
