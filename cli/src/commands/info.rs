//! Info command implementation.

use super::ModelArgs;
use anyhow::Result as AnyhowResult;
use autotok_tokenizer::SpecialRole;
use clap::Parser;

/// Info command arguments.
#[derive(Parser)]
pub struct InfoCommand {
    #[command(flatten)]
    pub model: ModelArgs,
}

pub fn run(cmd: InfoCommand) -> AnyhowResult<()> {
    let tokenizer = cmd.model.load()?;

    println!("model: {}", tokenizer.name());
    println!("vocab_size: {}", tokenizer.vocab_size());
    for role in SpecialRole::ALL {
        match tokenizer.special_token(role) {
            Some(token) => println!("{}: {} ({})", role, token, tokenizer.special_id(role)?),
            None => println!("{}: -", role),
        }
    }

    Ok(())
}
