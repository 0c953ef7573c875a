use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Metaprompt: a terminal chat client that turns goals into ready-to-paste prompts.
#[derive(Parser, Debug)]
#[command(name = "metaprompt", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error) or a full filter directive.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Chat model override.
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Interactive conversation (default).
    Chat,
    /// Send one prompt and print the reply.
    Ask {
        prompt: String,
        /// Knowledge file to attach to the prompt.
        #[arg(long)]
        attach: Option<PathBuf>,
    },
    /// Manage the stored API key.
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
    /// Test the connection with the stored API key.
    Test,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Save a key; read from stdin when omitted.
    Set { value: Option<String> },
    /// Remove the stored key.
    Clear,
    /// Show which key is in use.
    Status,
}

pub fn parse() -> Args {
    Args::parse()
}
