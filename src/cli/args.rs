use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "toula",
    version,
    about = "Command-line client for the Toula chatbot backend",
    propagate_version = true
)]
pub struct Cli {
    /// One-shot prompt input
    pub prompt: Vec<String>,

    /// Override the backend base URL for this run
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat loop
    Interactive,
    /// One-shot chat exchange
    Chat,

    /// Role preset management
    Role {
        #[command(subcommand)]
        action: RoleAction,
    },

    /// Config management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum RoleAction {
    /// Create a named role preset
    Create { name: String, content: String },
    /// List all role presets
    List,
    /// Fetch one role preset by name
    Get { name: String },
    /// Delete a role preset
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize default config file (~/.toula_cli/config.toml)
    Init {
        /// Overwrite if exists
        #[arg(long)]
        force: bool,
    },
    Set { key: String, value: String },
    List,
}
