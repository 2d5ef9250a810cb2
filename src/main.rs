use anyhow::Result;
use clap::{CommandFactory, Parser};
use toula_cli::cli::args::{Cli, Commands, ConfigAction, RoleAction};
use toula_cli::cli::commands;
use toula_cli::config::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    let base_url = cli.base_url.as_deref();

    match &cli.command {
        Some(Commands::Interactive) => {
            commands::handle_interactive(&settings, base_url).await?
        }
        Some(Commands::Chat) => {
            let prompt = if !cli.prompt.is_empty() {
                Some(cli.prompt.join(" "))
            } else {
                None
            };
            commands::handle_chat(&settings, base_url, prompt).await?
        }
        Some(Commands::Role { action }) => match action {
            RoleAction::Create { name, content } => {
                commands::handle_role_create(&settings, base_url, name, content).await?
            }
            RoleAction::List => commands::handle_role_list(&settings, base_url).await?,
            RoleAction::Get { name } => {
                commands::handle_role_get(&settings, base_url, name).await?
            }
            RoleAction::Delete { name } => {
                commands::handle_role_delete(&settings, base_url, name).await?
            }
        },
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { force } => commands::handle_config_init(*force).await?,
            ConfigAction::List => commands::handle_config_list(&settings).await?,
            ConfigAction::Set { key, value } => {
                commands::handle_config_set(&mut settings, key, value).await?
            }
        },
        None => {
            if !cli.prompt.is_empty() {
                let prompt = cli.prompt.join(" ");
                commands::handle_chat(&settings, base_url, Some(prompt)).await?
            } else {
                // No command and no prompt: show help
                Cli::command().print_help()?;
                println!();
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
