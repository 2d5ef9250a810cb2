use anyhow::{anyhow, Result};
use console::style;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::client::HttpClient;
use crate::api::transport::Transport;
use crate::chat::session::ChatSession;
use crate::config::settings::Settings;
use crate::roles::registry::{render_roles, RoleRegistry};
use crate::utils::format;

fn backend(settings: &Settings, base_url: Option<&str>) -> Result<HttpClient> {
    HttpClient::new(settings.resolve_base_url(base_url))
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner().with_message(msg.to_string());
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

pub async fn handle_interactive(settings: &Settings, base_url: Option<&str>) -> Result<()> {
    println!("{}", style("Interactive mode. Ctrl+C to exit.").cyan());
    let session = ChatSession::new(backend(settings, base_url)?);
    loop {
        let line: String = Input::new().with_prompt("You").interact_text()?;
        if line.trim().is_empty() { continue; }
        exchange(&session, &line).await;
    }
}

pub async fn handle_chat(
    settings: &Settings,
    base_url: Option<&str>,
    prompt: Option<String>,
) -> Result<()> {
    let prompt = match prompt {
        Some(p) if !p.trim().is_empty() => p,
        _ => return Err(anyhow!("Prompt is empty. Provide text or use interactive mode.")),
    };
    let session = ChatSession::new(backend(settings, base_url)?);
    exchange(&session, &prompt).await;
    Ok(())
}

/// Runs one round trip and renders whatever the session recorded. A failed
/// exchange is user-visible transcript content, not a process fault.
async fn exchange<T: Transport>(session: &ChatSession<T>, input: &str) {
    let pb = spinner("Contacting Toula...");
    let result = session.send(input).await;
    pb.finish_and_clear();

    if let Some(reply) = session.last_reply() {
        let label = match result {
            Ok(()) => style("Toula:").green().bold(),
            Err(_) => style("Toula:").yellow().bold(),
        };
        println!("{} {}", label, reply);
    }
    if let Some(info) = session.token_info() {
        println!("{}", format::dim(&info));
    }
}

pub async fn handle_role_create(
    settings: &Settings,
    base_url: Option<&str>,
    name: &str,
    content: &str,
) -> Result<()> {
    let registry = RoleRegistry::new(backend(settings, base_url)?);
    match registry.create(name, content).await {
        Ok(text) => println!("{}", format::success(&text)),
        Err(err) => println!("{}", format::warn(&err.to_string())),
    }
    Ok(())
}

pub async fn handle_role_list(settings: &Settings, base_url: Option<&str>) -> Result<()> {
    let registry = RoleRegistry::new(backend(settings, base_url)?);
    match registry.list().await {
        Ok(roles) if roles.is_empty() => println!("No roles defined yet."),
        Ok(roles) => println!("{}", render_roles(&roles)),
        Err(err) => println!("{}", format::error(&err.to_string())),
    }
    Ok(())
}

pub async fn handle_role_get(
    settings: &Settings,
    base_url: Option<&str>,
    name: &str,
) -> Result<()> {
    let registry = RoleRegistry::new(backend(settings, base_url)?);
    match registry.fetch(name).await {
        Ok(roles) if roles.is_empty() => println!("No role named {}.", name),
        Ok(roles) => println!("{}", render_roles(&roles)),
        Err(err) => println!("{}", format::warn(&err.to_string())),
    }
    Ok(())
}

pub async fn handle_role_delete(
    settings: &Settings,
    base_url: Option<&str>,
    name: &str,
) -> Result<()> {
    let registry = RoleRegistry::new(backend(settings, base_url)?);
    match registry.remove(name).await {
        Ok(text) => println!("{}", format::success(&text)),
        Err(err) => println!("{}", format::warn(&err.to_string())),
    }
    Ok(())
}

pub async fn handle_config_init(force: bool) -> Result<()> {
    let path = Settings::init(force)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

pub async fn handle_config_list(settings: &Settings) -> Result<()> {
    println!("Backend base URL: {}", settings.base_url);
    Ok(())
}

pub async fn handle_config_set(settings: &mut Settings, key: &str, value: &str) -> Result<()> {
    match key {
        "base-url" | "base_url" => settings.base_url = value.to_owned(),
        _ => println!("Unknown config key: {}", key),
    }
    settings.save()?;
    Ok(())
}
