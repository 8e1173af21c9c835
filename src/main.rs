use anyhow::Result;
use greenverify::{
    backend::{Backend, FormSubmission, HttpBackend},
    cli::{Command, HELP},
    config::{self, Config},
    ui::{Controller, HtmlDocument},
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::try_new(log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .init();
    Ok(())
}

async fn write_page(config: &Config, document: &HtmlDocument) -> Result<()> {
    if let Some(path) = &config.output.path {
        tokio::fs::write(path, document.to_html()).await?;
    }
    Ok(())
}

/// Runs one command. Returns `false` when the session should end.
async fn dispatch(
    command: Command,
    config: &Config,
    controller: &mut Controller,
    document: &mut HtmlDocument,
) -> Result<bool> {
    match command {
        Command::Predict { overrides } => {
            let mut form = FormSubmission::from_config(&config.form);
            for (name, value) in overrides {
                form.set(&name, value);
            }
            let outcome = controller.submit_prediction(&form, document).await;
            println!("predict: {:?}", outcome);
        }
        Command::Assess => {
            let outcome = controller.request_assessment(document).await;
            println!("assess: {:?}", outcome);
        }
        Command::Section(kind) => {
            let outcome = controller.fetch_section(kind, document).await;
            println!("section {}: {:?}", kind, outcome);
        }
        Command::Chat(question) => {
            let outcome = controller.send_chat(&question, document).await;
            println!("chat: {:?}", outcome);
        }
        Command::ToggleChat => {
            let open = controller.toggle_chat(document);
            println!("chat {}", if open { "opened" } else { "closed" });
        }
        Command::CloseChat => {
            controller.close_chat(document);
            println!("chat closed");
        }
        Command::Health => match controller.backend().health().await {
            Ok(status) => println!(
                "health: {} (model loaded: {}, assistant available: {})",
                status.status, status.model_loaded, status.assistant_available
            ),
            Err(e) => println!("health: unreachable ({})", e),
        },
        Command::Show => println!("{}", document.to_html()),
        Command::Help => println!("{}", HELP),
        Command::Quit => return Ok(false),
    }

    if let Some((kind, message)) = document.alert() {
        println!("[{}] {}", kind.as_str(), message);
    }
    write_page(config, document).await?;
    Ok(true)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    init_tracing(&log_level)?;

    info!(
        "Starting GreenVerify client against {} with log level: {}",
        config.backend.base_url, log_level
    );

    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&config.backend)?);
    let mut controller = Controller::new(backend);
    let mut document = HtmlDocument::new();

    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                warn!("Rejected input line: {}", e);
                println!("{}", e);
                continue;
            }
        };
        if !dispatch(command, &config, &mut controller, &mut document).await? {
            break;
        }
    }

    info!("GreenVerify client exiting");
    Ok(())
}
