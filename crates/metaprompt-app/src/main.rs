mod app;
mod attachment;
mod cli;
mod commands;
mod conversation;
mod repl;
mod strings;

#[cfg(test)]
mod test_support;

use std::io::BufRead;
use std::process::ExitCode;

use metaprompt_config::AppConfig;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use app::{App, SubmitOutcome};
use cli::{Args, Command, KeyAction};

/// Load environment variables from .env files (KEY=VALUE lines).
///
/// Existing variables win over file values.
fn load_dotenv() {
    let mut candidates = vec![std::path::PathBuf::from(".env")];
    if let Some(dir) = config_dir_env() {
        candidates.push(dir);
    }

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
        }
    }
}

/// `.env` next to the default config file.
fn config_dir_env() -> Option<std::path::PathBuf> {
    metaprompt_config::default_config_path()
        .ok()
        .and_then(|p| p.parent().map(|dir| dir.join(".env")))
}

/// Install the stderr subscriber. A bare level applies to the workspace
/// crates; anything containing `=` is used as a filter directive.
fn init_logging(level: &str) {
    let directive = if level.contains('=') {
        level.to_string()
    } else {
        format!("metaprompt={level}")
    };
    let filter = EnvFilter::from_default_env();
    let filter = match directive.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter.add_directive(LevelFilter::WARN.into()),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    load_dotenv();

    let args = cli::parse();

    let loaded = metaprompt_config::load_config(args.config.as_deref());
    let level = args
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|c| c.logging.level.clone()))
        .unwrap_or_else(|| "warn".to_string());
    init_logging(&level);

    tracing::info!("Metaprompt v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = match loaded {
        Ok(config) => config,
        Err(e) if args.config.is_some() => {
            tracing::error!("Config load failed: {e}");
            eprintln!("metaprompt: {e}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            AppConfig::default()
        }
    };
    if let Some(model) = args.model.clone() {
        config.model.chat_model = model;
    }
    tracing::info!("Config loaded (model: {})", config.model.chat_model);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    runtime.block_on(run(args, &config))
}

async fn run(args: Args, config: &AppConfig) -> ExitCode {
    let mut app = match App::from_config(config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Startup failed: {e}");
            eprintln!("metaprompt: {e}");
            return ExitCode::FAILURE;
        }
    };

    match args.command.unwrap_or(Command::Chat) {
        Command::Chat => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            let mut out = std::io::stdout();
            match repl::run(&mut app, input, &mut out).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    tracing::error!("Terminal I/O failed: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Ask { prompt, attach } => ask(&mut app, &prompt, attach.as_deref()).await,
        Command::Key { action } => key(&mut app, action),
        Command::Test => {
            let strings = app.strings();
            eprintln!("{}", strings.test_running);
            if app.test_connection().await {
                println!("{}", strings.test_ok);
                ExitCode::SUCCESS
            } else {
                println!("{}", strings.test_failed);
                ExitCode::FAILURE
            }
        }
    }
}

async fn ask(app: &mut App, prompt: &str, attach: Option<&std::path::Path>) -> ExitCode {
    let strings = app.strings();
    if let Some(path) = attach {
        if let Err(e) = app.attach(path) {
            eprintln!("metaprompt: {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    }

    match app.submit(prompt).await {
        SubmitOutcome::Replied { reply, error: None } => {
            println!("{}", reply.content());
            ExitCode::SUCCESS
        }
        SubmitOutcome::Replied { reply, error: Some(_) } => {
            eprintln!("{}", reply.content());
            ExitCode::FAILURE
        }
        SubmitOutcome::NeedsCredential => {
            eprintln!("{}", strings.error_key_missing);
            ExitCode::FAILURE
        }
        SubmitOutcome::Ignored => ExitCode::FAILURE,
    }
}

fn key(app: &mut App, action: KeyAction) -> ExitCode {
    let strings = app.strings();
    match action {
        KeyAction::Set { value } => {
            let value = match value {
                Some(value) => value,
                None => {
                    eprint!("{}", strings.key_prompt);
                    let mut line = String::new();
                    if let Err(e) = std::io::stdin().lock().read_line(&mut line) {
                        eprintln!("metaprompt: {e}");
                        return ExitCode::FAILURE;
                    }
                    line
                }
            };
            match app.set_key(&value) {
                Ok(true) => {
                    println!("{}", strings.key_saved);
                    ExitCode::SUCCESS
                }
                Ok(false) => {
                    eprintln!("{}", strings.key_entry_cancelled);
                    ExitCode::FAILURE
                }
                Err(e) => {
                    eprintln!("metaprompt: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        KeyAction::Clear => match app.clear_key() {
            Ok(()) => {
                println!("{}", strings.key_cleared);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("metaprompt: {e}");
                ExitCode::FAILURE
            }
        },
        KeyAction::Status => {
            println!("{}", app.key_status());
            ExitCode::SUCCESS
        }
    }
}
