mod action;
mod app;
mod cli;
mod color;
mod components;
mod config;
mod error;
mod feed;
mod layout;
mod present;
mod print;
mod toggle;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use color_eyre::eyre::Result;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;
use config::ConfigManager;
use feed::FeedClient;
use present::{BoardView, RenderState};
use toggle::PastToggle;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse_args();

    if cli.init_config {
        if let Some(dir) = &cli.config_dir {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut config_manager = match &cli.config_dir {
        Some(dir) => ConfigManager::with_dir(dir.clone())?,
        None => ConfigManager::new()?,
    };

    if cli.init_config {
        for warning in config_manager.take_load_warnings() {
            eprintln!("warning: {}", warning);
        }
        return init_config(&config_manager);
    }

    let general = &config_manager.app_config().general;
    let level = cli.log_level.clone().unwrap_or_else(|| general.log_level.clone());
    let log_dir = general
        .log_file
        .clone()
        .unwrap_or_else(ConfigManager::default_log_dir);

    // Guard must live for the lifetime of the program to flush the file writer
    let _log_guard = init_logging(&level, cli.print, log_dir)?;
    config_manager.report_load_warnings();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    if cli.print {
        return print_once(&cli, &config_manager, &runtime);
    }

    let _runtime_guard = runtime.enter();
    let mut app = app::App::new(&cli, config_manager)?;
    app.run()?;

    Ok(())
}

fn init_logging(level: &str, to_stderr: bool, log_dir: PathBuf) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout belongs to the board (or to --print output)
    if to_stderr {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .init();
        return Ok(None);
    }

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("flite-events")
        .filename_suffix("log")
        .build(log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    Ok(Some(guard))
}

fn init_config(config_manager: &ConfigManager) -> Result<()> {
    let written = config_manager.write_default_configs()?;
    if written.is_empty() {
        println!(
            "Config files already exist in {}",
            config_manager.config_dir().display()
        );
    }
    for path in written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// One render cycle without the terminal UI.
fn print_once(
    cli: &Cli,
    config_manager: &ConfigManager,
    runtime: &tokio::runtime::Runtime,
) -> Result<()> {
    let events = config_manager.resolve_events(&cli.to_override());
    let timeout = config_manager.app_config().general.request_timeout_secs;
    let client = FeedClient::http(Duration::from_secs(timeout))?;

    let state = match runtime.block_on(client.fetch(&events)) {
        Ok(outcome) => RenderState::Loaded(outcome),
        Err(e) => {
            tracing::error!("Error fetching events: {}", e);
            RenderState::Failed(e)
        }
    };

    let view = BoardView::build(&events, &state);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    print::write_board(&mut out, &view, &events, PastToggle::for_config(&events))?;
    out.flush()?;

    Ok(())
}
