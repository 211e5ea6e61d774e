use barfeed::config::{Config, ConfigStore, ConfigWatcher};
use barfeed::core::{spawn_stdin_reader, Output};
use barfeed_core::Registry;
use clap::Parser;
use log::{error, info, warn};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Exit status for configuration and logging setup failures
const EXIT_SETUP: u8 = 2;

/// How long module calls still running at exit may take to finish
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// barfeed - A status line feeder for i3bar and swaybar
#[derive(Parser, Debug, Clone)]
#[command(name = "barfeed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to config.json in the user config directory)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Append log output to this file instead of stderr
    #[arg(short = 'l', long = "log", value_name = "FILE")]
    log: Option<PathBuf>,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Do not reload the config when the file changes
    #[arg(long = "no-watch")]
    no_watch: bool,

    /// List available modules and exit
    #[arg(long = "list-modules")]
    list_modules: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(message) = init_logger(&cli) {
        eprintln!("barfeed: {}", message);
        return ExitCode::from(EXIT_SETUP);
    }

    info!("Starting barfeed v{}", env!("CARGO_PKG_VERSION"));

    let mut registry = Registry::new();
    barfeed_modules::register_all(&mut registry);

    if cli.list_modules {
        for name in registry.names() {
            println!("{}", name);
        }
        return ExitCode::SUCCESS;
    }

    let path = match cli.config.clone().map_or_else(Config::default_path, Ok) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("barfeed: {}", e);
            return ExitCode::from(EXIT_SETUP);
        }
    };
    let store = match ConfigStore::open(&path, Arc::new(registry)) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("barfeed: {}", e);
            return ExitCode::from(EXIT_SETUP);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = rt.block_on(run(store, !cli.no_watch));
    rt.shutdown_timeout(SHUTDOWN_GRACE);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Set up env_logger with verbosity based on -d/--debug
///
/// Level 0 (default): warn, 1: info, 2: debug, 3+: trace.
/// RUST_LOG overrides the level.
fn init_logger(cli: &Cli) -> Result<(), String> {
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level));

    if let Some(path) = &cli.log {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| format!("cannot open log file {}: {}", path.display(), e))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

async fn run(store: ConfigStore, watch: bool) -> anyhow::Result<()> {
    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            wait_for_signal().await;
            info!("Shutdown signal received");
            shutdown.cancel();
        });
    }

    // Keep the watcher alive for the whole run
    let mut _watcher = None;
    let changes = if watch {
        match ConfigWatcher::spawn(store.path()) {
            Ok((watcher, changes)) => {
                _watcher = Some(watcher);
                Some(changes)
            }
            Err(e) => {
                warn!("Config hot reload disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let clicks = spawn_stdin_reader()?;
    store.run(Output::stdout(), clicks, changes, shutdown).await
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(terminate) => terminate,
        Err(e) => {
            warn!("Cannot listen for SIGTERM: {}", e);
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = terminate.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
