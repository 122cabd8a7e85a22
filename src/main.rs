use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use chunkwatch::{connector::tui, Commands, Container, ContainerConfig, Router};

#[derive(Parser)]
#[command(name = "chunkwatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Backend base URL (falls back to CHUNKWATCH_URL, then http://localhost:8080)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "5", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Serve generated demo state from memory instead of contacting a backend
    #[arg(long, global = true)]
    mock_backend: bool,

    /// Append logs to this file (the live view otherwise discards them)
    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or_default();

    let interactive = matches!(command, Commands::Watch { .. });
    let log_path = cli.log_file.as_deref().map(|p| PathBuf::from(expand_tilde(p)));
    init_logging(cli.verbose, log_path.as_deref(), interactive)?;

    let container = Container::new(ContainerConfig {
        base_url: cli.url.clone(),
        timeout: Duration::from_secs(cli.timeout),
        mock_backend: cli.mock_backend,
    })?;

    match command {
        Commands::Watch { sort } => {
            tui::run(container.backend(), sort.into()).await?;
        }
        command => {
            let router = Router::new(&container);
            let output = router.route(command).await?;
            println!("{}", output);
        }
    }

    Ok(())
}

/// Logs go to `log_file` when given. Without one, the live view discards them so
/// they cannot scribble over the alternate screen; one-shot commands use stderr.
fn init_logging(verbose: bool, log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false);

    if let Some(path) = log_file {
        let subscriber = builder
            .with_ansi(false)
            .with_writer(Mutex::new(open_log_file(path)?))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else if interactive {
        let subscriber = builder.with_writer(io::sink).finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = builder.with_writer(io::stderr).finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
