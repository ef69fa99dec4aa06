use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// docsmith: generate documentation, open pull requests, and check code
/// quality against a docsmith backend, from the terminal.
///
/// Files can be passed here, typed into the TUI, or dropped onto the
/// terminal window.
#[derive(Parser, Debug)]
#[command(name = "docsmith", version, about)]
struct Cli {
    /// Source files to load into the documentation list.
    files: Vec<PathBuf>,

    /// File to preselect for code quality analysis.
    #[arg(short, long)]
    quality: Option<PathBuf>,

    /// Backend API base URL (overrides the config file).
    #[arg(long)]
    backend_url: Option<String>,

    /// Directory downloads and exports are written to (overrides the config file).
    #[arg(long)]
    download_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging.
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Log to a file so the TUI's alternate screen stays clean.
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docsmith");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_path = log_dir.join("docsmith.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);

    match log_file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
    }

    // Load config, then let flags win.
    let mut config = docsmith_core::DocsmithConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
        docsmith_core::DocsmithConfig::default()
    });
    if let Some(url) = cli.backend_url {
        config.backend.base_url = url;
    }
    if let Some(dir) = cli.download_dir {
        config.output.download_dir = Some(dir);
    }

    tracing::info!(
        backend = %config.backend.base_url,
        "Starting docsmith v{}",
        env!("CARGO_PKG_VERSION")
    );

    let mut app = docsmith_tui::App::new(config);
    app.set_initial_files(cli.files);
    app.set_initial_quality_file(cli.quality);

    app.run().await?;

    tracing::info!("docsmith exited cleanly");
    Ok(())
}
