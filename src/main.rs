//! Binary entrypoint for the photo collage.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use photo_collage::collage::Collage;
use photo_collage::config::Configuration;
use photo_collage::controller::CollageController;
use photo_collage::events::CollageFrame;
use photo_collage::{repository, tasks};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "photo-collage", version, about = "Rolling photo collage")]
struct Args {
    /// Path to YAML config (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the photo directory
    #[arg(short, long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Stop after this many timer ticks
    #[arg(long, value_name = "COUNT")]
    ticks: Option<u64>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"))
        .add_directive(
            format!("photo_collage={level}")
                .parse()
                .context("invalid log directive")?,
        );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}

fn load_config(args: &Args) -> Result<Configuration> {
    let mut cfg = match &args.config {
        Some(path) => Configuration::from_yaml_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Configuration::default(),
    };
    if let Some(dir) = &args.directory {
        cfg.directory = dir.clone();
    }
    cfg.validated().context("invalid configuration values")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is needed before tracing so verbose-logging can raise the level.
    let cfg = load_config(&args)?;
    let verbosity = if cfg.verbose_logging {
        args.verbose.max(1)
    } else {
        args.verbose
    };
    init_tracing(verbosity)?;
    tracing::info!("Loaded configuration:\n{:#?}", cfg);

    let repo = repository::from_config(&cfg);
    let collage = Collage::new(&cfg, Box::new(repo));
    let mut controller = CollageController::new(collage, cfg.interval());

    // Collage -> Viewer (small/bounded)
    let (frame_tx, frame_rx) = mpsc::channel::<CollageFrame>(4);
    let cancel = CancellationToken::new();

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {err}");
                return;
            }
            tracing::info!("ctrl-c received; initiating shutdown");
            cancel.cancel();
        });
    }

    let mut tasks = JoinSet::new();
    tasks.spawn({
        let cancel = cancel.clone();
        async move {
            tasks::viewer::run(frame_rx, cancel)
                .await
                .map(|frames| tracing::info!(frames, "viewer finished"))
                .context("viewer task failed")
        }
    });

    // The ticker borrows the controller, so it runs on this task.
    let ticker = tasks::ticker::run(&mut controller, frame_tx, cancel.clone(), args.ticks).await;
    if ticker.is_err() {
        cancel.cancel();
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(err)) => tracing::error!("{err:?}"),
            Err(err) => tracing::error!("task panicked: {err}"),
        }
    }
    ticker
}
