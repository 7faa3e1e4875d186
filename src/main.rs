// src/main.rs
use std::fs::File;
use std::io::{self, BufWriter, Cursor, Write};
use std::process::exit;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufRead, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use leaker::cli::Args;
use leaker::config::Config;
use leaker::engine::ScanSession;
use leaker::logger;
use leaker::sources::SourceRegistry;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logger::init(args.log_level());

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    if args.init_config {
        let path = Config::init(args.config.as_deref(), args.force)?;
        println!("Configuration initialized at {}", path.display());
        return Ok(());
    }

    let config = Config::load(args.config.as_deref())?;
    let registry = SourceRegistry::builtin(Some(config.user_agent.clone()))?;

    if args.list_sources {
        for source in registry.iter() {
            println!("{:<12} {}", source.name(), source.description());
        }
        return Ok(());
    }

    let session = ScanSession::new(args.options(&config)?, &registry)?;

    let mut outputs: Vec<Box<dyn Write>> = vec![Box::new(BufWriter::new(io::stdout()))];
    if let Some(path) = &args.output {
        let file = File::create(path).with_context(|| format!("Failed to create output file {}", path.display()))?;
        outputs.push(Box::new(BufWriter::new(file)));
    }

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping scan");
            interrupt.cancel();
        }
    });

    let input = open_input(&args).await?;
    let summary = session.run(&cancel, input, outputs.as_mut_slice()).await?;

    info!(
        "Done: {} target(s), {} result(s), {} failed queries",
        summary.targets, summary.findings, summary.failed_queries
    );
    Ok(())
}

/// Targets from `--target`, then `--list`, then stdin
async fn open_input(args: &Args) -> Result<Box<dyn AsyncBufRead + Unpin>> {
    if !args.targets.is_empty() {
        return Ok(Box::new(Cursor::new(args.targets.join("\n").into_bytes())));
    }

    match &args.list {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open target list {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
    }
}
