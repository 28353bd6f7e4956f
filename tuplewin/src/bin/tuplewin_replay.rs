//! Replay an operation script against an in-memory window table.
//!
//! ```text
//! tuplewin-replay --config window.toml --script ops.txt [--json]
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tuplewin::replay::{parse_script, run_script};
use tuplewin::{MemoryRecordStore, WindowConfig, WindowManager};

#[derive(Parser, Debug)]
#[command(name = "tuplewin-replay", about = "Replay window operations and dump the result")]
struct Args {
    /// Window configuration (TOML). Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Operation script, one operation per line
    #[arg(long)]
    script: PathBuf,

    /// Print the final state as a JSON snapshot instead of a dump
    #[arg(long)]
    json: bool,

    /// Log filter, e.g. "tuplewin=debug"
    #[arg(long, env = "TUPLEWIN_LOG", default_value = "tuplewin=info")]
    log: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log))
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => WindowConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WindowConfig::default(),
    };
    let source = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading script {}", args.script.display()))?;
    let ops = parse_script(&source)?;

    let mut manager: WindowManager<MemoryRecordStore<String>> =
        WindowManager::in_memory(&config).context("building window table")?;
    tracing::info!(
        window_size = config.window_size,
        slide_size = config.slide_size,
        ops = ops.len(),
        "replaying script"
    );

    for line in run_script(&mut manager, &ops) {
        println!("{}", line);
    }

    if let Err(e) = manager.verify_chain() {
        tracing::warn!(error = %e, "chain check failed after replay");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&manager.snapshot())?);
    } else {
        print!("{}", manager.dump());
    }
    Ok(())
}
