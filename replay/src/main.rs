//! merit-replay: apply recorded block bodies offline and print the mints.

use anyhow::Context;
use clap::Parser;
use merit_epochs::BlockBody;
use merit_replay::{ReplayConfig, ReplayVectors};
use merit_utils::{init_logging, LogFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "merit-replay", about = "Merit epoch replay and block body tools")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base; CLI
    /// flags and env vars override them.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "MERIT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, global = true, env = "MERIT_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Replay a vector file and print one JSON line per mint.
    Replay {
        /// JSON file with elements, verified transactions, live weights and blocks.
        #[arg(long)]
        vectors: PathBuf,

        /// Stop at the first rejected block.
        #[arg(long)]
        fail_fast: bool,
    },
    /// Encode a BlockBody JSON file to upper-case hex of its binary form.
    Encode {
        #[arg(long)]
        json: PathBuf,
    },
    /// Decode a hex BlockBody to JSON.
    Decode {
        #[arg(long)]
        hex: String,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<ReplayConfig> {
    let mut config = match &cli.config {
        Some(path) => ReplayConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ReplayConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli)?;
    init_logging(config.log_format, &config.log_level);

    if let Some(path) = &cli.config {
        tracing::info!("loaded config from {}", path.display());
    }

    match cli.command {
        Command::Replay { vectors, fail_fast } => {
            config.fail_fast |= fail_fast;
            let vectors = ReplayVectors::from_file(&vectors)
                .with_context(|| format!("loading vectors {}", vectors.display()))?;
            let report = vectors.run(&config)?;

            for mint in &report.mints {
                println!("{}", serde_json::to_string(mint)?);
            }
            println!(
                "{}",
                serde_json::json!({
                    "blocks": report.blocks,
                    "rejected": report.rejected,
                    "mints": report.mints.len(),
                    "minted": report.minted().to_string(),
                    "next_mint_id": report.next_mint_id,
                    "counters": report.counters,
                })
            );
        }
        Command::Encode { json } => {
            let text = std::fs::read_to_string(&json)
                .with_context(|| format!("reading {}", json.display()))?;
            let body = BlockBody::from_json_str(&text).context("parsing block body JSON")?;
            println!("{}", hex::encode_upper(body.to_bytes()?));
        }
        Command::Decode { hex: input } => {
            let bytes = hex::decode(input.trim()).context("block body is not valid hex")?;
            let body = BlockBody::from_bytes(&bytes).context("decoding block body")?;
            println!("{}", serde_json::to_string_pretty(&body.to_json()?)?);
        }
    }

    Ok(())
}
