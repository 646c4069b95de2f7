//! CLI for inspecting gembridge behaviour on captured requests and responses.

#![allow(clippy::print_stdout, reason = "CLI tool outputs to stdout")]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

use gembridge_core::modules::config::{
    default_config_path, get_compat_config, load_config, update_compat_config,
};
use gembridge_core::modules::logger::init_logger;
use gembridge_core::{apply_thinking_config, extract_usage_from_body, normalize_thinking_config_json};
use gembridge_types::ThinkingNormalizationMode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a gembridge.json config file (defaults to ./gembridge.json)
    #[arg(long, global = true, env = "GEMBRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalizes a client thinking config and prints the upstream form
    Normalize {
        /// JSON file holding the config (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Rewrites the thinking settings of a Gemini request body
    Apply {
        /// JSON file holding the request body (stdin when omitted)
        file: Option<PathBuf>,
        /// Leave the body untouched regardless of config
        #[arg(long)]
        passthrough: bool,
    },
    /// Extracts usageMetadata from a captured response body
    Usage {
        /// File holding the raw response body (JSON or SSE)
        file: PathBuf,
        /// Content-Type of the captured response
        #[arg(long)]
        content_type: Option<String>,
    },
}

/// Reads the whole input from `path`, or stdin when `None`.
fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(p) => std::fs::read(p).with_context(|| format!("Failed to read {}", p.display())),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf).context("Failed to read stdin")?;
            Ok(buf)
        },
    }
}

fn read_json(path: Option<&Path>) -> Result<serde_json::Value> {
    let bytes = read_input(path)?;
    serde_json::from_slice(&bytes).context("Input is not valid JSON")
}

/// `--config` when given, otherwise `gembridge.json` in the working directory.
fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => {
            let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
            Ok(default_config_path(&cwd))
        },
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(if cli.verbose { "debug" } else { "warn" });

    let path = resolve_config_path(cli.config)?;
    let config = load_config(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    update_compat_config(config);
    info!("Using config {}", path.display());
    let config = get_compat_config();

    match cli.command {
        Commands::Normalize { file } => {
            let raw = read_json(file.as_deref())?;
            let normalized = normalize_thinking_config_json(&raw);
            let out = normalized.map_or(serde_json::Value::Null, |cfg| cfg.to_json());
            println!("{}", serde_json::to_string_pretty(&out)?);
        },
        Commands::Apply { file, passthrough } => {
            let mut body = read_json(file.as_deref())?;
            let mode =
                if passthrough { ThinkingNormalizationMode::Passthrough } else { config.thinking.mode };
            let applied = apply_thinking_config(&mut body, mode);
            info!("Applied thinking config: {:?}", applied);
            println!("{}", serde_json::to_string_pretty(&body)?);
        },
        Commands::Usage { file, content_type } => {
            let bytes = read_input(Some(&file))?;
            let usage = extract_usage_from_body(content_type.as_deref(), &bytes, &config.response)
                .context("Failed to extract usage")?;
            println!("{}", serde_json::to_string_pretty(&usage)?);
        },
    }

    Ok(())
}
