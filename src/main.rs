use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use mdblocks::{Config, Format};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_FILE: &str = "mdblocks.toml";

#[derive(Parser)]
#[command(name = "mdblocks")]
#[command(about = "Compile Markdown into a flat sequence of document elements")]
struct Cli {
    /// Input Markdown file (reads stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Config file (defaults to ./mdblocks.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let markdown = read_input(cli.input.as_deref())?;

    let elements = mdblocks::parse(&markdown);
    info!(elements = elements.len(), "parsed markdown");

    let format = cli.format.unwrap_or(config.output.format);
    let rendered = match format {
        Format::Text => mdblocks::elements_to_text(&elements, &config),
        Format::Json => {
            let mut json =
                serde_json::to_string_pretty(&elements).context("Failed to serialize elements")?;
            json.push('\n');
            json
        }
        Format::Debug => format!("{elements:#?}\n"),
    };

    match &cli.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("Error writing {}", path.display()))?,
        None => io::stdout()
            .write_all(rendered.as_bytes())
            .context("Error writing to stdout")?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => match Config::load_from_path(path)? {
            Some(config) => Ok(config),
            None => bail!("Config file not found: {}", path.display()),
        },
        None => {
            let config = Config::load_from_path(DEFAULT_CONFIG_FILE)?;
            if config.is_some() {
                debug!(path = DEFAULT_CONFIG_FILE, "loaded config");
            }
            Ok(config.unwrap_or_else(Config::compiled_default))
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Error reading {}", path.display())),
        _ => io::read_to_string(io::stdin()).context("Error reading stdin"),
    }
}
