use anyhow::{Context, Result};
use chatmark_config::Config;
use chatmark_engine::{Parser, transform_with};
use clap::{ArgAction, Parser as _};
use serde::Serialize;
use std::{
    io::{self, Read},
    path::{Path, PathBuf},
};

/// Render a chat message as a JSON document tree.
#[derive(clap::Parser)]
#[command(name = "chatmark", author, version, about)]
struct Cli {
    /// Message file (default: read stdin)
    file: Option<PathBuf>,

    /// Config file (default: ~/.config/chatmark/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,

    /// Print the flat token stream instead of the document tree
    #[arg(long, action = ArgAction::SetTrue)]
    tokens: bool,

    /// Log parser decisions to stderr
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let config = load_config(cli.config.as_deref())?;
    let src = read_message(cli.file.as_deref())?;

    let parser = Parser::with_options(config.parser_options());
    let tokens = parser.parse(&src);
    let pretty = cli.pretty || config.pretty;

    let output = if cli.tokens {
        to_json(&tokens, pretty)?
    } else {
        let nodes =
            transform_with(&tokens, &config.mentions).context("Failed to transform message")?;
        to_json(&nodes, pretty)?
    };

    println!("{output}");
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => Config::expand_path(path).unwrap_or_else(|| path.to_path_buf()),
        None => Config::config_path(),
    };

    match Config::load_from_path(&path)? {
        Some(config) => {
            log::debug!("loaded config from {}", path.display());
            Ok(config)
        }
        None => {
            log::debug!("no config at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }
}

fn read_message(file: Option<&Path>) -> Result<String> {
    match file {
        Some(file) => std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read message from {}", file.display())),
        None => {
            let mut src = String::new();
            io::stdin()
                .read_to_string(&mut src)
                .context("Failed to read message from stdin")?;
            Ok(src)
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
