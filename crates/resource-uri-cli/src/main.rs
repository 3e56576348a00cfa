use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use resource_uri::{Direction, ResourceNormalizer, UriConfig};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "resource-uri",
    about = "Normalize HTTP paths into low-cardinality resource names"
)]
struct Cli {
    /// TOML file with fragment_regex / mapping_incoming / mapping_outgoing / legacy_mapping
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ignore DD_TRACE_RESOURCE_URI_* environment variables
    #[arg(long)]
    no_env: bool,

    /// Which mapping rules apply (incoming or outgoing)
    #[arg(long, short, default_value = "incoming")]
    direction: Direction,

    /// Print one JSON object per path
    #[arg(long)]
    json: bool,

    /// Paths to normalize (read from stdin, one per line, when omitted)
    paths: Vec<String>,
}

#[derive(Serialize)]
struct Output<'a> {
    path: &'a str,
    resource: String,
    direction: Direction,
}

fn load_config(cli: &Cli) -> Result<UriConfig> {
    let config = match &cli.config {
        Some(path) => UriConfig::load(path)?,
        None => UriConfig::default(),
    };

    Ok(if cli.no_env { config } else { config.merge_env() })
}

fn emit(out: &mut impl Write, cli: &Cli, normalizer: &ResourceNormalizer, path: &str) -> Result<()> {
    let resource = normalizer.normalize(Some(path), cli.direction);

    if cli.json {
        let line = serde_json::to_string(&Output {
            path,
            resource,
            direction: cli.direction,
        })?;
        writeln!(out, "{}", line)?;
    } else {
        writeln!(out, "{}", resource)?;
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let normalizer = ResourceNormalizer::new(&config);
    debug!(legacy = normalizer.is_legacy(), direction = %cli.direction, "normalizer ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.paths.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read path from stdin")?;
            emit(&mut out, &cli, &normalizer, line.trim_end_matches('\r'))?;
        }
    } else {
        for path in &cli.paths {
            emit(&mut out, &cli, &normalizer, path)?;
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(args: &[&str], path: &str) -> String {
        let cli = Cli::parse_from(args);
        let normalizer = ResourceNormalizer::new(&load_config(&cli).unwrap());
        let mut out = Vec::new();
        emit(&mut out, &cli, &normalizer, path).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_output() {
        assert_eq!(render(&["resource-uri", "--no-env"], "/users/42"), "/users/?\n");
    }

    #[test]
    fn test_json_output() {
        let line = render(&["resource-uri", "--no-env", "--json", "-d", "outgoing"], "users/42/");
        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["path"], "users/42/");
        assert_eq!(value["resource"], "/users/?/");
        assert_eq!(value["direction"], "outgoing");
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let cli = Cli::parse_from(["resource-uri", "--no-env", "--config", "no-such-file.toml"]);
        assert_eq!(load_config(&cli).unwrap(), UriConfig::default());
    }
}
