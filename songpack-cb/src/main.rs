//! gen-api - Catalog Builder entry point
//!
//! Usage: `gen-api <directory> [url-prefix]`
//!
//! Writes `packs.json` and `packs/<pack>.json` into `<directory>`. Run without
//! arguments to print usage.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::info;

/// Command-line arguments for gen-api
#[derive(Parser, Debug)]
#[command(name = "gen-api")]
#[command(about = "Generate the static song pack JSON API for a directory of songs")]
#[command(version)]
struct Args {
    /// Root folder laid out as <pack>/<song>/<files>
    directory: Option<PathBuf>,

    /// Prefix prepended to every asset URI (e.g. http://cdn.example.com)
    #[arg(default_value = "")]
    url_prefix: String,
}

fn main() -> Result<()> {
    songpack_common::logging::init("songpack_cb=info");

    let args = Args::parse();

    let Some(directory) = args.directory else {
        // Usage only; not an error
        Args::command()
            .print_help()
            .context("Failed to print usage")?;
        println!();
        return Ok(());
    };

    info!(
        "gen-api v{}: scanning {} (prefix '{}')",
        env!("CARGO_PKG_VERSION"),
        directory.display(),
        args.url_prefix
    );

    songpack_cb::generate(&directory, &args.url_prefix)
        .with_context(|| format!("Failed to generate catalog for {}", directory.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_means_usage() {
        let args = Args::try_parse_from(["gen-api"]).unwrap();
        assert!(args.directory.is_none());
    }

    #[test]
    fn test_url_prefix_defaults_to_empty() {
        let args = Args::try_parse_from(["gen-api", "songs"]).unwrap();
        assert_eq!(args.directory, Some(PathBuf::from("songs")));
        assert_eq!(args.url_prefix, "");
    }

    #[test]
    fn test_url_prefix_positional() {
        let args = Args::try_parse_from(["gen-api", "songs", "http://cdn.example.com"]).unwrap();
        assert_eq!(args.url_prefix, "http://cdn.example.com");
    }

    #[test]
    fn test_usage_renders() {
        let help = Args::command().render_help().to_string();
        assert!(help.contains("gen-api"));
        assert!(help.contains("[URL_PREFIX]"));
    }
}
