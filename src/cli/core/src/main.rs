/* src/cli/core/src/main.rs */

mod config;
mod logging;
mod resolve;
mod routes;
mod serve;
mod site;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use config::{PujariConfig, find_pujari_config, load_pujari_config};

#[derive(Parser)]
#[command(name = "pujari", about = "Pujari site server and metadata tools")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve every page with its metadata rendered into the HTML shell
  Serve {
    /// Path to pujari.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Print the metadata a path resolves to
  Resolve {
    /// Site path, e.g. /services or /blog/significance-pooja
    path: String,
    /// Path to pujari.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print rendered head markup instead of JSON
    #[arg(long)]
    html: bool,
  },
  /// List the paths the site serves
  Routes,
}

/// Resolve config path (explicit or auto-detected) and parse it
fn resolve_config(explicit: Option<PathBuf>) -> Result<(PathBuf, PujariConfig)> {
  let path = match explicit {
    Some(p) => p,
    None => {
      let cwd = std::env::current_dir().context("failed to get cwd")?;
      find_pujari_config(&cwd)?
    }
  };
  let config = load_pujari_config(&path)?;
  Ok((path, config))
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Command::Serve { config } => {
      let (path, config) = resolve_config(config)?;
      logging::init(config.log.json);
      tracing::info!(config = %path.display(), "config loaded");
      serve::run_serve(&config, &path).await?;
    }
    Command::Resolve { path: site_path, config, html } => {
      let (path, config) = resolve_config(config)?;
      logging::init(config.log.json);
      let out = resolve::run_resolve(&config, &path, &site_path, html).await?;
      println!("{out}");
    }
    Command::Routes => {
      print!("{}", routes::format_routes());
    }
  }
  Ok(())
}
