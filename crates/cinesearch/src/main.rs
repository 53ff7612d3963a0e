use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cinesearch::cli::commands::{self, Facet};

#[derive(Parser)]
#[command(name = "cinesearch")]
#[command(about = "Cinesearch - Semantic Movie Search\nQuery a movie catalog by meaning, year and genre")]
#[command(version)]
struct Cli {
  /// Configuration file (defaults to $CINESEARCH_CONFIG or ~/.cinesearch/config.yaml)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Show debug output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Search the catalog
  Search {
    /// Search terms (space-separated)
    #[arg(required = true)]
    terms: Vec<String>,
    /// Maximum number of results
    #[arg(short = 'k', long)]
    top_k: Option<usize>,
    /// Prefer movies from this year
    #[arg(short, long)]
    year: Option<String>,
    /// Prefer movies of this genre
    #[arg(short, long)]
    genre: Option<String>,
    /// One line per result
    #[arg(short, long)]
    brief: bool,
  },
  /// Show a single movie as JSON
  Show {
    /// Movie id
    id: i64,
  },
  /// List all genres
  Genres,
  /// List all countries
  Countries,
  /// List all categories
  Categories,
  /// Summarize the loaded index
  Stats,
}

async fn handle(cli: Cli) -> Result<()> {
  let config = cli.config.as_deref();
  match cli.command {
    Command::Search { terms, top_k, year, genre, brief } => {
      commands::search(config, &terms, top_k, year.as_deref(), genre.as_deref(), brief).await
    }
    Command::Show { id } => commands::show(config, id),
    Command::Genres => commands::list_facet(config, Facet::Genres),
    Command::Countries => commands::list_facet(config, Facet::Countries),
    Command::Categories => commands::list_facet(config, Facet::Categories),
    Command::Stats => commands::stats(config),
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  if cli.verbose {
    marquee::set_level(marquee::Level::Debug);
  }

  handle(cli).await
}
