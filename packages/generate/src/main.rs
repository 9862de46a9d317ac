#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! CLI tool for rendering the theft map page and charts to files.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use theft_map_chart::config::load_config;
use theft_map_generate::{Surface, generate};

#[derive(Parser)]
#[command(name = "theft_map_generate", about = "Theft map rendering tool")]
struct Cli {
    /// Configuration file replacing the built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the full HTML page
    Page {
        /// Output file
        #[arg(long)]
        out: PathBuf,
    },
    /// Render the choropleth map as SVG
    Map {
        /// Output file
        #[arg(long)]
        out: PathBuf,
    },
    /// Render the map legend as SVG
    Legend {
        /// Output file
        #[arg(long)]
        out: PathBuf,
    },
    /// Render the bar chart as SVG
    Bar {
        /// Output file
        #[arg(long)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    let (surface, out) = match cli.command {
        Commands::Page { out } => (Surface::Page, out),
        Commands::Map { out } => (Surface::Map, out),
        Commands::Legend { out } => (Surface::Legend, out),
        Commands::Bar { out } => (Surface::Bar, out),
    };

    generate(surface, &config, &out).await?;

    Ok(())
}
