//! Foodprint CLI — serve and inspect the food-footprint dashboard.

mod commands;
mod config;

use std::process;

use clap::{Parser, Subcommand};

use config::FoodprintConfig;

#[derive(Parser)]
#[command(name = "foodprint", version, about = "Food products footprint dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new foodprint project
    Init {
        /// Project name
        name: String,
    },
    /// Launch the dashboard API server
    Serve {
        /// Listen address (default from foodprint.toml, else 127.0.0.1)
        #[arg(long)]
        host: Option<String>,
        /// Listen port (default from foodprint.toml, else 8050)
        #[arg(long)]
        port: Option<u16>,
        /// Verbose request logging
        #[arg(long)]
        debug: bool,
    },
    /// Render a chart specification from the loaded dataset
    Inspect {
        /// Chart to render (bar, map, sankey)
        #[arg(long)]
        chart: String,
        /// Origin category for the bar chart (all, animal, vegetal)
        #[arg(long)]
        category: Option<String>,
        /// Canonical product identifier for the map
        #[arg(long)]
        product: Option<String>,
        /// Production year for the map
        #[arg(long)]
        year: Option<u16>,
        /// Map region (world, europe, asia, africa, north america, south america)
        #[arg(long)]
        region: Option<String>,
        /// Gas filter for the Sankey diagram (All, CO2, CH4, N2O, F-gases)
        #[arg(long)]
        gas: Option<String>,
        /// Output format (text, json)
        #[arg(long)]
        export: Option<String>,
    },
    /// Check dataset and project status
    Doctor,
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Serve { host, port, debug } => {
            let (config, project_dir) = load_config_or_default(&cwd)?;
            commands::serve::run(&project_dir, &config, host.as_deref(), port, debug)
        }

        Commands::Inspect {
            chart,
            category,
            product,
            year,
            region,
            gas,
            export,
        } => {
            let (config, project_dir) = load_config_or_default(&cwd)?;
            commands::inspect::run(
                &project_dir,
                &config,
                &chart,
                category.as_deref(),
                product.as_deref(),
                year,
                region.as_deref(),
                gas.as_deref(),
                export.as_deref(),
            )
        }

        Commands::Doctor => {
            let (config, project_dir) = load_config_or_default(&cwd)?;
            commands::doctor::run(&project_dir, &config)
        }
    }
}

/// Load `foodprint.toml` by upward search, or fall back to defaults rooted
/// at the current directory.
fn load_config_or_default(
    cwd: &std::path::Path,
) -> anyhow::Result<(FoodprintConfig, std::path::PathBuf)> {
    match FoodprintConfig::find_and_load(cwd)? {
        Some((config, dir)) => Ok((config, dir)),
        None => {
            let config: FoodprintConfig = toml::from_str("[project]\nname = \"foodprint\"\n")?;
            Ok((config, cwd.to_path_buf()))
        }
    }
}
