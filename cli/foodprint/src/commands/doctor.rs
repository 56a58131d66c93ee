//! `foodprint doctor` — dataset and project diagnostics.

use std::path::Path;

use anyhow::Result;

use foodprint_charts::{DashboardContext, FilterState, GasFilter, OriginFilter};
use foodprint_data::{load, Dataset, Gas};

use crate::config::FoodprintConfig;

/// Print dataset diagnostic information.
pub fn run(project_dir: &Path, config: &FoodprintConfig) -> Result<()> {
    println!("=== Foodprint Doctor ===");
    println!();
    println!("Foodprint version: {}", env!("CARGO_PKG_VERSION"));
    println!("Project: {}", config.project.name);
    println!();

    let data_dir = project_dir.join(&config.data.dir);
    println!("--- Data Files ({}) ---", data_dir.display());
    for file in [load::EMISSIONS_FILE, load::PRODUCTIONS_FILE, load::FLOWS_FILE] {
        let status = if data_dir.join(file).is_file() {
            "found"
        } else {
            "MISSING"
        };
        println!("  {file:<20} {status}");
    }
    println!();

    println!("--- Dataset ---");
    let dataset = match Dataset::load(&data_dir) {
        Ok(dataset) => dataset,
        Err(e) => {
            println!("  load failed: {e}");
            return Ok(());
        }
    };
    println!("  Emission records:   {}", dataset.emissions.len());
    println!("  Production records: {}", dataset.productions.len());
    println!("  Flow records:       {}", dataset.flows.len());
    println!();

    let ctx = DashboardContext::new(dataset, config.charts);
    println!("--- Derived Views ---");
    for category in [OriginFilter::All, OriginFilter::Animal, OriginFilter::Vegetal] {
        println!(
            "  {:<8} {:>2} ranked, {:>2} selectable",
            category.name(),
            ctx.ranked(category).records().len(),
            ctx.catalog(category).options().len(),
        );
    }
    for &gas in &Gas::ALL {
        println!(
            "  {:<8} flow total {:>10.1}",
            gas.name(),
            ctx.flows().total(GasFilter::Only(gas)),
        );
    }
    println!();

    println!("--- Startup Defaults ---");
    match FilterState::initial(&ctx) {
        Ok(state) => {
            println!("  Product: {}", state.product);
            println!("  Year:    {}", state.year);
        }
        Err(e) => println!("  unavailable: {e}"),
    }

    Ok(())
}
