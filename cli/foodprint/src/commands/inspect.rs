//! `foodprint inspect` — render a chart specification in the terminal.

use std::path::Path;

use anyhow::{bail, Context, Result};

use foodprint_charts::{
    bar_chart, latest_production_year, map_breakdown, sankey, BarChartView, DashboardContext,
    FilterState, GasFilter, MapView, OriginFilter, Region, SankeyView,
};
use foodprint_data::Dataset;

use crate::config::FoodprintConfig;

#[allow(clippy::too_many_arguments)]
pub fn run(
    project_dir: &Path,
    config: &FoodprintConfig,
    chart: &str,
    category: Option<&str>,
    product: Option<&str>,
    year: Option<u16>,
    region: Option<&str>,
    gas: Option<&str>,
    export: Option<&str>,
) -> Result<()> {
    let data_dir = project_dir.join(&config.data.dir);
    let dataset = Dataset::load(&data_dir)
        .with_context(|| format!("loading dataset from {}", data_dir.display()))?;
    let ctx = DashboardContext::new(dataset, config.charts);
    let defaults = FilterState::initial(&ctx).context("deriving filter defaults")?;
    let as_json = matches!(export, Some("json"));

    match chart {
        "bar" => {
            let category = match category {
                Some(value) => OriginFilter::parse(value)?,
                None => defaults.category,
            };
            let view = bar_chart(&ctx, category);
            if as_json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_bar(&view);
            }
        }
        "map" => {
            let product = product.unwrap_or(&defaults.product);
            let region = match region {
                Some(value) => Region::parse(value)?,
                None => defaults.region,
            };
            let year = match year {
                Some(year) => year,
                None => latest_production_year(&ctx, product)
                    .with_context(|| format!("no production data for '{product}'"))?,
            };
            let view = map_breakdown(&ctx, product, year, region);
            if as_json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_map(&view, product, year);
            }
        }
        "sankey" => {
            let filter = match gas {
                Some(value) => GasFilter::parse(value)?,
                None => GasFilter::All,
            };
            let view = sankey(&ctx, filter);
            if as_json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_sankey(&view, filter);
            }
        }
        other => bail!("unknown chart: '{other}'. Available charts: bar, map, sankey"),
    }

    Ok(())
}

/// Render a value as a proportional ASCII bar.
fn ascii_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return " ".repeat(width);
    }
    let filled = ((value / max) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn print_bar(view: &BarChartView) {
    println!("=== {} ===", view.title);
    println!();
    let max = view.values.iter().cloned().fold(0.0, f64::max);
    // Highest emitter first for terminal reading order.
    for (product, value) in view.products.iter().zip(&view.values).rev() {
        println!("  {:<20} {} {value:>6.1}", product, ascii_bar(*value, max, 24));
    }
    println!();
    println!("{}", view.comment);
    println!();
    println!("{}", view.prompt);
    for option in &view.options {
        println!("  {} -> {}", option.label, option.item);
    }
}

fn print_map(view: &MapView, product: &str, year: u16) {
    println!("=== Stage breakdown: {product} ({year}) ===");
    println!();
    println!("  Land use:    {}", view.figures.land_use);
    println!("  Animal feed: {}", view.figures.animal_feed);
    println!("  Farm:        {}", view.figures.farm);
    println!("  Processing:  {}", view.figures.processing);
    println!("  Transport:   {}", view.figures.transport);
    println!("  Packaging:   {}", view.figures.packaging);
    println!("  Retail:      {}", view.figures.retail);
    println!();
    if view.title.is_empty() {
        println!("No production data for this selection.");
        return;
    }
    println!("{}", view.title);
    println!(
        "  {} producing countries, scale [{:.1}, {:.1}] (log tonnes), scope {}",
        view.choropleth.locations.len(),
        view.choropleth.zmin,
        view.choropleth.zmax,
        view.choropleth.scope,
    );
    if view.duplicate_emission_record {
        println!("  warning: duplicate emission records for this product; used the first");
    }
}

fn print_sankey(view: &SankeyView, filter: GasFilter) {
    println!("=== Food system emissions flow ({}) ===", filter.label());
    println!("{}", view.title);
    println!();
    let max = view.values.iter().cloned().fold(0.0, f64::max);
    for ((source, target), value) in view.sources.iter().zip(&view.targets).zip(&view.values) {
        if *value == 0.0 {
            continue;
        }
        println!(
            "  {:<22} -> {:<12} {} {value:>8.1}",
            view.node_labels[*source],
            view.node_labels[*target],
            ascii_bar(*value, max, 20),
        );
    }
}
