//! Ranked-bar chart recompute.

use serde::Serialize;

use foodprint_data::Origin;

use crate::context::DashboardContext;
use crate::filter::OriginFilter;
use crate::ranked::ProductOption;

/// Bar color for animal-origin products.
pub const ANIMAL_COLOR: &str = "#ebb36a";
/// Bar color for vegetal-origin products.
pub const VEGETAL_COLOR: &str = "#6dbf9c";

const BAR_TITLE: &str = "1. Greenhouse emissions (kg CO2 per kg of product)";

/// Horizontal-bar chart specification plus the auxiliary outputs that
/// repopulate the product-selection control.
#[derive(Debug, Clone, Serialize)]
pub struct BarChartView {
    /// Metric title shown above the chart.
    pub title: String,
    /// Product labels, ascending by total emissions (highest renders at
    /// the top of a horizontal chart).
    pub products: Vec<String>,
    /// Total emissions per product, same order as `products`.
    pub values: Vec<f64>,
    /// One color per bar.
    pub colors: Vec<String>,
    /// Fixed per-category fact shown beside the chart.
    pub comment: String,
    /// Prompt label for the product-selection control.
    pub prompt: String,
    /// Selectable products, highest emitter first.
    pub options: Vec<ProductOption>,
    /// Default selection: canonical identifier of the first option.
    pub default_product: Option<String>,
}

/// Recompute the ranked-bar chart for an origin category.
///
/// When the category is `All` each bar takes its own product's origin
/// color; a single-category filter uses that category's color throughout.
/// The output is non-empty whenever the dataset has products in the
/// category.
pub fn bar_chart(ctx: &DashboardContext, category: OriginFilter) -> BarChartView {
    let ranked = ctx.ranked(category);
    let catalog = ctx.catalog(category);

    let products: Vec<String> = ranked.records().iter().map(|r| r.product.clone()).collect();
    let values: Vec<f64> = ranked.records().iter().map(|r| r.total_emissions).collect();
    let colors: Vec<String> = match category {
        OriginFilter::All => ranked
            .records()
            .iter()
            .map(|r| {
                match r.origin {
                    Origin::Animal => ANIMAL_COLOR,
                    Origin::Vegetal => VEGETAL_COLOR,
                }
                .to_string()
            })
            .collect(),
        OriginFilter::Animal => vec![ANIMAL_COLOR.to_string(); products.len()],
        OriginFilter::Vegetal => vec![VEGETAL_COLOR.to_string(); products.len()],
    };

    let (comment, prompt) = match category {
        OriginFilter::Animal => (
            "Each kilogram of beef produces almost 60 kg of CO2!",
            "2. Choose an animal product:",
        ),
        OriginFilter::Vegetal => (
            "Did you know that dark chocolate and coffee are the vegetal-based products \
             that emit more gases?",
            "2. Choose a vegetal product:",
        ),
        OriginFilter::All => (
            "Animal sourced food products tend to have higher emissions than food products \
             sourced from plants across all stages of food production (4 of the top 5 in \
             total analyzed products are foods sourced from animals)",
            "2. Choose an animal or vegetal product:",
        ),
    };

    BarChartView {
        title: BAR_TITLE.to_string(),
        products,
        values,
        colors,
        comment: comment.to_string(),
        prompt: prompt.to_string(),
        options: catalog.options().to_vec(),
        default_product: catalog.default_product().map(|o| o.item.clone()),
    }
}
