//! Per-stage emission figures and choropleth map recompute.

use serde::Serialize;

use foodprint_data::EmissionRecord;

use crate::context::DashboardContext;
use crate::error::{ChartError, Result};
use crate::filter::Region;

/// Low/high colors of the choropleth scale.
const MAP_COLORSCALE: [&str; 2] = ["#ffe2bd", "#006837"];
const COLORBAR_TITLE: &str = "Tonnes (log)";

/// Latest year with a production record for the canonical product id.
///
/// Drives both the upper bound and the default value of the year control.
/// A product with no production records is a lookup failure, never a
/// silent zero.
pub fn latest_production_year(ctx: &DashboardContext, product: &str) -> Result<u16> {
    ctx.dataset()
        .productions
        .iter()
        .filter(|p| p.item == product)
        .map(|p| p.year)
        .max()
        .ok_or_else(|| ChartError::NoProduction {
            product: product.to_string(),
        })
}

/// The seven per-stage emission figures, formatted for display.
/// All fields are empty strings in the no-data state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageFigures {
    pub land_use: String,
    pub animal_feed: String,
    pub farm: String,
    pub processing: String,
    pub transport: String,
    pub packaging: String,
    pub retail: String,
}

impl StageFigures {
    fn from_record(record: &EmissionRecord) -> Self {
        StageFigures {
            land_use: format_figure(record.land_use_change),
            animal_feed: format_figure(record.animal_feed),
            farm: format_figure(record.farm),
            processing: format_figure(record.processing),
            transport: format_figure(record.transport),
            packaging: format_figure(record.packaging),
            retail: format_figure(record.retail),
        }
    }

    /// The explicit no-data state.
    fn blank() -> Self {
        StageFigures {
            land_use: String::new(),
            animal_feed: String::new(),
            farm: String::new(),
            processing: String::new(),
            transport: String::new(),
            packaging: String::new(),
            retail: String::new(),
        }
    }
}

/// Round to 2 decimal places, without trailing zeros (`0.1`, not `0.10`).
fn format_figure(value: f64) -> String {
    ((value * 100.0).round() / 100.0).to_string()
}

/// Choropleth map specification: one (country, log-quantity) pair per
/// producing country.
#[derive(Debug, Clone, Serialize)]
pub struct ChoroplethSpec {
    /// Country names with a positive production quantity for the
    /// selected (product, year).
    pub locations: Vec<String>,
    /// Natural log of the production quantity, same order as `locations`.
    pub values: Vec<f64>,
    /// Color scale floor, fixed at ln(1) = 0.
    pub zmin: f64,
    /// Color scale ceiling: ln of the product's maximum quantity across
    /// all years, so the scale holds still while the year control moves.
    pub zmax: f64,
    /// Geo scope of the rendered map.
    pub scope: String,
    pub colorscale: Vec<String>,
    pub colorbar_title: String,
}

/// Output of the map/stage-breakdown recompute.
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub figures: StageFigures,
    pub choropleth: ChoroplethSpec,
    /// `"Production quantities of {item}, by country"`, or empty when no
    /// production record matches the (product, year) pair.
    pub title: String,
    /// Set when more than one emission record matched the product; the
    /// first match was used.
    pub duplicate_emission_record: bool,
}

/// Recompute the per-stage figures and the choropleth for the selection.
///
/// Lookup misses resolve to the explicit no-data state (blank figures,
/// empty locations, empty title) instead of an error; duplicate emission
/// records resolve deterministically to the first match and are flagged.
pub fn map_breakdown(ctx: &DashboardContext, product: &str, year: u16, region: Region) -> MapView {
    let emission_matches = ctx.emissions_for_item(product);
    let duplicate_emission_record = emission_matches.len() > 1;
    if duplicate_emission_record {
        tracing::warn!(
            product,
            matches = emission_matches.len(),
            "multiple emission records match product; using first"
        );
    }
    let figures = match emission_matches.first() {
        Some(record) => StageFigures::from_record(record),
        None => StageFigures::blank(),
    };

    let productions = &ctx.dataset().productions;
    let mut locations = Vec::new();
    let mut values = Vec::new();
    let mut any_match = false;
    for p in productions.iter().filter(|p| p.item == product) {
        if p.year != year {
            continue;
        }
        any_match = true;
        // Non-positive quantities are a lookup gap, not a log(0) panic.
        if p.quantity > 0.0 {
            locations.push(p.area.clone());
            values.push(p.quantity.ln());
        }
    }

    let max_quantity = productions
        .iter()
        .filter(|p| p.item == product && p.quantity > 0.0)
        .map(|p| p.quantity)
        .fold(f64::NEG_INFINITY, f64::max);
    let zmax = if max_quantity.is_finite() {
        max_quantity.ln()
    } else {
        0.0
    };

    let title = if any_match {
        format!("Production quantities of {product}, by country")
    } else {
        String::new()
    };

    MapView {
        figures,
        choropleth: ChoroplethSpec {
            locations,
            values,
            zmin: 0.0,
            zmax,
            scope: region.scope().to_string(),
            colorscale: MAP_COLORSCALE.iter().map(|c| c.to_string()).collect(),
            colorbar_title: COLORBAR_TITLE.to_string(),
        },
        title,
        duplicate_emission_record,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::{sample_context, sample_dataset};
    use crate::context::{ChartConfig, DashboardContext};
    use crate::ranked::tests::record;
    use foodprint_data::{Origin, ProductionRecord};

    #[test]
    fn latest_year_is_max_over_records() {
        let ctx = sample_context();
        assert_eq!(
            latest_production_year(&ctx, "Beef (beef herd)").unwrap(),
            2018
        );
        assert_eq!(latest_production_year(&ctx, "Cheese").unwrap(), 2016);
    }

    #[test]
    fn missing_product_is_a_lookup_failure() {
        let ctx = sample_context();
        let err = latest_production_year(&ctx, "Unobtainium").unwrap_err();
        assert!(matches!(err, ChartError::NoProduction { .. }));
    }

    #[test]
    fn breakdown_has_figures_and_title() {
        let ctx = sample_context();
        let view = map_breakdown(&ctx, "Beef (beef herd)", 2018, Region::World);
        assert_eq!(view.figures.land_use, "0.1");
        assert_eq!(view.figures.farm, "29.8");
        assert_eq!(
            view.title,
            "Production quantities of Beef (beef herd), by country"
        );
        assert_eq!(view.choropleth.locations, vec!["Brazil"]);
        assert!(!view.duplicate_emission_record);
        assert_eq!(view.choropleth.scope, "world");
    }

    #[test]
    fn no_matching_year_gives_empty_map_and_title() {
        let ctx = sample_context();
        let view = map_breakdown(&ctx, "Beef (beef herd)", 1999, Region::World);
        assert!(view.choropleth.locations.is_empty());
        assert!(view.title.is_empty());
        // Emission figures still resolve; only the map side is empty.
        assert!(!view.figures.farm.is_empty());
    }

    #[test]
    fn unknown_product_gives_blank_figures() {
        let ctx = sample_context();
        let view = map_breakdown(&ctx, "Unobtainium", 2015, Region::World);
        assert_eq!(view.figures, StageFigures::blank());
        assert!(view.title.is_empty());
        assert!(view.choropleth.locations.is_empty());
    }

    #[test]
    fn values_are_log_quantities() {
        let ctx = sample_context();
        let view = map_breakdown(&ctx, "Cheese", 2016, Region::Europe);
        assert_eq!(view.choropleth.values.len(), 1);
        assert!((view.choropleth.values[0] - (1000.0f64 + 2016.0).ln()).abs() < 1e-12);
        assert_eq!(view.choropleth.scope, "europe");
    }

    #[test]
    fn zmax_spans_all_years() {
        let ctx = sample_context();
        // Selected year 2012 but the scale ceiling comes from 2018.
        let view = map_breakdown(&ctx, "Beef (beef herd)", 2012, Region::World);
        assert!((view.choropleth.zmax - (1000.0f64 + 2018.0).ln()).abs() < 1e-12);
        assert_eq!(view.choropleth.zmin, 0.0);
    }

    #[test]
    fn non_positive_quantities_are_excluded() {
        let mut dataset = sample_dataset();
        dataset.productions.push(ProductionRecord {
            item: "Cheese".to_string(),
            area: "Atlantis".to_string(),
            year: 2016,
            quantity: 0.0,
        });
        let ctx = DashboardContext::new(dataset, ChartConfig::default());
        let view = map_breakdown(&ctx, "Cheese", 2016, Region::World);
        assert!(!view.choropleth.locations.contains(&"Atlantis".to_string()));
        // The zero-quantity record still counts as a (product, year) match.
        assert!(!view.title.is_empty());
    }

    #[test]
    fn duplicate_records_use_first_and_flag() {
        let mut dataset = sample_dataset();
        dataset
            .emissions
            .push(record("Beef (beef herd)", Origin::Animal, 58.0));
        let ctx = DashboardContext::new(dataset, ChartConfig::default());
        let view = map_breakdown(&ctx, "Beef (beef herd)", 2018, Region::World);
        assert!(view.duplicate_emission_record);
        // First record wins: the original 59.6-total beef, farm = 29.8.
        assert_eq!(view.figures.farm, "29.8");
    }

    #[test]
    fn figures_round_to_two_decimals() {
        assert_eq!(format_figure(0.123), "0.12");
        assert_eq!(format_figure(0.125), "0.13");
        assert_eq!(format_figure(59.6), "59.6");
        assert_eq!(format_figure(3.0), "3");
    }
}
