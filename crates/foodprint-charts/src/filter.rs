//! Filter state and the user-selectable enumerations that drive recomputes.

use serde::{Deserialize, Serialize};

use foodprint_data::Gas;

use crate::context::DashboardContext;
use crate::error::{ChartError, Result};
use crate::map::latest_production_year;

/// Origin-category filter for the ranked bar chart.
///
/// Replaces the positional `[animal, vegetal, all]` view list of the
/// original dashboard with an explicit tagged enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OriginFilter {
    All,
    Animal,
    Vegetal,
}

impl OriginFilter {
    /// Parse a filter from its UI value.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "all" | "total" => Ok(OriginFilter::All),
            "animal" => Ok(OriginFilter::Animal),
            "vegetal" => Ok(OriginFilter::Vegetal),
            _ => Err(ChartError::UnknownFilter {
                what: "origin category",
                value: s.to_string(),
            }),
        }
    }

    /// Display name for this filter.
    pub fn name(&self) -> &'static str {
        match self {
            OriginFilter::All => "all",
            OriginFilter::Animal => "animal",
            OriginFilter::Vegetal => "vegetal",
        }
    }
}

/// Gas filter for the Sankey diagram: everything, or a single gas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GasFilter {
    All,
    Only(Gas),
}

impl GasFilter {
    /// Parse a filter from its UI value (`"All"` or a gas short name).
    pub fn parse(s: &str) -> Result<Self> {
        if s == "All" {
            return Ok(GasFilter::All);
        }
        Gas::parse(s)
            .map(GasFilter::Only)
            .ok_or_else(|| ChartError::UnknownFilter {
                what: "gas",
                value: s.to_string(),
            })
    }

    /// Whether `gas` passes this filter.
    pub fn admits(&self, gas: Gas) -> bool {
        match self {
            GasFilter::All => true,
            GasFilter::Only(g) => *g == gas,
        }
    }

    /// Display label for this filter.
    pub fn label(&self) -> &'static str {
        match self {
            GasFilter::All => "All GHG",
            GasFilter::Only(g) => g.label(),
        }
    }
}

/// Geographic scope of the choropleth map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    World,
    Europe,
    Asia,
    Africa,
    NorthAmerica,
    SouthAmerica,
}

impl Region {
    /// Parse a region from its UI value.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "world" => Ok(Region::World),
            "europe" => Ok(Region::Europe),
            "asia" => Ok(Region::Asia),
            "africa" => Ok(Region::Africa),
            "north america" => Ok(Region::NorthAmerica),
            "south america" => Ok(Region::SouthAmerica),
            _ => Err(ChartError::UnknownFilter {
                what: "region",
                value: s.to_string(),
            }),
        }
    }

    /// The geo scope string the map renderer expects.
    pub fn scope(&self) -> &'static str {
        match self {
            Region::World => "world",
            Region::Europe => "europe",
            Region::Asia => "asia",
            Region::Africa => "africa",
            Region::NorthAmerica => "north america",
            Region::SouthAmerica => "south america",
        }
    }
}

/// The complete set of user-controllable selections.
///
/// Owned by the UI boundary; every recompute function reads it (or pieces
/// of it) and never writes it.
#[derive(Debug, Clone, Serialize)]
pub struct FilterState {
    pub category: OriginFilter,
    /// Canonical production identifier of the selected product.
    pub product: String,
    pub year: u16,
    pub region: Region,
    pub gas: GasFilter,
}

impl FilterState {
    /// The startup defaults: all categories, the default product of the
    /// overall catalog, that product's latest production year, the whole
    /// world, and every gas.
    pub fn initial(ctx: &DashboardContext) -> Result<Self> {
        let product = ctx
            .catalog(OriginFilter::All)
            .default_product()
            .ok_or(ChartError::EmptyCategory { category: "all" })?
            .item
            .clone();
        let year = latest_production_year(ctx, &product)?;
        Ok(FilterState {
            category: OriginFilter::All,
            product,
            year,
            region: Region::World,
            gas: GasFilter::All,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origin_filters() {
        assert_eq!(OriginFilter::parse("all").unwrap(), OriginFilter::All);
        assert_eq!(OriginFilter::parse("total").unwrap(), OriginFilter::All);
        assert_eq!(OriginFilter::parse("animal").unwrap(), OriginFilter::Animal);
        assert_eq!(
            OriginFilter::parse("vegetal").unwrap(),
            OriginFilter::Vegetal
        );
        assert!(OriginFilter::parse("mineral").is_err());
    }

    #[test]
    fn parse_gas_filters() {
        assert_eq!(GasFilter::parse("All").unwrap(), GasFilter::All);
        assert_eq!(
            GasFilter::parse("CH4").unwrap(),
            GasFilter::Only(Gas::Ch4)
        );
        assert!(GasFilter::parse("SF6").is_err());
    }

    #[test]
    fn gas_filter_admits() {
        assert!(GasFilter::All.admits(Gas::Co2));
        assert!(GasFilter::Only(Gas::Ch4).admits(Gas::Ch4));
        assert!(!GasFilter::Only(Gas::Ch4).admits(Gas::Co2));
    }

    #[test]
    fn parse_regions() {
        assert_eq!(Region::parse("world").unwrap(), Region::World);
        assert_eq!(
            Region::parse("north america").unwrap(),
            Region::NorthAmerica
        );
        assert!(Region::parse("antarctica").is_err());
    }

    #[test]
    fn initial_state_defaults() {
        let ctx = crate::context::tests::sample_context();
        let state = FilterState::initial(&ctx).unwrap();
        assert_eq!(state.category, OriginFilter::All);
        assert_eq!(state.product, "Beef (beef herd)");
        assert_eq!(state.year, 2018);
        assert_eq!(state.region, Region::World);
        assert_eq!(state.gas, GasFilter::All);
    }

    #[test]
    fn default_products_always_resolve() {
        // Selecting the default product of any category's rendered list
        // must never produce a lookup miss downstream.
        let ctx = crate::context::tests::sample_context();
        for category in [OriginFilter::All, OriginFilter::Animal, OriginFilter::Vegetal] {
            let default = ctx
                .catalog(category)
                .default_product()
                .unwrap()
                .item
                .clone();
            let year = latest_production_year(&ctx, &default).unwrap();
            let view = crate::map::map_breakdown(&ctx, &default, year, Region::World);
            assert!(!view.figures.farm.is_empty(), "category {:?}", category);
            assert!(!view.title.is_empty(), "category {:?}", category);
        }
    }

    #[test]
    fn animal_scenario() {
        let ctx = crate::context::tests::sample_context();
        let bar = crate::bar::bar_chart(&ctx, OriginFilter::Animal);
        // Only animal products appear.
        assert!(bar
            .products
            .iter()
            .all(|p| ["Beef (beef herd)", "Cheese", "Milk"].contains(&p.as_str())));
        // Default selection is the highest-emission animal product.
        let default = bar.default_product.unwrap();
        assert_eq!(default, "Beef (beef herd)");
        let year = latest_production_year(&ctx, &default).unwrap();
        assert_eq!(year, 2018);
        let view = crate::map::map_breakdown(&ctx, &default, year, Region::World);
        assert!(!view.choropleth.locations.is_empty());
    }

    #[test]
    fn region_scope_round_trip() {
        for region in [
            Region::World,
            Region::Europe,
            Region::Asia,
            Region::Africa,
            Region::NorthAmerica,
            Region::SouthAmerica,
        ] {
            assert_eq!(Region::parse(region.scope()).unwrap(), region);
        }
    }
}
