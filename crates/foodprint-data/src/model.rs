//! Record types and closed enumerations for the three source tables.

use serde::{Deserialize, Serialize};

/// Classification of a food product as animal- or vegetal-sourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    Animal,
    Vegetal,
}

impl Origin {
    /// Parse an origin from the `Origin` CSV column.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Animal" => Some(Origin::Animal),
            "Vegetal" => Some(Origin::Vegetal),
            _ => None,
        }
    }

    /// Display name, matching the source column values.
    pub fn name(&self) -> &'static str {
        match self {
            Origin::Animal => "Animal",
            Origin::Vegetal => "Vegetal",
        }
    }
}

/// One food product with per-stage emission quantities.
///
/// Quantities are kg of CO2-equivalent per kg of product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRecord {
    /// Display name of the product (`Food_Product` column).
    pub product: String,
    pub origin: Origin,
    pub land_use_change: f64,
    pub animal_feed: f64,
    pub farm: f64,
    pub processing: f64,
    pub transport: f64,
    pub packaging: f64,
    pub retail: f64,
    /// Total across all stages, supplied by the source table.
    pub total_emissions: f64,
}

/// One (product, country, year) production quantity, in tonnes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    /// Canonical production identifier of the product (`Item` column).
    pub item: String,
    /// Producing country (`Area` column).
    pub area: String,
    pub year: u16,
    pub quantity: f64,
}

/// A greenhouse gas tracked by the food-system flow table.
///
/// Declaration order is the Sankey source-node order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gas {
    Co2,
    Ch4,
    N2o,
    FGases,
}

impl Gas {
    /// All gases, in Sankey source-node order.
    pub const ALL: [Gas; 4] = [Gas::Co2, Gas::Ch4, Gas::N2o, Gas::FGases];

    /// Parse a gas from the EDGAR `GHG` column value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CO2" => Some(Gas::Co2),
            "CH4" => Some(Gas::Ch4),
            "N2O" => Some(Gas::N2o),
            "F-gases" => Some(Gas::FGases),
            _ => None,
        }
    }

    /// Short name, matching the source column values.
    pub fn name(&self) -> &'static str {
        match self {
            Gas::Co2 => "CO2",
            Gas::Ch4 => "CH4",
            Gas::N2o => "N2O",
            Gas::FGases => "F-gases",
        }
    }

    /// Full display label, used for Sankey source nodes.
    pub fn label(&self) -> &'static str {
        match self {
            Gas::Co2 => "Carbon dioxide (CO2)",
            Gas::Ch4 => "Methane (CH4)",
            Gas::N2o => "Nitrous oxide (N2O)",
            Gas::FGases => "F-gases",
        }
    }
}

/// One step of the food supply chain, in its fixed total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    Land,
    Farm,
    Processing,
    Transport,
    Packaging,
    Retail,
    Consumer,
    Waste,
}

impl Stage {
    /// All stages, in supply-chain order.
    pub const ALL: [Stage; 8] = [
        Stage::Land,
        Stage::Farm,
        Stage::Processing,
        Stage::Transport,
        Stage::Packaging,
        Stage::Retail,
        Stage::Consumer,
        Stage::Waste,
    ];

    /// Parse a stage from the `Food System Stage` column value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Land" => Some(Stage::Land),
            "Farm" => Some(Stage::Farm),
            "Processing" => Some(Stage::Processing),
            "Transport" => Some(Stage::Transport),
            "Packaging" => Some(Stage::Packaging),
            "Retail" => Some(Stage::Retail),
            "Consumer" => Some(Stage::Consumer),
            "Waste" => Some(Stage::Waste),
            _ => None,
        }
    }

    /// Display name, matching the source column values.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Land => "Land",
            Stage::Farm => "Farm",
            Stage::Processing => "Processing",
            Stage::Transport => "Transport",
            Stage::Packaging => "Packaging",
            Stage::Retail => "Retail",
            Stage::Consumer => "Consumer",
            Stage::Waste => "Waste",
        }
    }

    /// 1-based position in the supply chain (`FS Stage Order` column).
    pub fn order(&self) -> u8 {
        match self {
            Stage::Land => 1,
            Stage::Farm => 2,
            Stage::Processing => 3,
            Stage::Transport => 4,
            Stage::Packaging => 5,
            Stage::Retail => 6,
            Stage::Consumer => 7,
            Stage::Waste => 8,
        }
    }
}

/// One (gas, stage) emission quantity from the EDGAR food-system table,
/// in megatonnes of CO2-equivalent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub gas: Gas,
    pub stage: Stage,
    pub quantity: f64,
}
