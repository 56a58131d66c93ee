//! One-shot CSV loading for the three source tables.
//!
//! The tables live as `.csv` files in a configured data directory:
//! `product_origin.csv` (per-product stage emissions), `productions.csv`
//! (per-country production quantities), and `EDGARfood.csv` (food-system
//! flow emissions by gas and stage). Loading validates every row against
//! the schema invariants; the first violation aborts the whole load.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DataError, Result};
use crate::model::{EmissionRecord, FlowRecord, Gas, Origin, ProductionRecord, Stage};

/// File name of the per-product emissions table.
pub const EMISSIONS_FILE: &str = "product_origin.csv";
/// File name of the production quantities table.
pub const PRODUCTIONS_FILE: &str = "productions.csv";
/// File name of the EDGAR food-system flow table.
pub const FLOWS_FILE: &str = "EDGARfood.csv";

/// Production years outside this range indicate a corrupt table.
const YEAR_RANGE: std::ops::RangeInclusive<u16> = 1960..=2030;

/// The three loaded source tables. Immutable after [`Dataset::load`].
#[derive(Debug, Clone)]
pub struct Dataset {
    pub emissions: Vec<EmissionRecord>,
    pub productions: Vec<ProductionRecord>,
    pub flows: Vec<FlowRecord>,
}

impl Dataset {
    /// Load all three tables from `dir`. Fatal on any missing file,
    /// unparsable row, or invariant violation — there are no retries and
    /// no partial datasets.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Dataset {
            emissions: load_emissions(&required(dir, EMISSIONS_FILE)?)?,
            productions: load_productions(&required(dir, PRODUCTIONS_FILE)?)?,
            flows: load_flows(&required(dir, FLOWS_FILE)?)?,
        })
    }
}

fn required(dir: &Path, file: &str) -> Result<PathBuf> {
    let path = dir.join(file);
    if !path.is_file() {
        return Err(DataError::NotFound { path });
    }
    Ok(path)
}

#[derive(Debug, Deserialize)]
struct EmissionRow {
    #[serde(rename = "Food_Product")]
    food_product: String,
    #[serde(rename = "Origin")]
    origin: String,
    #[serde(rename = "Land_Use_Change")]
    land_use_change: f64,
    #[serde(rename = "Animal_Feed")]
    animal_feed: f64,
    #[serde(rename = "Farm")]
    farm: f64,
    #[serde(rename = "Processing")]
    processing: f64,
    #[serde(rename = "Transport")]
    transport: f64,
    #[serde(rename = "Packaging")]
    packaging: f64,
    #[serde(rename = "Retail")]
    retail: f64,
    #[serde(rename = "Total_Emissions")]
    total_emissions: f64,
}

fn load_emissions(path: &Path) -> Result<Vec<EmissionRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<EmissionRow>().enumerate() {
        let row = row?;
        let origin = Origin::parse(&row.origin).ok_or_else(|| DataError::InvalidRow {
            table: EMISSIONS_FILE,
            row: i + 1,
            detail: format!("unknown origin '{}'", row.origin),
        })?;
        if !(row.total_emissions >= 0.0) {
            return Err(DataError::InvalidRow {
                table: EMISSIONS_FILE,
                row: i + 1,
                detail: format!("negative total emissions {}", row.total_emissions),
            });
        }
        records.push(EmissionRecord {
            product: row.food_product,
            origin,
            land_use_change: row.land_use_change,
            animal_feed: row.animal_feed,
            farm: row.farm,
            processing: row.processing,
            transport: row.transport,
            packaging: row.packaging,
            retail: row.retail,
            total_emissions: row.total_emissions,
        });
    }
    Ok(records)
}

#[derive(Debug, Deserialize)]
struct ProductionRow {
    #[serde(rename = "Item")]
    item: String,
    #[serde(rename = "Area")]
    area: String,
    #[serde(rename = "Year")]
    year: u16,
    #[serde(rename = "Value")]
    value: f64,
}

fn load_productions(path: &Path) -> Result<Vec<ProductionRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<ProductionRow>().enumerate() {
        let row = row?;
        if !YEAR_RANGE.contains(&row.year) {
            return Err(DataError::InvalidRow {
                table: PRODUCTIONS_FILE,
                row: i + 1,
                detail: format!("year {} outside {:?}", row.year, YEAR_RANGE),
            });
        }
        if !(row.value >= 0.0) {
            return Err(DataError::InvalidRow {
                table: PRODUCTIONS_FILE,
                row: i + 1,
                detail: format!("negative production quantity {}", row.value),
            });
        }
        records.push(ProductionRecord {
            item: row.item,
            area: row.area,
            year: row.year,
            quantity: row.value,
        });
    }
    Ok(records)
}

#[derive(Debug, Deserialize)]
struct FlowRow {
    #[serde(rename = "GHG")]
    ghg: String,
    #[serde(rename = "FS Stage Order")]
    stage_order: u8,
    #[serde(rename = "Food System Stage")]
    stage: String,
    #[serde(rename = "GHG Emissions")]
    emissions: f64,
}

fn load_flows(path: &Path) -> Result<Vec<FlowRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<FlowRow>().enumerate() {
        let row = row?;
        let gas = Gas::parse(&row.ghg).ok_or_else(|| DataError::InvalidRow {
            table: FLOWS_FILE,
            row: i + 1,
            detail: format!("unknown gas '{}'", row.ghg),
        })?;
        let stage = Stage::parse(&row.stage).ok_or_else(|| DataError::InvalidRow {
            table: FLOWS_FILE,
            row: i + 1,
            detail: format!("unknown stage '{}'", row.stage),
        })?;
        if stage.order() != row.stage_order {
            return Err(DataError::InvalidRow {
                table: FLOWS_FILE,
                row: i + 1,
                detail: format!(
                    "stage '{}' has order {} but row says {}",
                    stage.name(),
                    stage.order(),
                    row.stage_order
                ),
            });
        }
        records.push(FlowRecord {
            gas,
            stage,
            quantity: row.emissions,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const EMISSIONS_CSV: &str = "\
Food_Product,Origin,Land_Use_Change,Animal_Feed,Farm,Processing,Transport,Packaging,Retail,Total_Emissions
Wheat & Rye,Vegetal,0.1,0.0,0.8,0.2,0.1,0.1,0.1,1.4
Beef (beef herd),Animal,16.3,1.9,39.4,1.3,0.3,0.2,0.2,59.6
";

    const PRODUCTIONS_CSV: &str = "\
Item,Area,Year,Value
Wheat & Rye,France,2014,39000000
Wheat & Rye,France,2015,41000000
Beef (beef herd),Brazil,2015,9500000
";

    const FLOWS_CSV: &str = "\
GHG,FS Stage Order,Food System Stage,GHG Emissions
CO2,1,Land,3200.0
CO2,2,Farm,1100.0
CH4,2,Farm,2500.0
N2O,2,Farm,1300.0
F-gases,6,Retail,120.0
";

    fn write_dataset(dir: &Path) {
        fs::write(dir.join(EMISSIONS_FILE), EMISSIONS_CSV).unwrap();
        fs::write(dir.join(PRODUCTIONS_FILE), PRODUCTIONS_CSV).unwrap();
        fs::write(dir.join(FLOWS_FILE), FLOWS_CSV).unwrap();
    }

    #[test]
    fn load_full_dataset() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());

        let dataset = Dataset::load(dir.path()).unwrap();
        assert_eq!(dataset.emissions.len(), 2);
        assert_eq!(dataset.productions.len(), 3);
        assert_eq!(dataset.flows.len(), 5);

        let beef = &dataset.emissions[1];
        assert_eq!(beef.product, "Beef (beef herd)");
        assert_eq!(beef.origin, Origin::Animal);
        assert_eq!(beef.total_emissions, 59.6);

        let flow = &dataset.flows[0];
        assert_eq!(flow.gas, Gas::Co2);
        assert_eq!(flow.stage, Stage::Land);
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(EMISSIONS_FILE), EMISSIONS_CSV).unwrap();
        // productions.csv and EDGARfood.csv absent

        let err = Dataset::load(dir.path()).unwrap_err();
        assert!(matches!(err, DataError::NotFound { .. }));
    }

    #[test]
    fn unknown_origin_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        fs::write(
            dir.path().join(EMISSIONS_FILE),
            "Food_Product,Origin,Land_Use_Change,Animal_Feed,Farm,Processing,Transport,Packaging,Retail,Total_Emissions\n\
             Algae,Mineral,0,0,0,0,0,0,0,0\n",
        )
        .unwrap();

        let err = Dataset::load(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            DataError::InvalidRow {
                table: EMISSIONS_FILE,
                ..
            }
        ));
    }

    #[test]
    fn negative_total_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        fs::write(
            dir.path().join(EMISSIONS_FILE),
            "Food_Product,Origin,Land_Use_Change,Animal_Feed,Farm,Processing,Transport,Packaging,Retail,Total_Emissions\n\
             Wheat & Rye,Vegetal,0,0,0,0,0,0,0,-1.0\n",
        )
        .unwrap();

        let err = Dataset::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("negative total emissions"));
    }

    #[test]
    fn year_out_of_range_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        fs::write(
            dir.path().join(PRODUCTIONS_FILE),
            "Item,Area,Year,Value\nWheat & Rye,France,1850,100\n",
        )
        .unwrap();

        let err = Dataset::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("outside"));
    }

    #[test]
    fn mismatched_stage_order_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        fs::write(
            dir.path().join(FLOWS_FILE),
            "GHG,FS Stage Order,Food System Stage,GHG Emissions\nCO2,3,Land,10.0\n",
        )
        .unwrap();

        let err = Dataset::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("order"));
    }

    #[test]
    fn malformed_csv_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        fs::write(
            dir.path().join(PRODUCTIONS_FILE),
            "Item,Area,Year,Value\nWheat & Rye,France,not-a-year,100\n",
        )
        .unwrap();

        assert!(Dataset::load(dir.path()).is_err());
    }
}
