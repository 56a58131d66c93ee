//! The immutable dashboard context, built once at startup.

use serde::{Deserialize, Serialize};

use foodprint_data::{Dataset, EmissionRecord};

use crate::filter::OriginFilter;
use crate::flow::FlowAggregate;
use crate::ranked::{canonical_item, ProductCatalog, RankedEmitters};

/// Truncation counts for the ranked-emitter views.
///
/// The counts are explicit configuration; the defaults reproduce the
/// original dashboard's effective view sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_top_overall")]
    pub top_overall: usize,
    #[serde(default = "default_top_vegetal")]
    pub top_vegetal: usize,
    #[serde(default = "default_top_animal")]
    pub top_animal: usize,
}

fn default_top_overall() -> usize {
    10
}
fn default_top_vegetal() -> usize {
    10
}
fn default_top_animal() -> usize {
    8
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            top_overall: default_top_overall(),
            top_vegetal: default_top_vegetal(),
            top_animal: default_top_animal(),
        }
    }
}

/// Everything the recompute functions read: the loaded dataset plus the
/// precomputed views. Constructed once, never mutated; callers pass it by
/// shared reference, so concurrent recomputes need no locking.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    dataset: Dataset,
    config: ChartConfig,
    ranked_all: RankedEmitters,
    ranked_animal: RankedEmitters,
    ranked_vegetal: RankedEmitters,
    catalog_all: ProductCatalog,
    catalog_animal: ProductCatalog,
    catalog_vegetal: ProductCatalog,
    flows: FlowAggregate,
}

impl DashboardContext {
    /// Build every derived view from the loaded dataset.
    pub fn new(dataset: Dataset, config: ChartConfig) -> Self {
        let ranked_all =
            RankedEmitters::build(&dataset.emissions, OriginFilter::All, config.top_overall);
        let ranked_animal =
            RankedEmitters::build(&dataset.emissions, OriginFilter::Animal, config.top_animal);
        let ranked_vegetal = RankedEmitters::build(
            &dataset.emissions,
            OriginFilter::Vegetal,
            config.top_vegetal,
        );
        let catalog_all = ProductCatalog::build(&ranked_all);
        let catalog_animal = ProductCatalog::build(&ranked_animal);
        let catalog_vegetal = ProductCatalog::build(&ranked_vegetal);
        let flows = FlowAggregate::build(&dataset.flows);
        DashboardContext {
            dataset,
            config,
            ranked_all,
            ranked_animal,
            ranked_vegetal,
            catalog_all,
            catalog_animal,
            catalog_vegetal,
            flows,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// The ranked-emitter view for an origin category.
    pub fn ranked(&self, filter: OriginFilter) -> &RankedEmitters {
        match filter {
            OriginFilter::All => &self.ranked_all,
            OriginFilter::Animal => &self.ranked_animal,
            OriginFilter::Vegetal => &self.ranked_vegetal,
        }
    }

    /// The product catalog for an origin category.
    pub fn catalog(&self, filter: OriginFilter) -> &ProductCatalog {
        match filter {
            OriginFilter::All => &self.catalog_all,
            OriginFilter::Animal => &self.catalog_animal,
            OriginFilter::Vegetal => &self.catalog_vegetal,
        }
    }

    /// The grouped (gas, stage) flow aggregate.
    pub fn flows(&self) -> &FlowAggregate {
        &self.flows
    }

    /// Emission records whose product label resolves to the canonical
    /// identifier `item`. Normally exactly one; more than one is a
    /// data-integrity condition the caller must resolve deterministically.
    pub fn emissions_for_item(&self, item: &str) -> Vec<&EmissionRecord> {
        self.dataset
            .emissions
            .iter()
            .filter(|r| canonical_item(&r.product) == Some(item))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ranked::tests::{record, sample_records};
    use foodprint_data::{FlowRecord, Gas, Origin, ProductionRecord, Stage};

    /// A small but fully linked dataset: every catalog product has
    /// production records, and the flow table covers all four gases.
    pub(crate) fn sample_dataset() -> Dataset {
        let mut productions = Vec::new();
        for (item, country, years) in [
            ("Beef (beef herd)", "Brazil", &[2012, 2014, 2018][..]),
            ("Cheese", "France", &[2014, 2016][..]),
            ("Cocoa, beans", "Ghana", &[2013, 2017][..]),
            ("Rice", "India", &[2014, 2015][..]),
            ("Milk", "Germany", &[2015][..]),
            ("Wheat & Rye", "France", &[2014, 2015][..]),
        ] {
            for &year in years {
                productions.push(ProductionRecord {
                    item: item.to_string(),
                    area: country.to_string(),
                    year,
                    quantity: 1000.0 + year as f64,
                });
            }
        }
        let flows = vec![
            FlowRecord {
                gas: Gas::Co2,
                stage: Stage::Land,
                quantity: 3200.0,
            },
            FlowRecord {
                gas: Gas::Co2,
                stage: Stage::Farm,
                quantity: 1100.0,
            },
            FlowRecord {
                gas: Gas::Ch4,
                stage: Stage::Farm,
                quantity: 2500.0,
            },
            FlowRecord {
                gas: Gas::N2o,
                stage: Stage::Farm,
                quantity: 1300.0,
            },
            FlowRecord {
                gas: Gas::FGases,
                stage: Stage::Retail,
                quantity: 120.0,
            },
        ];
        Dataset {
            emissions: sample_records(),
            productions,
            flows,
        }
    }

    pub(crate) fn sample_context() -> DashboardContext {
        DashboardContext::new(sample_dataset(), ChartConfig::default())
    }

    #[test]
    fn config_defaults_match_original_views() {
        let config = ChartConfig::default();
        assert_eq!(config.top_overall, 10);
        assert_eq!(config.top_vegetal, 10);
        assert_eq!(config.top_animal, 8);
    }

    #[test]
    fn views_are_category_consistent() {
        let ctx = sample_context();
        assert_eq!(ctx.ranked(OriginFilter::All).records().len(), 6);
        assert_eq!(ctx.ranked(OriginFilter::Animal).records().len(), 3);
        assert_eq!(ctx.ranked(OriginFilter::Vegetal).records().len(), 3);
        assert!(ctx
            .ranked(OriginFilter::Animal)
            .records()
            .iter()
            .all(|r| r.origin == Origin::Animal));
    }

    #[test]
    fn truncation_respects_config() {
        let config = ChartConfig {
            top_overall: 2,
            top_vegetal: 1,
            top_animal: 1,
        };
        let ctx = DashboardContext::new(sample_dataset(), config);
        assert_eq!(ctx.ranked(OriginFilter::All).records().len(), 2);
        assert_eq!(ctx.catalog(OriginFilter::Vegetal).options().len(), 1);
        assert_eq!(
            ctx.catalog(OriginFilter::Vegetal).options()[0].label,
            "Dark Chocolate"
        );
    }

    #[test]
    fn emissions_for_item_resolves_labels() {
        let ctx = sample_context();
        let records = ctx.emissions_for_item("Cocoa, beans");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].product, "Dark Chocolate");
        assert!(ctx.emissions_for_item("Unobtainium").is_empty());
    }

    #[test]
    fn emissions_for_item_reports_duplicates() {
        let mut dataset = sample_dataset();
        dataset
            .emissions
            .push(record("Beef (beef herd)", Origin::Animal, 58.0));
        let ctx = DashboardContext::new(dataset, ChartConfig::default());
        assert_eq!(ctx.emissions_for_item("Beef (beef herd)").len(), 2);
    }
}
