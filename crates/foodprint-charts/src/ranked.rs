//! Ranked-emitter views and the product catalogs built from them.

use serde::Serialize;

use foodprint_data::{EmissionRecord, Origin};

use crate::filter::OriginFilter;

/// Display label (emissions table) → canonical production identifier
/// (productions table). Products absent from this table have no production
/// data and are kept out of the selection catalogs.
const CANONICAL_ITEMS: &[(&str, &str)] = &[
    ("Apples", "Apples"),
    ("Bananas", "Bananas"),
    ("Barley", "Barley"),
    ("Beet Sugar", "Sugar beet"),
    ("Berries & Grapes", "Berries & Grapes"),
    ("Brassicas", "Brassicas"),
    ("Cane Sugar", "Sugar cane"),
    ("Cassava", "Cassava"),
    ("Citrus Fruit", "Citrus"),
    ("Coffee", "Coffee beans"),
    ("Groundnuts", "Groundnuts"),
    ("Maize", "Maize"),
    ("Nuts", "Nuts"),
    ("Oatmeal", "Oats"),
    ("Olive Oil", "Olives"),
    ("Onions & Leeks", "Onions & Leeks"),
    ("Palm Oil", "Oil palm fruit"),
    ("Peas", "Peas"),
    ("Potatoes", "Potatoes"),
    ("Rapeseed Oil", "Rapeseed"),
    ("Rice", "Rice"),
    ("Root Vegetables", "Roots and tubers"),
    ("Soymilk", "Soybeans"),
    ("Sunflower Oil", "Sunflower seed"),
    ("Tofu", "Soybeans"),
    ("Tomatoes", "Tomatoes"),
    ("Wheat & Rye", "Wheat & Rye"),
    ("Dark Chocolate", "Cocoa, beans"),
    ("Milk", "Milk"),
    ("Eggs", "Eggs"),
    ("Poultry Meat", "Poultry Meat"),
    ("Pig Meat", "Pig Meat"),
    ("Shrimps (farmed)", "Seafood (farmed)"),
    ("Cheese", "Cheese"),
    ("Lamb & Mutton", "Lamb & Mutton"),
    ("Beef (beef herd)", "Beef (beef herd)"),
];

/// Canonical production identifier for a product display label, if the
/// product has production data.
pub fn canonical_item(label: &str) -> Option<&'static str> {
    CANONICAL_ITEMS
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, item)| *item)
}

/// Display labels whose canonical identifier is `item`, in table order.
/// More than one label can share an identifier (e.g. soy products).
pub fn labels_for_item(item: &str) -> Vec<&'static str> {
    CANONICAL_ITEMS
        .iter()
        .filter(|(_, i)| *i == item)
        .map(|(l, _)| *l)
        .collect()
}

/// The top-N emitters of one origin category, computed once at startup.
///
/// Records are held ascending by total emissions so the presentation layer
/// renders the highest emitter at the top of a horizontal bar chart.
#[derive(Debug, Clone)]
pub struct RankedEmitters {
    filter: OriginFilter,
    records: Vec<EmissionRecord>,
}

impl RankedEmitters {
    /// Filter `records` to the category, sort ascending by total emissions
    /// (stable, so ties keep input order), and keep the last `top_n` —
    /// i.e. the highest emitters, still in ascending order. Fewer than
    /// `top_n` matches returns all of them.
    pub fn build(records: &[EmissionRecord], filter: OriginFilter, top_n: usize) -> Self {
        let mut selected: Vec<EmissionRecord> = records
            .iter()
            .filter(|r| match filter {
                OriginFilter::All => true,
                OriginFilter::Animal => r.origin == Origin::Animal,
                OriginFilter::Vegetal => r.origin == Origin::Vegetal,
            })
            .cloned()
            .collect();
        selected.sort_by(|a, b| {
            a.total_emissions
                .partial_cmp(&b.total_emissions)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let skip = selected.len().saturating_sub(top_n);
        selected.drain(..skip);
        RankedEmitters {
            filter,
            records: selected,
        }
    }

    /// The category this view was built for.
    pub fn filter(&self) -> OriginFilter {
        self.filter
    }

    /// Records ascending by total emissions.
    pub fn records(&self) -> &[EmissionRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One selectable product: display label plus canonical identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductOption {
    pub label: String,
    /// Value used for production lookups.
    pub item: String,
}

/// Ordered product options for one ranked view, highest emitter first.
///
/// Only products with a canonical identifier are listed, so every option
/// is guaranteed to resolve an emissions lookup and a production lookup.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    options: Vec<ProductOption>,
}

impl ProductCatalog {
    /// Build the catalog for a ranked view.
    pub fn build(ranked: &RankedEmitters) -> Self {
        let options = ranked
            .records()
            .iter()
            .rev() // highest emitter first
            .filter_map(|r| {
                canonical_item(&r.product).map(|item| ProductOption {
                    label: r.product.clone(),
                    item: item.to_string(),
                })
            })
            .collect();
        ProductCatalog { options }
    }

    pub fn options(&self) -> &[ProductOption] {
        &self.options
    }

    /// The default selection: the highest-emission product in the catalog.
    pub fn default_product(&self) -> Option<&ProductOption> {
        self.options.first()
    }

    /// Display label for a canonical identifier, if this catalog lists it.
    pub fn label_for_item(&self, item: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.item == item)
            .map(|o| o.label.as_str())
    }
}
