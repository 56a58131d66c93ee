//! Errors from the chart-recompute layer.

use thiserror::Error;

/// Convenience alias for results within the charts crate.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Errors a recompute function can surface to its caller.
///
/// Everything else (missing emission record, empty production set,
/// non-positive quantities) is handled locally and comes back as an
/// explicit empty view, per the dashboard's propagation policy.
#[derive(Debug, Error)]
pub enum ChartError {
    /// No production record exists for the selected product.
    #[error("no production records for product '{product}'")]
    NoProduction { product: String },

    /// The dataset has no products in the requested origin category.
    #[error("no products in category '{category}'")]
    EmptyCategory { category: &'static str },

    /// An unrecognized filter value arrived from the UI boundary.
    #[error("unknown {what}: '{value}'")]
    UnknownFilter { what: &'static str, value: String },
}
