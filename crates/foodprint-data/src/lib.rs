//! Data model and CSV dataset loader for the foodprint dashboard.
//!
//! Loads the three source tables (product emissions, production quantities,
//! food-system flow emissions) once at startup into immutable in-memory
//! structures. Any missing file or malformed row aborts the load — there is
//! no partial dataset and no refresh path.

pub mod error;
pub mod load;
pub mod model;

pub use error::{DataError, Result};
pub use load::Dataset;
pub use model::{EmissionRecord, FlowRecord, Gas, Origin, ProductionRecord, Stage};
