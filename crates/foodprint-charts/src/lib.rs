//! Derived views and pure chart-recompute functions for the foodprint
//! dashboard.
//!
//! The [`DashboardContext`] is built once at startup from the loaded
//! [`foodprint_data::Dataset`] and holds every precomputed view: the
//! ranked-emitter lists and product catalogs per origin category, and the
//! grouped (gas, stage) flow aggregate. All recompute functions take the
//! context by shared reference together with the user's current selections
//! and return a serializable chart specification; none of them mutate
//! anything or propagate a fault for a missing selection — lookup misses
//! come back as explicit empty views.

pub mod bar;
pub mod context;
pub mod error;
pub mod filter;
pub mod flow;
pub mod map;
pub mod ranked;
pub mod sankey;

pub use bar::{bar_chart, BarChartView, ANIMAL_COLOR, VEGETAL_COLOR};
pub use context::{ChartConfig, DashboardContext};
pub use error::{ChartError, Result};
pub use filter::{FilterState, GasFilter, OriginFilter, Region};
pub use flow::FlowAggregate;
pub use map::{latest_production_year, map_breakdown, ChoroplethSpec, MapView, StageFigures};
pub use ranked::{ProductCatalog, ProductOption, RankedEmitters};
pub use sankey::{sankey, SankeyView, SANKEY_EDGE_COUNT};
