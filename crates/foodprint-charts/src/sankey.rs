//! Flow-diagram (Sankey) recompute.

use serde::Serialize;

use foodprint_data::{Gas, Stage};

use crate::context::DashboardContext;
use crate::filter::GasFilter;

/// The fixed edge count: CO2, CH4 and N2O each flow into all 8 stages,
/// plus the single F-gases → Retail edge.
pub const SANKEY_EDGE_COUNT: usize = 3 * 8 + 1;

/// Offset of the first stage node in the node-label list.
const STAGE_NODE_BASE: usize = Gas::ALL.len();

const SANKEY_TITLE: &str = "Years : 1990-2018";

/// Flow-diagram specification with the fixed 12-node topology.
///
/// `sources[i] → targets[i]` carries `values[i]`; indices address
/// `node_labels`. The topology never changes with the gas filter — edges
/// the filter excludes carry weight 0.0.
#[derive(Debug, Clone, Serialize)]
pub struct SankeyView {
    pub title: String,
    /// 4 gas source nodes followed by the 8 supply-chain stage nodes.
    pub node_labels: Vec<String>,
    pub sources: Vec<usize>,
    pub targets: Vec<usize>,
    pub values: Vec<f64>,
}

/// Recompute the Sankey diagram for a gas filter.
///
/// Always produces exactly [`SANKEY_EDGE_COUNT`] edges; (gas, stage)
/// groups absent from the filtered aggregate weigh 0.0.
pub fn sankey(ctx: &DashboardContext, filter: GasFilter) -> SankeyView {
    let flows = ctx.flows();

    let node_labels: Vec<String> = Gas::ALL
        .iter()
        .map(|g| g.label().to_string())
        .chain(Stage::ALL.iter().map(|s| s.name().to_string()))
        .collect();

    let mut sources = Vec::with_capacity(SANKEY_EDGE_COUNT);
    let mut targets = Vec::with_capacity(SANKEY_EDGE_COUNT);
    let mut values = Vec::with_capacity(SANKEY_EDGE_COUNT);

    for (gas_idx, &gas) in [Gas::Co2, Gas::Ch4, Gas::N2o].iter().enumerate() {
        for (stage_idx, &stage) in Stage::ALL.iter().enumerate() {
            sources.push(gas_idx);
            targets.push(STAGE_NODE_BASE + stage_idx);
            values.push(flows.weight(filter, gas, stage));
        }
    }
    // F-gases contribute through a single direct edge into Retail.
    sources.push(3);
    targets.push(STAGE_NODE_BASE + Stage::Retail as usize);
    values.push(flows.weight(filter, Gas::FGases, Stage::Retail));

    SankeyView {
        title: SANKEY_TITLE.to_string(),
        node_labels,
        sources,
        targets,
        values,
    }
}
