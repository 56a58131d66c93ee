//! Grouped (gas, stage) flow aggregate for the Sankey diagram.

use std::collections::BTreeMap;

use foodprint_data::{FlowRecord, Gas, Stage};

use crate::filter::GasFilter;

/// Summed emission quantity per (gas, stage) group, computed once.
///
/// Lookups are keyed rather than positional so a gas-filtered Sankey keeps
/// its full fixed edge set: combinations absent from the data (or excluded
/// by the filter) weigh 0.0 instead of shortening the edge list.
#[derive(Debug, Clone)]
pub struct FlowAggregate {
    groups: BTreeMap<(Gas, Stage), f64>,
}

impl FlowAggregate {
    /// Group `flows` by (gas, stage) and sum quantities within each group.
    pub fn build(flows: &[FlowRecord]) -> Self {
        let mut groups: BTreeMap<(Gas, Stage), f64> = BTreeMap::new();
        for flow in flows {
            *groups.entry((flow.gas, flow.stage)).or_insert(0.0) += flow.quantity;
        }
        FlowAggregate { groups }
    }

    /// Summed quantity for (gas, stage) under `filter`; 0.0 when the
    /// group is absent or the filter excludes the gas.
    pub fn weight(&self, filter: GasFilter, gas: Gas, stage: Stage) -> f64 {
        if !filter.admits(gas) {
            return 0.0;
        }
        self.groups.get(&(gas, stage)).copied().unwrap_or(0.0)
    }

    /// Grouped rows, ordered by gas then stage order ascending.
    pub fn rows(&self) -> impl Iterator<Item = (Gas, Stage, f64)> + '_ {
        self.groups
            .iter()
            .map(|(&(gas, stage), &quantity)| (gas, stage, quantity))
    }

    /// Total quantity admitted by `filter`.
    pub fn total(&self, filter: GasFilter) -> f64 {
        self.groups
            .iter()
            .filter(|(&(gas, _), _)| filter.admits(gas))
            .map(|(_, &q)| q)
            .sum()
    }
}
