use clap::ValueEnum;
use strum::Display;

use crate::network::Edge;

/// Which per-edge cost the assignment loop routes on: average latency for the
/// user equilibrium, marginal cost for the system optimum.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Display)]
#[clap(rename_all = "kebab-case")]
pub enum Objective {
    UserEquilibrium,
    SystemOptimum,
}

impl Objective {
    pub fn edge_cost(&self, edge: &Edge, flow: f64) -> f64 {
        match self {
            Objective::UserEquilibrium => edge.latency(flow),
            Objective::SystemOptimum => edge.marginal_cost(flow),
        }
    }
}
