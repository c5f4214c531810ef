use crate::{flow::FlowMap, options::Objective, IntegerFlowMap};

use super::{Demand, Network};

/// How a solve run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Termination {
    /// Every flow-carrying path was within the convergence threshold of the
    /// cheapest path after `iterations` flow shifts.
    Converged { iterations: usize },
    /// The iteration limit ran out first. `residual` is the worst remaining
    /// cost gap over flow-carrying paths; the flows are still the best
    /// available answer, but no equilibrium claim is made for them.
    IterationLimit { residual: f64 },
}

impl Termination {
    pub fn converged(&self) -> bool {
        matches!(self, Termination::Converged { .. })
    }
}

/// The result of one solve call. Nothing in here is cached by the network;
/// each solve builds its own assignment.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub objective: Objective,
    pub demand: Demand,
    pub flows: FlowMap,
    pub termination: Termination,
}

impl Assignment {
    pub fn total_travel_time(&self, network: &Network) -> f64 {
        self.flows.total_travel_time(network)
    }

    /// Continuous flows apportioned into whole drivers summing to the demand.
    pub fn rounded(&self) -> IntegerFlowMap {
        self.flows.round_to_integers(self.demand.vehicles)
    }
}

/// Ratio of equilibrium to optimum total travel time; ≥ 1 whenever the
/// optimum is what it claims to be.
pub fn price_of_anarchy(
    network: &Network,
    equilibrium: &Assignment,
    optimum: &Assignment,
) -> f64 {
    equilibrium.total_travel_time(network) / optimum.total_travel_time(network)
}
