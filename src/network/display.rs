use std::fmt::Display;

use colored::Colorize;

use super::{assignment::Termination, Assignment, Network};

impl Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut string_repr: Vec<String> = vec![];
        string_repr.push("\nNetwork:".to_string());
        string_repr.push("========".to_string());
        string_repr.push(format!(
            "Nodes: ({})",
            self.nodes
                .iter()
                .map(|node| node.name.clone())
                .collect::<Vec<_>>()
                .join(", ")
        ));
        string_repr.push(format!("{} edges with latencies:", self.edges.len()));
        self.edges.iter().for_each(|edge| {
            string_repr.push(format!(
                "  ({}->{}): {}",
                self.nodes[edge.from], self.nodes[edge.to], edge
            ));
        });
        write!(f, "{}", string_repr.join("\n"))
    }
}

impl Network {
    /// Human-readable account of one solve result. Lives on the network
    /// because flows are keyed by node indices and only the network knows the
    /// names behind them.
    pub fn display_assignment(&self, assignment: &Assignment) -> String {
        let mut string_repr: Vec<String> = vec![];
        string_repr.push(format!(
            "{} assignment of {} vehicles from {} to {}:",
            assignment.objective,
            assignment.demand.vehicles,
            self.nodes[assignment.demand.source],
            self.nodes[assignment.demand.sink],
        ));

        for (&(u, v), &flow) in assignment.flows.iter() {
            let edge = match self.edge_between(u, v) {
                Some(edge) => edge,
                None => panic!("Flow on ({u}->{v}), but the network has no such edge"),
            };
            string_repr.push(format!(
                "  ({}->{}): {:>9.3} vehicles at latency {:.3}",
                self.nodes[u],
                self.nodes[v],
                flow,
                edge.latency(flow),
            ));
        }

        string_repr.push(format!(
            "Total travel time: {:.3}",
            assignment.total_travel_time(self)
        ));
        string_repr.push(match assignment.termination {
            Termination::Converged { iterations } => format!(
                "Converged after {iterations} iterations."
            )
            .green()
            .to_string(),
            Termination::IterationLimit { residual } => format!(
                "Iteration limit exhausted; worst remaining cost gap is {residual:.6}. \
                 These flows are NOT a verified equilibrium."
            )
            .red()
            .to_string(),
        });

        string_repr.join("\n")
    }
}
