use std::collections::BTreeMap;

use crate::{
    algorithms::Path,
    network::{Demand, Network},
    options::Objective,
    Result, SolverError,
};

/// Continuous per-edge flow, keyed by (from, to) node indices. One map per
/// solve call; only the assignment loop writes to it. BTreeMap keeps
/// iteration order deterministic for display and rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowMap {
    values: BTreeMap<(usize, usize), f64>,
}

impl FlowMap {
    pub fn zeroed(network: &Network) -> Self {
        FlowMap {
            values: network
                .edges
                .iter()
                .map(|edge| ((edge.from, edge.to), 0.0))
                .collect(),
        }
    }

    /// Splits the demand evenly over the given paths and accumulates the
    /// per-edge sums. An empty path list is the no-route case and must fail
    /// here rather than divide by zero.
    pub fn init_uniform(network: &Network, paths: &[Path], demand: &Demand) -> Result<Self> {
        if paths.is_empty() {
            return Err(SolverError::NoPathExistsError(
                network.nodes[demand.source].name.clone(),
                network.nodes[demand.sink].name.clone(),
            ));
        }

        let mut flows = FlowMap::zeroed(network);
        let per_path = demand.vehicles as f64 / paths.len() as f64;
        for path in paths {
            for (u, v) in path.edges() {
                match flows.values.get_mut(&(u, v)) {
                    Some(flow) => *flow += per_path,
                    None => panic!("Path traverses ({u}->{v}), but the network has no such edge"),
                }
            }
        }

        log::trace!(
            "Initialized flows with {per_path} vehicles on each of {} paths.",
            paths.len()
        );
        Ok(flows)
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.values.get(&(from, to)).copied().unwrap_or(0.0)
    }

    pub(crate) fn set(&mut self, from: usize, to: usize, flow: f64) {
        self.values.insert((from, to), flow);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(usize, usize), &f64)> {
        self.values.iter()
    }

    /// Sum of the flows on the path's edges; the path counts as "used" while
    /// this is strictly positive.
    pub fn path_flow(&self, path: &Path) -> f64 {
        path.edges().map(|(u, v)| self.get(u, v)).sum()
    }

    pub fn path_cost(&self, network: &Network, path: &Path, objective: Objective) -> f64 {
        path.edges()
            .map(|(u, v)| {
                let edge = match network.edge_between(u, v) {
                    Some(edge) => edge,
                    None => panic!("Path traverses ({u}->{v}), but the network has no such edge"),
                };
                objective.edge_cost(edge, self.get(u, v))
            })
            .sum()
    }

    /// Σ flow·latency(flow) over all edges: what all drivers spend together.
    pub fn total_travel_time(&self, network: &Network) -> f64 {
        network
            .edges
            .iter()
            .map(|edge| {
                let flow = self.get(edge.from, edge.to);
                flow * edge.latency(flow)
            })
            .sum()
    }

    /// Largest-remainder apportionment into whole drivers summing to `n`.
    ///
    /// Floors everything, then hands the missing units to the largest
    /// fractional remainders (wrapping through the sorted list if `n` exceeds
    /// what one round can place). If the floors overshoot `n`, units are taken
    /// back from the smallest positive counts first. Already-integer input
    /// passes through unchanged, which makes the operation idempotent.
    pub fn round_to_integers(&self, n: u64) -> IntegerFlowMap {
        let mut counts: BTreeMap<(usize, usize), u64> = self
            .values
            .iter()
            .map(|(&edge, &flow)| (edge, flow.max(0.0).floor() as u64))
            .collect();
        let total: u64 = counts.values().sum();

        if total < n {
            let mut by_remainder: Vec<(usize, usize)> = self.values.keys().copied().collect();
            // Stable sort on top of BTreeMap order: remainder ties go to the
            // lexicographically smallest edge.
            by_remainder.sort_by(|x, y| {
                let rx = self.values[x].max(0.0).fract();
                let ry = self.values[y].max(0.0).fract();
                ry.partial_cmp(&rx).unwrap_or(std::cmp::Ordering::Equal)
            });
            let mut deficit = n - total;
            let mut i = 0;
            while deficit > 0 && !by_remainder.is_empty() {
                *counts.get_mut(&by_remainder[i % by_remainder.len()]).unwrap() += 1;
                deficit -= 1;
                i += 1;
            }
        } else if total > n {
            let mut surplus = total - n;
            while surplus > 0 {
                let mut positive: Vec<(usize, usize)> = counts
                    .iter()
                    .filter(|(_, &count)| count > 0)
                    .map(|(&edge, _)| edge)
                    .collect();
                if positive.is_empty() {
                    break;
                }
                positive.sort_by_key(|edge| counts[edge]);
                for edge in positive {
                    *counts.get_mut(&edge).unwrap() -= 1;
                    surplus -= 1;
                    if surplus == 0 {
                        break;
                    }
                }
            }
        }

        IntegerFlowMap { values: counts }
    }
}

/// Whole-driver counts per edge; the rounded form handed to presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerFlowMap {
    values: BTreeMap<(usize, usize), u64>,
}

impl IntegerFlowMap {
    pub fn get(&self, from: usize, to: usize) -> u64 {
        self.values.get(&(from, to)).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(usize, usize), &u64)> {
        self.values.iter()
    }

    pub fn sum(&self) -> u64 {
        self.values.values().sum()
    }

    /// Back to continuous flows, e.g. to re-round or re-cost the result.
    pub fn as_continuous(&self) -> FlowMap {
        FlowMap {
            values: self
                .values
                .iter()
                .map(|(&edge, &count)| (edge, count as f64))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{network::Node, options::Options, Edge};

    fn two_route_network() -> Network {
        // s->a->t and s->b->t
        let nodes = vec![
            Node::new("s"),
            Node::new("a"),
            Node::new("b"),
            Node::new("t"),
        ];
        let edges = vec![
            Edge { from: 0, to: 1, a: 1.0, b: 0.0 },
            Edge { from: 1, to: 3, a: 0.0, b: 0.0 },
            Edge { from: 0, to: 2, a: 0.0, b: 10.0 },
            Edge { from: 2, to: 3, a: 0.0, b: 0.0 },
        ];
        Network::new(nodes, edges, Options::default()).unwrap()
    }

    fn flow_map(entries: &[((usize, usize), f64)]) -> FlowMap {
        FlowMap {
            values: entries.iter().copied().collect(),
        }
    }

    #[test]
    fn test_init_uniform_splits_demand_evenly() {
        let network = two_route_network();
        let demand = network.demand("s", "t", 20).unwrap();
        let paths = crate::simple_paths(&network, demand.source, demand.sink, None).paths;
        let flows = FlowMap::init_uniform(&network, &paths, &demand).unwrap();

        // Each of the two routes carries n / 2 on each of its edges.
        for path in &paths {
            for (u, v) in path.edges() {
                assert_eq!(10.0, flows.get(u, v));
            }
        }
        // Crossing a cut reproduces the full demand.
        assert_eq!(20.0, flows.get(0, 1) + flows.get(0, 2));
    }

    #[test]
    fn test_init_uniform_fails_without_paths() {
        let network = two_route_network();
        let demand = network.demand("s", "t", 20).unwrap();
        assert!(matches!(
            FlowMap::init_uniform(&network, &[], &demand),
            Err(SolverError::NoPathExistsError(_, _))
        ));
    }

    #[test]
    fn test_total_travel_time() {
        let network = two_route_network();
        let flows = flow_map(&[
            ((0, 1), 10.0),
            ((1, 3), 10.0),
            ((0, 2), 10.0),
            ((2, 3), 10.0),
        ]);
        // 10·10 on the congested route plus 10·10 on the constant route.
        assert_eq!(200.0, flows.total_travel_time(&network));
    }

    #[test]
    fn test_rounding_preserves_total() {
        let flows = flow_map(&[((0, 1), 6.25), ((0, 2), 13.75)]);
        let rounded = flows.round_to_integers(20);
        assert_eq!(20, rounded.sum());
        assert_eq!(6, rounded.get(0, 1));
        assert_eq!(14, rounded.get(0, 2));
    }

    #[test]
    fn test_rounding_prefers_largest_remainder() {
        let flows = flow_map(&[((0, 1), 1.2), ((0, 2), 1.7), ((0, 3), 1.1)]);
        let rounded = flows.round_to_integers(4);
        assert_eq!(4, rounded.sum());
        assert_eq!(2, rounded.get(0, 2));
        assert_eq!(1, rounded.get(0, 1));
        assert_eq!(1, rounded.get(0, 3));
    }

    #[test]
    fn test_rounding_wraps_when_deficit_exceeds_edges() {
        let flows = flow_map(&[((0, 1), 0.6), ((0, 2), 0.4)]);
        let rounded = flows.round_to_integers(5);
        assert_eq!(5, rounded.sum());
        assert_eq!(3, rounded.get(0, 1));
        assert_eq!(2, rounded.get(0, 2));
    }

    #[test]
    fn test_rounding_reclaims_overshoot_from_smallest() {
        // Floors sum to 9 but only 7 drivers exist.
        let flows = flow_map(&[((0, 1), 1.0), ((0, 2), 3.0), ((0, 3), 5.0)]);
        let rounded = flows.round_to_integers(7);
        assert_eq!(7, rounded.sum());
        assert_eq!(0, rounded.get(0, 1));
        assert_eq!(2, rounded.get(0, 2));
        assert_eq!(5, rounded.get(0, 3));
    }

    #[test]
    fn test_rounding_to_zero_clears_everything() {
        let flows = flow_map(&[((0, 1), 2.5), ((0, 2), 1.5)]);
        let rounded = flows.round_to_integers(0);
        assert_eq!(0, rounded.sum());
    }

    #[test]
    fn test_rounding_is_idempotent() {
        let flows = flow_map(&[((0, 1), 6.25), ((0, 2), 13.75)]);
        let once = flows.round_to_integers(20);
        let twice = once.as_continuous().round_to_integers(20);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rounded_flows_are_never_negative() {
        let flows = flow_map(&[((0, 1), 0.3), ((0, 2), 0.2)]);
        let rounded = flows.round_to_integers(0);
        assert!(rounded.iter().all(|(_, &count)| count == 0));
    }
}
