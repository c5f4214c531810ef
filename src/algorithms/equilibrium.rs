use crate::{
    flow::FlowMap,
    network::{Demand, Network, Termination},
    options::Objective,
};

use super::Path;

/// Index and cost of the cheapest path; the first minimal path in
/// enumeration order wins ties.
fn cheapest_path(costs: &[f64]) -> (usize, f64) {
    let mut best = 0;
    for (i, &cost) in costs.iter().enumerate().skip(1) {
        if cost < costs[best] {
            best = i;
        }
    }
    (best, costs[best])
}

/// Worst cost gap to the minimum over paths that carry flow. The assignment
/// counts as an equilibrium once this drops to the convergence threshold.
fn residual(flows: &FlowMap, paths: &[Path], costs: &[f64], min_cost: f64) -> f64 {
    paths
        .iter()
        .zip(costs)
        .filter(|(path, _)| flows.path_flow(path) > 0.0)
        .map(|(_, cost)| (cost - min_cost).abs())
        .fold(0.0, f64::max)
}

/// Damped best-response iteration over the enumerated paths.
///
/// Each round routes the full demand onto the currently cheapest path and
/// blends it into the standing flows with the configured step size. Under the
/// user-equilibrium objective path costs are plain latencies; under the
/// system optimum they are marginal costs, so the fixed point minimizes total
/// travel time instead. There is no convergence guarantee for arbitrary
/// coefficients; when the iteration limit runs out, the remaining cost gap is
/// reported instead of being passed off as an equilibrium.
pub(crate) fn assign(
    network: &Network,
    paths: &[Path],
    demand: &Demand,
    objective: Objective,
    mut flows: FlowMap,
) -> (FlowMap, Termination) {
    let options = &network.options;
    let n = demand.vehicles as f64;

    for iteration in 0..options.iteration_limit {
        let costs: Vec<f64> = paths
            .iter()
            .map(|path| flows.path_cost(network, path, objective))
            .collect();
        let (best, min_cost) = cheapest_path(&costs);

        let gap = residual(&flows, paths, &costs, min_cost);
        if gap <= options.convergence_threshold {
            return (flows, Termination::Converged { iterations: iteration });
        }

        // Target allocation: the full demand on every edge of the cheapest
        // path, nothing anywhere else. Damping comes from the blend alone.
        let mut target = FlowMap::zeroed(network);
        for (u, v) in paths[best].edges() {
            target.set(u, v, n);
        }

        for edge in &network.edges {
            let blended = (1.0 - options.step_size) * flows.get(edge.from, edge.to)
                + options.step_size * target.get(edge.from, edge.to);
            flows.set(edge.from, edge.to, blended);
        }

        log::trace!(
            "Iteration {iteration}: cheapest path #{best} costs {min_cost:.4}, gap {gap:.4}."
        );
    }

    let costs: Vec<f64> = paths
        .iter()
        .map(|path| flows.path_cost(network, path, objective))
        .collect();
    let (_, min_cost) = cheapest_path(&costs);
    let gap = residual(&flows, paths, &costs, min_cost);
    (flows, Termination::IterationLimit { residual: gap })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{network::Node, options::Options, Edge, SolverError};

    /// Pigou-style network: a congestible route s->a->t with latency x and a
    /// constant route s->b->t with latency 10.
    fn pigou() -> Network {
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

    fn single_route() -> Network {
        let nodes = vec![Node::new("s"), Node::new("m"), Node::new("t")];
        let edges = vec![
            Edge { from: 0, to: 1, a: 2.0, b: 1.0 },
            Edge { from: 1, to: 2, a: 0.0, b: 3.0 },
        ];
        Network::new(nodes, edges, Options::default()).unwrap()
    }

    #[test]
    fn test_wardrop_split_on_pigou_network() {
        let network = pigou();
        let demand = network.demand("s", "t", 20).unwrap();
        let assignment = network.solve_user_equilibrium(&demand).unwrap();

        assert!(assignment.termination.converged());
        // Hand-computed split: x = 10 on the congestible route makes both
        // routes cost 10.
        assert!((assignment.flows.get(0, 1) - 10.0).abs() <= 0.001);
        assert!((assignment.flows.get(0, 2) - 10.0).abs() <= 0.001);

        // Equilibrium property: every used path within the threshold of the
        // cheapest.
        let paths = crate::simple_paths(&network, demand.source, demand.sink, None).paths;
        let costs: Vec<f64> = paths
            .iter()
            .map(|p| {
                assignment
                    .flows
                    .path_cost(&network, p, Objective::UserEquilibrium)
            })
            .collect();
        let min = costs.iter().cloned().fold(f64::INFINITY, f64::min);
        for (path, cost) in paths.iter().zip(&costs) {
            if assignment.flows.path_flow(path) > 0.0 {
                assert!((cost - min).abs() <= 0.001);
            }
        }
    }

    #[test]
    fn test_system_optimum_undercuts_equilibrium() {
        let network = pigou();
        let demand = network.demand("s", "t", 20).unwrap();
        let equilibrium = network.solve_user_equilibrium(&demand).unwrap();
        let optimum = network.solve_system_optimum(&demand).unwrap();

        assert!(optimum.termination.converged());
        // Marginal costs equalize at 2x = 10: five vehicles on the
        // congestible route, fifteen on the constant one.
        assert!((optimum.flows.get(0, 1) - 5.0).abs() <= 0.001);
        assert!((optimum.flows.get(0, 2) - 15.0).abs() <= 0.001);

        let eq_time = equilibrium.total_travel_time(&network);
        let opt_time = optimum.total_travel_time(&network);
        assert!((eq_time - 200.0).abs() < 1e-9);
        assert!((opt_time - 175.0).abs() < 1e-9);
        assert!(opt_time <= eq_time);
    }

    #[test]
    fn test_price_of_anarchy_is_at_least_one() {
        let network = pigou();
        let demand = network.demand("s", "t", 20).unwrap();
        let equilibrium = network.solve_user_equilibrium(&demand).unwrap();
        let optimum = network.solve_system_optimum(&demand).unwrap();

        let ratio = crate::price_of_anarchy(&network, &equilibrium, &optimum);
        assert!(ratio >= 1.0);
        assert!((ratio - 200.0 / 175.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_route_carries_everything_under_both_objectives() {
        let network = single_route();
        let demand = network.demand("s", "t", 12).unwrap();

        for objective in [Objective::UserEquilibrium, Objective::SystemOptimum] {
            let assignment = network.solve(&demand, objective).unwrap();
            assert!(assignment.termination.converged());
            assert_eq!(12.0, assignment.flows.get(0, 1));
            assert_eq!(12.0, assignment.flows.get(1, 2));
        }
    }

    #[test]
    fn test_flows_stay_non_negative() {
        let network = pigou();
        let demand = network.demand("s", "t", 33).unwrap();

        for objective in [Objective::UserEquilibrium, Objective::SystemOptimum] {
            let assignment = network.solve(&demand, objective).unwrap();
            assert!(assignment.flows.iter().all(|(_, &flow)| flow >= 0.0));
        }
    }

    #[test]
    fn test_iteration_limit_is_reported_not_hidden() {
        // Two congestible routes (x and x + 2) lock the damped best response
        // into a 2-cycle around the Wardrop split; the cost gap stays above
        // the threshold at every check.
        let nodes = vec![
            Node::new("s"),
            Node::new("a"),
            Node::new("b"),
            Node::new("t"),
        ];
        let edges = vec![
            Edge { from: 0, to: 1, a: 1.0, b: 0.0 },
            Edge { from: 1, to: 3, a: 0.0, b: 0.0 },
            Edge { from: 0, to: 2, a: 1.0, b: 2.0 },
            Edge { from: 2, to: 3, a: 0.0, b: 0.0 },
        ];
        let network = Network::new(nodes, edges, Options::default()).unwrap();
        let demand = network.demand("s", "t", 10).unwrap();
        let assignment = network.solve_user_equilibrium(&demand).unwrap();

        match assignment.termination {
            Termination::IterationLimit { residual } => assert!(residual > 0.001),
            Termination::Converged { .. } => panic!("expected the limit to be exhausted"),
        }
        assert!(assignment.flows.iter().all(|(_, &flow)| flow >= 0.0));
    }

    #[test]
    fn test_solving_is_deterministic() {
        let network = pigou();
        let demand = network.demand("s", "t", 30).unwrap();

        let first = network.solve_user_equilibrium(&demand).unwrap();
        let second = network.solve_user_equilibrium(&demand).unwrap();
        assert_eq!(first.flows, second.flows);
        assert_eq!(first.termination, second.termination);
    }

    #[test]
    fn test_disconnected_pair_fails_fast() {
        let nodes = vec![Node::new("s"), Node::new("t"), Node::new("u")];
        let edges = vec![Edge { from: 2, to: 1, a: 1.0, b: 0.0 }];
        let network = Network::new(nodes, edges, Options::default()).unwrap();
        let demand = network.demand("s", "t", 5).unwrap();

        assert!(matches!(
            network.solve_user_equilibrium(&demand),
            Err(SolverError::NoPathExistsError(_, _))
        ));
    }
}
