use rand::Rng;

use crate::{options::Options, Result};

use super::{Edge, Network, Node};

impl Network {
    /// Generates a random road network for demos and benchmarking. A ring
    /// through all nodes guarantees every pair is connected; further edges
    /// appear with probability `arc_density`, coefficients drawn uniformly
    /// from the given ranges.
    pub fn from_random(
        options: &Options,
        num_nodes: usize,
        arc_density: f64,
        range_a: (f64, f64),
        range_b: (f64, f64),
    ) -> Result<Self> {
        log::debug!(
            "Randomizing network: num_nodes={num_nodes}, arc_density={arc_density}, a in {range_a:?}, b in {range_b:?}."
        );
        let mut rng = rand::thread_rng();

        let nodes: Vec<Node> = (1..=num_nodes)
            .map(|i| {
                let angle = std::f64::consts::TAU * (i - 1) as f64 / num_nodes as f64;
                Node {
                    name: format!("v{i}"),
                    x: (angle.cos() * 100.0) as f32,
                    y: (angle.sin() * 100.0) as f32,
                }
            })
            .collect();

        let mut edges: Vec<Edge> = vec![];
        for from in 0..num_nodes {
            for to in 0..num_nodes {
                if from == to {
                    continue;
                }
                // The ring prevents orphan nodes.
                let on_ring = to == (from + 1) % num_nodes;
                if on_ring || rng.gen_bool(arc_density) {
                    edges.push(Edge {
                        from,
                        to,
                        a: rng.gen_range(range_a.0..=range_a.1),
                        b: rng.gen_range(range_b.0..=range_b.1),
                    });
                }
            }
        }

        Network::new(nodes, edges, options.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_network_is_valid_and_connected() {
        let network =
            Network::from_random(&Options::default(), 8, 0.2, (0.0, 3.0), (1.0, 10.0)).unwrap();

        assert_eq!(8, network.nodes.len());
        assert!(network.edges.iter().all(|e| e.a >= 0.0 && e.b >= 0.0));

        // The ring makes any ordered pair reachable.
        let demand = network.demand("v1", "v5", 10).unwrap();
        assert!(network.solve_user_equilibrium(&demand).is_ok());
    }
}
