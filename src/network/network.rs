use std::{collections::BTreeMap, fs::File, io::BufReader};

use serde::{Deserialize, Serialize};

use crate::{
    algorithms::{assign, simple_paths},
    flow::FlowMap,
    options::{Objective, Options},
    Result, SolverError,
};

use super::{
    assignment::{Assignment, Termination},
    demand::Demand,
    edge::Edge,
    node::Node,
};

/// Immutable directed road network with linear edge latencies. Shared
/// read-only by the solver and the latex export; solving never mutates it.
#[derive(Debug, Clone)]
pub struct Network {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub options: Options,
    edge_index: BTreeMap<(usize, usize), usize>,
    adjacency: Vec<Vec<usize>>,
}

/// On-disk shape of a network: edge endpoints are node names, not indices.
#[derive(Deserialize, Serialize, Debug)]
struct NetworkFile {
    nodes: Vec<Node>,
    edges: Vec<EdgeEntry>,
}

#[derive(Deserialize, Serialize, Debug)]
struct EdgeEntry {
    from: String,
    to: String,
    a: f64,
    b: f64,
}

impl Network {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>, options: Options) -> Result<Self> {
        if nodes.is_empty() {
            return Err(SolverError::GraphShapeError(
                "expected at least one node, found none.".to_string(),
            ));
        }

        let mut edge_index = BTreeMap::new();
        for (i, edge) in edges.iter().enumerate() {
            if edge.from >= nodes.len() || edge.to >= nodes.len() {
                return Err(SolverError::GraphShapeError(format!(
                    "edge #{} references node index {} in a network of {} nodes.",
                    i,
                    edge.from.max(edge.to),
                    nodes.len()
                )));
            }
            if edge.from == edge.to {
                return Err(SolverError::GraphShapeError(format!(
                    "self-loop on {} cannot appear on any simple path.",
                    nodes[edge.from]
                )));
            }
            if !(edge.a >= 0.0 && edge.b >= 0.0) {
                return Err(SolverError::InvalidParameterError(format!(
                    "edge ({}->{}) has latency {}, but both coefficients must be non-negative.",
                    nodes[edge.from],
                    nodes[edge.to],
                    edge.latency_formula()
                )));
            }
            if edge_index.insert((edge.from, edge.to), i).is_some() {
                return Err(SolverError::GraphShapeError(format!(
                    "duplicate edge ({}->{}); at most one edge per ordered pair.",
                    nodes[edge.from], nodes[edge.to]
                )));
            }
        }

        // Adjacency sorted by target index. Path enumeration order, and with
        // it solver tie-breaking, depends on this being fixed.
        let mut adjacency: Vec<Vec<usize>> = vec![vec![]; nodes.len()];
        for edge in &edges {
            adjacency[edge.from].push(edge.to);
        }
        for targets in adjacency.iter_mut() {
            targets.sort_unstable();
        }

        log::debug!(
            "Constructed network with {} nodes and {} edges.",
            nodes.len(),
            edges.len()
        );
        Ok(Network {
            nodes,
            edges,
            options,
            edge_index,
            adjacency,
        })
    }

    pub fn from_file(filename: &str, options: Options) -> Result<Self> {
        let file = File::open(filename)?;
        let reader = BufReader::new(file);

        log::debug!("Deserializing network from {filename}");
        let parsed: NetworkFile = serde_json::from_reader(reader)?;

        let mut names = BTreeMap::new();
        for (i, node) in parsed.nodes.iter().enumerate() {
            if names.insert(node.name.clone(), i).is_some() {
                return Err(SolverError::GraphShapeError(format!(
                    "node name \"{}\" appears more than once.",
                    node.name
                )));
            }
        }

        let mut edges = Vec::with_capacity(parsed.edges.len());
        for entry in &parsed.edges {
            let resolve = |name: &String| {
                names
                    .get(name)
                    .copied()
                    .ok_or_else(|| SolverError::NodeNotFoundError(name.clone()))
            };
            edges.push(Edge {
                from: resolve(&entry.from)?,
                to: resolve(&entry.to)?,
                a: entry.a,
                b: entry.b,
            });
        }

        Network::new(parsed.nodes, edges, options)
    }

    pub fn serialize(&self, filename: &str) -> Result<()> {
        let file = NetworkFile {
            nodes: self.nodes.clone(),
            edges: self
                .edges
                .iter()
                .map(|e| EdgeEntry {
                    from: self.nodes[e.from].name.clone(),
                    to: self.nodes[e.to].name.clone(),
                    a: e.a,
                    b: e.b,
                })
                .collect(),
        };
        let json_str = serde_json::to_string_pretty(&file)?;
        log::debug!("Writing network to {filename}");
        std::fs::write(filename, json_str)?;
        Ok(())
    }

    pub fn node_index(&self, name: &str) -> Result<usize> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .ok_or_else(|| SolverError::NodeNotFoundError(name.to_string()))
    }

    pub(crate) fn out_neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    pub(crate) fn edge_between(&self, from: usize, to: usize) -> Option<&Edge> {
        self.edge_index.get(&(from, to)).map(|&i| &self.edges[i])
    }

    /// Latency of the edge between the named nodes at `flow` vehicles.
    pub fn cost(&self, from: &str, to: &str, flow: f64) -> Result<f64> {
        let (u, v) = (self.node_index(from)?, self.node_index(to)?);
        match self.edge_between(u, v) {
            Some(edge) => Ok(edge.latency(flow)),
            None => Err(SolverError::EdgeNotFoundError(
                from.to_string(),
                to.to_string(),
            )),
        }
    }

    /// Resolves names and validates the vehicle count.
    pub fn demand(&self, source: &str, sink: &str, vehicles: u64) -> Result<Demand> {
        if vehicles == 0 {
            return Err(SolverError::InvalidParameterError(
                "demand must be at least 1 vehicle, but is 0.".to_string(),
            ));
        }
        Ok(Demand {
            source: self.node_index(source)?,
            sink: self.node_index(sink)?,
            vehicles,
        })
    }

    /// Assigns the demand under the given objective. Stateless: every call
    /// enumerates, initializes and iterates from scratch and returns a fresh
    /// [`Assignment`].
    pub fn solve(&self, demand: &Demand, objective: Objective) -> Result<Assignment> {
        self.options.validate()?;

        let source = &self.nodes[demand.source].name;
        let sink = &self.nodes[demand.sink].name;
        log::info!("Solving {objective} for {} ({source} to {sink}).", demand);

        let path_set = simple_paths(self, demand.source, demand.sink, self.options.max_paths);
        if path_set.truncated {
            log::warn!(
                "Path enumeration hit the ceiling of {} paths; the assignment only considers the enumerated prefix.",
                path_set.paths.len()
            );
        }
        if path_set.paths.is_empty() {
            return Err(SolverError::NoPathExistsError(
                source.clone(),
                sink.clone(),
            ));
        }
        log::debug!("Enumerated {} simple paths.", path_set.paths.len());

        let flows = FlowMap::init_uniform(self, &path_set.paths, demand)?;
        let (flows, termination) = assign(self, &path_set.paths, demand, objective, flows);

        match termination {
            Termination::Converged { iterations } => {
                log::info!("{objective} converged after {iterations} iterations.")
            }
            Termination::IterationLimit { residual } => log::warn!(
                "{objective} exhausted the iteration limit of {}; worst remaining cost gap is {residual:.6}.",
                self.options.iteration_limit
            ),
        }

        Ok(Assignment {
            objective,
            demand: *demand,
            flows,
            termination,
        })
    }

    pub fn solve_user_equilibrium(&self, demand: &Demand) -> Result<Assignment> {
        self.solve(demand, Objective::UserEquilibrium)
    }

    pub fn solve_system_optimum(&self, demand: &Demand) -> Result<Assignment> {
        self.solve(demand, Objective::SystemOptimum)
    }
}
