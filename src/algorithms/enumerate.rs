use crate::network::Network;

/// A cycle-free route as a node-index sequence; every consecutive pair is an
/// edge of the network that enumerated it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub nodes: Vec<usize>,
}

impl Path {
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Result of one enumeration: paths in depth-first order, plus whether the
/// ceiling cut the enumeration short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSet {
    pub paths: Vec<Path>,
    pub truncated: bool,
}

/// Enumerates all simple paths from `source` to `sink` in depth-first order
/// over the ascending adjacency lists. The order is fixed and reproducible;
/// solver tie-breaking depends on it, so any reordering changes results.
///
/// Simple-path counts grow exponentially in dense networks, hence the
/// ceiling: once `ceiling` paths are collected, enumeration stops and the
/// result is marked truncated instead of running without bound.
pub fn simple_paths(
    network: &Network,
    source: usize,
    sink: usize,
    ceiling: Option<usize>,
) -> PathSet {
    let mut paths = vec![];
    let mut truncated = false;
    let mut on_path = vec![false; network.nodes.len()];
    let mut prefix = vec![source];
    on_path[source] = true;

    // Depth-first walk with an explicit stack of per-node neighbor cursors.
    let mut cursors = vec![0usize];

    while let Some(cursor) = cursors.last_mut() {
        let current = *prefix.last().unwrap();
        let neighbors = network.out_neighbors(current);

        if current == sink && prefix.len() > 1 {
            // Only a path beyond the ceiling proves the enumeration is
            // actually incomplete; hitting the ceiling exactly is not.
            if ceiling.is_some_and(|max| paths.len() >= max) {
                truncated = true;
                break;
            }
            paths.push(Path {
                nodes: prefix.clone(),
            });
            // Simple paths must stop here; continuing through the sink would
            // revisit it.
            cursors.pop();
            on_path[current] = false;
            prefix.pop();
            continue;
        }

        match neighbors.get(*cursor) {
            Some(&next) if on_path[next] => *cursor += 1,
            Some(&next) => {
                *cursor += 1;
                prefix.push(next);
                on_path[next] = true;
                cursors.push(0);
            }
            None => {
                cursors.pop();
                on_path[current] = false;
                prefix.pop();
            }
        }
    }

    log::trace!(
        "Enumerated {} simple paths from node #{source} to node #{sink}{}.",
        paths.len(),
        if truncated { " (truncated)" } else { "" }
    );
    PathSet { paths, truncated }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{network::Node, options::Options, Edge};

    fn network(num_nodes: usize, arcs: &[(usize, usize)]) -> Network {
        let nodes = (0..num_nodes)
            .map(|i| Node::new(&format!("v{i}")))
            .collect();
        let edges = arcs
            .iter()
            .map(|&(from, to)| Edge {
                from,
                to,
                a: 1.0,
                b: 1.0,
            })
            .collect();
        Network::new(nodes, edges, Options::default()).unwrap()
    }

    fn as_node_lists(set: &PathSet) -> Vec<Vec<usize>> {
        set.paths.iter().map(|p| p.nodes.clone()).collect()
    }

    #[test]
    fn test_enumeration_order_is_depth_first_ascending() {
        // Diamond with a chord: 0->1, 0->2, 1->3, 2->3, 1->2.
        let network = network(4, &[(0, 1), (0, 2), (1, 3), (2, 3), (1, 2)]);
        let set = simple_paths(&network, 0, 3, None);

        assert!(!set.truncated);
        assert_eq!(
            vec![vec![0, 1, 2, 3], vec![0, 1, 3], vec![0, 2, 3]],
            as_node_lists(&set)
        );
    }

    #[test]
    fn test_paths_never_repeat_nodes() {
        let network = network(4, &[(0, 1), (1, 2), (2, 1), (1, 3), (2, 3)]);
        let set = simple_paths(&network, 0, 3, None);

        for path in &set.paths {
            let mut seen = path.nodes.clone();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), path.nodes.len());
        }
    }

    #[test]
    fn test_disconnected_pair_yields_empty_set() {
        let network = network(4, &[(0, 1), (2, 3)]);
        let set = simple_paths(&network, 0, 3, None);

        assert!(set.paths.is_empty());
        assert!(!set.truncated);
    }

    #[test]
    fn test_source_equals_sink_yields_no_paths() {
        let network = network(3, &[(0, 1), (1, 2), (2, 0)]);
        let set = simple_paths(&network, 0, 0, None);

        assert!(set.paths.is_empty());
    }

    #[test]
    fn test_ceiling_truncates_deterministically() {
        let network = network(4, &[(0, 1), (0, 2), (1, 3), (2, 3), (1, 2)]);
        let full = simple_paths(&network, 0, 3, None);
        let capped = simple_paths(&network, 0, 3, Some(2));

        assert!(capped.truncated);
        assert_eq!(2, capped.paths.len());
        assert_eq!(full.paths[..2], capped.paths[..]);
    }

    #[test]
    fn test_ceiling_matching_path_count_is_not_truncation() {
        let network = network(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        let set = simple_paths(&network, 0, 3, Some(2));

        assert_eq!(2, set.paths.len());
        assert!(!set.truncated);
    }
}
