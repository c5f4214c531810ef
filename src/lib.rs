mod algorithms;
mod flow;
mod network;
mod options;
mod util;

pub use algorithms::{simple_paths, Path, PathSet};
pub use flow::{FlowMap, IntegerFlowMap};
pub use network::{price_of_anarchy, Assignment, Demand, Edge, Network, Node, Termination};
pub use options::{Objective, Options};
pub use util::{Result, SolverError};
