mod assignment;
mod demand;
mod display;
mod edge;
mod network;
mod node;
mod random;
mod to_latex;

pub use assignment::{price_of_anarchy, Assignment, Termination};
pub use demand::Demand;
pub use edge::Edge;
pub use network::Network;
pub use node::Node;
