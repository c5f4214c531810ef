mod enumerate;
mod equilibrium;

pub use enumerate::{simple_paths, Path, PathSet};
pub(crate) use equilibrium::assign;
