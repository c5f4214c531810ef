mod error_handling;

pub use error_handling::{Result, SolverError};
