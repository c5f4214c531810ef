use std::{error::Error, fmt::Display};

pub type Result<T> = std::result::Result<T, SolverError>;

#[derive(Debug)]
pub enum SolverError {
    GraphNotFoundError(std::io::Error),
    GraphFormatError(serde_json::Error),
    GraphShapeError(String),

    InvalidParameterError(String),

    NodeNotFoundError(String),
    EdgeNotFoundError(String, String),

    NoPathExistsError(String, String),
}

impl Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SolverError::GraphNotFoundError(e) =>
                    format!("Failed to read network from file: {e}."),
                SolverError::GraphFormatError(e) => format!("Failed to parse the network: {e}."),
                SolverError::GraphShapeError(e) => format!("Network is invalid: {e}"),
                SolverError::InvalidParameterError(e) => format!("Invalid parameter: {e}"),
                SolverError::NodeNotFoundError(name) =>
                    format!("The network contains no node named \"{name}\"."),
                SolverError::EdgeNotFoundError(u, v) =>
                    format!("The network contains no edge ({u}->{v})."),
                SolverError::NoPathExistsError(s, t) =>
                    format!("No simple path exists from \"{s}\" to \"{t}\"; nothing to assign."),
            }
        )
    }
}

impl Error for SolverError {}

impl From<serde_json::Error> for SolverError {
    fn from(value: serde_json::Error) -> Self {
        SolverError::GraphFormatError(value)
    }
}

impl From<std::io::Error> for SolverError {
    fn from(value: std::io::Error) -> Self {
        SolverError::GraphNotFoundError(value)
    }
}
