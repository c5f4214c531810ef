use std::fmt::Display;

/// `vehicles` drivers travelling from `source` to `sink`. Indices refer to
/// `Network::nodes`; build through [`crate::Network::demand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Demand {
    pub source: usize,
    pub sink: usize,
    pub vehicles: u64,
}

impl Display for Demand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} vehicles from node #{} to node #{}",
            self.vehicles, self.source, self.sink
        )
    }
}
