use std::fmt::Display;

/// A directed road with linear latency `a·x + b` for `x` vehicles.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub a: f64,
    pub b: f64,
}

impl Edge {
    pub fn latency(&self, flow: f64) -> f64 {
        self.a * flow + self.b
    }

    /// Cost of one more vehicle as felt by everyone on the edge:
    /// d/dx (x·(a·x + b)) = 2·a·x + b.
    pub fn marginal_cost(&self, flow: f64) -> f64 {
        2.0 * self.a * flow + self.b
    }

    /// The latency formula as humans write it, e.g. "3x + 5", "x" or "10".
    pub fn latency_formula(&self) -> String {
        let linear = match self.a {
            a if a == 0.0 => String::new(),
            a if a == 1.0 => "x".to_string(),
            a => format!("{a}x"),
        };
        if linear.is_empty() {
            format!("{}", self.b)
        } else if self.b == 0.0 {
            linear
        } else {
            format!("{} + {}", linear, self.b)
        }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.latency_formula())
    }
}
