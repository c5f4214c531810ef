mod objective;

pub use objective::Objective;

use crate::{Result, SolverError};

#[derive(Debug, Clone)]
pub struct Options {
    pub step_size: f64,
    pub iteration_limit: usize,
    pub convergence_threshold: f64,
    /// Ceiling on enumerated simple paths. `None` removes the cap.
    pub max_paths: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            step_size: 0.5,
            iteration_limit: 100,
            convergence_threshold: 0.001,
            max_paths: Some(10_000),
        }
    }
}

impl Options {
    pub fn validate(&self) -> Result<()> {
        if !(self.step_size > 0.0 && self.step_size <= 1.0) {
            return Err(SolverError::InvalidParameterError(format!(
                "step size must lie in (0, 1], but is {}.",
                self.step_size
            )));
        }
        if self.iteration_limit == 0 {
            return Err(SolverError::InvalidParameterError(
                "iteration limit must be at least 1.".to_string(),
            ));
        }
        if self.convergence_threshold < 0.0 {
            return Err(SolverError::InvalidParameterError(format!(
                "convergence threshold must be non-negative, but is {}.",
                self.convergence_threshold
            )));
        }
        if self.max_paths == Some(0) {
            return Err(SolverError::InvalidParameterError(
                "path ceiling must be at least 1.".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_valid() {
        assert!(Options::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_step_size_outside_unit_interval() {
        let mut options = Options::default();
        options.step_size = 0.0;
        assert!(options.validate().is_err());
        options.step_size = 1.5;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_iteration_limit() {
        let mut options = Options::default();
        options.iteration_limit = 0;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_path_ceiling() {
        let mut options = Options::default();
        options.max_paths = Some(0);
        assert!(options.validate().is_err());
    }
}
