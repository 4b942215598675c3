use std::str::FromStr;

use crate::{FixedGridSolver, ODEError, StepMethod};

pub const DEFAULT_NUM_GRIDS: usize = 100;

/// Configuration for a [`FixedGridSolver`] with a runtime selected method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    pub method: StepMethod,
    pub num_grids: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            method: StepMethod::default(),
            num_grids: DEFAULT_NUM_GRIDS,
        }
    }
}

impl SolverConfig {
    pub fn new(method: StepMethod, num_grids: usize) -> Self {
        Self { method, num_grids }
    }

    pub fn with_method(self, method: StepMethod) -> Self {
        Self { method, ..self }
    }

    /// Parses the method name, e.g. "euler", "rk2" or "rk4"
    pub fn with_method_name(self, name: &str) -> Result<Self, ODEError> {
        Ok(self.with_method(StepMethod::from_str(name)?))
    }

    pub fn with_num_grids(self, num_grids: usize) -> Self {
        Self { num_grids, ..self }
    }

    pub fn validate(&self) -> Result<(), ODEError> {
        if self.num_grids < 2 {
            return Err(ODEError::InvalidGrid { num_grids: self.num_grids });
        }
        Ok(())
    }

    pub fn build(&self) -> Result<FixedGridSolver<StepMethod>, ODEError> {
        self.validate()?;
        FixedGridSolver::new(self.method, self.num_grids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.method, StepMethod::RK4);
        assert_eq!(config.num_grids, DEFAULT_NUM_GRIDS);
        let solver = config.build().unwrap();
        assert_eq!(solver.num_grids(), DEFAULT_NUM_GRIDS);
        assert_eq!(*solver.step_fn(), StepMethod::RK4);
    }

    #[test]
    fn test_builder() {
        let config = SolverConfig::default()
            .with_method_name("heun")
            .unwrap()
            .with_num_grids(7);
        assert_eq!(config, SolverConfig::new(StepMethod::RK2, 7));

        assert!(SolverConfig::default().with_method_name("midpoint").is_err());
    }

    #[test]
    fn test_invalid_config() {
        let config = SolverConfig::default().with_num_grids(1);
        assert_eq!(config.validate().unwrap_err(), ODEError::InvalidGrid { num_grids: 1 });
        assert!(config.build().is_err());
    }
}
