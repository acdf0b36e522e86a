//! Configuration types for the solver.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, Result};

/// Solver configuration.
///
/// Defines the colony size, the two behavioral probabilities and the
/// stopping budgets. Loadable from JSON at runtime; missing fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Number of colors available. `None` means max degree + 1.
    pub n_colors: Option<usize>,

    /// Whether the caller supplies the initial coloring.
    /// When false, every node gets a uniformly random color.
    pub pre_colored: bool,

    /// Requested number of ants (capped at the node count)
    pub n_ants: usize,

    /// Probability of moving to the most conflicted neighbor
    pub pc: f64,

    /// Probability of choosing the locally best color
    pub pn: f64,

    /// Maximum number of completed sweeps
    pub max_iters: usize,

    /// Wall-clock budget in seconds
    pub max_time_secs: f64,

    /// Use the order-2 local potential instead of the plain conflict level.
    /// Experimental.
    pub order_2: bool,

    /// Seed for the run's random source. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            n_colors: None,
            pre_colored: false,
            n_ants: 5,
            pc: 0.8,
            pn: 0.8,
            max_iters: 1_000_000,
            max_time_secs: 100_000.0,
            order_2: false,
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Check every field that does not depend on the graph.
    pub fn validate(&self) -> Result<()> {
        if self.n_colors == Some(0) {
            return Err(KernelError::Configuration(
                "n_colors must be at least 1".to_string(),
            ));
        }
        if self.n_ants < 1 {
            return Err(KernelError::Configuration(
                "n_ants must be at least 1".to_string(),
            ));
        }
        check_open_unit("pc", self.pc)?;
        check_open_unit("pn", self.pn)?;
        self.time_budget()?;
        Ok(())
    }

    /// The wall-clock budget as a `Duration`.
    pub fn time_budget(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.max_time_secs).map_err(|_| {
            KernelError::Configuration(format!(
                "max_time_secs must be a finite number >= 0, got {}",
                self.max_time_secs
            ))
        })
    }
}

fn check_open_unit(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(KernelError::Configuration(format!(
            "{} must lie in (0, 1), got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SolverConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_colors_and_ants() {
        let config = SolverConfig {
            n_colors: Some(0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(KernelError::Configuration(_))));

        let config = SolverConfig {
            n_ants: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(KernelError::Configuration(_))));
    }

    #[test]
    fn test_probabilities_must_be_open_interval() {
        for bad in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let config = SolverConfig {
                pc: bad,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "pc = {} accepted", bad);

            let config = SolverConfig {
                pn: bad,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "pn = {} accepted", bad);
        }
    }

    #[test]
    fn test_time_budget_rejects_negative_and_nan() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let config = SolverConfig {
                max_time_secs: bad,
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        let config = SolverConfig {
            max_time_secs: 0.0,
            ..Default::default()
        };
        assert_eq!(config.time_budget().unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_deserialize_partial_json_uses_defaults() {
        let config: SolverConfig =
            serde_json::from_str(r#"{ "n_ants": 12, "order_2": true, "seed": 7 }"#).unwrap();

        assert_eq!(config.n_ants, 12);
        assert!(config.order_2);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.pc, 0.8);
        assert_eq!(config.n_colors, None);
    }
}
