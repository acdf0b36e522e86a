//! Results collection and output for coloring experiments.
//!
//! Captures metrics like:
//! - Sweeps to convergence
//! - Best cost per sweep
//! - Final coloring, keyed by node label

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use colony_kernel::Termination;
use serde::{Deserialize, Serialize};

/// Configuration of a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Graph name (family spec or file name)
    pub graph: String,
    pub nodes: usize,
    pub edges: usize,
    pub n_colors: usize,
    /// Ants actually used (after capping at the node count)
    pub n_ants: usize,
    pub pc: f64,
    pub pn: f64,
    pub order_2: bool,
    /// Trial number (for repeated experiments)
    pub trial: usize,
    /// Seed the solver ran with
    pub seed: u64,
}

/// Color assigned to one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeColor {
    pub node: String,
    pub color: usize,
}

/// Results from a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub config: RunConfig,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub termination: Termination,
    /// Total sweeps executed
    pub sweeps: usize,
    /// Whether a conflict-free coloring was found
    pub solved: bool,
    pub initial_cost: usize,
    /// Best total cost (0 if solved)
    pub final_cost: usize,
    /// Conflicting edges in the best coloring
    pub conflicting_edges: usize,
    pub elapsed_ms: u64,
    /// Best cost after each sweep
    pub cost_history: Vec<usize>,
    /// Best coloring found
    pub coloring: Vec<NodeColor>,
}

/// Aggregate results from a grid experiment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridResults {
    /// All individual results
    pub results: Vec<RunResult>,
    /// Summary statistics by configuration
    pub summary: HashMap<String, ConfigSummary>,
}

/// Summary statistics for a configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSummary {
    pub config_key: String,
    pub trials: usize,
    pub solve_rate: f64,
    /// Standard error of solve rate: sqrt(p(1-p)/n)
    pub solve_rate_se: f64,
    /// 95% confidence interval for solve rate: (lower, upper)
    pub solve_rate_ci: (f64, f64),
    pub avg_sweeps: f64,
    /// Standard error of avg_sweeps
    pub avg_sweeps_se: f64,
    pub avg_final_cost: f64,
    pub min_sweeps: usize,
    pub max_sweeps: usize,
}

impl RunConfig {
    /// Key grouping trials of the same configuration.
    pub fn key(&self) -> String {
        format!(
            "{}:colors={}:ants={}:pc={}:pn={}:order2={}",
            self.graph, self.n_colors, self.n_ants, self.pc, self.pn, self.order_2
        )
    }
}

impl GridResults {
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            summary: HashMap::new(),
        }
    }

    pub fn add(&mut self, result: RunResult) {
        self.results.push(result);
    }

    /// Compute summary statistics.
    pub fn compute_summary(&mut self) {
        let mut by_config: HashMap<String, Vec<&RunResult>> = HashMap::new();
        for result in &self.results {
            by_config.entry(result.config.key()).or_default().push(result);
        }

        self.summary.clear();
        for (key, results) in by_config {
            let trials = results.len();
            let n = trials as f64;
            let solved_count = results.iter().filter(|r| r.solved).count();
            let solve_rate = solved_count as f64 / n;

            // Standard error for proportion: SE = sqrt(p(1-p)/n)
            let solve_rate_se = if trials > 1 {
                (solve_rate * (1.0 - solve_rate) / n).sqrt()
            } else {
                0.0
            };

            // 95% CI: p ± 1.96 * SE, clamped to [0, 1]
            let z = 1.96;
            let solve_rate_ci = (
                (solve_rate - z * solve_rate_se).max(0.0),
                (solve_rate + z * solve_rate_se).min(1.0),
            );

            let sweeps: Vec<f64> = results.iter().map(|r| r.sweeps as f64).collect();
            let avg_sweeps = sweeps.iter().sum::<f64>() / n;

            // Standard error for continuous: SE = std_dev / sqrt(n)
            let avg_sweeps_se = if trials > 1 {
                let variance =
                    sweeps.iter().map(|s| (s - avg_sweeps).powi(2)).sum::<f64>() / (n - 1.0);
                variance.sqrt() / n.sqrt()
            } else {
                0.0
            };

            let min_sweeps = results.iter().map(|r| r.sweeps).min().unwrap_or(0);
            let max_sweeps = results.iter().map(|r| r.sweeps).max().unwrap_or(0);
            let avg_final_cost = results.iter().map(|r| r.final_cost as f64).sum::<f64>() / n;

            self.summary.insert(
                key.clone(),
                ConfigSummary {
                    config_key: key,
                    trials,
                    solve_rate,
                    solve_rate_se,
                    solve_rate_ci,
                    avg_sweeps,
                    avg_sweeps_se,
                    avg_final_cost,
                    min_sweeps,
                    max_sweeps,
                },
            );
        }
    }

    /// Save results to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load results from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let results = serde_json::from_str(&json)?;
        Ok(results)
    }
}

impl Default for GridResults {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a duration in milliseconds for display.
pub fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        format!("{:.1}m", ms as f64 / 60_000.0)
    }
}
