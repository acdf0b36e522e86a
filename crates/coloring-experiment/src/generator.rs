//! Graph generators for coloring experiments.
//!
//! Families range from trivially bipartite (paths, even cycles, grids) to
//! random graphs with a controlled edge density. Generation is reproducible
//! for a given seed.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use colony_kernel::Graph;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// A family of graphs with its size parameters.
///
/// Parses from and displays as a compact spec string, e.g. `cycle:10`,
/// `grid:4x5`, `bipartite:3x4`, `random:50:0.1`, `random-bipartite:10x12:0.3`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphFamily {
    Path { n: usize },
    Cycle { n: usize },
    Grid { rows: usize, cols: usize },
    CompleteBipartite { a: usize, b: usize },
    /// G(n, p): every pair joined independently with probability `p`
    Random { n: usize, p: f64 },
    /// Random edges only between the two sides
    RandomBipartite { a: usize, b: usize, p: f64 },
}

impl GraphFamily {
    /// Short family name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Path { .. } => "path",
            Self::Cycle { .. } => "cycle",
            Self::Grid { .. } => "grid",
            Self::CompleteBipartite { .. } => "bipartite",
            Self::Random { .. } => "random",
            Self::RandomBipartite { .. } => "random-bipartite",
        }
    }

    /// Whether every member of the family is 2-colorable.
    pub fn is_bipartite(&self) -> bool {
        match self {
            Self::Cycle { n } => n % 2 == 0,
            Self::Random { .. } => false,
            _ => true,
        }
    }

    pub fn node_count(&self) -> usize {
        match *self {
            Self::Path { n } | Self::Cycle { n } | Self::Random { n, .. } => n,
            Self::Grid { rows, cols } => rows * cols,
            Self::CompleteBipartite { a, b } | Self::RandomBipartite { a, b, .. } => a + b,
        }
    }
}

impl fmt::Display for GraphFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Path { n } | Self::Cycle { n } => write!(f, "{}:{}", self.name(), n),
            Self::Grid { rows, cols } => write!(f, "grid:{}x{}", rows, cols),
            Self::CompleteBipartite { a, b } => write!(f, "bipartite:{}x{}", a, b),
            Self::Random { n, p } => write!(f, "random:{}:{}", n, p),
            Self::RandomBipartite { a, b, p } => write!(f, "random-bipartite:{}x{}:{}", a, b, p),
        }
    }
}

fn parse_dims(s: &str) -> Result<(usize, usize)> {
    let (a, b) = s
        .split_once('x')
        .with_context(|| format!("Expected AxB dimensions, got '{}'", s))?;
    Ok((a.parse()?, b.parse()?))
}

fn parse_probability(s: &str) -> Result<f64> {
    let p: f64 = s.parse().with_context(|| format!("Invalid probability '{}'", s))?;
    if !(0.0..=1.0).contains(&p) {
        bail!("Edge probability {} out of range [0, 1]", p);
    }
    Ok(p)
}

impl FromStr for GraphFamily {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        let family = match parts.as_slice() {
            ["path", n] => Self::Path { n: n.parse()? },
            ["cycle", n] => Self::Cycle { n: n.parse()? },
            ["grid", dims] => {
                let (rows, cols) = parse_dims(dims)?;
                Self::Grid { rows, cols }
            }
            ["bipartite", dims] => {
                let (a, b) = parse_dims(dims)?;
                Self::CompleteBipartite { a, b }
            }
            ["random", n, p] => Self::Random {
                n: n.parse()?,
                p: parse_probability(p)?,
            },
            ["random-bipartite", dims, p] => {
                let (a, b) = parse_dims(dims)?;
                Self::RandomBipartite {
                    a,
                    b,
                    p: parse_probability(p)?,
                }
            }
            _ => bail!(
                "Unknown graph family: {}. Valid: path:N, cycle:N, grid:RxC, bipartite:AxB, random:N:P, random-bipartite:AxB:P",
                s
            ),
        };

        if family.node_count() == 0 {
            bail!("Graph family {} has no nodes", s);
        }
        if let Self::Cycle { n } = family
            && n < 3
        {
            bail!("A cycle needs at least 3 nodes, got {}", n);
        }
        Ok(family)
    }
}

/// Configuration for graph generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub family: GraphFamily,
    /// Random seed for reproducibility (None for random)
    pub seed: Option<u64>,
}

/// Seeded graph generator.
pub struct GraphGenerator {
    config: GeneratorConfig,
    rng: ChaCha8Rng,
}

impl GraphGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate one graph of the configured family.
    pub fn generate(&mut self) -> Result<Graph> {
        let family = self.config.family;
        let n = family.node_count();
        let edges = match family {
            GraphFamily::Path { n } => (1..n).map(|i| (i - 1, i)).collect(),
            GraphFamily::Cycle { n } => (0..n).map(|i| (i, (i + 1) % n)).collect(),
            GraphFamily::Grid { rows, cols } => {
                let mut edges = Vec::new();
                for r in 0..rows {
                    for c in 0..cols {
                        let id = r * cols + c;
                        if c + 1 < cols {
                            edges.push((id, id + 1));
                        }
                        if r + 1 < rows {
                            edges.push((id, id + cols));
                        }
                    }
                }
                edges
            }
            GraphFamily::CompleteBipartite { a, b } => (0..a)
                .flat_map(|u| (a..a + b).map(move |v| (u, v)))
                .collect(),
            GraphFamily::Random { n, p } => {
                let mut edges = Vec::new();
                for u in 0..n {
                    for v in (u + 1)..n {
                        if self.rng.random::<f64>() < p {
                            edges.push((u, v));
                        }
                    }
                }
                edges
            }
            GraphFamily::RandomBipartite { a, b, p } => {
                let mut edges = Vec::new();
                for u in 0..a {
                    for v in a..a + b {
                        if self.rng.random::<f64>() < p {
                            edges.push((u, v));
                        }
                    }
                }
                edges
            }
        };

        Graph::from_edges(n, &edges).with_context(|| format!("Generating {}", family))
    }
}
