//! Coloring Experiment CLI.
//!
//! Commands:
//! - solve: Color one graph (edge-list file or generated family), optionally
//!   from a given starting coloring
//! - grid: Run a grid experiment (ant counts × trials)
//! - generate: Print a generated graph as an edge list

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use colony_kernel::{Graph, SolverConfig};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use coloring_experiment::experiment::{ExperimentRunner, ExperimentRunnerConfig};
use coloring_experiment::generator::{GeneratorConfig, GraphFamily, GraphGenerator};
use coloring_experiment::loader::{format_edge_list, load_coloring, load_edge_list};
use coloring_experiment::results::format_duration;

/// Generate a timestamped output path from the given path.
/// e.g., "results.json" -> "results-20260108-010530.json"
fn timestamped_path(path: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("results");
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("json");
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!("{}-{}.{}", stem, timestamp, ext))
}

#[derive(Parser)]
#[command(name = "coloring-experiment")]
#[command(version)]
#[command(about = "Ant-colony minimum-conflict graph coloring")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where the graph comes from.
#[derive(Args)]
struct GraphSource {
    /// Edge-list file ("u v" per line, "#" comments)
    #[arg(long, conflicts_with = "family")]
    input: Option<PathBuf>,

    /// Generated family, e.g. cycle:10, grid:4x5, random:50:0.1
    #[arg(long)]
    family: Option<GraphFamily>,

    /// Seed for the graph generator
    #[arg(long)]
    graph_seed: Option<u64>,
}

/// Solver settings. Flags override the JSON config file.
#[derive(Args)]
struct SolverArgs {
    /// JSON solver config (missing fields take defaults)
    #[arg(long, env = "COLONY_CONFIG")]
    config: Option<PathBuf>,

    /// Number of colors (default: max degree + 1)
    #[arg(long)]
    colors: Option<usize>,

    /// Probability of moving to the worst neighbor
    #[arg(long)]
    pc: Option<f64>,

    /// Probability of picking the best color
    #[arg(long)]
    pn: Option<f64>,

    /// Maximum sweeps
    #[arg(long)]
    max_iters: Option<usize>,

    /// Wall-clock budget in seconds
    #[arg(long)]
    max_time: Option<f64>,

    /// Use the order-2 local potential
    #[arg(long)]
    order_2: bool,

    /// Solver seed
    #[arg(long)]
    seed: Option<u64>,

    /// Log sweep progress every N sweeps
    #[arg(long, default_value = "1000")]
    report_every: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Color a single graph
    Solve {
        #[command(flatten)]
        source: GraphSource,

        #[command(flatten)]
        solver: SolverArgs,

        /// Number of ants
        #[arg(long)]
        ants: Option<usize>,

        /// Starting coloring ("label color" per line). Implies pre_colored.
        #[arg(long)]
        coloring: Option<PathBuf>,

        /// Write the run result as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run grid experiment
    Grid {
        #[command(flatten)]
        source: GraphSource,

        #[command(flatten)]
        solver: SolverArgs,

        /// Number of trials per configuration
        #[arg(long, default_value = "5")]
        trials: usize,

        /// Ant counts to test (comma-separated)
        #[arg(long, default_value = "1,2,5,10", value_delimiter = ',')]
        ants: Vec<usize>,

        /// Output file for results
        #[arg(long, default_value = "results.json")]
        output: PathBuf,
    },

    /// Generate and print a graph as an edge list
    Generate {
        /// Graph family, e.g. cycle:10, grid:4x5, random:50:0.1
        #[arg(long)]
        family: GraphFamily,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        Commands::Solve {
            source,
            solver,
            ants,
            coloring,
            output,
        } => {
            let (graph, name) = load_graph(&source)?;
            let mut config = runner_config(&solver)?;
            if let Some(ants) = ants {
                config.solver.n_ants = ants;
            }

            let runner = ExperimentRunner::new(config);
            let result = match coloring {
                Some(path) => {
                    let colors = load_coloring(&path, &graph)?;
                    runner.run_from(&graph, &name, 0, colors)?
                }
                None if runner.config().solver.pre_colored => {
                    bail!("pre_colored is set; pass the starting coloring with --coloring")
                }
                None => runner.run(&graph, &name, 0)?,
            };

            println!("\n=== Coloring Result ===");
            println!("Graph: {}", name);
            println!("Nodes: {}, edges: {}", result.config.nodes, result.config.edges);
            println!("Colors: {}", result.config.n_colors);
            println!("Ants: {}", result.config.n_ants);
            println!("Seed: {}", result.config.seed);
            println!("Termination: {}", result.termination.name());
            println!("Sweeps: {}", result.sweeps);
            println!("Elapsed: {}", format_duration(result.elapsed_ms));
            println!("Initial cost: {}", result.initial_cost);
            println!(
                "Final cost: {} ({} conflicting edges)",
                result.final_cost, result.conflicting_edges
            );

            println!("\nColoring:");
            for entry in &result.coloring {
                println!("  {} {}", entry.node, entry.color);
            }

            if let Some(output) = output {
                let json = serde_json::to_string_pretty(&result)?;
                std::fs::write(&output, json)
                    .with_context(|| format!("Writing {}", output.display()))?;
                println!("\nResult saved to: {}", output.display());
            }
        }

        Commands::Grid {
            source,
            solver,
            trials,
            ants,
            output,
        } => {
            if ants.is_empty() {
                bail!("At least one ant count is required");
            }
            let (graph, name) = load_graph(&source)?;
            let config = runner_config(&solver)?;
            if config.solver.pre_colored {
                bail!("Grid runs start from random colorings; unset pre_colored");
            }

            info!(
                graph = %name,
                trials = trials,
                ant_counts = ants.len(),
                "Starting grid experiment"
            );

            let runner = ExperimentRunner::new(config);
            let results = runner.run_grid(&graph, &name, &ants, trials)?;

            let output_path = timestamped_path(&output);
            results.save(&output_path)?;

            println!("\n=== Grid Experiment Complete ===");
            println!("Results saved to: {}", output_path.display());
            println!("\nSummary:");
            let mut keys: Vec<_> = results.summary.keys().collect();
            keys.sort();
            for key in keys {
                let summary = &results.summary[key];
                println!(
                    "  {}: solve_rate={:.1}% [{:.1}, {:.1}], avg_sweeps={:.1}±{:.1}, avg_cost={:.2}",
                    key,
                    summary.solve_rate * 100.0,
                    summary.solve_rate_ci.0 * 100.0,
                    summary.solve_rate_ci.1 * 100.0,
                    summary.avg_sweeps,
                    summary.avg_sweeps_se,
                    summary.avg_final_cost
                );
            }
        }

        Commands::Generate { family, seed } => {
            let mut generator = GraphGenerator::new(GeneratorConfig { family, seed });
            let graph = generator.generate()?;
            println!("{}", format_edge_list(&graph)?);
        }
    }

    Ok(())
}

/// Load the graph named by `source`, with a display name.
fn load_graph(source: &GraphSource) -> Result<(Graph, String)> {
    match (&source.input, source.family) {
        (Some(path), _) => {
            let graph = load_edge_list(path)?;
            let name = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("input")
                .to_string();
            Ok((graph, name))
        }
        (None, Some(family)) => {
            let mut generator = GraphGenerator::new(GeneratorConfig {
                family,
                seed: source.graph_seed,
            });
            Ok((generator.generate()?, family.to_string()))
        }
        (None, None) => bail!("Either --input or --family is required"),
    }
}

/// Build the runner config from an optional JSON file plus flag overrides.
fn runner_config(args: &SolverArgs) -> Result<ExperimentRunnerConfig> {
    let mut solver = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Reading config {}", path.display()))?;
            serde_json::from_str::<SolverConfig>(&json)
                .with_context(|| format!("Parsing config {}", path.display()))?
        }
        None => SolverConfig::default(),
    };

    if args.colors.is_some() {
        solver.n_colors = args.colors;
    }
    if let Some(pc) = args.pc {
        solver.pc = pc;
    }
    if let Some(pn) = args.pn {
        solver.pn = pn;
    }
    if let Some(max_iters) = args.max_iters {
        solver.max_iters = max_iters;
    }
    if let Some(max_time) = args.max_time {
        solver.max_time_secs = max_time;
    }
    if args.order_2 {
        solver.order_2 = true;
    }
    if args.seed.is_some() {
        solver.seed = args.seed;
    }
    solver.validate()?;

    Ok(ExperimentRunnerConfig {
        solver,
        report_every: args.report_every,
    })
}
