//! Integration tests for the experiment harness.
//!
//! Tests the full flow of:
//! - Generated graph -> edge-list text -> loaded graph
//! - Loaded graph -> grid run -> JSON results on disk
//! - Edge list + coloring file -> solve from that coloring
//! - Solver config loaded from partial JSON

use colony_kernel::{SolverConfig, Termination};

use coloring_experiment::experiment::{ExperimentRunner, ExperimentRunnerConfig};
use coloring_experiment::generator::{GeneratorConfig, GraphFamily, GraphGenerator};
use coloring_experiment::loader::{format_edge_list, load_coloring, load_edge_list};
use coloring_experiment::results::GridResults;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("coloring_experiment_{}_{}", std::process::id(), name))
}

#[test]
fn test_generated_grid_graph_solves_from_file() {
    let family: GraphFamily = "grid:3x4".parse().unwrap();
    let graph = GraphGenerator::new(GeneratorConfig {
        family,
        seed: Some(1),
    })
    .generate()
    .unwrap();

    let edge_file = temp_path("grid.txt");
    std::fs::write(&edge_file, format_edge_list(&graph).unwrap()).unwrap();
    let loaded = load_edge_list(&edge_file).unwrap();
    let _ = std::fs::remove_file(&edge_file);

    assert_eq!(loaded.node_count(), 12);
    assert_eq!(loaded.edge_count(), 17);

    let runner = ExperimentRunner::new(ExperimentRunnerConfig {
        solver: SolverConfig {
            n_colors: Some(3),
            n_ants: 3,
            max_iters: 20_000,
            seed: Some(2),
            ..Default::default()
        },
        report_every: 100,
    });
    let result = runner.run(&loaded, &family.to_string(), 0).unwrap();

    assert_eq!(result.termination, Termination::Converged);
    assert_eq!(result.config.graph, "grid:3x4");
    assert!(result.cost_history.windows(2).all(|w| w[1] <= w[0]));
    for (u, v) in loaded.edges() {
        assert_ne!(result.coloring[u].color, result.coloring[v].color);
        assert_eq!(result.coloring[u].node, loaded.label(u));
    }
}

#[test]
fn test_grid_results_persist() {
    let graph = GraphGenerator::new(GeneratorConfig {
        family: GraphFamily::Cycle { n: 7 },
        seed: None,
    })
    .generate()
    .unwrap();

    let runner = ExperimentRunner::new(ExperimentRunnerConfig {
        solver: SolverConfig {
            n_colors: Some(2),
            max_iters: 40,
            seed: Some(3),
            ..Default::default()
        },
        report_every: 10,
    });
    let results = runner.run_grid(&graph, "cycle:7", &[2, 4], 3).unwrap();

    // Two colors never suffice for an odd cycle.
    for summary in results.summary.values() {
        assert_eq!(summary.trials, 3);
        assert_eq!(summary.solve_rate, 0.0);
        assert_eq!(summary.min_sweeps, 40);
        assert_eq!(summary.max_sweeps, 40);
    }

    let path = temp_path("grid.json");
    results.save(&path).unwrap();
    let loaded = GridResults::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.results.len(), 6);
    assert_eq!(loaded.summary.len(), 2);
    assert!(loaded
        .results
        .iter()
        .all(|r| r.termination == Termination::IterLimit));
}

#[test]
fn test_solver_config_from_json_file() {
    let path = temp_path("config.json");
    std::fs::write(&path, r#"{ "n_ants": 3, "pc": 0.6, "max_iters": 50 }"#).unwrap();
    let json = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let config: SolverConfig = serde_json::from_str(&json).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.n_ants, 3);
    assert_eq!(config.pc, 0.6);
    assert_eq!(config.pn, 0.8);
    assert_eq!(config.max_iters, 50);
}

#[test]
fn test_solve_from_coloring_file() {
    let edge_file = temp_path("square.txt");
    let coloring_file = temp_path("square-colors.txt");
    std::fs::write(&edge_file, "nw ne\nne se\nse sw\nsw nw\n").unwrap();
    std::fs::write(&coloring_file, "# two conflicts\nnw 0\nne 0\nse 1\nsw 1\n").unwrap();

    let graph = load_edge_list(&edge_file).unwrap();
    let colors = load_coloring(&coloring_file, &graph).unwrap();
    let _ = std::fs::remove_file(&edge_file);
    let _ = std::fs::remove_file(&coloring_file);

    let runner = ExperimentRunner::new(ExperimentRunnerConfig {
        solver: SolverConfig {
            n_colors: Some(2),
            n_ants: 2,
            max_iters: 10_000,
            seed: Some(4),
            ..Default::default()
        },
        report_every: 100,
    });

    // The plain entry point refuses a config that expects a given coloring.
    let pre_colored = ExperimentRunner::new(ExperimentRunnerConfig {
        solver: SolverConfig {
            pre_colored: true,
            ..runner.config().solver.clone()
        },
        report_every: 100,
    });
    assert!(pre_colored.run(&graph, "square", 0).is_err());

    let result = runner.run_from(&graph, "square", 0, colors).unwrap();

    assert_eq!(result.initial_cost, 4);
    assert_eq!(result.termination, Termination::Converged);
    for (u, v) in graph.edges() {
        assert_ne!(result.coloring[u].color, result.coloring[v].color);
    }
}
