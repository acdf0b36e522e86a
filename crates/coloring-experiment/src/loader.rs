//! Edge-list ingestion and export.
//!
//! Format: one edge per line as two whitespace-separated node labels.
//! A line with a single label declares an isolated node. Blank lines and
//! lines starting with `#` are ignored. Labels are non-empty, contain no
//! whitespace and do not start with `#`.

use std::path::Path;

use anyhow::{Context, Result, bail};
use colony_kernel::{Color, Graph, GraphBuilder};

/// Parse an edge list into a graph. Labels get dense ids in order of
/// first appearance.
pub fn parse_edge_list(text: &str) -> Result<Graph> {
    let mut builder = GraphBuilder::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if let Some(label) = parts.iter().find(|label| label.starts_with('#')) {
            bail!("Line {}: label '{}' starts with '#'", line_no, label);
        }
        match parts.as_slice() {
            [node] => {
                builder.add_node(*node);
            }
            [a, b] => builder
                .add_edge(*a, *b)
                .with_context(|| format!("Line {}", line_no))?,
            _ => bail!(
                "Line {}: expected 1 or 2 labels, got {}",
                line_no,
                parts.len()
            ),
        }
    }

    Ok(builder.build()?)
}

/// Read and parse an edge-list file.
pub fn load_edge_list(path: impl AsRef<Path>) -> Result<Graph> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Reading edge list {}", path.display()))?;
    parse_edge_list(&text).with_context(|| format!("Parsing edge list {}", path.display()))
}

/// Parse a starting coloring for `graph`: one `label color` pair per line.
/// Every node must be colored exactly once.
pub fn parse_coloring(text: &str, graph: &Graph) -> Result<Vec<Color>> {
    let mut colors: Vec<Option<Color>> = vec![None; graph.node_count()];

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let [label, color] = parts.as_slice() else {
            bail!("Line {}: expected 'label color', got {} fields", line_no, parts.len());
        };
        let node = graph
            .node_id(label)
            .with_context(|| format!("Line {}: unknown node '{}'", line_no, label))?;
        let color: Color = color
            .parse()
            .with_context(|| format!("Line {}: invalid color '{}'", line_no, color))?;
        if colors[node].replace(color).is_some() {
            bail!("Line {}: node '{}' colored twice", line_no, label);
        }
    }

    colors
        .into_iter()
        .enumerate()
        .map(|(node, color)| {
            color.with_context(|| format!("Node '{}' has no color", graph.label(node)))
        })
        .collect()
}

/// Read and parse a coloring file for `graph`.
pub fn load_coloring(path: impl AsRef<Path>, graph: &Graph) -> Result<Vec<Color>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Reading coloring {}", path.display()))?;
    parse_coloring(&text, graph).with_context(|| format!("Parsing coloring {}", path.display()))
}

fn check_label(label: &str) -> Result<()> {
    if label.is_empty() || label.starts_with('#') || label.chars().any(char::is_whitespace) {
        bail!("Label '{}' cannot be written to an edge list", label);
    }
    Ok(())
}

/// Format a graph as an edge list, isolated nodes on their own line.
///
/// Fails if a label could not be read back by [`parse_edge_list`].
pub fn format_edge_list(graph: &Graph) -> Result<String> {
    for node in 0..graph.node_count() {
        check_label(graph.label(node))?;
    }

    let mut lines = vec![format!(
        "# {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    )];
    lines.extend(
        graph
            .edges()
            .map(|(u, v)| format!("{} {}", graph.label(u), graph.label(v))),
    );
    lines.extend(graph.isolated_nodes().map(|n| graph.label(n).to_string()));
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edge_list() {
        let text = "\
# hexagonal cells
A B
B C

C A
D
";
        let graph = parse_edge_list(text).unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.node_id("C"), Some(2));
        assert_eq!(graph.degree(3), 0);
    }

    #[test]
    fn test_parse_reports_line_number() {
        let err = parse_edge_list("a b\nb c d\n").unwrap_err();
        assert!(err.to_string().contains("Line 2"), "{}", err);

        let err = parse_edge_list("a b\n\nc c\n").unwrap_err();
        assert!(format!("{:#}", err).contains("Line 3"), "{:#}", err);
    }

    #[test]
    fn test_empty_list_is_an_error() {
        assert!(parse_edge_list("# nothing here\n").is_err());
    }

    #[test]
    fn test_format_then_parse_preserves_structure() {
        let original = parse_edge_list("x y\ny z\nw\n").unwrap();
        let reparsed = parse_edge_list(&format_edge_list(&original).unwrap()).unwrap();

        assert_eq!(reparsed.node_count(), 4);
        assert_eq!(reparsed.edge_count(), 2);
        assert!(reparsed.node_id("w").is_some());
    }

    #[test]
    fn test_unwritable_labels_are_rejected() {
        for (a, b) in [("north pole", "south"), ("#tag", "plain"), ("plain", "")] {
            let mut builder = GraphBuilder::new();
            builder.add_edge(a, b).unwrap();
            let graph = builder.build().unwrap();
            assert!(format_edge_list(&graph).is_err(), "wrote {:?}", (a, b));
        }

        let mut builder = GraphBuilder::new();
        builder.add_node("#hidden");
        assert!(format_edge_list(&builder.build().unwrap()).is_err());
    }

    #[test]
    fn test_parse_rejects_hash_label_mid_line() {
        let err = parse_edge_list("a b\nc #d\n").unwrap_err();
        assert!(err.to_string().contains("Line 2"), "{}", err);
    }

    #[test]
    fn test_parse_coloring_maps_labels() {
        let graph = parse_edge_list("red-hill blue-lake\nblue-lake green-wood\n").unwrap();
        let colors = parse_coloring(
            "# start\ngreen-wood 2\nred-hill 0\n\nblue-lake 1\n",
            &graph,
        )
        .unwrap();

        assert_eq!(colors, vec![0, 1, 2]);
    }

    #[test]
    fn test_parse_coloring_rejects_bad_input() {
        let graph = parse_edge_list("a b\nb c\n").unwrap();

        let err = parse_coloring("a 0\nb 1\n", &graph).unwrap_err();
        assert!(err.to_string().contains("'c'"), "{}", err);

        let err = parse_coloring("a 0\nb 1\nz 0\n", &graph).unwrap_err();
        assert!(err.to_string().contains("Line 3"), "{}", err);

        let err = parse_coloring("a 0\na 1\nb 0\nc 1\n", &graph).unwrap_err();
        assert!(err.to_string().contains("twice"), "{}", err);

        assert!(parse_coloring("a 0\nb red\nc 1\n", &graph).is_err());
        assert!(parse_coloring("a 0 1\nb 0\nc 1\n", &graph).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("coloring_experiment_loader_test.txt");
        std::fs::write(&path, "1 2\n2 3\n3 4\n4 1\n").unwrap();

        let graph = load_edge_list(&path).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);

        let _ = std::fs::remove_file(&path);
        assert!(load_edge_list(&path).is_err());
    }
}
