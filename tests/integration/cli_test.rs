use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tsp"))
}

fn fixture(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

fn run(args: &[&str]) -> Output {
    Command::new(get_binary_path())
        .args(args)
        .output()
        .expect("Failed to execute tsp")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "Command failed with status: {:?}\nstderr: {}\nstdout: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr),
            String::from_utf8_lossy(&output.stdout)
        );
    }
}

#[test]
fn test_solve_prints_shortest_cycle() {
    let graph = fixture("graphs/01-four-nodes.graph");
    let output = run(&["solve", graph.to_str().unwrap()]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        "The shortest path has length 15 with the path 0->3->1->2->0"
    );
}

#[test]
fn test_solve_sequential_with_statistics() {
    let graph = fixture("graphs/01-four-nodes.graph");
    let output = run(&[
        "solve",
        graph.to_str().unwrap(),
        "--algorithm",
        "sequential",
        "--verbose",
    ]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("The shortest path has length 15 with the path 0->3->1->2->0"),
        "Should report the optimal cycle, got: {}",
        stdout
    );
    assert!(
        stdout.contains("Search Statistics"),
        "Verbose mode should print statistics"
    );
}

#[test]
fn test_solve_with_explicit_worker_count() {
    let graph = fixture("graphs/01-four-nodes.graph");
    let output = run(&["solve", graph.to_str().unwrap(), "-j", "3", "-v"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Workers: 3"));
    assert!(stdout.contains("length 15"));
}

#[test]
fn test_solve_graph_without_cycle() {
    let graph = fixture("graphs/02-no-cycle.graph");
    let output = run(&["solve", graph.to_str().unwrap()]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "There is no cyclic path");
}

#[test]
fn test_solve_missing_file_fails() {
    let output = run(&["solve", "graphs/does-not-exist.graph"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error solving"),
        "Should explain the failure, got: {}",
        stderr
    );
}

#[test]
fn test_generate_to_stdout_is_reproducible() {
    let first = run(&["generate", "6", "50", "--seed", "9"]);
    let second = run(&["generate", "6", "50", "--seed", "9"]);
    assert_success(&first);
    assert_eq!(first.stdout, second.stdout);

    let text = String::from_utf8_lossy(&first.stdout);
    let graph = tsp_bnb::graph::Graph::parse(&text).expect("generated graph should parse");
    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edge_count(), 15);
}

#[test]
fn test_generate_to_file_then_solve() {
    let output_path = std::env::temp_dir().join(format!("tsp-cli-test-{}.graph", std::process::id()));
    let output = run(&[
        "generate",
        "7",
        "100",
        "--max-weight",
        "9",
        "--seed",
        "5",
        "-o",
        output_path.to_str().unwrap(),
    ]);
    if !output.status.success() {
        let _ = fs::remove_file(&output_path);
    }
    assert_success(&output);

    let solved = run(&["solve", output_path.to_str().unwrap()]);
    let _ = fs::remove_file(&output_path);
    assert_success(&solved);

    // A complete graph always has a cycle.
    let stdout = String::from_utf8_lossy(&solved.stdout);
    assert!(stdout.starts_with("The shortest path has length"));
    assert!(stdout.trim_end().ends_with("->0"));
}

#[test]
fn test_generate_rejects_bad_fraction() {
    let output = run(&["generate", "5", "150"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Fraction must be a percentage"));
}

#[test]
fn test_benchstat_report() {
    let csv = fixture("benchmarks/sample.csv");
    let output = run(&["benchstat", csv.to_str().unwrap()]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("File;Program;Number of CPUs"));
    assert_eq!(
        lines[1],
        "graphs/01-four-nodes.graph;sequential;1;10.0000000;99.0000000;50.0000000;1.0000000;1.0000000"
    );
    assert_eq!(
        lines[2],
        "graphs/01-four-nodes.graph;parallel;4;2.5000000;380.0000000;80.0000000;4.0000000;1.0000000"
    );
}

#[test]
fn test_requires_subcommand() {
    let output = run(&[]);
    assert!(
        !output.status.success(),
        "Command should fail without a subcommand"
    );
}
