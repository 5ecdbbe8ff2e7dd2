use std::path::PathBuf;

use tsp_bnb::generate::{GeneratorConfig, generate};
use tsp_bnb::graph::{Graph, Weight};
use tsp_bnb::search::TourSearch;
use tsp_bnb::search::{
    Algorithm, ParallelConfig, Path, SequentialSearch, run_parallel_search, searcher, solve,
};

fn graph_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("graphs")
        .join(name)
}

fn load(name: &str) -> Graph {
    Graph::from_file(graph_file(name)).expect("fixture graph should load")
}

/// Exhaustive permutation search, used as the oracle for small graphs.
fn brute_force_length(graph: &Graph) -> Option<Weight> {
    fn visit(
        graph: &Graph,
        current: usize,
        visited: &mut Vec<bool>,
        depth: usize,
        length: Weight,
        best: &mut Option<Weight>,
    ) {
        let n = graph.node_count();
        if depth == n {
            if graph.has_edge(current, 0) {
                let total = length + graph.weight(current, 0);
                if best.map_or(true, |b| total < b) {
                    *best = Some(total);
                }
            }
            return;
        }
        for next in 0..n {
            if !visited[next] && graph.has_edge(current, next) {
                visited[next] = true;
                visit(
                    graph,
                    next,
                    visited,
                    depth + 1,
                    length + graph.weight(current, next),
                    best,
                );
                visited[next] = false;
            }
        }
    }

    let mut visited = vec![false; graph.node_count()];
    visited[0] = true;
    let mut best = None;
    visit(graph, 0, &mut visited, 1, 0, &mut best);
    best
}

/// Sum the edges of a closed cycle reported by the search.
fn cycle_length(graph: &Graph, path: &Path) -> Weight {
    let nodes = path.nodes();
    let mut total = 0;
    for i in 0..nodes.len() {
        let from = nodes[i];
        let to = nodes[(i + 1) % nodes.len()];
        assert!(graph.has_edge(from, to), "missing edge {}->{}", from, to);
        total += graph.weight(from, to);
    }
    total
}

#[test]
fn test_solve_fixture_graph() {
    let graph = load("01-four-nodes.graph");
    let best = solve(&graph).expect("fixture has a cycle");

    assert_eq!(best.len(), 15);
    assert_eq!(best.nodes(), &[0, 3, 1, 2]);
    assert!(best.is_complete());
    assert_eq!(cycle_length(&graph, &best), 15);
}

#[test]
fn test_solve_two_node_graph() {
    let graph = load("03-two-nodes.graph");
    let best = solve(&graph).expect("two nodes with both edges form a cycle");
    assert_eq!(best.len(), 10);
    assert_eq!(best.nodes(), &[0, 1]);
}

#[test]
fn test_no_cycle_graph() {
    let graph = load("02-no-cycle.graph");
    assert!(solve(&graph).is_none());
    assert!(SequentialSearch::new().search(&graph).best.is_none());
}

#[test]
fn test_searches_agree_with_brute_force() {
    for (seed, nodes, fraction) in [(1, 5, 60), (2, 6, 70), (3, 7, 50), (4, 7, 90), (5, 6, 30)] {
        let config = GeneratorConfig::new(nodes, fraction)
            .with_max_weight(20)
            .with_seed(seed);
        let graph = generate(&config).unwrap();
        let expected = brute_force_length(&graph);

        let sequential = SequentialSearch::new().search(&graph);
        let parallel = run_parallel_search(&graph, &ParallelConfig::default().with_workers(3));

        assert_eq!(
            sequential.best_length(),
            expected,
            "sequential disagrees on seed {}",
            seed
        );
        assert_eq!(
            parallel.best.as_ref().map(Path::len),
            expected,
            "parallel disagrees on seed {}",
            seed
        );
        if let Some(best) = &parallel.best {
            assert_eq!(cycle_length(&graph, best), best.len());
            assert_eq!(best.start(), Some(0));
        }
    }
}

#[test]
fn test_worker_counts_agree() {
    let config = GeneratorConfig::new(9, 60).with_max_weight(50).with_seed(11);
    let graph = generate(&config).unwrap();
    let reference = SequentialSearch::new().search(&graph).best_length();

    for workers in [1, 2, 4, num_cpus::get()] {
        let result = run_parallel_search(&graph, &ParallelConfig::default().with_workers(workers));
        assert_eq!(
            result.best.as_ref().map(Path::len),
            reference,
            "{} workers",
            workers
        );
        assert_eq!(result.worker_statistics.len(), workers);
    }
}

#[test]
fn test_improvements_strictly_decrease() {
    let config = GeneratorConfig::new(9, 100).with_max_weight(100).with_seed(23);
    let graph = generate(&config).unwrap();
    let result = run_parallel_search(&graph, &ParallelConfig::default().with_workers(4));

    let lengths: Vec<Weight> = result.improvements.iter().map(|i| i.length).collect();
    assert!(!lengths.is_empty());
    assert!(lengths.windows(2).all(|w| w[1] < w[0]), "{:?}", lengths);
    assert_eq!(lengths.last().copied(), result.best.as_ref().map(Path::len));
    assert_eq!(
        result.total_statistics.improvements_found,
        lengths.len() as u64
    );
}

#[test]
fn test_searcher_front_end() {
    let graph = load("01-four-nodes.graph");
    for algorithm in [Algorithm::Sequential, Algorithm::Parallel] {
        let mut search = searcher(algorithm, ParallelConfig::default().with_workers(2));
        let result = search.search(&graph);
        assert_eq!(result.best_length(), Some(15));
        assert_eq!(search.statistics().algorithm, algorithm);
    }
}

#[test]
fn test_extend_retract_round_trip() {
    let graph = load("01-four-nodes.graph");
    let mut path = Path::starting_at(4, 0);
    let snapshots = {
        let mut snapshots = vec![path.clone()];
        for node in [3, 1, 2, 0] {
            assert!(path.can_extend(&graph, node));
            path.extend(&graph, node);
            snapshots.push(path.clone());
        }
        snapshots
    };
    assert_eq!(path.len(), 15);
    assert!(path.is_complete());

    for expected in snapshots.iter().rev().skip(1) {
        path.retract(&graph);
        assert_eq!(&path, expected);
    }
}
