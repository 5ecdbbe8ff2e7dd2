use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use tsp_bnb::benchstat;
use tsp_bnb::generate::{DEFAULT_MAX_WEIGHT, GeneratorConfig, generate};
use tsp_bnb::graph::{Graph, Weight};
use tsp_bnb::search::{Algorithm, ParallelConfig, Path, SearchStatistics, searcher};

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "tsp")]
#[command(about = "tsp - shortest Hamiltonian cycle by parallel branch-and-bound")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// CLI algorithm selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliAlgorithm {
    /// Single-threaded depth-first reference search
    Sequential,
    /// Shared fan-out queue plus one depth-first worker per thread
    Parallel,
}

impl From<CliAlgorithm> for Algorithm {
    fn from(cli: CliAlgorithm) -> Self {
        match cli {
            CliAlgorithm::Sequential => Algorithm::Sequential,
            CliAlgorithm::Parallel => Algorithm::Parallel,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Find the shortest cycle visiting every node of a graph file
    Solve {
        /// Path to the graph file
        graph: PathBuf,
        /// Search algorithm to use
        #[arg(long, value_enum, default_value = "parallel")]
        algorithm: CliAlgorithm,
        /// Number of worker threads (defaults to the number of CPUs)
        #[arg(long, short = 'j')]
        cores: Option<usize>,
        /// Print search statistics
        #[arg(long, short)]
        verbose: bool,
    },
    /// Generate a random graph file
    Generate {
        /// Number of nodes
        nodes: usize,
        /// Percentage of off-diagonal matrix entries that get an edge
        fraction: u32,
        /// Largest edge weight
        #[arg(long, default_value_t = DEFAULT_MAX_WEIGHT)]
        max_weight: Weight,
        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Aggregate a semicolon-separated benchmark CSV into speedup figures
    Benchstat {
        /// Path to the benchmark CSV file
        csv: PathBuf,
    },
}

fn init_logging() {
    let env = env_logger::Env::new()
        .filter("TSP_LOG")
        .write_style("TSP_LOG_STYLE");
    env_logger::init_from_env(env);
}

// --- Solving ---

fn solve_graph_file(
    path: &PathBuf,
    algorithm: Algorithm,
    cores: Option<usize>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let graph = Graph::from_file(path)?;
    let parallel_config = ParallelConfig::default().with_workers_option(cores);

    if verbose {
        println!("Graph: {} ({} nodes)", path.display(), graph.node_count());
        println!("Algorithm: {}", algorithm);
        if algorithm == Algorithm::Parallel {
            println!("Workers: {}", parallel_config.num_workers);
        }
    }

    let mut search = searcher(algorithm, parallel_config);
    let result = search.search(&graph);

    print_winner(result.best.as_ref());
    if verbose {
        print_search_statistics(&result.statistics);
    }
    Ok(())
}

fn print_winner(winner: Option<&Path>) {
    match winner {
        None => println!("There is no cyclic path"),
        Some(winner) => {
            let mut route = winner
                .nodes()
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>();
            if let Some(start) = winner.start() {
                route.push(start.to_string());
            }
            println!(
                "The shortest path has length {} with the path {}",
                winner.len(),
                route.join("->")
            );
        }
    }
}

/// Print search statistics
fn print_search_statistics(stats: &SearchStatistics) {
    println!("\nSearch Statistics:");
    for line in stats.format_summary().lines() {
        println!("  {}", line);
    }
}

// --- Generation ---

fn generate_graph(
    config: &GeneratorConfig,
    output: Option<&PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let graph = generate(config)?;
    match output {
        Some(path) => graph.write_to(BufWriter::new(File::create(path)?))?,
        None => graph.write_to(io::stdout().lock())?,
    }
    Ok(())
}

// --- Main Function ---
fn main() {
    init_logging();
    let args = Args::parse();

    let outcome = match args.command {
        Commands::Solve {
            graph,
            algorithm,
            cores,
            verbose,
        } => solve_graph_file(&graph, algorithm.into(), cores, verbose)
            .map_err(|e| format!("Error solving {}: {}", graph.display(), e)),
        Commands::Generate {
            nodes,
            fraction,
            max_weight,
            seed,
            output,
        } => {
            let config = GeneratorConfig::new(nodes, fraction)
                .with_max_weight(max_weight)
                .with_seed_option(seed);
            generate_graph(&config, output.as_ref())
                .map_err(|e| format!("Error generating graph: {}", e))
        }
        Commands::Benchstat { csv } => match benchstat::aggregate_file(&csv) {
            Ok(report) => {
                print!("{}", report);
                Ok(())
            }
            Err(e) => Err(format!("Error aggregating {}: {}", csv.display(), e)),
        },
    };

    if let Err(message) = outcome {
        eprintln!("{}", message);
        std::process::exit(1);
    }
}
