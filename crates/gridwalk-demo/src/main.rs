//! gridwalk — watch breadth-first and uniform-cost search cross a grid.

mod view;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use gridwalk_core::SystemClock;
use gridwalk_paths::{
    Algorithm, Graph, NoopObserver, Outcome, SearchConfig, SearchEngine, SearchStatus,
};

use view::{TerminalView, render_text};

/// Command-line options.
#[derive(Parser, Debug)]
#[command(name = "gridwalk")]
#[command(about = "Animate a grid search step by step", long_about = None)]
struct Args {
    /// Grid rows.
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(i32).range(1..=10))]
    rows: i32,

    /// Grid columns.
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(i32).range(1..=10))]
    cols: i32,

    /// Run uniform-cost search instead of breadth-first.
    #[arg(short, long)]
    weighted: bool,

    /// Pause between expansions, in milliseconds.
    #[arg(long, default_value_t = 80)]
    delay_ms: u64,

    /// Pause between path-trace steps, in milliseconds.
    #[arg(long, default_value_t = 170)]
    path_delay_ms: u64,

    /// Seed for the cosmetic grid markings.
    #[arg(long)]
    seed: Option<u64>,

    /// Load the grid from an ASCII map (`.` `#` `S` `G` `1`-`9`).
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// Skip tracing the path after the goal is found.
    #[arg(long)]
    no_trace: bool,

    /// Print the final grid as text instead of animating it.
    #[arg(long)]
    headless: bool,
}

fn build_graph(args: &Args) -> Result<Graph, Box<dyn std::error::Error>> {
    if let Some(path) = &args.map {
        let text = std::fs::read_to_string(path)?;
        return Ok(Graph::parse(&text)?);
    }
    let graph = match args.seed {
        Some(seed) => Graph::with_rng(args.rows, args.cols, &mut StdRng::seed_from_u64(seed))?,
        None => Graph::new(args.rows, args.cols)?,
    };
    Ok(graph)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let graph = build_graph(&args)?;
    info!("grid {} with {} real nodes", graph.dims(), graph.real_nodes().count());

    let algorithm = if args.weighted {
        Algorithm::UniformCost
    } else {
        Algorithm::BreadthFirst
    };
    let goal = graph.goal().pos();

    if args.headless {
        let mut engine = SearchEngine::new(&graph, SearchConfig::instant());
        let status = engine.run(algorithm, &mut SystemClock, &mut NoopObserver);
        let path = match status {
            SearchStatus::Completed(Outcome::Found) if !args.no_trace => {
                Some(engine.reconstruct(goal, &mut SystemClock, &mut NoopObserver)?)
            }
            _ => None,
        };
        println!("{}", render_text(&engine));
        report(status, engine.steps(), path.as_ref());
        return Ok(());
    }

    let config = SearchConfig {
        search_delay: Duration::from_millis(args.delay_ms),
        path_delay: Duration::from_millis(args.path_delay_ms),
    };
    let mut engine = SearchEngine::new(&graph, config);
    let mut view = TerminalView::open(io::stdout())?;
    let status = engine.run(algorithm, &mut SystemClock, &mut view);
    let path = match status {
        SearchStatus::Completed(Outcome::Found) if !args.no_trace => {
            Some(engine.reconstruct(goal, &mut SystemClock, &mut view)?)
        }
        _ => None,
    };
    if status != SearchStatus::Cancelled {
        view.wait_for_key()?;
    }
    view.close()?;

    report(status, engine.steps(), path.as_ref());
    Ok(())
}

fn report(status: SearchStatus, steps: usize, path: Option<&gridwalk_paths::Path>) {
    match status {
        SearchStatus::Completed(Outcome::Found) => println!("goal reached after {steps} steps"),
        SearchStatus::Completed(Outcome::NoPath) => println!("no path: frontier exhausted after {steps} steps"),
        SearchStatus::Cancelled => println!("cancelled after {steps} steps"),
        other => println!("search ended in state {other:?}"),
    }
    if let Some(path) = path {
        let route: Vec<String> = path.positions().iter().map(|p| p.to_string()).collect();
        println!("path ({} nodes, cost {}): {}", path.len(), path.cost(), route.join(" -> "));
    }
}
