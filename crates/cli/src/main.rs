use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, ArgGroup, Parser};
use nodedeps_core::{parser, queries, render, Direction, Graph, Query};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// nodedeps - Extract dependency subgraph for a specific node from Mermaid graph
#[derive(Parser, Debug)]
#[command(name = "nodedeps")]
#[command(version)] // Auto-pull version from Cargo.toml
#[command(about = "Extract dependency subgraph for a specific node from Mermaid graph", long_about = None)]
#[command(group(ArgGroup::new("direction").required(true).args(["up", "down"])))]
struct Cli {
    /// Mermaid dependency graph file path; use '-' or omit to read from stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Node name to query (crate name)
    #[arg(short, long)]
    node: String,

    /// Upward dependencies (nodes that depend on this node)
    #[arg(short, long)]
    up: bool,

    /// Downward dependencies (nodes that this node depends on)
    #[arg(short, long)]
    down: bool,

    /// Output file path; print to screen if not provided
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum traversal depth; unlimited if not provided
    #[arg(short = 'l', long, visible_alias = "depth")]
    max_level: Option<usize>,

    /// Render the subgraph as JSON instead of Mermaid
    #[arg(long)]
    json: bool,

    /// Verbose logging to stderr (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn direction(&self) -> Direction {
        if self.up {
            Direction::Upstream
        } else {
            Direction::Downstream
        }
    }

    fn query(&self) -> Query {
        Query {
            name: self.node.clone(),
            direction: self.direction(),
            max_depth: self.max_level,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            for cause in e.chain().skip(1) {
                eprintln!("  caused by: {cause}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Set up stderr logging; `RUST_LOG` takes precedence over `-v`
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let graph = read_graph(cli.input.as_deref())?;

    // Resolve before touching the output so a missing node writes nothing
    let subgraph = queries::extract_subgraph(&graph, &cli.query())?;

    let rendered = if cli.json {
        render::to_json(&graph, &subgraph)?
    } else {
        render::to_mermaid(&graph, &subgraph.edges)
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = rendered.len(), "wrote subgraph");
            println!("Node dependency graph saved to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write to stdout")?;
        }
    }

    Ok(())
}

/// Read the input graph from a file, or from stdin for `None` and `-`
fn read_graph(input: Option<&Path>) -> anyhow::Result<Graph> {
    match input {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            parser::parse_reader(BufReader::new(file))
                .with_context(|| format!("failed to read {}", path.display()))
        }
        _ => parser::parse_reader(io::stdin().lock()).context("failed to read stdin"),
    }
}
