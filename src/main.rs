use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::Parser;
use crossterm::queue;
use crossterm::style::{style, Print, PrintStyledContent, Stylize};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

use slider_search::{Board, Move, Report, SearchConfig, Strategy};

/// slider-search: solve an N-tile sliding puzzle and report search statistics.
#[derive(Parser)]
#[command(name = "slider-search", version, about)]
struct Cli {
    /// Search algorithm: dfs, bfs, ida or ast.
    algorithm: Strategy,
    /// Initial board as comma-separated tiles, row-major, 0 marking the blank
    /// (e.g. 1,2,5,3,4,0,6,7,8).
    #[arg(conflicts_with = "scramble")]
    board: Option<Board>,
    /// Start from a solved board scrambled by this many random moves instead.
    #[arg(long)]
    scramble: Option<usize>,
    /// Board side used with --scramble.
    #[arg(long, default_value_t = 3)]
    size: usize,
    /// Seed for --scramble. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Give up after this many node expansions.
    #[arg(long)]
    max_nodes: Option<u64>,
    /// Where the report is written.
    #[arg(long, default_value = "output.txt")]
    output: PathBuf,
    /// Write the report as JSON instead of key: value lines.
    #[arg(long)]
    json: bool,
    /// Print every board along the solution path.
    #[arg(long)]
    replay: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let root = match (cli.board, cli.scramble) {
        (Some(board), _) => board,
        (None, Some(shuffles)) => {
            let mut rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let scrambled = Board::solved(cli.size)?.scramble(shuffles, &mut rng);
            let expected: Vec<&str> = scrambled
                .path()
                .iter()
                .rev()
                .map(|m| m.opposite().label())
                .collect();
            tracing::info!(shuffles, ?expected, "scrambled a solved board");
            scrambled.into_root()
        }
        (None, None) => bail!("either a BOARD or --scramble is required"),
    };

    println!("Initial board:\n{}", root);

    let config = SearchConfig {
        max_nodes: cli.max_nodes,
    };
    let started = Instant::now();
    let stats = cli
        .algorithm
        .run_with(&root, &config)
        .with_context(|| format!("{} search failed", cli.algorithm))?;
    let report = Report::new(stats, started.elapsed(), peak_rss_megabytes());

    let rendered = if cli.json {
        serde_json::to_string_pretty(&report)? + "\n"
    } else {
        report.to_string()
    };
    fs::write(&cli.output, &rendered)
        .with_context(|| format!("failed to write report to {}", cli.output.display()))?;
    tracing::info!(output = %cli.output.display(), "report written");

    println!(
        "Found a solution with {} moves after expanding {} nodes",
        report.stats.cost_of_path, report.stats.nodes_expanded
    );

    if cli.replay {
        replay(&root, &report.stats.path_to_goal)?;
    }
    Ok(())
}

fn replay(root: &Board, moves: &[Move]) -> anyhow::Result<()> {
    let mut out = io::stdout();
    let mut board = root.clone();

    queue_board(&mut out, &board)?;
    for &movement in moves {
        board = board.result(movement)?;
        queue!(out, Print(format!("{movement}\n")))?;
        queue_board(&mut out, &board)?;
    }
    out.flush()?;
    Ok(())
}

/// Writes the board with the blank highlighted.
fn queue_board(out: &mut impl Write, board: &Board) -> io::Result<()> {
    for row in board.tiles().chunks(board.size()) {
        for &tile in row {
            let cell = format!("{:2} ", tile);
            if tile == 0 {
                queue!(out, PrintStyledContent(style(cell).black().on_yellow()))?;
            } else {
                queue!(out, Print(cell))?;
            }
        }
        queue!(out, Print("\n"))?;
    }
    queue!(out, Print("\n"))
}

/// Peak resident set size in megabytes, read from `/proc/self/status`.
fn peak_rss_megabytes() -> Option<f64> {
    let status = fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|l| l.starts_with("VmHWM:"))?;
    let kib: f64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kib / 1024.0)
}
