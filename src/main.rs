#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use cli_table::{format::Justify, Cell, Style, Table};
use strum::IntoEnumIterator;

use queens::board::{print_board, Placement};
use queens::config::{BacktrackingConfig, SearchConfig};
use queens::solver::{Backtracking, SolveStatus, Solver, StrategyKind};

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

const CASES: [[i8; 8]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7],
    [7, 6, 5, 4, 3, 2, 1, 0],
    [0, 0, 0, 0, 0, 0, 0, 0],
    [0, 2, 4, 6, 0, 2, 4, 6],
    [1, 3, 1, 3, 1, 3, 1, 3],
    [0, 2, 2, 5, 5, 7, 7, 1],
    [4, 4, 2, 2, 0, 0, 6, 6],
    [0, 3, 1, 4, 2, 5, 3, 6],
    [1, 1, 1, 1, 2, 2, 2, 2],
    [0, 1, 0, 1, 0, 1, 0, 1],
];

// complete placements whose validity is only checked, not searched
const CHECK_CASES: [[i8; 8]; 10] = [
    [0, 4, 7, 5, 2, 6, 1, 3],
    [0, 1, 2, 3, 4, 5, 6, 7],
    [1, 3, 5, 7, 2, 0, 6, 4],
    [2, 4, 6, 0, 3, 1, 7, 5],
    [0, 2, 4, 1, 7, 5, 3, 6],
    [3, 1, 6, 2, 5, 7, 0, 4],
    [4, 6, 0, 2, 7, 5, 3, 1],
    [5, 3, 0, 4, 7, 1, 6, 2],
    [0, 2, 4, 6, 1, 3, 5, 7],
    [1, 5, 0, 6, 3, 7, 2, 4],
];

#[derive(Parser)]
struct Cli {
    /// Run a single strategy instead of all of them.
    #[arg(short, long)]
    strategy: Option<StrategyKind>,

    /// Seed for the stochastic strategies, each case uses `seed + case index`.
    #[arg(long)]
    seed: Option<u64>,

    /// Also count every solution of the empty board.
    #[arg(long)]
    all_solutions: bool,

    /// Only check the validity of the reference placements, without searching.
    #[arg(long)]
    check: bool,

    /// Don't print boards.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Default)]
struct Summary {
    wins: usize,
    losses: usize,
    moves: usize,
    elapsed: Duration,
}

impl Summary {
    const fn runs(&self) -> usize {
        self.wins + self.losses
    }

    #[allow(clippy::cast_precision_loss)]
    fn average_moves(&self) -> f64 {
        self.moves as f64 / self.runs().max(1) as f64
    }

    #[allow(clippy::cast_precision_loss)]
    fn solved_percentage(&self) -> f64 {
        100.0 * self.wins as f64 / self.runs().max(1) as f64
    }

    #[allow(clippy::cast_possible_truncation)]
    fn average_elapsed(&self) -> Duration {
        self.elapsed / self.runs().max(1) as u32
    }
}

fn run_strategy(kind: StrategyKind, config: &SearchConfig, cli: &Cli) -> Result<Summary> {
    let mut summary = Summary::default();

    for (index, columns) in CASES.iter().enumerate() {
        let placement = Placement::from_columns(columns)?;
        if !cli.quiet {
            println!("{kind} :: case {index} :: initial {placement}");
            print_board(&placement)?;
        }

        let mut solver = match cli.seed {
            Some(seed) => Solver::with_seed(placement, kind, config, seed.wrapping_add(index as u64)),
            None => Solver::new(placement, kind, config),
        };

        let now = Instant::now();
        let status = solver.solve();
        let elapsed = now.elapsed();

        let won = status == SolveStatus::Solved && solver.placement.is_solved();
        let outcome = if won { "WIN" } else { "LOSE" };
        println!(
            "{kind} :: case {index} :: {outcome} :: {status:?} :: {} :: {} moves :: in {elapsed:?}",
            solver.placement,
            solver.placement.move_count()
        );
        if !cli.quiet {
            print_board(&solver.placement)?;
        }

        #[cfg(feature = "visualize")]
        queens::visualize::visualize_trace(&solver.placement.trace, format!("{kind}_{index}.dot"))?;

        if won {
            summary.wins += 1;
        } else {
            summary.losses += 1;
        }
        summary.moves += solver.placement.move_count();
        summary.elapsed += elapsed;
    }

    log::info!("{kind} :: solved {} of {} cases", summary.wins, summary.runs());
    Ok(summary)
}

fn check_outcomes() -> Result<Vec<(Placement, bool)>> {
    CHECK_CASES
        .iter()
        .map(|columns| -> Result<(Placement, bool)> {
            let placement = Placement::from_columns(columns)?;
            let valid = placement.is_valid();
            Ok((placement, valid))
        })
        .collect()
}

fn run_check(quiet: bool) -> Result<()> {
    let outcomes = check_outcomes()?;
    for (index, (placement, valid)) in outcomes.iter().enumerate() {
        let outcome = if *valid { "WIN" } else { "LOSE" };
        println!("check :: case {index} :: {placement} :: {outcome}");
        if !quiet {
            print_board(placement)?;
        }
    }

    let valid = outcomes.iter().filter(|(_, valid)| *valid).count();
    log::info!("check :: {valid} of {} placements are valid", outcomes.len());
    Ok(())
}

fn print_summary(summaries: &[(StrategyKind, Summary)]) -> Result<()> {
    let rows = summaries
        .iter()
        .map(|(kind, summary)| {
            vec![
                kind.cell(),
                summary.wins.cell().justify(Justify::Right),
                summary.losses.cell().justify(Justify::Right),
                summary.moves.cell().justify(Justify::Right),
                format!("{:.1}", summary.average_moves()).cell().justify(Justify::Right),
                format!("{:?}", summary.elapsed).cell().justify(Justify::Right),
                format!("{:?}", summary.average_elapsed()).cell().justify(Justify::Right),
                format!("{:.0}%", summary.solved_percentage()).cell().justify(Justify::Right),
            ]
        })
        .collect::<Vec<_>>();

    let table = rows
        .table()
        .title(vec![
            "strategy".cell().bold(true),
            "wins".cell().bold(true),
            "losses".cell().bold(true),
            "moves".cell().bold(true),
            "avg moves".cell().bold(true),
            "time".cell().bold(true),
            "avg time".cell().bold(true),
            "solved".cell().bold(true),
        ])
        .display()?;
    println!("\n{table}\n");
    Ok(())
}

fn main() -> Result<()> {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();
    let cli = Cli::parse();
    let config = SearchConfig::default();

    if cli.check {
        return run_check(cli.quiet);
    }

    if cli.all_solutions {
        let solutions = Backtracking::new(BacktrackingConfig { solution_limit: None }).find_solutions(&mut Placement::new());
        println!("backtracking :: {} solutions on the empty board", solutions.len());
    }

    let kinds = cli.strategy.map_or_else(|| StrategyKind::iter().collect(), |kind| vec![kind]);

    let now = Instant::now();
    let summaries = kinds
        .into_iter()
        .map(|kind| run_strategy(kind, &config, &cli).map(|summary| (kind, summary)))
        .collect::<Result<Vec<_>>>()?;
    println!("took :: {:?}", now.elapsed());

    print_summary(&summaries)?;

    #[cfg(feature = "dhat-heap")]
    {
        let stats = dhat::HeapStats::get();
        println!("heap :: {} blocks, {} bytes at peak, {} bytes total", stats.max_blocks, stats.max_bytes, stats.total_bytes);
    }

    Ok(())
}
