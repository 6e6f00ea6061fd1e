//! depot — id allocation and warehouse siting from the command line.
//!
//! Usage:
//!     depot ids --capacity 1000 --ops 10000 --seed 7
//!     depot site --scenario yard.json --target depot --depot 2,2

mod churn;
mod scenario;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use depot_geom::Point;
use depot_ids::{AllocatorConfig, IdAllocator, ReleasePolicy};
use depot_paths::{CostGrid, INFEASIBLE, Siting, Target, strategic_point};
use tracing_subscriber::EnvFilter;

use scenario::Scenario;

#[derive(Parser)]
#[command(name = "depot")]
#[command(version)]
#[command(about = "Recycling id allocator and grid warehouse siting", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a random acquire/release workload against the allocator
    Ids {
        /// Expected number of concurrently held ids
        #[arg(short, long, default_value_t = 1000)]
        capacity: usize,

        /// Reject invalid releases instead of ignoring them
        #[arg(long)]
        strict: bool,

        /// Refuse to hand out more than `capacity` ids at once
        #[arg(long)]
        enforce_capacity: bool,

        /// Number of operations to run
        #[arg(long, default_value_t = 10_000)]
        ops: usize,

        /// Seed for the workload generator
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },

    /// Compute the strategic point and total distance for a scenario
    Site {
        /// Scenario JSON file (defaults to the built-in 5x5 yard)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// What each source's distance is measured to
        #[arg(short, long, value_enum)]
        target: Option<TargetArg>,

        /// Depot cell as `x,y`, used with `--target depot`
        #[arg(long, value_parser = parse_point)]
        depot: Option<Point>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TargetArg {
    /// Distance from each source to itself
    #[value(name = "self")]
    SourceItself,
    /// Distance to the median of the sources
    Strategic,
    /// Distance to the cell given by `--depot`
    Depot,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let Some((x, y)) = s.split_once(',') else {
        return Err(format!("expected `x,y`, got `{s}`"));
    };
    let x = x.trim().parse().map_err(|e| format!("bad x in `{s}`: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in `{s}`: {e}"))?;
    Ok(Point::new(x, y))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Apply the `--target`/`--depot` flags to `sc` and compute its strategic
/// point and total distance. A bare `--depot` implies `--target depot`.
fn site(
    mut sc: Scenario,
    target: Option<TargetArg>,
    depot: Option<Point>,
) -> Result<(Option<Point>, i32), Box<dyn Error>> {
    match (target, depot) {
        (Some(TargetArg::SourceItself), _) => sc.config.target = Target::SourceItself,
        (Some(TargetArg::Strategic), _) => sc.config.target = Target::StrategicPoint,
        (Some(TargetArg::Depot), None) => return Err("--target depot needs --depot x,y".into()),
        (Some(TargetArg::Depot) | None, Some(p)) => sc.config.target = Target::Depot(p),
        (None, None) => {}
    }

    let sources = sc.source_points();
    let grid = CostGrid::with_blocked(sc.grid_size, &sc.blocked_points())?;
    let mut siting = Siting::with_config(grid, sc.config);
    log::debug!(
        "{}x{} grid, {} blocked, {} sources, target {:?}",
        siting.grid().size(),
        siting.grid().size(),
        siting.grid().blocked_count(),
        sources.len(),
        sc.config.target
    );

    let total = siting.total_distance(&sources)?;
    Ok((strategic_point(&sources), total))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Ids {
            capacity,
            strict,
            enforce_capacity,
            ops,
            seed,
        } => {
            let policy = if strict {
                ReleasePolicy::Strict
            } else {
                ReleasePolicy::Lenient
            };
            let mut ids = IdAllocator::with_config(AllocatorConfig {
                capacity,
                policy,
                enforce_capacity,
            });
            log::info!("running {ops} operations (seed {seed}, {policy:?} release)");
            let stats = churn::run(&mut ids, ops, seed);

            println!("acquired:     {}", stats.acquired);
            println!("released:     {}", stats.released);
            println!("rejected:     {}", stats.rejected);
            println!("exhausted:    {}", stats.exhausted);
            println!("peak active:  {}", stats.peak_active);
            println!("final active: {}", stats.final_active);
            println!("ids issued:   {}", stats.issued);
        }

        Commands::Site {
            scenario,
            target,
            depot,
        } => {
            let sc = match scenario {
                Some(path) => {
                    log::info!("loading scenario from {}", path.display());
                    Scenario::load(&path)?
                }
                None => Scenario::demo(),
            };
            let (strategic, total) = site(sc, target, depot)?;

            match strategic {
                Some(p) => println!("Strategic warehouse location: {p}"),
                None => println!("Strategic warehouse location: none (no sources)"),
            }
            if total == INFEASIBLE {
                println!("No feasible path found.");
            } else {
                println!("Total distance traveled: {total}");
            }
        }
    }

    Ok(())
}
