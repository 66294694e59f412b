//! Gatesim CLI
//!
//! Run a netlist file and print the probe trace.
//!
//! # Example
//!
//! ```bash
//! # Print the probe trace of a netlist
//! gatesim adder.toml
//!
//! # Probe every gate and stop runaway feedback loops
//! gatesim adder.toml --probe-all --max-events 100000
//!
//! # Drive the inputs with 500 seeded random flips
//! gatesim adder.toml --random-flips 500 --seed 42 --horizon 2000
//! ```

use anyhow::Context;
use clap::{Parser, ValueEnum};
use gatesim_simulation::{SimTime, SimulationConfig};
use gatesim_simulator::{
    write_topology, FlipMode, NetlistConfig, Simulator, SimulatorConfig, WorkloadConfig,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Gatesim
///
/// Event-driven gate-level circuit simulator. Output is deterministic for a
/// given netlist and seed.
#[derive(Parser, Debug)]
#[command(name = "gatesim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Netlist file (TOML)
    netlist: PathBuf,

    /// Print the circuit topology instead of running it
    #[arg(long)]
    describe: bool,

    /// Probe every gate
    #[arg(long)]
    probe_all: bool,

    /// Fail after this many transitions have been processed
    #[arg(long)]
    max_events: Option<u64>,

    /// Fail when a transition past this time is reached
    #[arg(long)]
    max_time: Option<u64>,

    /// Add this many random flips of the externally driven gates
    #[arg(long)]
    random_flips: Option<usize>,

    /// Random seed for the flips. When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Flips land in 0..=horizon
    #[arg(long, default_value = "1000")]
    horizon: u64,

    /// How flip values are chosen
    #[arg(long, value_enum, default_value = "random")]
    flip_mode: FlipModeArg,

    /// Print run counters to stderr when done
    #[arg(long)]
    summary: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FlipModeArg {
    Random,
    Toggle,
}

impl From<FlipModeArg> for FlipMode {
    fn from(arg: FlipModeArg) -> Self {
        match arg {
            FlipModeArg::Random => FlipMode::Random,
            FlipModeArg::Toggle => FlipMode::Toggle,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,gatesim_simulator=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let netlist = NetlistConfig::from_file(&args.netlist)
        .with_context(|| format!("loading {}", args.netlist.display()))?;

    let mut limits = SimulationConfig::unbounded();
    if let Some(max_events) = args.max_events {
        limits = limits.with_max_events(max_events);
    }
    if let Some(max_time) = args.max_time {
        limits = limits.with_max_time(SimTime(max_time));
    }

    let mut config = SimulatorConfig::new()
        .with_probe_all(args.probe_all)
        .with_limits(limits);
    if let Some(flips) = args.random_flips {
        let seed = args.seed.unwrap_or_else(rand::random);
        info!(flips, seed, horizon = args.horizon, "Random flip workload");
        config = config.with_workload(
            WorkloadConfig::new(flips)
                .with_horizon(args.horizon)
                .with_seed(seed)
                .with_mode(args.flip_mode.into()),
        );
    }

    let simulator = Simulator::new(netlist, config);
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if args.describe {
        write_topology(&simulator.describe()?, &mut out)?;
        out.flush()?;
        return Ok(());
    }

    let report = simulator.run()?;
    report.write_trace(&mut out)?;
    out.flush()?;

    if args.summary {
        report.write_summary(&mut io::stderr())?;
    }
    Ok(())
}
