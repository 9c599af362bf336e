//! Set-associative cache simulator CLI.
//!
//! This binary wires trace sources, the cache core, and the statistics report. It provides:
//! 1. **Run:** Replay an address trace through one cache and print its statistics.
//! 2. **Sweep:** Replay one trace across replacement policies and associativities.
//! 3. **Policies:** Drive the bare replacement policies with a way trace.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cachesim_core::config::{CacheConfig, ReplacementPolicy};
use cachesim_core::sim::{self, trace};
use cachesim_core::SetAssociativeCache;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Set-associative cache simulator",
    long_about = "Replay memory traces through a set-associative cache and compare replacement policies.\n\nTrace lines are `R <hex addr>` or `W <hex addr>`; `-` reads stdin.\n\nExamples:\n  cachesim run -t traces/loop.txt --size 1024 --ways 4 --policy fifo\n  cachesim sweep -t traces/loop.txt --policies lru,plru --ways 4,8,16\n  cachesim policies -t traces/ways.txt --ways 4 --seed 7"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Geometry overrides shared by `run` and `sweep`.
#[derive(Args, Debug)]
struct GeometryArgs {
    /// JSON configuration file; flags below override its fields.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Total cache size in bytes.
    #[arg(long)]
    size: Option<usize>,

    /// Block (line) size in bytes.
    #[arg(long)]
    block: Option<usize>,

    /// Address width in bits.
    #[arg(long)]
    address_bits: Option<u32>,

    /// Seed for the Random policy.
    #[arg(long)]
    seed: Option<u64>,
}

impl GeometryArgs {
    fn load(&self) -> CacheConfig {
        let mut config = match &self.config {
            Some(path) => CacheConfig::from_file(path).unwrap_or_else(|e| {
                fatal(&format!("could not load '{}': {e}", path.display()))
            }),
            None => CacheConfig::default(),
        };
        if let Some(size) = self.size {
            config.size_bytes = size;
        }
        if let Some(block) = self.block {
            config.line_bytes = block;
        }
        if let Some(bits) = self.address_bits {
            config.address_bits = bits;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay an address trace through one cache.
    Run {
        /// Address trace (`-` for stdin).
        #[arg(short, long)]
        trace: PathBuf,

        #[command(flatten)]
        geometry: GeometryArgs,

        /// Associativity (ways per set).
        #[arg(long)]
        ways: Option<usize>,

        /// Replacement policy: lru, list-lru, fifo, random, plru.
        #[arg(short, long)]
        policy: Option<ReplacementPolicy>,

        /// Print statistics as JSON instead of the text report.
        #[arg(long)]
        json: bool,

        /// Dump the final contents of every non-empty set.
        #[arg(long)]
        dump: bool,
    },

    /// Replay one address trace across policies and associativities.
    Sweep {
        /// Address trace (`-` for stdin).
        #[arg(short, long)]
        trace: PathBuf,

        #[command(flatten)]
        geometry: GeometryArgs,

        /// Policies to compare.
        #[arg(long, value_delimiter = ',', default_values_t = ReplacementPolicy::ALL)]
        policies: Vec<ReplacementPolicy>,

        /// Associativities to compare.
        #[arg(long, value_delimiter = ',', default_values_t = [1usize, 2, 4, 8, 16])]
        ways: Vec<usize>,
    },

    /// Drive the replacement policies directly with a way trace (one way index per line).
    Policies {
        /// Way trace (`-` for stdin).
        #[arg(short, long)]
        trace: PathBuf,

        /// Associativity of the simulated set.
        #[arg(long, default_value_t = 4)]
        ways: usize,

        /// Seed for the Random policy.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Print every victim sequence, not just the summary.
        #[arg(long)]
        victims: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            trace,
            geometry,
            ways,
            policy,
            json,
            dump,
        } => {
            let mut config = geometry.load();
            if let Some(ways) = ways {
                config.ways = ways;
            }
            if let Some(policy) = policy {
                config.policy = policy;
            }
            cmd_run(&trace, &config, json, dump);
        }
        Commands::Sweep {
            trace,
            geometry,
            policies,
            ways,
        } => cmd_sweep(&trace, &geometry.load(), &policies, &ways),
        Commands::Policies {
            trace,
            ways,
            seed,
            victims,
        } => cmd_policies(&trace, ways, seed, victims),
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fatal(msg: &str) -> ! {
    eprintln!("[!] FATAL: {msg}");
    process::exit(1);
}

fn load_trace(path: &Path) -> Vec<trace::TraceEntry> {
    trace::read_trace(path)
        .unwrap_or_else(|e| fatal(&format!("could not read '{}': {e}", path.display())))
}

/// Replays the trace through a single cache and prints the report.
fn cmd_run(trace_path: &Path, config: &CacheConfig, json: bool, dump: bool) {
    let mut cache = SetAssociativeCache::from_config(config)
        .unwrap_or_else(|e| fatal(&format!("invalid cache configuration: {e}")));
    let entries = load_trace(trace_path);
    let stats = sim::replay(&mut cache, &entries);

    if json {
        let report = serde_json::json!({
            "config": cache.config(),
            "seed": cache.seed(),
            "sets": cache.num_sets(),
            "stats": stats,
            "hit_rate": stats.hit_rate(),
            "average_latency": stats.average_latency(),
        });
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => fatal(&format!("could not serialise report: {e}")),
        }
        return;
    }

    println!(
        "Configuration: {} bytes, {}-byte blocks, {}-way, {} sets, {}",
        cache.cache_size(),
        cache.block_size(),
        cache.associativity(),
        cache.num_sets(),
        cache.policy()
    );
    println!(
        "  Address bits: {} (tag {}, index {}, offset {})",
        cache.address_bits(),
        cache.tag_bits(),
        cache.index_bits(),
        cache.offset_bits()
    );
    println!("[*] Replayed {} accesses from {}", entries.len(), trace_path.display());
    println!();
    stats.print();
    if dump {
        println!();
        print!("{}", cache.describe_all());
    }
}

/// Tabulates hit rate and eviction counts across policies and associativities.
fn cmd_sweep(
    trace_path: &Path,
    base: &CacheConfig,
    policies: &[ReplacementPolicy],
    ways: &[usize],
) {
    let entries = load_trace(trace_path);
    println!(
        "{:<12} {:>5} {:>6} {:>10} {:>10} {:>10} {:>10}",
        "Policy", "Ways", "Sets", "Hit rate", "Evictions", "Dirty", "Avg cyc"
    );
    println!("{}", "-".repeat(69));
    for result in sim::sweep(base, policies, ways, &entries) {
        match result {
            Ok(r) => println!(
                "{:<12} {:>5} {:>6} {:>9.2}% {:>10} {:>10} {:>10.2}",
                r.policy.name(),
                r.ways,
                r.sets,
                r.stats.hit_rate() * 100.0,
                r.stats.evictions,
                r.stats.dirty_evictions,
                r.stats.average_latency()
            ),
            Err(e) => println!("  skipped: {e}"),
        }
    }
}

/// Runs every policy over a way trace and prints how many victims each produced.
fn cmd_policies(trace_path: &Path, ways: usize, seed: u64, victims: bool) {
    let trace = trace::read_way_trace(trace_path)
        .unwrap_or_else(|e| fatal(&format!("could not read '{}': {e}", trace_path.display())));
    println!("[*] Loaded {} accesses", trace.len());

    let reports = sim::compare_policies(ways, seed, &trace);
    println!("{:<15}{:<15}{:<15}", "Policy", "Accesses", "Rejected");
    println!("{}", "-".repeat(45));
    for report in &reports {
        println!(
            "{:<15}{:<15}{:<15}",
            report.policy.name(),
            report.accesses,
            report.rejected
        );
    }
    if victims {
        println!();
        for report in &reports {
            let seq: Vec<String> = report.victims.iter().map(ToString::to_string).collect();
            println!("{:<15}{}", report.policy.name(), seq.join(" "));
        }
    }
}
