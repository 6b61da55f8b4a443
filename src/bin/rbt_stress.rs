//! Randomized insertion stress test.
//!
//! Inserts random keys over `[a-zA-Z0-9_]`, tracks how many were new, and
//! periodically checks every tree invariant.
//!
//! ```bash
//! cargo run --release --features cli --bin rbt_stress -- --iterations 1000000 --validate-every 1000
//! ```

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{error, info, LevelFilter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rbkeys::RbTree;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[derive(Parser, Debug)]
#[command(name = "rbt_stress")]
#[command(about = "Insert random keys into a red-black tree and check its invariants")]
struct Args {
    /// Number of insert calls
    #[arg(short = 'n', long, default_value_t = 100_000)]
    iterations: u64,

    /// RNG seed (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maximum key length in bytes, excluding any NUL terminator
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    max_len: u16,

    /// Validate the whole tree every N insertions (0 validates only at the end)
    #[arg(long, default_value_t = 0)]
    validate_every: u64,

    /// Append a NUL byte to every generated key
    #[arg(long, default_value_t = false)]
    nul_terminate: bool,

    /// Print the final tree
    #[arg(long, default_value_t = false)]
    dump: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,
}

/// Random key of 1..=`max_len` bytes; each byte is picked from one of four
/// classes (lowercase, uppercase, digit, underscore) chosen uniformly.
fn random_key(rng: &mut impl Rng, max_len: u16, nul_terminate: bool) -> Vec<u8> {
    let len = rng.gen_range(1..=usize::from(max_len));
    let mut key = Vec::with_capacity(len + 1);
    for _ in 0..len {
        let b = match rng.gen_range(0..4) {
            0 => b'a' + rng.gen_range(0..26),
            1 => b'A' + rng.gen_range(0..26),
            2 => b'0' + rng.gen_range(0..10),
            _ => b'_',
        };
        key.push(b);
    }
    if nul_terminate {
        key.push(0);
    }
    key
}

fn check(tree: &RbTree, expected: usize, iteration: u64) -> Result<(), String> {
    tree.validate()
        .map_err(|e| format!("invariant violated after {iteration} insertions: {e}"))?;
    let size = tree.size();
    if size != expected {
        return Err(format!(
            "after {iteration} insertions: {size} reachable nodes, expected {expected}"
        ));
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = TermLogger::init(
        args.log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("failed to initialize logger: {e}");
        return ExitCode::FAILURE;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("seed {seed}, {} iterations, max key length {}", args.iterations, args.max_len);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut tree = RbTree::new();
    let mut expected = 0usize;
    let start = Instant::now();

    for i in 1..=args.iterations {
        let key = random_key(&mut rng, args.max_len, args.nul_terminate);
        if tree.insert(&key) {
            expected += 1;
        }

        if args.validate_every != 0 && i % args.validate_every == 0 {
            if let Err(msg) = check(&tree, expected, i) {
                error!("{msg}");
                return ExitCode::FAILURE;
            }
            info!("{i} insertions, {expected} unique, height {}", tree.height());
        }
    }

    let elapsed = start.elapsed();
    if let Err(msg) = check(&tree, expected, args.iterations) {
        error!("{msg}");
        return ExitCode::FAILURE;
    }

    if args.dump {
        print!("{}", tree.dump());
    }
    println!(
        "{} insertions, {} unique keys, height {}, {} bytes, {:.2?} (seed {seed})",
        args.iterations,
        tree.len(),
        tree.height(),
        tree.memory_usage(),
        elapsed,
    );
    ExitCode::SUCCESS
}
