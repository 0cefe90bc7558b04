//! Universe simulation demo binary
//!
//! Thin consumer of the engine: constructs one entity per tier, advances
//! each by the requested tick count, and prints what history emerged.

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use starloom::tier::{write_snapshot, AnyTier, Galaxy, Planet, Sector, Simulate, StarSystem};

#[derive(Parser, Debug)]
#[command(name = "universe_sim", about = "Run the hierarchical tier simulation")]
struct Args {
    /// Ticks to simulate at each tier
    #[arg(long, default_value_t = 100)]
    ticks: u64,

    /// Base RNG seed (each entity derives its own stream)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Write a JSON snapshot of the final state to this path
    #[arg(long)]
    snapshot: Option<std::path::PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut entities = vec![
        AnyTier::Planet(Planet::new("demo-planet", "Kepler-442b", None).expect("valid planet")),
        AnyTier::System(
            StarSystem::new("demo-system", "Tau Ceti", None).expect("valid system"),
        ),
        AnyTier::Sector(Sector::new("demo-sector", "Orion Spur", None).expect("valid sector")),
        AnyTier::Galaxy(Galaxy::new("demo-galaxy", "Milky Way", None).expect("valid galaxy")),
    ];

    println!("Starloom universe simulation");
    println!("============================");
    println!("Ticks per tier: {}, seed: {}", args.ticks, args.seed);
    println!();

    let start = std::time::Instant::now();
    for (index, entity) in entities.iter_mut().enumerate() {
        let mut rng = ChaCha8Rng::seed_from_u64(args.seed.wrapping_add(index as u64));
        entity.apply_ticks(args.ticks, &mut rng);
    }
    let elapsed = start.elapsed();

    for entity in &entities {
        let years = entity.kind().tick_years() * args.ticks;
        println!(
            "{:<8} {:<12} pop {:>10}  events {:>4}  ({} years)",
            entity.kind().label(),
            entity.name(),
            magnitude(entity.population_total()),
            entity.event_count(),
            years,
        );
    }
    println!();
    println!(
        "Simulated {} ticks per tier in {:.2}ms",
        args.ticks,
        elapsed.as_secs_f64() * 1000.0
    );

    if let Some(path) = args.snapshot {
        write_snapshot(&entities, &path).expect("failed to write snapshot");
        println!("Snapshot written to {}", path.display());
    }
}

/// Compact K/M/B/T formatting for large magnitudes (display only).
fn magnitude(value: f64) -> String {
    const STEPS: [(f64, &str); 5] = [
        (1e15, "Q"),
        (1e12, "T"),
        (1e9, "B"),
        (1e6, "M"),
        (1e3, "K"),
    ];
    for (scale, suffix) in STEPS {
        if value >= scale {
            return format!("{:.2}{}", value / scale, suffix);
        }
    }
    format!("{value:.0}")
}
