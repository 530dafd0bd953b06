use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::info;

use junction_sim::simulation::{
    AsciiRenderer, FixedCyclePolicy, Geometry, LightPolicy, PatternedTraffic,
    QueuePressurePolicy, RandomTraffic, SimWorld, TrafficGenerator,
};

#[derive(Parser)]
#[command(name = "junction_sim")]
#[command(about = "Four-way intersection simulation with pluggable light policies")]
struct Cli {
    /// Number of simulation ticks to run
    #[arg(long, default_value = "1000")]
    ticks: u64,

    /// Light policy driving the intersection
    #[arg(long, value_enum, default_value = "fixed")]
    policy: PolicyKind,

    /// Traffic arrival process
    #[arg(long, value_enum, default_value = "random")]
    traffic: TrafficKind,

    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Car speed in world units per tick
    #[arg(long, default_value = "0.2")]
    speed: f32,

    /// Per-lane spawn probability for the generators
    #[arg(long, default_value = "0.2")]
    spawn_probability: f32,

    /// Pace ticks with a wall-clock interval and draw the intersection
    #[arg(long)]
    clocked: bool,

    /// Milliseconds between ticks in clocked mode
    #[arg(long, default_value = "500")]
    interval_ms: u64,

    /// Log an interim summary every N ticks in batch mode (0 = end only)
    #[arg(long, default_value = "0")]
    report_every: u64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyKind {
    /// Fixed NS/EW rotation
    Fixed,
    /// Queue-pressure greedy controller
    Adaptive,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TrafficKind {
    /// Uniform arrivals on every lane
    Random,
    /// Arrivals alternating between a favored NS and EW axis
    Patterned,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let policy: Box<dyn LightPolicy> = match cli.policy {
        PolicyKind::Fixed => Box::new(FixedCyclePolicy::new()),
        PolicyKind::Adaptive => Box::new(QueuePressurePolicy::new()),
    };

    let traffic: Box<dyn TrafficGenerator> = match (cli.traffic, cli.seed) {
        (TrafficKind::Random, Some(seed)) => {
            Box::new(RandomTraffic::with_seed(cli.spawn_probability, seed))
        }
        (TrafficKind::Random, None) => Box::new(RandomTraffic::new(cli.spawn_probability)),
        (TrafficKind::Patterned, Some(seed)) => {
            Box::new(PatternedTraffic::with_seed(cli.spawn_probability, seed))
        }
        (TrafficKind::Patterned, None) => Box::new(PatternedTraffic::new(cli.spawn_probability)),
    };

    let mut world = SimWorld::new(Geometry::standard(), policy, traffic);
    world.car_speed = cli.speed;

    info!(
        "policy: {:?}, traffic: {:?}, ticks: {}, speed: {}",
        cli.policy, cli.traffic, cli.ticks, cli.speed
    );

    if cli.clocked {
        world.attach_renderer(Box::new(AsciiRenderer::new()));
        for _ in 0..cli.ticks {
            world.step();
            thread::sleep(Duration::from_millis(cli.interval_ms));
        }
    } else if cli.report_every > 0 {
        let mut remaining = cli.ticks;
        while remaining > 0 {
            let chunk = cli.report_every.min(remaining);
            world.run(chunk);
            remaining -= chunk;
            if remaining > 0 {
                world.log_summary();
            }
        }
    } else {
        world.run(cli.ticks);
    }

    world.log_summary();
}
