pub mod cards;
pub mod clustering;
pub mod error;
pub mod evaluation;
pub mod gameplay;
pub mod mccfr;
pub mod search;

/// dimensional analysis types
pub type Chips = i16;
pub type Equity = f64;
pub type Utility = f64;
pub type Probability = f64;

// game tree parameters
pub const N: usize = 2;
pub const STACK: Chips = 100;
pub const B_BLIND: Chips = 2;
pub const S_BLIND: Chips = 1;
pub const MAX_RAISE_REPEATS: usize = 3;

// kmeans clustering parameters
pub const KMEANS_FLOP_CLUSTER_COUNT: usize = 50;
pub const KMEANS_TURN_CLUSTER_COUNT: usize = 50;
pub const KMEANS_RIVE_CLUSTER_COUNT: usize = 10;
pub const KMEANS_TRAINING_ITERATIONS: usize = 24;
pub const KMEANS_SAMPLE_COUNT: usize = 0x1000;

// equity rollout parameters
pub const HISTOGRAM_BIN_COUNT: usize = 8;
pub const ROLLOUT_FUTURE_COUNT: usize = 64;
pub const ROLLOUT_MATCHUP_COUNT: usize = 8;
pub const EQUITY_SAMPLE_COUNT: usize = 10_000;

// mccfr parameters
pub const CFR_BATCH_COUNT: usize = 16;
pub const CFR_BATCH_SIZE: usize = 0x1000;
pub const PROFILE_SHARD_COUNT: usize = 64;
pub const REGRET_MIN: Utility = -3e5;

/// trait for random generation, mainly (strictly?) for testing
pub trait Arbitrary {
    fn random() -> Self;
}

/// initialize terminal logging
pub fn init() {
    use simplelog::ColorChoice;
    use simplelog::ConfigBuilder;
    use simplelog::TermLogger;
    use simplelog::TerminalMode;
    let config = ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    TermLogger::init(
        log::LevelFilter::Info,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();
}
