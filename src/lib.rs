//! Meld search for Remi, a Rummy-family card game.
//!
//! Given a hand, find every way it splits into valid melds (runs and sets)
//! while holding back at most one card to discard. Jokers stand in for any
//! card, aces play low or high, and every answer is cached per player until
//! the hand changes.
pub mod cards;
pub mod melds;
pub mod players;
pub mod search;

// ============================================================================
// MELD RULES
// ============================================================================
/// Fewest cards a meld may close with.
pub const MIN_MELD: usize = 3;
/// Most cards a set may hold, one per suit.
pub const MAX_SET: usize = 4;

// ============================================================================
// SEARCH LIMITS
// ============================================================================
/// Default ceiling on recursive steps for one exclusion.
/// Override with the `REMI_MAX_EXPANSIONS` environment variable.
pub const MAX_EXPANSIONS: usize = 1 << 22;
/// Largest hand the bitmask search can hold.
pub const MAX_HAND: usize = 64;

// ============================================================================
// TABLE
// ============================================================================
/// Standard decks (each with two jokers) shuffled together for a game.
pub const DECK_COPIES: usize = 2;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` and writes DEBUG to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

/// Parse duration string like "500ms", "30s", "5m", "2h" into Duration.
pub fn parse_duration(s: &str) -> Option<std::time::Duration> {
    let s = s.trim();
    let (num, unit) = s.split_at(s.find(|c: char| !c.is_ascii_digit())?);
    let value: u64 = num.parse().ok()?;
    match unit {
        "ms" => Some(std::time::Duration::from_millis(value)),
        "s" => Some(std::time::Duration::from_secs(value)),
        "m" => value.checked_mul(60).map(std::time::Duration::from_secs),
        "h" => value.checked_mul(3600).map(std::time::Duration::from_secs),
        _ => None,
    }
}
