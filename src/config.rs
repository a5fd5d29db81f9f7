//! Fixed gameplay constants.
//!
//! Difficulty is not user-tunable; the struct only exists so every timing value
//! lives in one place and tests can shorten a round.

/// Timing and scoring parameters for one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameConfig {
    /// Length of a round in whole seconds.
    pub round_secs: u32,
    /// Countdown tick period (ms).
    pub countdown_ms: u64,
    /// Period between two spawns (ms).
    pub spawn_interval_ms: u64,
    /// How long a spawned cat stays up if nobody catches it (ms).
    /// Must stay below `spawn_interval_ms`.
    pub display_ms: u64,
    /// How long the "clicked" flash stays on a caught cat (ms).
    pub hit_effect_ms: u64,
    pub points_per_catch: u32,
    pub slot_count: usize,
}

pub const ROUND_SECS: u32 = 30;
pub const SLOT_COUNT: usize = 9;

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_secs: ROUND_SECS,
            countdown_ms: 1_000,
            spawn_interval_ms: 800,
            display_ms: 700,
            hit_effect_ms: 500,
            points_per_catch: 10,
            slot_count: SLOT_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_shorter_than_spawn_interval() {
        let cfg = GameConfig::default();
        assert!(cfg.display_ms < cfg.spawn_interval_ms);
        assert!(cfg.hit_effect_ms < cfg.spawn_interval_ms);
    }
}
