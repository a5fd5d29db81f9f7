//! Text and styling derived from the counters: the encouragement line under the
//! score, the low-time warning on the timer and the start button label.

/// Remaining seconds at or below which the timer turns red.
pub const LOW_TIME_SECS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScoreRank {
    Warmup,
    Friendly,
    Master,
    Hero,
    Legend,
}

impl ScoreRank {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=30 => ScoreRank::Warmup,
            31..=60 => ScoreRank::Friendly,
            61..=90 => ScoreRank::Master,
            91..=120 => ScoreRank::Hero,
            _ => ScoreRank::Legend,
        }
    }

    pub fn comment(self) -> &'static str {
        match self {
            ScoreRank::Warmup => "Just warming up! The cats are cheering for you!",
            ScoreRank::Friendly => "Nice! The cats are starting to like you!",
            ScoreRank::Master => "A born cat master! Everyone is gathering around!",
            ScoreRank::Hero => "A hero of the cat world! They all adore you!",
            ScoreRank::Legend => "Legendary cat catcher! Even the cat gods are amazed!",
        }
    }
}

/// Inline style for the timer readout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeStyle {
    pub color: &'static str,
    pub font_weight: &'static str,
}

pub fn time_style(time_left: u32) -> TimeStyle {
    if time_left <= LOW_TIME_SECS {
        TimeStyle {
            color: "#dc3545",
            font_weight: "bold",
        }
    } else {
        TimeStyle {
            color: "#007bff",
            font_weight: "normal",
        }
    }
}

pub fn start_button_label(running: bool) -> &'static str {
    if running { "Playing..." } else { "Start Game" }
}
