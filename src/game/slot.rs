// Target slots (the 3x3 "spots") and their per-slot hit cues.

/// Visibility of a single slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SlotState {
    #[default]
    Hidden,
    Shown,
    /// Caught; the hit flash is still visible.
    Activated,
}

impl SlotState {
    /// CSS class the page uses for this state, if any.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            SlotState::Hidden => None,
            SlotState::Shown => Some(SHOW_CLASS),
            SlotState::Activated => Some(CLICKED_CLASS),
        }
    }
}

pub const SHOW_CLASS: &str = "show";
pub const CLICKED_CLASS: &str = "clicked";

/// Meow clips keyed by slot index. Indices 5..=7 share one clip.
pub const CAT_SOUNDS: [&str; 9] = [
    "audio/nyan.mp3",
    "audio/nyan2.mp3",
    "audio/nyan3.mp3",
    "audio/nyan4.mp3",
    "audio/nyan5.mp3",
    "audio/nyan8.mp3",
    "audio/nyan8.mp3",
    "audio/nyan8.mp3",
    "audio/nyan9.mp3",
];

pub const HIT_VIBRATE_MS: u32 = 50;

/// Audio/haptic feedback for a caught cat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cue {
    pub slot: usize,
    pub sound: Option<&'static str>,
    pub vibrate_ms: u32,
}

impl Cue {
    pub fn for_slot(slot: usize) -> Self {
        Self {
            slot,
            sound: CAT_SOUNDS.get(slot).copied(),
            vibrate_ms: HIT_VIBRATE_MS,
        }
    }
}

/// DOM id of a slot: slots are numbered from 1 on the page.
pub fn slot_element_id(slot: usize) -> String {
    format!("spot{}", slot + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ids_are_one_based() {
        assert_eq!(slot_element_id(0), "spot1");
        assert_eq!(slot_element_id(8), "spot9");
    }

    #[test]
    fn cue_table_shares_clip_for_middle_right_slots() {
        assert_eq!(Cue::for_slot(5).sound, Cue::for_slot(7).sound);
        assert_ne!(Cue::for_slot(7).sound, Cue::for_slot(8).sound);
        assert_eq!(Cue::for_slot(42).sound, None);
        assert_eq!(Cue::for_slot(0).vibrate_ms, HIT_VIBRATE_MS);
    }

    #[test]
    fn css_classes_follow_state() {
        assert_eq!(SlotState::Hidden.css_class(), None);
        assert_eq!(SlotState::Shown.css_class(), Some("show"));
        assert_eq!(SlotState::Activated.css_class(), Some("clicked"));
    }
}
