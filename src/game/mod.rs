//! Cat Catch game loop.
//!
//! `GameController` owns everything that changes during a round: the counters,
//! the slot states and the pending timers. It never touches the page; every
//! visible change is queued as a [`GameEvent`] that the DOM layer drains after
//! each call. Time is whatever the caller passes to [`GameController::advance`],
//! so the whole round can be replayed natively in tests.

use log::{debug, info, trace};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::scheduler::{Scheduler, TaskId};

pub mod feedback;
pub mod slot;

pub use slot::{Cue, SlotState};

/// Counters shown on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameState {
    pub score: u32,
    pub time_left: u32,
    pub running: bool,
}

impl GameState {
    pub fn idle(config: &GameConfig) -> Self {
        Self {
            score: 0,
            time_left: config.round_secs,
            running: false,
        }
    }
}

/// Presentation changes, in the order they happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    ScoreChanged(u32),
    TimeChanged(u32),
    SlotChanged { slot: usize, state: SlotState },
    CueRequested(Cue),
    GameOver { final_score: u32 },
    Reset,
}

/// Where an activation came from. Browsers fire a synthetic click after a
/// touch, so touches hold a guard until [`GameController::release_touch`], and
/// one click on the touched slot within the hit flash is treated as the same tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    Click,
    Touch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Job {
    Spawn,
    Countdown,
    AutoHide(usize),
    ClearHit(usize),
}

pub struct GameController<R = SmallRng> {
    config: GameConfig,
    state: GameState,
    slots: Vec<SlotState>,
    slot_jobs: Vec<Option<TaskId>>, // at most one pending visual job per slot
    spawn_job: Option<TaskId>,
    countdown_job: Option<TaskId>,
    scheduler: Scheduler<Job>,
    now_ms: u64,
    touch_active: bool,
    last_touch: Option<(usize, u64)>, // (slot, ms) of the latest touch press
    rng: R,
    events: Vec<GameEvent>,
}

impl GameController<SmallRng> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }
}

impl Default for GameController<SmallRng> {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl<R: Rng> GameController<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self {
            config,
            state: GameState::idle(&config),
            slots: vec![SlotState::Hidden; config.slot_count],
            slot_jobs: vec![None; config.slot_count],
            spawn_job: None,
            countdown_job: None,
            scheduler: Scheduler::new(),
            now_ms: 0,
            touch_active: false,
            last_touch: None,
            rng,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn slots(&self) -> &[SlotState] {
        &self.slots
    }

    pub fn slot(&self, slot: usize) -> Option<SlotState> {
        self.slots.get(slot).copied()
    }

    /// The slot currently showing a cat, if any.
    pub fn shown_slot(&self) -> Option<usize> {
        self.slots.iter().position(|s| *s == SlotState::Shown)
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin a round. Ignored while one is already running.
    pub fn start(&mut self) {
        if self.state.running {
            return;
        }
        self.clear_slots();
        self.state = GameState {
            score: 0,
            time_left: self.config.round_secs,
            running: true,
        };
        self.touch_active = false;
        self.last_touch = None;
        self.events.push(GameEvent::Started);
        self.events.push(GameEvent::ScoreChanged(0));
        self.events.push(GameEvent::TimeChanged(self.state.time_left));

        let now = self.now_ms;
        self.spawn_job = Some(self.scheduler.schedule_every(
            now,
            self.config.spawn_interval_ms,
            Job::Spawn,
        ));
        self.countdown_job = Some(self.scheduler.schedule_every(
            now,
            self.config.countdown_ms,
            Job::Countdown,
        ));
        info!("round started at {now}ms ({}s)", self.config.round_secs);
    }

    /// Move the clock to `now_ms`, running every job that came due on the way.
    pub fn advance(&mut self, now_ms: u64) {
        if now_ms < self.now_ms {
            return;
        }
        while let Some(due) = self.scheduler.pop_due(now_ms) {
            self.now_ms = due.due_ms;
            match due.task {
                Job::Spawn => self.spawn(),
                Job::Countdown => self.countdown_tick(),
                Job::AutoHide(slot) => {
                    self.slot_jobs[slot] = None;
                    if self.slots[slot] == SlotState::Shown {
                        trace!("cat in slot {slot} got away");
                        self.set_slot(slot, SlotState::Hidden);
                    }
                }
                Job::ClearHit(slot) => {
                    self.slot_jobs[slot] = None;
                    if self.slots[slot] == SlotState::Activated {
                        self.set_slot(slot, SlotState::Hidden);
                    }
                }
            }
        }
        self.now_ms = now_ms;
    }

    /// Player hit `slot`. Anything but a shown cat during a round is ignored.
    pub fn activate(&mut self, slot: usize, source: InputSource) {
        if !self.state.running || self.touch_active {
            return;
        }
        match source {
            InputSource::Touch => {
                self.touch_active = true;
                self.last_touch = Some((slot, self.now_ms));
            }
            InputSource::Click => {
                if let Some((touched, at)) = self.last_touch.take() {
                    if touched == slot && self.now_ms - at <= self.config.hit_effect_ms {
                        trace!("dropped synthetic click on slot {slot}");
                        return;
                    }
                }
            }
        }
        if self.slot(slot) != Some(SlotState::Shown) {
            return;
        }

        self.set_slot(slot, SlotState::Activated);
        self.state.score = self
            .state
            .score
            .saturating_add(self.config.points_per_catch);
        self.events.push(GameEvent::ScoreChanged(self.state.score));
        self.events.push(GameEvent::CueRequested(Cue::for_slot(slot)));
        self.slot_jobs[slot] = Some(self.scheduler.schedule_once(
            self.now_ms,
            self.config.hit_effect_ms,
            Job::ClearHit(slot),
        ));
        debug!("caught slot {slot} ({source:?}), score {}", self.state.score);
    }

    /// End of a touch press; lets the next input through.
    pub fn release_touch(&mut self) {
        self.touch_active = false;
    }

    /// Hard stop back to the idle state, running or not.
    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.spawn_job = None;
        self.countdown_job = None;
        self.slot_jobs.iter_mut().for_each(|j| *j = None);
        self.clear_slots();
        self.state = GameState::idle(&self.config);
        self.touch_active = false;
        self.last_touch = None;
        self.events.push(GameEvent::Reset);
        self.events.push(GameEvent::ScoreChanged(0));
        self.events.push(GameEvent::TimeChanged(self.state.time_left));
        info!("game reset");
    }

    fn spawn(&mut self) {
        self.clear_slots();
        if self.slots.is_empty() {
            return;
        }
        let slot = self.rng.gen_range(0..self.slots.len());
        self.set_slot(slot, SlotState::Shown);
        self.slot_jobs[slot] = Some(self.scheduler.schedule_once(
            self.now_ms,
            self.config.display_ms,
            Job::AutoHide(slot),
        ));
        trace!("spawned cat in slot {slot} at {}ms", self.now_ms);
    }

    fn countdown_tick(&mut self) {
        self.state.time_left = self.state.time_left.saturating_sub(1);
        self.events.push(GameEvent::TimeChanged(self.state.time_left));
        if self.state.time_left == 0 {
            self.end_round();
        }
    }

    fn end_round(&mut self) {
        for job in [self.spawn_job.take(), self.countdown_job.take()]
            .into_iter()
            .flatten()
        {
            self.scheduler.cancel(job);
        }
        self.clear_slots();
        self.state.running = false;
        self.touch_active = false;
        self.last_touch = None;
        self.events.push(GameEvent::GameOver {
            final_score: self.state.score,
        });
        info!("round over, final score {}", self.state.score);
    }

    fn clear_slots(&mut self) {
        for slot in 0..self.slots.len() {
            self.set_slot(slot, SlotState::Hidden);
        }
    }

    // Every state change drops the slot's pending job so an old timer can never
    // act on a newer cat.
    fn set_slot(&mut self, slot: usize, state: SlotState) {
        if let Some(job) = self.slot_jobs[slot].take() {
            self.scheduler.cancel(job);
        }
        if self.slots[slot] != state {
            self.slots[slot] = state;
            self.events.push(GameEvent::SlotChanged { slot, state });
        }
    }
}
