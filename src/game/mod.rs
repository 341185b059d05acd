//! Catch-Cupid state machine.
//!
//! A [`Game`] owns one round of play at a time plus the process-lifetime high
//! score. Time only moves when the host calls [`Game::advance_to`]; every
//! spawn, expiry and post-catch removal is an entry in an owned
//! [`TimerQueue`] that fires in `(due, insertion)` order. Clicks arrive via
//! [`Game::catch`] between those calls, so all mutation is strictly
//! sequential.
//!
//! Timers only carry a Cupid id and the epoch of the round that scheduled them.
//! `start`, `reset` and the end of a round bump the epoch and drop the queue;
//! a timer that still fires for an older epoch, or outside `Playing`, does
//! nothing.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;

mod cupid;
mod session;
mod timers;

pub use cupid::{Cupid, CupidId};
pub use session::{Phase, Session};
pub use timers::{Task, TimerQueue};

/// Everything the presentation layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot {
    pub phase: Phase,
    pub score: u32,
    pub lives: u32,
    pub max_lives: u32,
    pub high_score: u32,
    pub new_record: bool,
    pub cupids: Vec<Cupid>,
}

pub struct Game<R: Rng = StdRng> {
    config: GameConfig,
    session: Session,
    high_score: u32,
    new_record: bool, // last round beat the previous high score
    timers: TimerQueue,
    epoch: u32,
    next_id: CupidId,
    now_ms: u64,
    rng: R,
}

impl Game<StdRng> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic spawn positions, for tests and replays.
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl Default for Game<StdRng> {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let config = config.validate();
        let session = Session::fresh(config.initial_lives, Phase::NotStarted);
        Self {
            config,
            session,
            high_score: 0,
            new_record: false,
            timers: TimerQueue::new(),
            epoch: 0,
            next_id: 1,
            now_ms: 0,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn lives(&self) -> u32 {
        self.session.lives
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    pub fn cupids(&self) -> &[Cupid] {
        &self.session.cupids
    }

    pub fn cupid(&self, id: CupidId) -> Option<&Cupid> {
        self.session.cupid(id)
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.session.phase,
            score: self.session.score,
            lives: self.session.lives,
            max_lives: self.config.initial_lives,
            high_score: self.high_score,
            new_record: self.new_record,
            cupids: self.session.cupids.clone(),
        }
    }

    // --- Transitions ------------------------------------------------------------

    /// Title screen -> Playing. Ignored while a round is running or over; a
    /// finished round must go back through [`Game::reset`] first.
    pub fn start(&mut self) {
        if self.session.phase != Phase::NotStarted {
            debug!("start ignored in phase {}", self.session.phase.as_str());
            return;
        }
        self.begin_round(Phase::Playing);
        self.schedule_in(self.config.spawn_interval_ms, Task::Spawn { epoch: self.epoch });
        info!("round started (epoch {})", self.epoch);
    }

    /// Back to the title screen from any phase. Idempotent; every pending timer
    /// of the previous round is dropped.
    pub fn reset(&mut self) {
        self.begin_round(Phase::NotStarted);
        info!("game reset (epoch {})", self.epoch);
    }

    fn begin_round(&mut self, phase: Phase) {
        self.epoch = self.epoch.wrapping_add(1);
        self.timers.clear();
        self.session = Session::fresh(self.config.initial_lives, phase);
        self.new_record = false;
    }

    /// Lives ran out. The board is cleared and all timers cancelled, so no
    /// caught Cupid outlives its burst animation on a frozen field.
    fn end_session(&mut self) {
        if self.session.phase != Phase::Playing {
            return;
        }
        self.session.phase = Phase::Over;
        self.session.cupids.clear();
        self.timers.clear();
        self.epoch = self.epoch.wrapping_add(1);
        let score = self.session.score;
        self.new_record = score > self.high_score;
        if self.new_record {
            self.high_score = score;
        }
        info!("round over: score {} (high score {})", score, self.high_score);
    }

    // --- Input ------------------------------------------------------------------

    /// Player clicked Cupid `id`. Unknown, already-caught, or out-of-round clicks
    /// are ignored, so repeated clicks never award twice.
    pub fn catch(&mut self, id: CupidId) {
        if self.session.phase != Phase::Playing {
            debug!("catch({}) ignored outside a round", id);
            return;
        }
        match self.session.cupid_mut(id) {
            Some(cupid) if !cupid.caught => cupid.caught = true,
            Some(_) => {
                debug!("cupid {} already caught", id);
                return;
            }
            None => {
                debug!("cupid {} not on the field", id);
                return;
            }
        }
        self.session.score = self.session.score.saturating_add(self.config.catch_reward);
        self.schedule_in(self.config.catch_display_ms, Task::Remove { id, epoch: self.epoch });
    }

    // --- Time -------------------------------------------------------------------

    /// Move the game clock forward to `now_ms`, firing every timer due on the
    /// way in order. Each timer sees the clock at its own due time, so a
    /// single large step behaves like many small ones. Going backwards is a
    /// no-op.
    pub fn advance_to(&mut self, now_ms: u64) {
        if now_ms < self.now_ms {
            return;
        }
        while let Some((due, task)) = self.timers.pop_due(now_ms) {
            self.now_ms = self.now_ms.max(due);
            self.fire(task);
        }
        self.now_ms = now_ms;
    }

    pub fn advance_by(&mut self, delta_ms: u64) {
        self.advance_to(self.now_ms.saturating_add(delta_ms));
    }

    /// Queue `task` to fire `delay_ms` from now. A deadline past the end of the
    /// clock can never be reached, so it is not queued at all.
    fn schedule_in(&mut self, delay_ms: u64, task: Task) {
        match self.now_ms.checked_add(delay_ms) {
            Some(due) => self.timers.schedule(due, task),
            None => debug!("timer {:?} beyond the clock, dropped", task),
        }
    }

    fn fire(&mut self, task: Task) {
        if task.epoch() != self.epoch || self.session.phase != Phase::Playing {
            debug!("stale timer {:?} dropped", task);
            return;
        }
        match task {
            Task::Spawn { .. } => self.spawn(),
            Task::Expire { id, .. } => self.expire(id),
            Task::Remove { id, .. } => {
                if self.session.cupid(id).is_some_and(|c| c.caught) {
                    self.session.remove(id);
                }
            }
        }
    }

    fn spawn(&mut self) {
        let id = self.next_id;
        self.next_id += 1;
        let cupid = Cupid::spawn(id, &self.config, &mut self.rng);
        debug!("cupid {} spawned at ({:.1}, {:.1})", id, cupid.x, cupid.y);
        self.session.cupids.push(cupid);

        let epoch = self.epoch;
        self.schedule_in(self.config.expiry_ms, Task::Expire { id, epoch });
        self.schedule_in(self.config.spawn_interval_ms, Task::Spawn { epoch });
    }

    /// Reaper: reads the Cupid's current state. Caught or already gone means
    /// nothing happens; otherwise it flies off with one of the player's lives.
    fn expire(&mut self, id: CupidId) {
        match self.session.cupid(id) {
            Some(c) if !c.caught => {}
            _ => return,
        }
        self.session.remove(id);
        self.session.lives = self.session.lives.saturating_sub(1);
        debug!("cupid {} escaped, {} lives left", id, self.session.lives);
        if self.session.lives == 0 {
            self.end_session();
        }
    }
}
