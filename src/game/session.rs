//! Per-round state: score, lives, the Cupids on the field and the phase.

use super::{Cupid, CupidId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    NotStarted, // title screen
    Playing,
    Over,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::NotStarted => "not_started",
            Phase::Playing => "playing",
            Phase::Over => "over",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    pub score: u32,
    pub lives: u32,
    pub phase: Phase,
    /// Insertion (spawn) order, which is also draw order.
    pub cupids: Vec<Cupid>,
}

impl Session {
    pub fn fresh(lives: u32, phase: Phase) -> Self {
        Self { score: 0, lives, phase, cupids: Vec::new() }
    }

    pub fn cupid(&self, id: CupidId) -> Option<&Cupid> {
        self.cupids.iter().find(|c| c.id == id)
    }

    pub fn cupid_mut(&mut self, id: CupidId) -> Option<&mut Cupid> {
        self.cupids.iter_mut().find(|c| c.id == id)
    }

    pub fn remove(&mut self, id: CupidId) -> Option<Cupid> {
        let idx = self.cupids.iter().position(|c| c.id == id)?;
        Some(self.cupids.remove(idx))
    }
}
