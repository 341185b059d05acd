//! The clickable target.

use rand::Rng;

use crate::config::GameConfig;

pub type CupidId = u64;

/// A Cupid on the play field. Position is in percent of the field so the
/// renderer can scale it to any canvas size.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cupid {
    pub id: CupidId,
    pub x: f64,
    pub y: f64,
    pub caught: bool,
}

impl Cupid {
    /// Fresh, uncaught Cupid at a uniformly random spot inside the configured
    /// spawn area.
    pub fn spawn<R: Rng + ?Sized>(id: CupidId, config: &GameConfig, rng: &mut R) -> Self {
        Self {
            id,
            x: rng.gen_range(config.x_bounds()),
            y: rng.gen_range(config.y_bounds()),
            caught: false,
        }
    }
}
