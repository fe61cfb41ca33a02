//! Ball / strike / out bookkeeping.
//!
//! The stored count never reaches four balls, three strikes or three outs:
//! the pitch that would get there fires its terminal event and resets the
//! affected counters in the same call.

use serde::{Deserialize, Serialize};

pub const BALLS_FOR_WALK: u8 = 4;
pub const STRIKES_FOR_STRIKEOUT: u8 = 3;
pub const OUTS_PER_HALF: u8 = 3;

/// What a called pitch did to the plate appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountEvent {
    /// Plate appearance continues.
    Continue,
    /// Fourth ball. Balls and strikes are already reset.
    Walk,
    /// Third strike. Balls and strikes are already reset; the caller records the out.
    Strikeout,
}

/// Result of recording an out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutEvent {
    Recorded,
    /// Third out. Outs are already reset.
    SideRetired,
}

/// Balls, strikes and outs as they stand between pitches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CountTracker {
    balls: u8,
    strikes: u8,
    outs: u8,
}

impl CountTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balls(&self) -> u8 {
        self.balls
    }

    pub fn strikes(&self) -> u8 {
        self.strikes
    }

    pub fn outs(&self) -> u8 {
        self.outs
    }

    pub fn record_ball(&mut self) -> CountEvent {
        self.balls += 1;
        if self.balls >= BALLS_FOR_WALK {
            self.reset_plate_appearance();
            CountEvent::Walk
        } else {
            CountEvent::Continue
        }
    }

    pub fn record_strike(&mut self) -> CountEvent {
        self.strikes += 1;
        if self.strikes >= STRIKES_FOR_STRIKEOUT {
            self.reset_plate_appearance();
            CountEvent::Strikeout
        } else {
            CountEvent::Continue
        }
    }

    /// A foul counts as a strike only while there are fewer than two.
    pub fn record_foul(&mut self) -> CountEvent {
        if self.strikes < STRIKES_FOR_STRIKEOUT - 1 {
            self.strikes += 1;
        }
        CountEvent::Continue
    }

    pub fn record_out(&mut self) -> OutEvent {
        self.outs += 1;
        if self.outs >= OUTS_PER_HALF {
            self.reset_half_inning();
            OutEvent::SideRetired
        } else {
            OutEvent::Recorded
        }
    }

    /// Clear balls and strikes for the next batter. Outs carry over.
    pub fn reset_plate_appearance(&mut self) {
        self.balls = 0;
        self.strikes = 0;
    }

    pub fn reset_half_inning(&mut self) {
        *self = Self::default();
    }

    #[cfg(test)]
    pub(crate) fn with_values(balls: u8, strikes: u8, outs: u8) -> Self {
        Self { balls, strikes, outs }
    }
}
