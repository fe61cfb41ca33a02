//! Baserunner advancement.
//!
//! Bases hold ids into the batting team's roster, never players themselves.
//! Runners are moved from third back to first so nobody is counted twice.

use serde::{Deserialize, Serialize};

use crate::models::PlayerId;

pub const FIRST: usize = 0;
pub const SECOND: usize = 1;
pub const THIRD: usize = 2;

/// Occupancy of first, second and third base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseState {
    slots: [Option<PlayerId>; 3],
}

impl BaseState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_slots(slots: [Option<PlayerId>; 3]) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[Option<PlayerId>; 3] {
        &self.slots
    }

    pub fn runner_on(&self, base: usize) -> Option<PlayerId> {
        self.slots.get(base).copied().flatten()
    }

    pub fn is_occupied(&self, base: usize) -> bool {
        self.runner_on(base).is_some()
    }

    pub fn runners(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn runner_count(&self) -> usize {
        self.runners().count()
    }

    pub fn is_empty(&self) -> bool {
        self.runner_count() == 0
    }

    pub fn clear(&mut self) {
        self.slots = [None; 3];
    }
}

/// How runners move when the batter walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkAdvancement {
    /// A walk moves every runner up one base, exactly like a single.
    #[default]
    AlwaysAdvance,
    /// Only forced runners move: a runner advances only when every base
    /// behind them is occupied.
    ForceOnly,
}

/// Bases and scorers after a play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    pub bases: BaseState,
    /// Runners (and possibly the batter) who crossed the plate, in order.
    pub scored: Vec<PlayerId>,
}

impl Advance {
    pub fn runs_scored(&self) -> u8 {
        self.scored.len() as u8
    }
}

/// Move every runner and the batter `advance_count` bases.
///
/// `advance_count` is clamped to `1..=4`; 4 is a home run and clears the bases.
pub fn advance(bases: &BaseState, batter: PlayerId, advance_count: u8) -> Advance {
    let n = advance_count.clamp(1, 4);
    if n != advance_count {
        log::warn!("advance count {} clamped to {}", advance_count, n);
    }

    let mut next = [None; 3];
    let mut scored = Vec::with_capacity(4);

    if let Some(runner) = bases.runner_on(THIRD) {
        scored.push(runner);
    }

    if let Some(runner) = bases.runner_on(SECOND) {
        if n >= 2 {
            scored.push(runner);
        } else {
            next[THIRD] = Some(runner);
        }
    }

    if let Some(runner) = bases.runner_on(FIRST) {
        match n {
            1 => next[SECOND] = Some(runner),
            2 => next[THIRD] = Some(runner),
            _ => scored.push(runner),
        }
    }

    if n == 4 {
        scored.push(batter);
    } else {
        next[usize::from(n) - 1] = Some(batter);
    }

    Advance { bases: BaseState::from_slots(next), scored }
}

/// Put the batter on first after a walk, moving runners per `policy`.
pub fn award_walk(bases: &BaseState, batter: PlayerId, policy: WalkAdvancement) -> Advance {
    match policy {
        WalkAdvancement::AlwaysAdvance => advance(bases, batter, 1),
        WalkAdvancement::ForceOnly => force_walk(bases, batter),
    }
}

fn force_walk(bases: &BaseState, batter: PlayerId) -> Advance {
    let mut next = *bases.slots();
    let mut scored = Vec::new();

    if let Some(on_first) = next[FIRST] {
        if let Some(on_second) = next[SECOND] {
            if let Some(on_third) = next[THIRD] {
                scored.push(on_third);
            }
            next[THIRD] = Some(on_second);
        }
        next[SECOND] = Some(on_first);
    }
    next[FIRST] = Some(batter);

    Advance { bases: BaseState::from_slots(next), scored }
}
