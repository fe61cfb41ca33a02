//! Inning lifecycle: TopHalf -> BottomHalf -> next TopHalf ... -> GameOver.
//!
//! Game over is only evaluated when a bottom half ends after the scheduled
//! innings. A tie there extends `max_innings` by one instead of ending the
//! game, which is the only place `max_innings` changes. Inning numbers are
//! `u16` so a long run of tied extra innings cannot exhaust the counter.

use serde::{Deserialize, Serialize};

use super::config::{DEFAULT_MAX_INNINGS, MIN_INNINGS};
use crate::models::{Half, TeamSide};

/// Coarse lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InningPhase {
    TopHalf,
    BottomHalf,
    GameOver,
}

/// What ending a half-inning led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfTransition {
    /// Play continues in the given half.
    NextHalf { inning: u16, half: Half, extra_innings: bool },
    GameOver { winner: TeamSide },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningState {
    inning: u16,
    half: Half,
    scheduled_innings: u16,
    max_innings: u16,
    winner: Option<TeamSide>,
}

impl Default for InningState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INNINGS)
    }
}

impl InningState {
    /// Top of the first. `max_innings` below the minimum is raised to it.
    pub fn new(max_innings: u8) -> Self {
        let scheduled = u16::from(max_innings.max(MIN_INNINGS));
        Self {
            inning: 1,
            half: Half::Top,
            scheduled_innings: scheduled,
            max_innings: scheduled,
            winner: None,
        }
    }

    pub fn inning(&self) -> u16 {
        self.inning
    }

    pub fn half(&self) -> Half {
        self.half
    }

    pub fn max_innings(&self) -> u16 {
        self.max_innings
    }

    pub fn winner(&self) -> Option<TeamSide> {
        self.winner
    }

    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Innings originally scheduled, before any tie extended the game.
    pub fn scheduled_innings(&self) -> u16 {
        self.scheduled_innings
    }

    pub fn is_extra_innings(&self) -> bool {
        self.inning > self.scheduled_innings
    }

    pub fn phase(&self) -> InningPhase {
        match (self.winner, self.half) {
            (Some(_), _) => InningPhase::GameOver,
            (None, Half::Top) => InningPhase::TopHalf,
            (None, Half::Bottom) => InningPhase::BottomHalf,
        }
    }

    pub fn batting_side(&self) -> TeamSide {
        self.half.batting_side()
    }

    pub fn fielding_side(&self) -> TeamSide {
        self.half.fielding_side()
    }

    /// Close the current half given the score at that moment.
    pub fn end_half(&mut self, home_score: u32, away_score: u32) -> HalfTransition {
        if let Some(winner) = self.winner {
            return HalfTransition::GameOver { winner };
        }

        match self.half {
            Half::Top => {
                self.half = Half::Bottom;
                HalfTransition::NextHalf { inning: self.inning, half: self.half, extra_innings: false }
            }
            Half::Bottom => {
                if self.inning < self.max_innings {
                    self.inning += 1;
                    self.half = Half::Top;
                    return HalfTransition::NextHalf { inning: self.inning, half: Half::Top, extra_innings: false };
                }

                if home_score == away_score {
                    if let Some(extended) = self.max_innings.checked_add(1) {
                        self.max_innings = extended;
                        self.inning = extended;
                        self.half = Half::Top;
                        log::info!(
                            "Tied {}-{} after {} innings, extending to {}",
                            away_score,
                            home_score,
                            extended - 1,
                            extended
                        );
                        return HalfTransition::NextHalf { inning: extended, half: Half::Top, extra_innings: true };
                    }
                    // Out of inning numbers: the home side is credited so the game still ends.
                    log::warn!("Tied {}-{} after {} innings, no innings left", away_score, home_score, self.inning);
                    self.winner = Some(TeamSide::Home);
                    return HalfTransition::GameOver { winner: TeamSide::Home };
                }

                let winner = if home_score > away_score { TeamSide::Home } else { TeamSide::Away };
                self.winner = Some(winner);
                HalfTransition::GameOver { winner }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_to_bottom_of(state: &mut InningState, inning: u16) {
        while !(state.inning() == inning && state.half() == Half::Bottom) {
            state.end_half(0, 0);
        }
    }

    #[test]
    fn test_top_flips_to_bottom_same_inning() {
        let mut state = InningState::new(9);
        assert_eq!(state.phase(), InningPhase::TopHalf);
        let t = state.end_half(0, 0);
        assert_eq!(t, HalfTransition::NextHalf { inning: 1, half: Half::Bottom, extra_innings: false });
        assert_eq!(state.batting_side(), TeamSide::Home);
    }

    #[test]
    fn test_bottom_advances_inning() {
        let mut state = InningState::new(9);
        state.end_half(0, 0);
        let t = state.end_half(3, 1);
        assert_eq!(t, HalfTransition::NextHalf { inning: 2, half: Half::Top, extra_innings: false });
        assert_eq!(state.batting_side(), TeamSide::Away);
    }

    #[test]
    fn test_home_wins_after_regulation() {
        let mut state = InningState::new(3);
        play_to_bottom_of(&mut state, 3);
        assert_eq!(state.end_half(4, 2), HalfTransition::GameOver { winner: TeamSide::Home });
        assert!(state.is_game_over());
        assert_eq!(state.phase(), InningPhase::GameOver);
        assert_eq!(state.inning(), 3);

        // Further calls are inert.
        assert_eq!(state.end_half(0, 9), HalfTransition::GameOver { winner: TeamSide::Home });
    }

    #[test]
    fn test_tie_extends_game() {
        let mut state = InningState::new(9);
        play_to_bottom_of(&mut state, 9);
        let t = state.end_half(5, 5);
        assert_eq!(t, HalfTransition::NextHalf { inning: 10, half: Half::Top, extra_innings: true });
        assert_eq!(state.max_innings(), 10);
        assert_eq!(state.scheduled_innings(), 9);
        assert!(state.is_extra_innings());
        assert!(!state.is_game_over());

        // Away scores in the 10th, home does not answer.
        state.end_half(5, 6);
        assert_eq!(state.end_half(5, 6), HalfTransition::GameOver { winner: TeamSide::Away });
        assert_eq!(state.max_innings(), 10);
    }

    #[test]
    fn test_max_innings_floor() {
        assert_eq!(InningState::new(1).max_innings(), u16::from(MIN_INNINGS));
    }

    #[test]
    fn test_longest_schedule_still_ends() {
        let mut state = InningState::new(u8::MAX);
        play_to_bottom_of(&mut state, 255);
        assert_eq!(state.end_half(3, 1), HalfTransition::GameOver { winner: TeamSide::Home });
        assert!(state.is_game_over());
        assert_eq!(state.inning(), 255);
    }

    #[test]
    fn test_tie_at_longest_schedule_extends_past_u8() {
        let mut state = InningState::new(u8::MAX);
        play_to_bottom_of(&mut state, 255);
        let t = state.end_half(2, 2);
        assert_eq!(t, HalfTransition::NextHalf { inning: 256, half: Half::Top, extra_innings: true });
        assert_eq!(state.max_innings(), 256);

        state.end_half(2, 2);
        assert_eq!(state.end_half(2, 3), HalfTransition::GameOver { winner: TeamSide::Away });
        assert_eq!(state.inning(), 256);
    }
}
