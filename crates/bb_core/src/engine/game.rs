//! Game orchestrator
//!
//! `GameState` owns the two teams, the count, the bases and the inning
//! lifecycle, and exposes the small gameplay surface the input layer calls:
//! [`GameState::pitch`], [`GameState::swing_bat`], [`GameState::take_pitch`]
//! and [`GameState::game_summary`].
//!
//! Every call runs to completion synchronously. The gameplay surface never
//! fails: a swing or take before `initialize_game` (or after the final out)
//! returns the default outcome and leaves the state untouched.
//!
//! A `GameState` has a single owner. To use it from several threads, route all
//! calls through one task or wrap it in one mutex.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::bases::{self, BaseState};
use super::config::GameConfig;
use super::count::{CountEvent, CountTracker, OutEvent};
use super::inning::{HalfTransition, InningState};
use super::listener::{EventBus, GameListener};
use super::resolver::PlateAppearanceResolver;
use crate::error::GameError;
use crate::models::{
    GameEvent, GameSummary, Half, PitchOutcome, PlateAppearanceEnd, Player, PlayerId, Team,
    TeamSide,
};

/// Where the pitch crosses the plate, normalized to the strike zone
/// (`0..=1` on both axes is inside the zone).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PitchLocation {
    pub x: f64,
    pub y: f64,
}

impl PitchLocation {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn in_zone(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

/// Animation cue returned by [`GameState::pitch`]. Purely advisory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchCall {
    pub location: PitchLocation,
    pub speed: f64,
    pub pitcher: Option<PlayerId>,
}

#[derive(Debug, Clone)]
struct Matchup {
    home: Team,
    away: Team,
}

impl Matchup {
    fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    fn team_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    fn batter(&self, half: Half) -> &Player {
        self.team(half.batting_side()).current_batter()
    }

    fn pitcher(&self, half: Half) -> &Player {
        self.team(half.fielding_side()).pitcher()
    }
}

/// The game orchestrator.
#[derive(Debug)]
pub struct GameState {
    config: GameConfig,
    resolver: PlateAppearanceResolver,
    rng: ChaCha8Rng,
    matchup: Option<Matchup>,
    count: CountTracker,
    bases: BaseState,
    innings: InningState,
    bus: EventBus,
    pitch_deadline: Option<Instant>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::from_valid_config(GameConfig::default(), Vec::new())
    }
}

impl GameState {
    /// Create an uninitialized game. Fails only on an invalid config.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_listeners(config, Vec::new())
    }

    /// Create an uninitialized game that publishes to `listeners`.
    pub fn with_listeners(
        config: GameConfig,
        listeners: Vec<Box<dyn GameListener>>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::from_valid_config(config, listeners))
    }

    fn from_valid_config(config: GameConfig, listeners: Vec<Box<dyn GameListener>>) -> Self {
        Self {
            resolver: PlateAppearanceResolver::new(config.resolver.clone()),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            matchup: None,
            count: CountTracker::new(),
            bases: BaseState::empty(),
            innings: InningState::new(config.max_innings),
            bus: EventBus::new(listeners),
            pitch_deadline: None,
            config,
        }
    }

    pub fn subscribe(&mut self, listener: impl GameListener + 'static) {
        self.bus.subscribe(Box::new(listener));
    }

    /// Start a game between `home` and `away`. Scores and batting orders are
    /// reset; the away team bats first.
    pub fn initialize_game(&mut self, mut home: Team, mut away: Team) {
        home.reset_for_game();
        away.reset_for_game();
        for team in [&home, &away] {
            if !team.has_pitcher() {
                log::debug!("{} has no pitcher listed, using {}", team.name, team.pitcher().name);
            }
        }
        log::info!(
            "Game start: {} at {} ({} innings, seed {})",
            away.name,
            home.name,
            self.config.max_innings,
            self.config.seed
        );

        self.matchup = Some(Matchup { home, away });
        self.count.reset_half_inning();
        self.bases.clear();
        self.innings = InningState::new(self.config.max_innings);
        self.pitch_deadline = None;
    }

    // ========================
    // Gameplay surface
    // ========================

    /// Start the pitch animation. Does not touch the count, outs or score.
    pub fn pitch(&mut self, location: PitchLocation, speed: f64) -> PitchCall {
        self.pitch_deadline =
            Some(Instant::now() + Duration::from_millis(self.config.pitch_animation_ms));
        PitchCall { location, speed, pitcher: self.current_pitcher().map(|p| p.id) }
    }

    /// Whether the cosmetic pitch animation window is still open. Gameplay
    /// never waits on this.
    pub fn is_pitch_in_progress(&self) -> bool {
        self.pitch_deadline.is_some_and(|deadline| Instant::now() < deadline)
    }

    /// Swing at the current pitch using the game's own seeded RNG.
    pub fn swing_bat(&mut self, timing: f64, power: f64) -> PitchOutcome {
        if !self.is_playable("swing") {
            return PitchOutcome::Strike;
        }
        let outcome = self.swing_outcome(timing, power, None::<&mut ChaCha8Rng>);
        self.apply_outcome(outcome);
        outcome
    }

    /// Swing at the current pitch, drawing from `rng`.
    pub fn swing_bat_with<R: Rng + ?Sized>(&mut self, rng: &mut R, timing: f64, power: f64) -> PitchOutcome {
        if !self.is_playable("swing") {
            return PitchOutcome::Strike;
        }
        let outcome = self.swing_outcome(timing, power, Some(rng));
        self.apply_outcome(outcome);
        outcome
    }

    /// Take the current pitch using the game's own seeded RNG.
    pub fn take_pitch(&mut self) -> PitchOutcome {
        if !self.is_playable("take") {
            return PitchOutcome::Ball;
        }
        let outcome = self.take_outcome(None::<&mut ChaCha8Rng>);
        self.apply_outcome(outcome);
        outcome
    }

    /// Take the current pitch, drawing from `rng`.
    pub fn take_pitch_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> PitchOutcome {
        if !self.is_playable("take") {
            return PitchOutcome::Ball;
        }
        let outcome = self.take_outcome(Some(rng));
        self.apply_outcome(outcome);
        outcome
    }

    /// Apply an already-resolved outcome through the same count, base and
    /// inning wiring as a swing. Returns `false` (and changes nothing) when the
    /// game is not in progress.
    pub fn record_outcome(&mut self, outcome: PitchOutcome) -> bool {
        if !self.is_playable("recorded outcome") {
            return false;
        }
        self.apply_outcome(outcome);
        true
    }

    /// Snapshot for the UI. Has no side effects.
    pub fn game_summary(&self) -> GameSummary {
        let half = self.innings.half();
        let matchup = self.matchup.as_ref();
        let batting = matchup.map(|m| m.team(half.batting_side()));

        let slots = *self.bases.slots();
        let bases = slots.map(|slot| {
            slot.and_then(|id| batting.and_then(|team| team.player(id)))
                .map(|p| p.display_name().to_string())
        });

        GameSummary {
            inning: self.innings.inning(),
            half,
            max_innings: self.innings.max_innings(),
            balls: self.count.balls(),
            strikes: self.count.strikes(),
            outs: self.count.outs(),
            home_score: matchup.map_or(0, |m| m.home.score()),
            away_score: matchup.map_or(0, |m| m.away.score()),
            bases,
            batter_name: self.current_batter().map(|p| p.display_name().to_string()),
            pitcher_name: self.current_pitcher().map(|p| p.display_name().to_string()),
            game_over: self.innings.is_game_over(),
            winner_name: self.winner().map(|t| t.name.clone()),
        }
    }

    // ========================
    // Accessors
    // ========================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.matchup.is_some()
    }

    pub fn is_game_over(&self) -> bool {
        self.innings.is_game_over()
    }

    pub fn count(&self) -> &CountTracker {
        &self.count
    }

    pub fn bases(&self) -> &BaseState {
        &self.bases
    }

    pub fn inning_state(&self) -> &InningState {
        &self.innings
    }

    pub fn home(&self) -> Option<&Team> {
        self.matchup.as_ref().map(|m| &m.home)
    }

    pub fn away(&self) -> Option<&Team> {
        self.matchup.as_ref().map(|m| &m.away)
    }

    pub fn batting_team(&self) -> Option<&Team> {
        let side = self.innings.batting_side();
        self.matchup.as_ref().map(|m| m.team(side))
    }

    pub fn fielding_team(&self) -> Option<&Team> {
        let side = self.innings.fielding_side();
        self.matchup.as_ref().map(|m| m.team(side))
    }

    pub fn current_batter(&self) -> Option<&Player> {
        self.batting_team().map(Team::current_batter)
    }

    pub fn current_pitcher(&self) -> Option<&Player> {
        self.fielding_team().map(Team::pitcher)
    }

    pub fn winner(&self) -> Option<&Team> {
        let side = self.innings.winner()?;
        self.matchup.as_ref().map(|m| m.team(side))
    }

    // ========================
    // State machine
    // ========================

    /// Whether a pitch may be played right now.
    fn is_playable(&self, action: &str) -> bool {
        if self.matchup.is_none() {
            log::warn!("{} before initialize_game ignored", action);
            return false;
        }
        if self.innings.is_game_over() {
            log::warn!("{} after game over ignored", action);
            return false;
        }
        true
    }

    /// Resolve a swing against `rng`, or the game's own RNG when `None`.
    fn swing_outcome<R: Rng + ?Sized>(&mut self, timing: f64, power: f64, rng: Option<&mut R>) -> PitchOutcome {
        let half = self.innings.half();
        let batter = self.matchup.as_ref().map(|m| m.batter(half));
        let pitcher = self.matchup.as_ref().map(|m| m.pitcher(half));
        match rng {
            Some(rng) => self.resolver.resolve_swing(batter, pitcher, timing, power, rng),
            None => self.resolver.resolve_swing(batter, pitcher, timing, power, &mut self.rng),
        }
    }

    fn take_outcome<R: Rng + ?Sized>(&mut self, rng: Option<&mut R>) -> PitchOutcome {
        let pitcher = self.matchup.as_ref().map(|m| m.pitcher(self.innings.half()));
        match rng {
            Some(rng) => self.resolver.resolve_take(pitcher, rng),
            None => self.resolver.resolve_take(pitcher, &mut self.rng),
        }
    }

    fn apply_outcome(&mut self, outcome: PitchOutcome) {
        let Some(matchup) = self.matchup.as_mut() else {
            return;
        };
        let half = self.innings.half();
        let batting_side = half.batting_side();
        let batter = matchup.batter(half).id;
        let pitcher = matchup.pitcher(half).id;

        let mut plate_appearance = None;
        let mut side_retired = false;
        let mut advance = None;

        match outcome {
            PitchOutcome::Ball => {
                if self.count.record_ball() == CountEvent::Walk {
                    plate_appearance = Some(PlateAppearanceEnd::Walk);
                    advance = Some(bases::award_walk(&self.bases, batter, self.config.walk_advancement));
                }
            }
            PitchOutcome::Strike => {
                if self.count.record_strike() == CountEvent::Strikeout {
                    plate_appearance = Some(PlateAppearanceEnd::Strikeout);
                    side_retired = self.count.record_out() == OutEvent::SideRetired;
                }
            }
            PitchOutcome::Foul => {
                self.count.record_foul();
            }
            PitchOutcome::Hit(hit) => {
                self.count.reset_plate_appearance();
                plate_appearance = Some(PlateAppearanceEnd::Hit(hit));
                advance = Some(bases::advance(&self.bases, batter, hit.bases()));
            }
            PitchOutcome::InPlayOut(kind) => {
                self.count.reset_plate_appearance();
                plate_appearance = Some(PlateAppearanceEnd::Out(kind));
                side_retired = self.count.record_out() == OutEvent::SideRetired;
            }
        }

        let mut runs_scored = 0;
        if let Some(advance) = advance {
            runs_scored = advance.runs_scored();
            self.bases = advance.bases;
            if runs_scored > 0 {
                matchup.team_mut(batting_side).add_runs(u32::from(runs_scored));
            }
        }
        if plate_appearance.is_some() {
            matchup.team_mut(batting_side).advance_batting_order();
        }

        log::debug!(
            "{:?} {} | batter {} vs {} | {:?} | runs {}",
            half,
            self.innings.inning(),
            batter,
            pitcher,
            outcome,
            runs_scored
        );

        let mut events = Vec::with_capacity(4);
        events.push(GameEvent::PitchResult { outcome, batter, pitcher, plate_appearance, runs_scored });
        if runs_scored > 0 {
            events.push(GameEvent::ScoreUpdate {
                home: matchup.home.score(),
                away: matchup.away.score(),
            });
        }

        if side_retired {
            self.bases.clear();
            self.count.reset_half_inning();

            match self.innings.end_half(matchup.home.score(), matchup.away.score()) {
                HalfTransition::NextHalf { inning, half, extra_innings } => {
                    log::info!(
                        "{:?} {} ({}) | AWAY {} - HOME {}",
                        half,
                        inning,
                        if extra_innings { "extra innings" } else { "regulation" },
                        matchup.away.score(),
                        matchup.home.score()
                    );
                    events.push(GameEvent::InningChange { inning, half });
                }
                HalfTransition::GameOver { winner } => {
                    let winner_name = matchup.team(winner).name.clone();
                    log::info!(
                        "Final: AWAY {} - HOME {}, {} win",
                        matchup.away.score(),
                        matchup.home.score(),
                        winner_name
                    );
                    events.push(GameEvent::GameOver { winner, winner_name });
                }
            }
        }

        self.bus.publish(&events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HitType, OutType, PlayerStats, Position};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn team(id: &str, base_id: u32) -> Team {
        let roster = Position::ALL
            .iter()
            .enumerate()
            .map(|(i, pos)| {
                Player::new(base_id + i as u32, format!("{id}-{}", pos.code()), *pos, PlayerStats::default())
            })
            .collect();
        Team::new(id, id.to_uppercase(), roster).unwrap()
    }

    fn recorded_game() -> (GameState, Rc<RefCell<Vec<GameEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut game = GameState::new(GameConfig::short_game()).unwrap();
        game.subscribe(move |e: &GameEvent| sink.borrow_mut().push(e.clone()));
        game.initialize_game(team("home", 100), team("away", 200));
        (game, events)
    }

    #[test]
    fn test_uninitialized_game_returns_defaults() {
        let mut game = GameState::default();
        let before = game.game_summary();
        assert_eq!(game.swing_bat(0.5, 0.5), PitchOutcome::Strike);
        assert_eq!(game.take_pitch(), PitchOutcome::Ball);
        assert!(!game.record_outcome(PitchOutcome::Hit(HitType::Single)));
        assert_eq!(game.game_summary(), before);
        assert_eq!(before.strikes, 0);
        assert_eq!(before.balls, 0);
    }

    #[test]
    fn test_initialize_sets_first_matchup() {
        let (game, _) = recorded_game();
        assert_eq!(game.current_batter().unwrap().id, PlayerId(200));
        assert_eq!(game.current_pitcher().unwrap().position, Position::Pitcher);
        assert_eq!(game.current_pitcher().unwrap().id, PlayerId(100));
        assert_eq!(game.inning_state().half(), Half::Top);
    }

    #[test]
    fn test_pitch_is_advisory() {
        let (mut game, events) = recorded_game();
        let before = game.game_summary();
        assert!(!game.is_pitch_in_progress());
        let call = game.pitch(PitchLocation::new(0.5, 0.5), 92.0);
        assert!(game.is_pitch_in_progress());
        assert_eq!(call.pitcher, Some(PlayerId(100)));
        assert!(call.location.in_zone());
        assert_eq!(game.game_summary(), before);
        assert!(events.borrow().is_empty());

        // Swings and takes right away are resolved without waiting on the animation.
        assert!(game.record_outcome(PitchOutcome::Strike));
        assert_eq!(game.count().strikes(), 1);
        game.pitch(PitchLocation::new(1.4, 0.2), 88.0);
        game.swing_bat(0.5, 0.5);
        game.pitch(PitchLocation::new(0.5, 0.5), 90.0);
        game.take_pitch();
        let pitches = events.borrow().iter().filter(|e| matches!(e, GameEvent::PitchResult { .. })).count();
        assert_eq!(pitches, 3);
    }

    #[test]
    fn test_zero_length_pitch_window() {
        let mut config = GameConfig::short_game();
        config.pitch_animation_ms = 0;
        let mut game = GameState::new(config).unwrap();
        game.initialize_game(team("home", 100), team("away", 200));
        game.pitch(PitchLocation::default(), 80.0);
        assert!(!game.is_pitch_in_progress());
    }

    #[test]
    fn test_longest_schedule_game_ends() {
        let mut config = GameConfig::standard();
        config.max_innings = u8::MAX;
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut game = GameState::new(config).unwrap();
        game.subscribe(move |e: &GameEvent| sink.borrow_mut().push(e.clone()));
        game.initialize_game(team("home", 100), team("away", 200));

        game.record_outcome(PitchOutcome::Hit(HitType::HomeRun));
        let mut outs = 0;
        while !game.is_game_over() && outs < 2_000 {
            game.record_outcome(PitchOutcome::InPlayOut(OutType::Groundout));
            outs += 1;
        }

        assert!(game.is_game_over());
        assert_eq!(outs, 255 * 6);
        assert_eq!(game.inning_state().inning(), 255);
        assert_eq!(game.winner().unwrap().id, "away");
        assert!(matches!(events.borrow().last(), Some(GameEvent::GameOver { winner: TeamSide::Away, .. })));
    }

    #[test]
    fn test_roster_without_pitcher_still_plays() {
        let catchers: Vec<Player> = (0..3)
            .map(|i| Player::new(300 + i, format!("C{i}"), Position::Catcher, PlayerStats::default()))
            .collect();
        let home = Team::new("home", "HOME", catchers).unwrap();
        let mut game = GameState::new(GameConfig::short_game()).unwrap();
        game.initialize_game(home, team("away", 200));
        assert_eq!(game.current_pitcher().unwrap().id, PlayerId(300));
        assert_ne!(game.swing_bat(0.5, 0.5), PitchOutcome::Ball);
        assert_eq!(game.game_summary().pitcher_name.as_deref(), Some("C0"));
    }

    #[test]
    fn test_home_run_publishes_score_update() {
        let (mut game, events) = recorded_game();
        game.record_outcome(PitchOutcome::Hit(HitType::HomeRun));

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], GameEvent::PitchResult { runs_scored: 1, .. }));
        assert_eq!(events[1], GameEvent::ScoreUpdate { home: 0, away: 1 });
        assert_eq!(game.away().unwrap().score(), 1);
        assert_eq!(game.away().unwrap().batting_cursor(), 1);
    }

    #[test]
    fn test_foul_does_not_end_plate_appearance() {
        let (mut game, _) = recorded_game();
        game.record_outcome(PitchOutcome::Strike);
        game.record_outcome(PitchOutcome::Strike);
        for _ in 0..5 {
            game.record_outcome(PitchOutcome::Foul);
        }
        assert_eq!(game.count().strikes(), 2);
        assert_eq!(game.away().unwrap().batting_cursor(), 0);
    }

    #[test]
    fn test_side_retired_event_order() {
        let (mut game, events) = recorded_game();
        game.record_outcome(PitchOutcome::Hit(HitType::Double));
        game.record_outcome(PitchOutcome::InPlayOut(OutType::Flyout));
        game.record_outcome(PitchOutcome::InPlayOut(OutType::Groundout));
        events.borrow_mut().clear();

        game.record_outcome(PitchOutcome::InPlayOut(OutType::Lineout));
        let events = events.borrow();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            GameEvent::PitchResult { plate_appearance: Some(PlateAppearanceEnd::Out(OutType::Lineout)), .. }
        ));
        assert_eq!(events[1], GameEvent::InningChange { inning: 1, half: Half::Bottom });
        assert!(game.bases().is_empty());
        assert_eq!(game.current_batter().unwrap().id, PlayerId(100));
        assert_eq!(game.current_pitcher().unwrap().id, PlayerId(200));
    }

    #[test]
    fn test_game_over_stops_play() {
        let (mut game, events) = recorded_game();
        // Away homers in the first, then everyone makes outs for three innings.
        game.record_outcome(PitchOutcome::Hit(HitType::HomeRun));
        while !game.is_game_over() {
            game.record_outcome(PitchOutcome::InPlayOut(OutType::Groundout));
        }
        let summary = game.game_summary();
        assert!(summary.game_over);
        assert_eq!(summary.winner_name.as_deref(), Some("AWAY"));
        assert_eq!(summary.inning, 3);

        let last = events.borrow().last().cloned();
        assert_eq!(last, Some(GameEvent::GameOver { winner: TeamSide::Away, winner_name: "AWAY".into() }));

        let n = events.borrow().len();
        assert_eq!(game.swing_bat(0.5, 0.5), PitchOutcome::Strike);
        assert_eq!(events.borrow().len(), n);
    }

    #[test]
    fn test_summary_names_runners() {
        let (mut game, _) = recorded_game();
        game.record_outcome(PitchOutcome::Hit(HitType::Triple));
        let summary = game.game_summary();
        assert_eq!(summary.bases[2].as_deref(), Some("away-P"));
        assert_eq!(summary.runners_on(), 1);
        assert_eq!(summary, game.game_summary());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameConfig::default();
        config.max_innings = 1;
        assert!(matches!(GameState::new(config), Err(GameError::Config(_))));
    }
}
