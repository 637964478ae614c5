use log::{debug, info};
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use yew::functional::Reducible;

pub mod confetti;

/// Game rule defaults
pub mod defaults {
    use super::Player;

    pub const DURATION_SECS: u32 = 60;
    pub const CONFETTI_MS: f64 = 5000.0;
    /// Whose score a timed-out round is written to.
    pub const TIMEOUT_FINALIZES: Player = Player::One;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Recorded times in seconds. `None` until that player's finalization fires.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Score {
    pub player1: Option<f64>,
    pub player2: Option<f64>,
}

impl Score {
    pub fn get(&self, player: Player) -> Option<f64> {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    fn record(&mut self, player: Player, secs: f64) {
        match player {
            Player::One => self.player1 = Some(secs),
            Player::Two => self.player2 = Some(secs),
        }
    }

    /// Seconds shown in the summary; an unrecorded time reads as zero.
    pub fn shown_secs(&self, player: Player) -> f64 {
        self.get(player).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Running,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Tie,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "{} wins!", player),
            Outcome::Tie => write!(f, "It's a tie!"),
        }
    }
}

/// Compare two recorded times. The strictly smaller time wins.
///
/// A player with no recorded time loses to one who has a time; two missing
/// times are a tie. The summary still prints a missing time as `0.00`, but it
/// is not compared as zero: a lone 2.00 s stop beats the empty side rather
/// than losing to it.
pub fn decide_winner(player1: Option<f64>, player2: Option<f64>) -> Outcome {
    match (player1, player2) {
        (Some(p1), Some(p2)) => match p1.partial_cmp(&p2) {
            Some(Ordering::Less) => Outcome::Winner(Player::One),
            Some(Ordering::Greater) => Outcome::Winner(Player::Two),
            _ => Outcome::Tie,
        },
        (Some(_), None) => Outcome::Winner(Player::One),
        (None, Some(_)) => Outcome::Winner(Player::Two),
        (None, None) => Outcome::Tie,
    }
}

/// All mutable state of one game controller.
///
/// Every change goes through a named transition; timestamps are passed in so
/// the state machine never reads the clock itself.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    start_ms: Option<f64>,
    end_ms: Option<f64>,
    elapsed_secs: f64,
    score: Score,
    duration_secs: u32,
    timeout_player: Player,
    instructions_visible: bool,
    confetti_visible: bool,
    confetti_deadline_ms: Option<f64>,
    confetti_bursts: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(defaults::DURATION_SECS)
    }
}

impl GameState {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            start_ms: None,
            end_ms: None,
            elapsed_secs: 0.0,
            score: Score::default(),
            duration_secs,
            timeout_player: defaults::TIMEOUT_FINALIZES,
            instructions_visible: false,
            confetti_visible: false,
            confetti_deadline_ms: None,
            confetti_bursts: 0,
        }
    }

    /// Route timed-out rounds to a different player's score.
    pub fn with_timeout_player(mut self, player: Player) -> Self {
        self.timeout_player = player;
        self
    }

    pub fn phase(&self) -> Phase {
        match (self.start_ms, self.end_ms) {
            (None, _) => Phase::Ready,
            (Some(_), None) => Phase::Running,
            (Some(_), Some(_)) => Phase::Finished,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// Both player buttons share this; they lock once a round has ended.
    pub fn buttons_enabled(&self) -> bool {
        self.phase() != Phase::Finished
    }

    pub fn start_ms(&self) -> Option<f64> {
        self.start_ms
    }

    pub fn end_ms(&self) -> Option<f64> {
        self.end_ms
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn playing(&self) -> bool {
        self.is_running()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn instructions_visible(&self) -> bool {
        self.instructions_visible
    }

    pub fn confetti_visible(&self) -> bool {
        self.confetti_visible
    }

    pub fn confetti_deadline_ms(&self) -> Option<f64> {
        self.confetti_deadline_ms
    }

    /// Bumped on every confetti trigger; the view keys the shower on it so a
    /// re-trigger while visible starts a fresh fall.
    pub fn confetti_bursts(&self) -> u32 {
        self.confetti_bursts
    }

    /// Seconds left on the countdown, never negative.
    pub fn remaining_secs(&self) -> f64 {
        (self.duration_secs as f64 - self.elapsed_secs).max(0.0)
    }

    /// Winner of the finished round, recomputed from the current scores.
    pub fn outcome(&self) -> Option<Outcome> {
        (self.phase() == Phase::Finished)
            .then(|| decide_winner(self.score.player1, self.score.player2))
    }

    pub fn set_duration(&mut self, secs: u32) {
        debug!("Game duration set to {} s", secs);
        self.duration_secs = secs;
    }

    /// A player's button: starts a fresh round, or stops the running one and
    /// records the stop time for that player.
    pub fn start_or_stop(&mut self, player: Player, now_ms: f64) {
        match self.phase() {
            Phase::Ready => {
                info!("{} started a {} s round", player, self.duration_secs);
                self.start_ms = Some(now_ms);
                self.end_ms = None;
                self.elapsed_secs = 0.0;
            }
            Phase::Running => {
                self.elapsed_secs = self.elapsed_at(now_ms);
                self.end_round(now_ms);
                self.finalize(player, now_ms);
            }
            Phase::Finished => {
                debug!("Ignoring {} button, round already over", player);
            }
        }
    }

    /// Timer callback. Returns `true` when this tick ended the round.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if !self.is_running() {
            return false;
        }
        self.elapsed_secs = self.elapsed_at(now_ms);
        if self.elapsed_secs >= self.duration_secs as f64 {
            info!("Round timed out after {:.2} s", self.elapsed_secs);
            self.end_round(now_ms);
            self.finalize(self.timeout_player, now_ms);
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        debug!("Resetting round");
        self.start_ms = None;
        self.end_ms = None;
        self.elapsed_secs = 0.0;
        self.score = Score::default();
    }

    pub fn toggle_instructions(&mut self) {
        self.instructions_visible = !self.instructions_visible;
    }

    /// Show confetti until `CONFETTI_MS` after the latest trigger.
    pub fn trigger_confetti(&mut self, now_ms: f64) {
        let deadline = now_ms + defaults::CONFETTI_MS;
        debug!("Confetti visible until {}", deadline);
        self.confetti_visible = true;
        self.confetti_deadline_ms = Some(deadline);
        self.confetti_bursts = self.confetti_bursts.wrapping_add(1);
    }

    /// Hide timer callback. Only the timer scheduled for the current deadline
    /// may hide the effect; stale timers from earlier triggers are ignored.
    pub fn expire_confetti(&mut self, scheduled_deadline_ms: f64) {
        if self.confetti_deadline_ms == Some(scheduled_deadline_ms) {
            self.confetti_visible = false;
            self.confetti_deadline_ms = None;
        }
    }

    fn elapsed_at(&self, now_ms: f64) -> f64 {
        self.start_ms
            .map(|start| (now_ms - start) / 1000.0)
            .unwrap_or(0.0)
    }

    fn end_round(&mut self, now_ms: f64) {
        self.end_ms = Some(now_ms);
    }

    fn finalize(&mut self, player: Player, now_ms: f64) {
        info!("{} time recorded: {:.2} s", player, self.elapsed_secs);
        self.score.record(player, self.elapsed_secs);
        self.trigger_confetti(now_ms);
        if let Some(outcome) = self.outcome() {
            info!("{}", outcome);
        }
    }
}

/// Messages the UI sends to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameAction {
    Press { player: Player, now_ms: f64 },
    Tick(f64),
    Reset,
    SetDuration(u32),
    ToggleInstructions,
    ExpireConfetti(f64),
}

impl Reducible for GameState {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            GameAction::Press { player, now_ms } => next.start_or_stop(player, now_ms),
            GameAction::Tick(now_ms) => {
                next.tick(now_ms);
            }
            GameAction::Reset => next.reset(),
            GameAction::SetDuration(secs) => next.set_duration(secs),
            GameAction::ToggleInstructions => next.toggle_instructions(),
            GameAction::ExpireConfetti(deadline) => next.expire_confetti(deadline),
        }
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

pub fn format_time_left(remaining_secs: f64) -> String {
    format!("Time Left: {:.2} seconds", remaining_secs)
}

pub fn format_player_time(player: Player, secs: f64) -> String {
    format!("{} time: {:.2} seconds", player, secs)
}

pub fn button_label(player: Player, running: bool) -> String {
    if running {
        format!("{}: Type as fast as you can!", player)
    } else {
        format!("{}: Start", player)
    }
}

/// Wall-clock milliseconds.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected} got {actual}"
        );
    }

    /// Drive the timer at a 10 ms cadence until the round ends.
    fn run_to_timeout(game: &mut GameState, start_ms: f64) -> f64 {
        let mut now = start_ms;
        loop {
            now += 10.0;
            if game.tick(now) {
                return now;
            }
            assert!(now - start_ms < 1_000_000.0, "round never timed out");
        }
    }

    #[test]
    fn fresh_game_is_ready() {
        let game = GameState::default();
        assert_eq!(game.phase(), Phase::Ready);
        assert_eq!(game.duration_secs(), 60);
        assert!(game.buttons_enabled());
        assert!(!game.playing());
        assert_eq!(game.outcome(), None);
    }

    #[test]
    fn timeout_ends_round_and_scores_player_one() {
        for duration in [1, 3, 7] {
            let mut game = GameState::new(duration);
            game.start_or_stop(Player::Two, 1_000.0);
            let end = run_to_timeout(&mut game, 1_000.0);

            assert_eq!(game.phase(), Phase::Finished);
            assert!(!game.playing());
            assert_eq!(game.end_ms(), Some(end));
            let elapsed = game.elapsed_secs();
            assert!(elapsed >= duration as f64);
            assert!(elapsed - duration as f64 <= 0.010 + 1e-9);
            assert_eq!(game.score().player1, Some(elapsed));
            assert_eq!(game.score().player2, None);
            assert!(game.confetti_visible());
        }
    }

    #[test]
    fn timeout_player_is_configurable() {
        let mut game = GameState::new(1).with_timeout_player(Player::Two);
        game.start_or_stop(Player::One, 0.0);
        run_to_timeout(&mut game, 0.0);
        assert_eq!(game.score().player1, None);
        assert!(game.score().player2.is_some());
    }

    #[test]
    fn manual_stop_records_that_player() {
        let mut game = GameState::new(10);
        game.start_or_stop(Player::One, 0.0);
        game.tick(1_500.0);
        game.start_or_stop(Player::Two, 3_250.0);

        assert_eq!(game.phase(), Phase::Finished);
        assert!(!game.buttons_enabled());
        assert_eq!(game.end_ms(), Some(3_250.0));
        assert_close(game.elapsed_secs(), 3.25);
        assert_eq!(game.score().player2, Some(3.25));
        assert_eq!(game.score().player1, None);
    }

    #[test]
    fn presses_after_round_end_are_ignored() {
        let mut game = GameState::new(10);
        game.start_or_stop(Player::One, 0.0);
        game.start_or_stop(Player::One, 2_000.0);
        let finished = game.clone();

        game.start_or_stop(Player::Two, 4_000.0);
        assert!(!game.tick(5_000.0));
        assert_eq!(game, finished);
    }

    #[test]
    fn reset_keeps_duration_and_instructions() {
        let mut game = GameState::new(5);
        game.toggle_instructions();
        game.start_or_stop(Player::One, 0.0);
        game.start_or_stop(Player::One, 1_000.0);

        game.reset();
        assert_eq!(game.start_ms(), None);
        assert_eq!(game.end_ms(), None);
        assert_eq!(game.elapsed_secs(), 0.0);
        assert_eq!(game.score(), Score::default());
        assert_eq!(game.duration_secs(), 5);
        assert!(game.instructions_visible());
        assert_eq!(game.phase(), Phase::Ready);
    }

    #[test]
    fn winner_branches() {
        assert_eq!(
            decide_winner(Some(2.50), Some(3.10)),
            Outcome::Winner(Player::One)
        );
        assert_eq!(
            decide_winner(Some(4.00), Some(1.25)),
            Outcome::Winner(Player::Two)
        );
        assert_eq!(decide_winner(Some(3.33), Some(3.33)), Outcome::Tie);
        assert_eq!(decide_winner(None, None), Outcome::Tie);
        assert_eq!(decide_winner(Some(2.00), None), Outcome::Winner(Player::One));
        assert_eq!(decide_winner(None, Some(1.75)), Outcome::Winner(Player::Two));
        assert_eq!(Outcome::Winner(Player::Two).to_string(), "Player 2 wins!");
        assert_eq!(Outcome::Tie.to_string(), "It's a tie!");
    }

    #[test]
    fn player_two_stopping_a_player_one_round_wins() {
        let mut game = GameState::new(10);
        game.start_or_stop(Player::One, 0.0);
        game.start_or_stop(Player::Two, 4_000.0);

        assert_eq!(game.score().player1, None);
        assert_eq!(game.score().player2, Some(4.0));
        assert_eq!(game.outcome(), Some(Outcome::Winner(Player::Two)));
    }

    #[test]
    fn shortened_duration_applies_on_next_tick() {
        let mut game = GameState::new(10);
        game.start_or_stop(Player::Two, 0.0);
        assert!(!game.tick(3_000.0));
        assert!(game.is_running());

        game.set_duration(2);
        assert!(game.tick(3_010.0));
        assert_eq!(game.phase(), Phase::Finished);
        assert!(!game.playing());
        assert_eq!(game.end_ms(), Some(3_010.0));
        assert_eq!(game.score().player1, Some(3.01));
        assert_eq!(game.score().player2, None);
    }

    #[test]
    fn retrigger_while_visible_starts_new_burst() {
        let mut game = GameState::new(10);
        game.start_or_stop(Player::One, 0.0);
        game.start_or_stop(Player::One, 1_000.0);
        let first = game.confetti_bursts();
        assert!(game.confetti_visible());

        game.reset();
        game.start_or_stop(Player::Two, 2_000.0);
        game.start_or_stop(Player::Two, 3_000.0);
        assert!(game.confetti_visible());
        assert_eq!(game.confetti_bursts(), first + 1);
        assert_eq!(game.confetti_deadline_ms(), Some(8_000.0));
    }

    #[test]
    fn confetti_window_extends_from_last_trigger() {
        let mut game = GameState::default();
        game.trigger_confetti(0.0);
        let first = game.confetti_deadline_ms().unwrap();
        game.trigger_confetti(3_000.0);
        let second = game.confetti_deadline_ms().unwrap();

        game.expire_confetti(first);
        assert!(game.confetti_visible());
        assert_eq!(second, 8_000.0);

        game.expire_confetti(second);
        assert!(!game.confetti_visible());
        assert_eq!(game.confetti_deadline_ms(), None);
    }

    #[test]
    fn single_player_stop_scenario() {
        let mut game = GameState::new(5);
        game.start_or_stop(Player::One, 0.0);
        game.tick(1_000.0);
        game.start_or_stop(Player::One, 2_000.0);

        let score = game.score();
        assert_eq!(
            format_player_time(Player::One, score.shown_secs(Player::One)),
            "Player 1 time: 2.00 seconds"
        );
        assert_eq!(
            format_player_time(Player::Two, score.shown_secs(Player::Two)),
            "Player 2 time: 0.00 seconds"
        );
        assert_eq!(
            game.outcome().map(|o| o.to_string()).as_deref(),
            Some("Player 1 wins!")
        );
    }

    #[test]
    fn countdown_never_goes_negative() {
        let mut game = GameState::new(2);
        game.start_or_stop(Player::One, 0.0);
        game.tick(500.0);
        assert_eq!(format_time_left(game.remaining_secs()), "Time Left: 1.50 seconds");
        game.tick(2_040.0);
        assert_eq!(game.remaining_secs(), 0.0);
    }

    #[test]
    fn labels_follow_phase() {
        assert_eq!(button_label(Player::One, false), "Player 1: Start");
        assert_eq!(
            button_label(Player::Two, true),
            "Player 2: Type as fast as you can!"
        );
    }

    #[test]
    fn reducer_skips_noop_actions() {
        let state = Rc::new(GameState::default());
        let same = state.clone().reduce(GameAction::Tick(100.0));
        assert!(Rc::ptr_eq(&state, &same));

        let toggled = state.clone().reduce(GameAction::ToggleInstructions);
        assert!(toggled.instructions_visible());
        let pressed = toggled.reduce(GameAction::Press {
            player: Player::One,
            now_ms: 0.0,
        });
        assert!(pressed.is_running());
    }
}
