use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of one playthrough as seen by the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// No board yet, intents are rejected.
    Initializing,
    /// Board shown, nothing played yet.
    Ready,
    Playing,
    Won,
    Lost,
}

impl SessionStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl From<EngineState> for SessionStatus {
    fn from(state: EngineState) -> Self {
        match state {
            EngineState::Ready => Self::Ready,
            EngineState::Active => Self::Playing,
            EngineState::Won => Self::Won,
            EngineState::Lost => Self::Lost,
        }
    }
}

/// Result of a tap, routed by the flag-mode switch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    Reveal(RevealOutcome),
    Flag(FlagOutcome),
}

/// One game from board setup to win or loss, plus the clock and flag budget around it.
///
/// The session owns its grid and at most one tick handle from `S`. The handle
/// is dropped as soon as the game stops being played (win, loss, restart,
/// difficulty change) and with the session itself.
pub struct GameSession<S: TickScheduler = ManualTicks> {
    difficulty: Difficulty,
    engine: Option<PlayEngine>,
    elapsed_secs: u32,
    flag_mode: bool,
    pending_outcome: Option<GameOutcome>,
    outcome_emitted: bool,
    rng: SmallRng,
    scheduler: S,
    timer: Option<S::Handle>,
}

impl<S: TickScheduler> GameSession<S> {
    /// A session in the initializing state; call [`GameSession::initialize_board`] to play.
    pub fn new(difficulty: Difficulty, scheduler: S) -> Self {
        Self::with_seed(difficulty, scheduler, rand::random())
    }

    /// Same as `new`, with reproducible mine layouts.
    pub fn with_seed(difficulty: Difficulty, scheduler: S, seed: u64) -> Self {
        Self {
            difficulty,
            engine: None,
            elapsed_secs: 0,
            flag_mode: false,
            pending_outcome: None,
            outcome_emitted: false,
            rng: SmallRng::seed_from_u64(seed),
            scheduler,
            timer: None,
        }
    }

    /// Builds a fresh board for the current difficulty. One-shot boards get their mines now,
    /// every other board on the first reveal.
    pub fn initialize_board(&mut self) {
        self.reset();

        let mut engine = PlayEngine::new(self.difficulty.size(), self.difficulty.mines());
        if self.difficulty.mode() == LayoutMode::OneShot {
            let generator = OneShotGenerator::new(self.rng.random());
            if let Err(err) = engine.lay_mines(generator) {
                log::error!("Failed to lay one-shot board: {}", err);
            }
        }
        self.engine = Some(engine);
        log::debug!(
            "Board initialized: {} {}x{}, {} mines",
            self.difficulty.name(),
            self.difficulty.rows(),
            self.difficulty.cols(),
            self.difficulty.mines()
        );
    }

    /// Drops the board, clock and pending outcome, back to initializing.
    pub fn reset(&mut self) {
        self.stop_timer();
        self.engine = None;
        self.elapsed_secs = 0;
        self.pending_outcome = None;
        self.outcome_emitted = false;
    }

    /// Discards the current game and deals a new one.
    pub fn restart(&mut self) {
        log::debug!("Restarting {} game", self.difficulty.name());
        self.initialize_board();
    }

    /// Switches boards; returns `false` when `difficulty` is already being played.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if difficulty == self.difficulty && self.engine.is_some() {
            return false;
        }
        self.difficulty = difficulty;
        self.restart();
        true
    }

    /// Switches to a preset board by key.
    pub fn select_difficulty(&mut self, key: DifficultyKey) -> ConfigResult<bool> {
        let difficulty = key.preset().ok_or(ConfigError::MissingCustom)?;
        Ok(self.set_difficulty(difficulty))
    }

    /// Whether a restart now would throw away a game in progress.
    pub fn would_discard_progress(&self) -> bool {
        self.status() == SessionStatus::Playing
    }

    pub fn status(&self) -> SessionStatus {
        self.engine
            .as_ref()
            .map_or(SessionStatus::Initializing, |engine| engine.state().into())
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let engine = self.engine.as_mut().ok_or(GameError::NotInitialized)?;
        if !engine.can_reveal(coords)? {
            return Ok(RevealOutcome::NoChange);
        }
        if !engine.mines_laid() {
            let generator =
                SafeZoneGenerator::new(self.rng.random(), coords, self.difficulty.mines());
            engine.lay_mines(generator)?;
        }
        let outcome = engine.reveal(coords)?;
        self.sync_clock();
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let engine = self.engine.as_mut().ok_or(GameError::NotInitialized)?;
        let outcome = engine.toggle_flag(coords)?;
        self.sync_clock();
        Ok(outcome)
    }

    /// A tap on a cell: flags in flag mode, reveals otherwise.
    pub fn tap(&mut self, coords: Coord2) -> Result<TapOutcome> {
        if self.flag_mode {
            self.toggle_flag(coords).map(TapOutcome::Flag)
        } else {
            self.reveal(coords).map(TapOutcome::Reveal)
        }
    }

    pub fn set_flag_mode(&mut self, flag_mode: bool) {
        self.flag_mode = flag_mode;
    }

    pub fn flag_mode(&self) -> bool {
        self.flag_mode
    }

    /// One second passed. Only counts while playing; returns whether the clock moved.
    pub fn tick(&mut self) -> bool {
        if self.status() == SessionStatus::Playing {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
            true
        } else {
            false
        }
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.engine.as_ref().map(PlayEngine::grid)
    }

    pub fn engine(&self) -> Option<&PlayEngine> {
        self.engine.as_ref()
    }

    pub fn flags_placed(&self) -> CellCount {
        self.engine.as_ref().map_or(0, PlayEngine::flags_placed)
    }

    pub fn flags_remaining(&self) -> CellCount {
        self.engine
            .as_ref()
            .map_or(self.difficulty.mines(), PlayEngine::flags_remaining)
    }

    pub fn timer_active(&self) -> bool {
        self.timer.is_some()
    }

    /// The result of the finished game. Yields it once, `None` afterwards or while unfinished.
    pub fn take_outcome(&mut self) -> Option<GameOutcome> {
        self.pending_outcome.take()
    }

    /// Hands the finished game to `recorder`, if there is one not yet reported.
    pub fn report_to<R: StatsRecorder + ?Sized>(&mut self, recorder: &mut R) -> Option<GameStats> {
        self.take_outcome()
            .map(|outcome| recorder.record_outcome(&outcome))
    }

    /// Starts the clock on the first move and stops it on the last one.
    fn sync_clock(&mut self) {
        match self.status() {
            SessionStatus::Playing if self.timer.is_none() => {
                log::debug!("Timer started");
                self.timer = Some(self.scheduler.start());
            }
            status @ (SessionStatus::Won | SessionStatus::Lost) => {
                self.stop_timer();
                if !self.outcome_emitted {
                    self.outcome_emitted = true;
                    self.pending_outcome = Some(GameOutcome {
                        won: status == SessionStatus::Won,
                        difficulty: self.difficulty.key(),
                        elapsed_secs: self.elapsed_secs,
                    });
                }
            }
            _ => {}
        }
    }

    fn stop_timer(&mut self) {
        if self.timer.take().is_some() {
            log::debug!("Timer cancelled at {}s", self.elapsed_secs);
        }
    }
}
