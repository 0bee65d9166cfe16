use std::time::Duration;

use crate::config::GameConfig;
use crate::game::{GameState, Heading, TickOutcome};
use crate::input::Action;
use crate::storage::HighScoreStore;
use crate::ticker::Ticker;

pub const MSG_READY: &str = "Press Start to Play!";
pub const MSG_PLAYING: &str = "Game On!";
pub const MSG_PAUSED: &str = "Game Paused!";
pub const MSG_NEW_HIGH: &str = " New High Score!";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Running,
    Paused,
    Over,
}

/// Owns the round in play, the tick timer and the score bookkeeping.
pub struct Controller<S: HighScoreStore> {
    config: GameConfig,
    state: GameState,
    phase: Phase,
    ticker: Ticker,
    high_score: u32,
    store: S,
    message: String,
}

impl<S: HighScoreStore> Controller<S> {
    pub fn new(config: GameConfig, store: S) -> Self {
        let high_score = store.load();
        tracing::info!(high_score, "loaded high score");
        let state = GameState::new(config.board(), config.start, config.speed_curve());
        Self {
            config,
            state,
            phase: Phase::Ready,
            ticker: Ticker::default(),
            high_score,
            store,
            message: MSG_READY.to_owned(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cell_size(&self) -> u32 {
        self.config.cell_size
    }

    /// The interval the timer is armed at, or `None` while stopped.
    #[cfg(test)]
    pub fn armed_interval(&self) -> Option<Duration> {
        self.ticker.interval()
    }

    /// Replaces the running timer with one at `interval`.
    pub fn set_tick_interval(&mut self, interval: Duration) {
        self.ticker.disarm();
        self.state.set_interval(interval);
        self.ticker.arm(interval);
    }

    /// Ready or paused: run. Over: start a fresh round. Running: nothing.
    pub fn start(&mut self) {
        match self.phase {
            Phase::Running => return,
            Phase::Over => self.reinitialize(),
            Phase::Ready | Phase::Paused => {}
        }
        self.phase = Phase::Running;
        self.message = MSG_PLAYING.to_owned();
        self.set_tick_interval(self.state.interval());
        tracing::info!(interval_ms = self.state.interval().as_millis() as u64, "running");
    }

    pub fn pause(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.ticker.disarm();
        self.phase = Phase::Paused;
        self.message = MSG_PAUSED.to_owned();
        tracing::info!(score = self.score(), "paused");
    }

    /// Pause when running, otherwise resume; a finished game stays finished.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Ready | Phase::Paused => self.start(),
            Phase::Over => {}
        }
    }

    /// Fresh round from any phase, straight into running.
    pub fn restart(&mut self) {
        self.ticker.disarm();
        self.reinitialize();
        self.start();
    }

    pub fn steer(&mut self, heading: Heading) {
        if !self.state.steer(heading) {
            tracing::trace!(?heading, "reversal ignored");
        }
    }

    /// Keyboard entry point. Once the game is over only the start key counts.
    pub fn handle_key(&mut self, action: Action) {
        if self.phase == Phase::Over && action != Action::Start {
            return;
        }
        self.apply(action);
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Steer(heading) => self.steer(heading),
            Action::TogglePause => self.toggle_pause(),
            Action::Start => self.start(),
            Action::Restart => self.restart(),
        }
    }

    /// Feeds frame time to the timer and runs the update step when it fires.
    pub fn advance(&mut self, dt: Duration) -> Option<TickOutcome> {
        if self.phase != Phase::Running || !self.ticker.poll(dt) {
            return None;
        }
        Some(self.step())
    }

    /// One update step, bypassing the timer.
    pub fn step(&mut self) -> TickOutcome {
        let outcome = self.state.tick();
        match outcome {
            TickOutcome::Moved => {}
            TickOutcome::Ate { score, speed_up } => {
                tracing::debug!(score, "food eaten");
                if let Some(interval) = speed_up {
                    tracing::info!(score, interval_ms = interval.as_millis() as u64, "speeding up");
                    self.set_tick_interval(interval);
                }
            }
            TickOutcome::Collided { score } => self.finish(score, false),
            TickOutcome::BoardFilled { score } => self.finish(score, true),
        }
        outcome
    }

    fn finish(&mut self, score: u32, filled: bool) {
        self.ticker.disarm();
        self.phase = Phase::Over;
        self.message = if filled {
            format!("Board cleared! Your score: {}", score)
        } else {
            format!("Game Over! Your score: {}", score)
        };
        tracing::info!(score, filled, "game over");

        if score > self.high_score {
            self.high_score = score;
            self.store.save(score);
            self.message.push_str(MSG_NEW_HIGH);
            tracing::info!(high_score = score, "new high score");
        }
    }

    fn reinitialize(&mut self) {
        self.state = GameState::new(
            self.config.board(),
            self.config.start,
            self.config.speed_curve(),
        );
        self.phase = Phase::Ready;
        self.message = MSG_READY.to_owned();
    }
}
