//! Observer implementations for training pipelines

use std::sync::{Arc, Mutex};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    connect4::{Board, Outcome},
    ports::Observer,
};

/// Progress bar observer - shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    fn tally(&self) -> String {
        format!("{} D:{} L:{}", self.wins, self.draws, self.losses)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: Outcome, _moves: usize) -> Result<()> {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Tie => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.tally());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.tally());
        }
        Ok(())
    }
}

/// Metrics observer - tracks outcome counts and game lengths
#[derive(Debug, Default)]
pub struct MetricsObserver {
    wins: usize,
    draws: usize,
    losses: usize,
    total_games: usize,
    move_counts: Vec<usize>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            count as f64 / self.total_games as f64
        }
    }

    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    /// Average number of plies per finished game
    pub fn avg_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games,
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            win_rate: self.win_rate(),
            draw_rate: self.draw_rate(),
            loss_rate: self.loss_rate(),
            avg_game_length: self.avg_game_length(),
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub avg_game_length: f64,
}

impl Observer for MetricsObserver {
    fn on_game_end(&mut self, _game_num: usize, outcome: Outcome, moves: usize) -> Result<()> {
        self.total_games += 1;
        self.move_counts.push(moves);
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Tie => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
        Ok(())
    }
}

/// Writes a running tally to the log every `interval` games
pub struct LogObserver {
    interval: usize,
    total_games: usize,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl LogObserver {
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
            total_games: 0,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }
}

impl Observer for LogObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        self.total_games = total_games;
        log::info!("training for {total_games} games");
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: Outcome, _moves: usize) -> Result<()> {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Tie => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
        let played = game_num + 1;
        if played % self.interval == 0 {
            log::info!(
                "{played}/{} games: {} wins, {} draws, {} losses",
                self.total_games,
                self.wins,
                self.draws,
                self.losses
            );
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        log::info!(
            "training finished: {} wins, {} draws, {} losses",
            self.wins,
            self.draws,
            self.losses
        );
        Ok(())
    }
}

/// Observer the caller can still read after handing a clone to a pipeline.
///
/// Clones forward every event to the same inner observer.
pub struct SharedObserver<O> {
    inner: Arc<Mutex<O>>,
}

impl<O> Clone for SharedObserver<O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<O: Observer> SharedObserver<O> {
    pub fn new(observer: O) -> Self {
        Self {
            inner: Arc::new(Mutex::new(observer)),
        }
    }

    /// Run `f` with exclusive access to the inner observer.
    pub fn with<R>(&self, f: impl FnOnce(&mut O) -> R) -> Result<R> {
        let mut guard = self.inner.lock().map_err(|_| Error::LockPoisoned {
            context: "access shared observer".to_string(),
        })?;
        Ok(f(&mut *guard))
    }
}

impl<O: Observer> Observer for SharedObserver<O> {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        self.with(|observer| observer.on_training_start(total_games))?
    }

    fn on_game_start(&mut self, game_num: usize) -> Result<()> {
        self.with(|observer| observer.on_game_start(game_num))?
    }

    fn on_move(
        &mut self,
        game_num: usize,
        step_num: usize,
        board: &Board,
        column: usize,
    ) -> Result<()> {
        self.with(|observer| observer.on_move(game_num, step_num, board, column))?
    }

    fn on_game_end(&mut self, game_num: usize, outcome: Outcome, moves: usize) -> Result<()> {
        self.with(|observer| observer.on_game_end(game_num, outcome, moves))?
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.with(|observer| observer.on_training_end())?
    }
}
