//! Episode running, training, evaluation and tournaments
//!
//! Everything here drives bots through the [`Learner`] and [`Observer`]
//! ports, so any player can be trained against or compared with any other.

pub mod comparison;
pub mod episode;
pub mod observers;
pub mod parallel;
pub mod tournament;
pub mod training;

pub use comparison::{ComparisonFramework, ComparisonResult, FrozenLearner, RandomLearner};
pub use episode::Episode;
pub use observers::{
    LogObserver, MetricsObserver, MetricsSummary, ProgressObserver, SharedObserver,
};
pub use parallel::ParallelSelfPlay;
pub use tournament::{Tournament, TournamentResult};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Learner, Observer};
