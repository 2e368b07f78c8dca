//! Learning and search bots
//!
//! A [`LearningBot`] keeps one weight per column for every board it has
//! seen, picks moves with an exploration window around the best weight, and
//! reinforces every move it made once an episode is over. [`MinimaxBot`] is
//! the fixed-depth search baseline it is measured against.

pub mod agent;
pub mod minimax;
pub mod reinforcement;
pub mod selector;
pub mod serialization;
pub mod weights;

pub use agent::{LearningBot, SharedLearningBot};
pub use minimax::MinimaxBot;
pub use reinforcement::{LearningRule, ReinforcementUpdater, ReinforcementValues};
pub use selector::MoveSelector;
pub use serialization::{SavedBot, TrainingMetadata};
pub use weights::{ColumnWeights, DEFAULT_WEIGHTS, SharedWeightTable, WeightStore, WeightTable};
