//! Ports (trait boundaries) for external dependencies.
//!
//! These traits are owned by the domain and implemented by bots, observers
//! and storage adapters elsewhere in the crate.

pub mod learner;
pub mod observer;
pub mod repository;

pub use learner::Learner;
pub use observer::Observer;
pub use repository::WeightTableRepository;
