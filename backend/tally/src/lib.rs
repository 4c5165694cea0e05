//! # Tally
//!
//! Domain of the goal-tracking app, shared by the server and its tests.
//!
//! ## Model
//! - **Topic**: something being learned or practised. Pays `money_per_5_reps` per 5 reps,
//!   a rate that can be locked against edits.
//! - **Subtopic**: a repeatable task under a topic with a rep goal and a payout for reaching it.
//! - **Global goal**: one earnings target across every topic.
//!
//! ## Derived values
//! Nothing derived is stored. Earnings and completion are computed on every read
//! in [`stats`] and rolled up in [`dashboard`].
//!
//! ## Invariants
//! - `0 <= reps_completed <= reps_goal`
//! - Rep logging moves by exactly one, see [`reps`]
//! - Earnings round only when presented
pub mod dashboard;
pub mod error;
pub mod mapping;
pub mod payloads;
pub mod reps;
pub mod rows;
pub mod stats;

pub use error::ValidationError;
