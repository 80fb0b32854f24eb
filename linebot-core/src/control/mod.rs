//! Command arbitration and the per-cycle navigation step

pub mod arbiter;
pub mod checkpoint;
pub mod controller;

pub use arbiter::{ArbiterInputs, Arbitration, CommandArbiter, DecisionReason};
pub use checkpoint::{Checkpoint, CheckpointPhase};
pub use controller::{Decision, NavigationController};
