//! Embassy async tasks
//!
//! Each task runs independently and communicates via the shared context
//! and signals.

pub mod bridge_rx;
pub mod bridge_tx;
pub mod control;

pub use bridge_rx::bridge_rx_task;
pub use bridge_tx::bridge_tx_task;
pub use control::control_task;
