//! Watch task lifecycle: the per-key state machine, the supervisor that
//! spawns and records tasks, and startup recovery from the durable watch
//! set.
//!
//! # Module Structure
//!
//! - [`task`]: the poll-then-notify state machine for one key
//! - [`supervisor`]: spawn registry used by registration and recovery
//! - [`recovery`]: re-adoption of markers left by a previous process

pub mod recovery;
pub mod supervisor;
pub mod task;

pub use recovery::resume_pending_watches;
pub use supervisor::WatchSupervisor;
pub use task::WatchTask;
