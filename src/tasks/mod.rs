//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Stale sweep: removes cache entries that expired longer ago than the
//!   stale retention period

mod cleanup;

pub use cleanup::spawn_stale_sweeper;
