//! Fetch Module
//!
//! Composes the cache, the admission gates and the upstream client into the
//! single entry point the rest of the application calls.

mod orchestrator;
mod outcome;
mod payload;

pub use orchestrator::{Orchestrator, DEFAULT_UPSTREAM_TIMEOUT};
pub use outcome::{Served, Source};
