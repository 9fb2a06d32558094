//! Observability: builder events and the sink they flow through.
//!
//! Builders never call `tracing` directly; every event goes through
//! `sink::record` so tests can observe and silence instrumentation.

pub(crate) mod sink;

// re-exports
pub use sink::{EventSink, ObsEvent, TracingSink, with_sink};
