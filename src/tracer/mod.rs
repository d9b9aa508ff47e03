//! Event tracing
//!
//! Event model and the sinks that record what attackers do.

pub mod event;
pub mod sinks;

pub use event::{Event, Protocol, Status};
pub use sinks::{ChannelTracer, LogTracer, Tracer};
