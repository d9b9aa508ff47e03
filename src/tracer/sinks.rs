//! Event sinks
//!
//! Receivers for the events a session produces. Sessions hand events over and
//! move on; a sink never reports failure back to the session.

use log::{info, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use super::event::Event;

/// Destination for session events
pub trait Tracer: Send + Sync {
    fn trace_event(&self, event: Event);
}

/// Writes every event as a single JSON line through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn trace_event(&self, event: Event) {
        match serde_json::to_string(&event) {
            Ok(line) => info!(target: "ftp_decoy::tracer", "{}", line),
            Err(e) => warn!(target: "ftp_decoy::tracer", "Dropping unserializable event: {}", e),
        }
    }
}

/// Forwards events to an in-process consumer over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelTracer {
    tx: UnboundedSender<Event>,
}

impl ChannelTracer {
    /// Returns the tracer together with the receiving end of its channel.
    pub fn new() -> (Self, UnboundedReceiver<Event>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Tracer for ChannelTracer {
    fn trace_event(&self, event: Event) {
        // Receiver gone means nobody is listening anymore
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::Status;

    #[test]
    fn test_channel_tracer_preserves_order() {
        let (tracer, mut rx) = ChannelTracer::new();
        tracer.trace_event(Event::new("first", Status::Start));
        tracer.trace_event(Event::new("second", Status::End));

        assert_eq!(rx.try_recv().unwrap().msg, "first");
        assert_eq!(rx.try_recv().unwrap().msg, "second");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_tracer_ignores_closed_receiver() {
        let (tracer, rx) = ChannelTracer::new();
        drop(rx);
        tracer.trace_event(Event::new("lost", Status::Interaction));
    }

    #[test]
    fn test_log_tracer_accepts_events() {
        LogTracer.trace_event(Event::new("logged", Status::Start));
    }
}
