//! Module `state`
//!
//! Defines the `Session` struct holding everything one decoy connection knows
//! about its peer, and the factory for the events that session emits.

use std::net::SocketAddr;
use uuid::Uuid;

use crate::tracer::{Event, Status};

/// Per-connection state, owned exclusively by its session handler.
///
/// The authentication phase is implicit: it is tracked only through the
/// username captured by `USER` and never gates any command.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    remote_addr: SocketAddr,
    description: String,
    username: String,
}

impl Session {
    /// Creates a session with a freshly generated identifier.
    pub fn new(remote_addr: SocketAddr, description: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), remote_addr, description)
    }

    pub fn with_id(
        id: impl Into<String>,
        remote_addr: SocketAddr,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            remote_addr,
            description: description.into(),
            username: String::new(),
        }
    }

    // --------------------
    // Getter methods
    // --------------------

    /// Returns the opaque session identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the peer's socket address.
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    /// Returns the peer host without the port.
    pub fn remote_host(&self) -> String {
        self.remote_addr.ip().to_string()
    }

    pub fn remote_port(&self) -> u16 {
        self.remote_addr.port()
    }

    /// Returns the last username submitted with `USER`, empty before that.
    pub fn username(&self) -> &str {
        &self.username
    }

    // --------------------
    // Setter methods
    // --------------------

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    /// Builds an event pre-filled with this session's identity and endpoint.
    pub fn event(&self, msg: &str, status: Status) -> Event {
        let mut event = Event::new(msg, status);
        event.remote_addr = self.remote_addr.to_string();
        event.source_ip = self.remote_host();
        event.source_port = self.remote_port().to_string();
        event.id = self.id.clone();
        event.description = self.description.clone();
        event
    }
}
