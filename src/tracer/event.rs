//! Structured observability events emitted by every decoy session.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;

/// Protocol tag carried by an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Protocol {
    #[serde(rename = "FTP")]
    Ftp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Ftp => write!(f, "FTP"),
        }
    }
}

/// Lifecycle tag carried by an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    /// Connection accepted and greeted
    Start,
    /// Connection released
    End,
    /// One-off capture not tied to the command flow (login attempts)
    Stateless,
    /// A command received from the client
    Interaction,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Start => "Start",
            Status::End => "End",
            Status::Stateless => "Stateless",
            Status::Interaction => "Interaction",
        };
        f.write_str(name)
    }
}

/// One observable moment of a session.
///
/// Identity and endpoint fields are always filled; `command`, `user` and
/// `password` are empty when they do not apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Event {
    pub date_time: String,
    pub msg: String,
    pub protocol: Protocol,
    pub status: Status,
    pub remote_addr: String,
    pub source_ip: String,
    pub source_port: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub description: String,
    pub command: String,
    pub user: String,
    pub password: String,
}

impl Event {
    /// Creates an FTP event stamped with the current UTC time.
    pub fn new(msg: impl Into<String>, status: Status) -> Self {
        Self {
            date_time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            msg: msg.into(),
            protocol: Protocol::Ftp,
            status,
            remote_addr: String::new(),
            source_ip: String::new(),
            source_port: String::new(),
            id: String::new(),
            description: String::new(),
            command: String::new(),
            user: String::new(),
            password: String::new(),
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }
}
