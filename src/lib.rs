//! FTP decoy
//!
//! A low-interaction FTP honeypot. It greets like a real server, accepts any
//! login, answers a small command set with canned replies and reports every
//! command and credential as a structured event. It never serves files.

pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod protocol;
pub mod server;
pub mod tracer;

pub use crate::config::ServiceConfig;
pub use crate::server::Server;
