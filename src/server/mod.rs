//! Server core functionality
//!
//! Binds the decoy listener and hands every accepted connection to its own
//! session task.

pub mod core;

pub use self::core::Server;
