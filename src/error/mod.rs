//! Error handling
//!
//! Defines error types for the FTP decoy service.

pub mod types;

pub use types::*;
