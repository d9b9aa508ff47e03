//! Server middleware
//!
//! Provides session logging helpers.

pub mod logging;
