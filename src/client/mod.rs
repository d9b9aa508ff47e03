//! Client session handling
//!
//! Per-connection state and the read/dispatch/write loop of a decoy session.

pub mod handler;
pub mod state;

pub use handler::{handle_client, handle_session};
pub use state::Session;
