//! FTP Protocol implementation
//!
//! Handles command classification and canned response generation.

pub mod commands;
pub mod handlers;
pub mod responses;

pub use commands::{Command, CommandResult, CommandStatus, parse_command};
pub use handlers::{dispatch, handle_command};
