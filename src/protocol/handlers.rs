//! Command handlers for the FTP decoy.
//!
//! Every handler produces a canned reply. Nothing touches a filesystem or
//! opens a data connection; the only state a command may change is the
//! session username.

use log::debug;

use crate::client::Session;
use crate::protocol::responses::{self, format_line, format_response};
use crate::protocol::{Command, CommandResult, CommandStatus, parse_command};
use crate::tracer::Status;

/// Classifies `line` and dispatches it to its handler.
///
/// `line` must already be trimmed; it is copied verbatim into any event the
/// handler emits.
pub fn dispatch(session: &mut Session, line: &str) -> CommandResult {
    let command = parse_command(line);
    debug!("Session {} parsed {:?}", session.id(), command);
    handle_command(session, &command, line)
}

/// Dispatches a parsed command to its corresponding handler.
pub fn handle_command(session: &mut Session, command: &Command, line: &str) -> CommandResult {
    match command {
        Command::User(username) => handle_cmd_user(session, username),
        Command::Pass(password) => handle_cmd_pass(session, password, line),
        Command::Syst => CommandResult::reply(format_response(
            responses::SYSTEM_TYPE,
            "UNIX Type: L8",
        )),
        Command::Pwd => CommandResult::reply(format_response(
            responses::PATH_CREATED,
            "\"/\" is current directory",
        )),
        Command::Cwd(_) => CommandResult::reply(format_response(
            responses::FILE_ACTION_OK,
            "Directory changed successfully",
        )),
        Command::List(_) => handle_cmd_list(),
        Command::Retr(_) => CommandResult::reply(format_response(
            responses::FILE_UNAVAILABLE,
            "File not found",
        )),
        Command::Stor(_) => CommandResult::reply(format_response(
            responses::FILE_UNAVAILABLE,
            "Permission denied",
        )),
        Command::Pasv => CommandResult::reply(format_response(
            responses::PASSIVE_MODE,
            &format!("Entering Passive Mode ({})", responses::PASSIVE_ADDRESS),
        )),
        Command::Type(_) => {
            CommandResult::reply(format_response(responses::OK, "Type set to binary"))
        }
        Command::Quit => handle_cmd_quit(),
        Command::Unknown => CommandResult::reply(format_response(
            responses::NOT_IMPLEMENTED,
            "Command not implemented",
        )),
    }
}

/// Handles the USER command: remembers the name for later events.
fn handle_cmd_user(session: &mut Session, username: &str) -> CommandResult {
    session.set_username(username);
    CommandResult::reply(format_response(
        responses::PASSWORD_REQUIRED,
        &format!("Password required for {}", session.username()),
    ))
}

/// Handles the PASS command: records the credential pair and lets the client in.
///
/// Every password is accepted. Rejecting logins would end the interaction
/// before the attacker shows what they came to do.
fn handle_cmd_pass(session: &Session, password: &str, line: &str) -> CommandResult {
    let attempt = session
        .event("FTP Login Attempt", Status::Stateless)
        .with_command(line)
        .with_user(session.username())
        .with_password(password);

    CommandResult {
        status: CommandStatus::Continue,
        message: format_response(responses::LOGIN_SUCCESS, "Login successful"),
        events: vec![attempt],
    }
}

/// Handles LIST: a fake listing framed by the usual 150/226 pair.
fn handle_cmd_list() -> CommandResult {
    let mut message = format_response(
        responses::OPENING_DATA,
        "Opening ASCII mode data connection for file list",
    );
    for entry in responses::LISTING {
        message.push_str(&format_line(entry));
    }
    message.push_str(&format_response(
        responses::TRANSFER_COMPLETE,
        "Transfer complete",
    ));
    CommandResult::reply(message)
}

/// Handles the QUIT command: signals connection close.
fn handle_cmd_quit() -> CommandResult {
    CommandResult {
        status: CommandStatus::CloseConnection,
        message: format_response(responses::CLOSING, "Goodbye"),
        events: Vec::new(),
    }
}
