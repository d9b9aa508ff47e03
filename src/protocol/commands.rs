//! Module `commands`
//!
//! Classifies a raw client line into the `Command` enum and defines the
//! result type returned by the dispatcher.

use crate::tracer::Event;

/// An FTP command recognised by the decoy.
///
/// Verbs are matched case-insensitively on the text before the first space.
/// Verbs that take an argument only match when one follows the space; bare
/// verbs only match when nothing follows them. Anything else is `Unknown`.
#[derive(Debug, PartialEq)]
pub enum Command {
    User(String),         // Username for login
    Pass(String),         // Password for login
    Syst,                 // System type
    Pwd,                  // Print working directory
    Cwd(String),          // Change working directory
    List(Option<String>), // Directory listing, argument ignored
    Retr(String),         // Retrieve/download file
    Stor(String),         // Store/upload file
    Pasv,                 // Enter passive mode
    Type(String),         // Transfer type
    Quit,
    Unknown,
}

/// What the session should do after writing the response.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Continue,
    CloseConnection,
}

/// Full outcome of dispatching one command.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    /// Response text, every line already CRLF-terminated
    pub message: String,
    /// Events to emit in addition to the generic command event
    pub events: Vec<Event>,
}

impl CommandResult {
    pub fn reply(message: String) -> Self {
        Self {
            status: CommandStatus::Continue,
            message,
            events: Vec::new(),
        }
    }
}

/// Parses an already trimmed command line into the `Command` enum.
pub fn parse_command(line: &str) -> Command {
    let (verb, arg) = match line.split_once(' ') {
        Some((verb, arg)) => (verb, Some(arg.trim())),
        None => (line, None),
    };

    match (verb.to_ascii_uppercase().as_str(), arg) {
        ("USER", Some(name)) => Command::User(name.to_string()),
        ("PASS", Some(password)) => Command::Pass(password.to_string()),
        ("SYST", None) => Command::Syst,
        ("PWD", None) => Command::Pwd,
        ("CWD", Some(dir)) => Command::Cwd(dir.to_string()),
        ("LIST", arg) => Command::List(arg.map(str::to_string)),
        ("RETR", Some(file)) => Command::Retr(file.to_string()),
        ("STOR", Some(file)) => Command::Stor(file.to_string()),
        ("PASV", None) => Command::Pasv,
        ("TYPE", Some(mode)) => Command::Type(mode.to_string()),
        ("QUIT", None) => Command::Quit,
        _ => Command::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_commands() {
        assert_eq!(parse_command("SYST"), Command::Syst);
        assert_eq!(parse_command("PWD"), Command::Pwd);
        assert_eq!(parse_command("PASV"), Command::Pasv);
        assert_eq!(parse_command("QUIT"), Command::Quit);
        assert_eq!(parse_command("LIST"), Command::List(None));
    }

    #[test]
    fn test_parse_commands_with_args() {
        assert_eq!(parse_command("USER alice"), Command::User("alice".into()));
        assert_eq!(parse_command("PASS s3cr3t"), Command::Pass("s3cr3t".into()));
        assert_eq!(parse_command("CWD /etc"), Command::Cwd("/etc".into()));
        assert_eq!(parse_command("LIST -la"), Command::List(Some("-la".into())));
        assert_eq!(parse_command("RETR a.txt"), Command::Retr("a.txt".into()));
        assert_eq!(parse_command("STOR b.txt"), Command::Stor("b.txt".into()));
        assert_eq!(parse_command("TYPE A"), Command::Type("A".into()));
    }

    #[test]
    fn test_verbs_are_case_insensitive() {
        assert_eq!(parse_command("user Bob"), Command::User("Bob".into()));
        assert_eq!(parse_command("qUiT"), Command::Quit);
        assert_eq!(parse_command("list"), Command::List(None));
    }

    #[test]
    fn test_argument_whitespace_is_trimmed() {
        assert_eq!(parse_command("USER   bob"), Command::User("bob".into()));
        assert_eq!(parse_command("PASS  two words"), Command::Pass("two words".into()));
    }

    #[test]
    fn test_arity_mismatch_is_unknown() {
        assert_eq!(parse_command("USER"), Command::Unknown);
        assert_eq!(parse_command("PASS"), Command::Unknown);
        assert_eq!(parse_command("CWD"), Command::Unknown);
        assert_eq!(parse_command("SYST now"), Command::Unknown);
        assert_eq!(parse_command("QUIT please"), Command::Unknown);
        assert_eq!(parse_command("PASV 1"), Command::Unknown);
    }

    #[test]
    fn test_unknown_commands() {
        assert_eq!(parse_command("FOO"), Command::Unknown);
        assert_eq!(parse_command("USERNAME bob"), Command::Unknown);
        assert_eq!(parse_command("USER\tbob"), Command::Unknown);
        assert_eq!(parse_command(""), Command::Unknown);
        assert_eq!(parse_command("\u{fffd}\u{fffd}"), Command::Unknown);
    }
}
