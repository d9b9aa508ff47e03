//! FTP Response handling
//!
//! Reply codes and the fixed texts the decoy answers with.

pub const OPENING_DATA: u16 = 150;
pub const OK: u16 = 200;
pub const SYSTEM_TYPE: u16 = 215;
pub const CLOSING: u16 = 221;
pub const TRANSFER_COMPLETE: u16 = 226;
pub const PASSIVE_MODE: u16 = 227;
pub const LOGIN_SUCCESS: u16 = 230;
pub const FILE_ACTION_OK: u16 = 250;
pub const PATH_CREATED: u16 = 257;
pub const PASSWORD_REQUIRED: u16 = 331;
pub const SYNTAX_ERROR: u16 = 500;
pub const NOT_IMPLEMENTED: u16 = 502;
pub const FILE_UNAVAILABLE: u16 = 550;

/// Fake passive endpoint: 127.0.0.1, port 195 * 256 + 149
pub const PASSIVE_ADDRESS: &str = "127,0,0,1,195,149";

/// Entries shown for every LIST, one directory and one file
pub const LISTING: [&str; 2] = [
    "drwxr-xr-x  2 ftp ftp 4096 Jan 01 00:00 files",
    "-rw-r--r--  1 ftp ftp 1234 Jan 01 00:00 readme.txt",
];

/// Format an FTP response message
pub fn format_response(code: u16, message: &str) -> String {
    format!("{} {}\r\n", code, message)
}

/// Terminate a raw line with CRLF
pub fn format_line(line: &str) -> String {
    format!("{}\r\n", line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_response() {
        assert_eq!(format_response(OK, "Type set to binary"), "200 Type set to binary\r\n");
        assert_eq!(format_line("220 FTP Server Ready"), "220 FTP Server Ready\r\n");
    }
}
