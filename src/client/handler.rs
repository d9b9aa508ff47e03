use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::{Instant, timeout_at};

use crate::client::Session;
use crate::config::ServiceConfig;
use crate::middleware::logging::{log_command, log_connection, log_disconnect, log_session_error};
use crate::protocol::responses::{self, format_line, format_response};
use crate::protocol::{CommandStatus, dispatch};
use crate::tracer::{Status, Tracer};

// About thirty years
const FAR_FUTURE_SECS: u64 = 86_400 * 365 * 30;

/// Outcome of reading one command line from the client.
#[derive(Debug, PartialEq)]
enum LineRead {
    /// Client closed its side; a trailing unterminated fragment is dropped
    Eof,
    Complete,
    /// Line exceeded the limit; the buffer holds only the kept prefix
    TooLong,
}

/// Handles one decoy FTP session on an accepted connection.
///
/// - Sends the banner and emits the start event.
/// - Reads newline-terminated lines, emits a command event for each and
///   answers from the dispatch table.
/// - Emits the end event when the client quits, fails, or the deadline passes.
///
/// The deadline is fixed when the session starts and never refreshed, so even
/// a busy session is cut off once it has been open for the configured time.
/// The stream is dropped, and the connection released, on every return path.
pub async fn handle_client<S>(
    stream: S,
    remote_addr: SocketAddr,
    config: &ServiceConfig,
    tracer: &dyn Tracer,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let session = Session::new(remote_addr, config.description.clone());
    handle_session(stream, session, config, tracer).await;
}

/// Runs the session protocol for an already constructed [`Session`].
pub async fn handle_session<S>(
    stream: S,
    mut session: Session,
    config: &ServiceConfig,
    tracer: &dyn Tracer,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let deadline = session_deadline(config.deadline());
    let mut reader = BufReader::new(stream);

    let banner = format_line(config.banner_line());
    if let Err(e) = write_response(reader.get_mut(), &banner, deadline).await {
        // Nothing was traced yet, so nothing needs closing either
        log_session_error(&session, &e);
        return;
    }

    tracer.trace_event(session.event("New FTP connection", Status::Start));
    log_connection(&session);

    if let Err(e) = command_loop(&mut reader, &mut session, config, tracer, deadline).await {
        log_session_error(&session, &e);
    }

    drop(reader);
    tracer.trace_event(session.event("FTP connection closed", Status::End));
    log_disconnect(&session);
}

/// Read, trace, dispatch, respond until QUIT or EOF. I/O errors end the loop.
async fn command_loop<S>(
    reader: &mut BufReader<S>,
    session: &mut Session,
    config: &ServiceConfig,
    tracer: &dyn Tracer,
    deadline: Instant,
) -> io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        let read = read_command(reader, &mut buf, config.max_command_length, deadline).await?;
        if read == LineRead::Eof {
            return Ok(());
        }

        let command = String::from_utf8_lossy(&buf).trim().to_string();
        tracer.trace_event(
            session
                .event("FTP Command", Status::Interaction)
                .with_command(&command)
                .with_user(session.username()),
        );
        log_command(session, &command);

        if read == LineRead::TooLong {
            let response = format_response(responses::SYNTAX_ERROR, "Command too long");
            write_response(reader.get_mut(), &response, deadline).await?;
            continue;
        }

        let result = dispatch(session, &command);
        for event in result.events {
            tracer.trace_event(event);
        }

        write_response(reader.get_mut(), &result.message, deadline).await?;

        if result.status == CommandStatus::CloseConnection {
            return Ok(());
        }
    }
}

/// Reads one line into `buf`, keeping at most `limit` bytes of it.
///
/// The rest of an over-long line is consumed and thrown away so the next read
/// starts on a fresh line.
async fn read_command<R>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    limit: usize,
    deadline: Instant,
) -> io::Result<LineRead>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let mut overflow = false;

    loop {
        let available = with_deadline(deadline, reader.fill_buf()).await?;
        if available.is_empty() {
            return Ok(LineRead::Eof);
        }

        let (chunk, complete) = match available.iter().position(|&b| b == b'\n') {
            Some(end) => (&available[..=end], true),
            None => (available, false),
        };
        let used = chunk.len();

        if !overflow {
            let keep = limit.saturating_sub(buf.len()).min(used);
            buf.extend_from_slice(&chunk[..keep]);
            overflow = keep < used;
        }
        reader.consume(used);

        if complete {
            return Ok(if overflow {
                LineRead::TooLong
            } else {
                LineRead::Complete
            });
        }
    }
}

async fn write_response<W>(writer: &mut W, response: &str, deadline: Instant) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    with_deadline(deadline, async {
        writer.write_all(response.as_bytes()).await?;
        writer.flush().await
    })
    .await
}

/// Absolute deadline for a session opened now. Absurd timeouts saturate.
fn session_deadline(timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(timeout)
        .unwrap_or_else(|| now + Duration::from_secs(FAR_FUTURE_SECS))
}

/// Runs `fut` against the session deadline, reporting expiry as `TimedOut`.
async fn with_deadline<F, T>(deadline: Instant, fut: F) -> io::Result<T>
where
    F: Future<Output = io::Result<T>>,
{
    match timeout_at(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(io::Error::new(
            io::ErrorKind::TimedOut,
            "session deadline expired",
        )),
    }
}
