//! Line-framed request loop: one s-expression request per line in, one
//! response per line out.

use std::io::{self, BufRead, Read, Write};

use tracing::{debug, info, warn};

use super::dispatch::{self, Response};
use crate::referee::Referee;

/// Maximum request line length in bytes (1 MiB), excluding the newline.
const MAX_MESSAGE_SIZE: usize = 1_048_576;

/// Counters reported when the loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    /// Requests answered (including error responses).
    pub requests: u64,
    /// Requests answered with `:status :error`.
    pub errors: u64,
}

/// Answer requests from `reader` until end of input.
///
/// Blank lines are skipped. Oversized or non-UTF-8 lines get an error
/// response and the loop carries on; only I/O failures end it early. At
/// most `MAX_MESSAGE_SIZE + 1` bytes of a line are buffered.
pub fn serve<R: BufRead, W: Write>(
    referee: &Referee,
    mut reader: R,
    mut writer: W,
) -> io::Result<ServeStats> {
    let mut stats = ServeStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let n = reader
            .by_ref()
            .take(MAX_MESSAGE_SIZE as u64 + 1)
            .read_until(b'\n', &mut buf)?;
        if n == 0 {
            break;
        }

        let response = if buf.last() != Some(&b'\n') && buf.len() > MAX_MESSAGE_SIZE {
            let dropped = buf.len() + discard_line(&mut reader)?;
            warn!(len = dropped, "request exceeds maximum size");
            dispatch::reject("", "request too large")
        } else {
            match std::str::from_utf8(&buf) {
                Ok(line) => {
                    let raw = line.trim();
                    if raw.is_empty() {
                        continue;
                    }
                    debug!("<- {}", raw);
                    dispatch::handle_message(referee, raw)
                }
                Err(e) => {
                    warn!("request is not valid UTF-8: {}", e);
                    dispatch::reject(
                        String::from_utf8_lossy(&buf).trim(),
                        "request is not valid UTF-8",
                    )
                }
            }
        };

        write_response(&mut writer, &mut stats, &response)?;
    }

    info!(
        requests = stats.requests,
        errors = stats.errors,
        "request stream closed"
    );
    Ok(stats)
}

fn write_response<W: Write>(
    writer: &mut W,
    stats: &mut ServeStats,
    response: &Response,
) -> io::Result<()> {
    stats.requests += 1;
    if response.is_error() {
        stats.errors += 1;
    }

    debug!("-> {}", response);
    writeln!(writer, "{}", response)?;
    writer.flush()
}

/// Skip the rest of the current line, newline included, without buffering
/// it. Returns the number of bytes skipped.
fn discard_line<R: BufRead>(reader: &mut R) -> io::Result<usize> {
    let mut skipped = 0;
    loop {
        let available = match reader.fill_buf() {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            return Ok(skipped);
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(i) => {
                reader.consume(i + 1);
                return Ok(skipped + i + 1);
            }
            None => {
                let len = available.len();
                reader.consume(len);
                skipped += len;
            }
        }
    }
}
