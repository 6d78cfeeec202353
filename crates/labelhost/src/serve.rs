//! The line-delimited JSON message loop
//!
//! One JSON object per line in each direction. Inbound lines are dispatched
//! as they arrive; outbound messages are written in completion order. At
//! end of input the host stops taking requests, and the loop ends once every
//! in-flight request has been answered.

use futures::channel::mpsc::UnboundedReceiver;
use futures::StreamExt;
use labelhost_core::{error::Result, HostError, Outbound};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::Host;

/// Counters reported when the loop ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    pub lines_read: usize,
    pub messages_written: usize,
}

/// Serializes `msg` as one line
pub async fn write_message<W: AsyncWrite + Unpin>(output: &mut W, msg: &Outbound) -> Result<()> {
    let mut line = serde_json::to_vec(msg).map_err(|e| HostError::Other(e.to_string()))?;
    line.push(b'\n');
    output.write_all(&line).await?;
    output.flush().await?;
    Ok(())
}

/// Runs `host` against `input` and `output` until input ends and every
/// response has been written
pub async fn serve<R, W>(
    host: Host,
    mut outbound: UnboundedReceiver<Outbound>,
    mut input: R,
    mut output: W,
) -> Result<ServeStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut stats = ServeStats::default();
    let mut buf = Vec::new();
    let mut host = Some(host);

    if let Some(host) = &host {
        host.start();
    }

    loop {
        tokio::select! {
            // A cancelled read leaves its bytes in `buf`; the next call continues the line.
            read = input.read_until(b'\n', &mut buf), if host.is_some() => {
                let at_eof = read? == 0;
                if !buf.is_empty() {
                    stats.lines_read += 1;
                    if let Some(host) = &host {
                        dispatch_raw_line(host, &buf);
                    }
                    buf.clear();
                }
                if at_eof {
                    log::debug!("Input closed after {} lines, draining responses", stats.lines_read);
                    host = None;
                }
            },
            msg = outbound.next() => match msg {
                Some(msg) => {
                    write_message(&mut output, &msg).await?;
                    stats.messages_written += 1;
                },
                None => break,
            },
        }
    }

    log::info!(
        "Message loop finished: {} lines read, {} messages written",
        stats.lines_read,
        stats.messages_written
    );
    Ok(stats)
}

fn dispatch_raw_line(host: &Host, raw: &[u8]) {
    match std::str::from_utf8(raw) {
        Ok(line) => host.dispatch_line(line),
        Err(e) => log::warn!("Skipping message line that is not UTF-8: {}", e),
    }
}
