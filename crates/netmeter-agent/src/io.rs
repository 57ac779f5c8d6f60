//! JSON-lines input and output
//!
//! Stands in for the message-bus consumer: one decoded notification per
//! input line, one sample per output line.

use anyhow::Result;
use netmeter_common::{Envelope, Sample};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Decode envelopes line by line; undecodable lines are skipped.
///
/// Returns the number of envelopes forwarded.
pub async fn read_envelopes<R>(reader: R, envelope_tx: mpsc::Sender<Envelope>) -> Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    // Split on raw bytes so a line that is not UTF-8 only costs itself
    let mut lines = reader.split(b'\n');
    let mut forwarded = 0u64;
    let mut line_no = 0u64;

    while let Some(line) = lines.next_segment().await? {
        line_no += 1;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        match serde_json::from_slice::<Envelope>(&line) {
            Ok(envelope) => {
                if envelope_tx.send(envelope).await.is_err() {
                    debug!("Envelope channel closed, reader exiting");
                    break;
                }
                forwarded += 1;
            }
            Err(e) => warn!(line = line_no, "Skipping undecodable notification: {}", e),
        }
    }

    Ok(forwarded)
}

/// Encode samples as JSON lines until the channel closes
pub async fn write_samples<W>(mut writer: W, mut sample_rx: mpsc::Receiver<Sample>) -> Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0u64;
    while let Some(sample) = sample_rx.recv().await {
        let mut line = serde_json::to_vec(&sample)?;
        line.push(b'\n');
        writer.write_all(&line).await?;
        written += 1;
    }
    writer.flush().await?;
    Ok(written)
}
