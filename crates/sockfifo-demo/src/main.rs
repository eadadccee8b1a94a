//! Pumps length-prefixed frames through a `tokio::io::duplex` pipe.
//!
//! Each side owns one `RingBuffer`. The application side uses `put`/`get`;
//! the "socket" side hands the buffer's contiguous windows straight to
//! `AsyncWrite::write` / `AsyncRead::read` and commits however many bytes the
//! call actually moved.
//!
//! Run with: cargo run -p sockfifo-demo -- [frame-count]
//! Set `RUST_LOG=sockfifo=trace` to see buffer rejections.

use anyhow::{bail, ensure, Context, Result};
use sockfifo::{RingBuffer, LARGE_SOCKET_CONFIG, SMALL_SOCKET_CONFIG};
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const HEADER_LEN: usize = 4;
/// Pipe capacity, kept small so sends are routinely partial
const PIPE_CAPACITY: usize = 1500;
const DEFAULT_FRAMES: usize = 10_000;

fn frame_payload(i: usize) -> Vec<u8> {
    let len = 1 + (i * 37) % 900;
    (0..len).map(|j| (i + j) as u8).collect()
}

/// Sends `frames` frames: queue with `put`, drain through read windows.
async fn run_sender<W>(mut writer: W, frames: usize) -> Result<usize>
where
    W: AsyncWrite + Unpin,
{
    let mut ring = RingBuffer::with_config(LARGE_SOCKET_CONFIG.with_metrics(true))?;
    let mut next = 0;

    while next < frames || !ring.is_empty() {
        // Application side: enqueue as many whole frames as fit
        while next < frames {
            let payload = frame_payload(next);
            if ring.surplus() < HEADER_LEN + payload.len() {
                break;
            }
            ring.put(&(payload.len() as u32).to_be_bytes())?;
            ring.put(&payload)?;
            next += 1;
        }

        // Socket side: one contiguous window per write call
        let window = ring.reserve_read();
        let sent = writer
            .write(&ring.storage()[window.range()])
            .await
            .context("send failed")?;
        if sent == 0 {
            bail!("peer closed while {} bytes were queued", ring.occupied());
        }
        ring.commit_read(sent)?;
    }

    writer.shutdown().await?;

    let m = ring.metrics();
    info!(
        frames,
        bytes = m.bytes_read,
        send_calls = m.read_commits,
        "sender done"
    );
    Ok(frames)
}

/// Receives frames: fill write windows from the socket, decode with `get`.
async fn run_receiver<R>(mut reader: R) -> Result<Vec<Vec<u8>>>
where
    R: AsyncRead + Unpin,
{
    let mut ring = RingBuffer::with_config(SMALL_SOCKET_CONFIG.with_metrics(true))?;
    let mut frames = Vec::new();

    loop {
        let window = ring.reserve_write();
        ensure!(!window.is_empty(), "frame larger than receive buffer");

        let received = reader
            .read(&mut ring.storage_mut()[window.range()])
            .await
            .context("receive failed")?;
        if received == 0 {
            break;
        }
        ring.commit_write(received)?;

        while let Some(frame) = decode_frame(&mut ring)? {
            frames.push(frame);
        }
    }

    ensure!(
        ring.is_empty(),
        "stream ended with {} undecoded bytes",
        ring.occupied()
    );

    let m = ring.metrics();
    info!(
        frames = frames.len(),
        bytes = m.bytes_written,
        recv_calls = m.write_commits,
        "receiver done"
    );
    Ok(frames)
}

/// Pops one complete frame, or `None` if more bytes are needed.
fn decode_frame(ring: &mut RingBuffer) -> Result<Option<Vec<u8>>> {
    let mut header = [0u8; HEADER_LEN];
    if ring.peek_into(&mut header).is_err() {
        return Ok(None);
    }
    let len = u32::from_be_bytes(header) as usize;
    if ring.occupied() < HEADER_LEN + len {
        debug!(need = HEADER_LEN + len, have = ring.occupied(), "partial frame");
        return Ok(None);
    }
    ring.get_into(&mut header)?;
    Ok(Some(ring.get(len)?))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let frames = match std::env::args().nth(1) {
        Some(arg) => arg.parse().context("frame count must be a number")?,
        None => DEFAULT_FRAMES,
    };

    let (client, server) = tokio::io::duplex(PIPE_CAPACITY);
    let start = Instant::now();

    let sender = tokio::spawn(run_sender(client, frames));
    let receiver = tokio::spawn(run_receiver(server));

    let sent = sender.await??;
    let received = receiver.await??;

    ensure!(received.len() == sent, "sent {} frames, got {}", sent, received.len());
    for (i, frame) in received.iter().enumerate() {
        ensure!(*frame == frame_payload(i), "frame {} corrupted", i);
    }

    info!(
        frames = sent,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "all frames verified"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pump_round_trip() {
        let (client, server) = tokio::io::duplex(64);
        let sender = tokio::spawn(run_sender(client, 200));
        let received = run_receiver(server).await.unwrap();

        assert_eq!(sender.await.unwrap().unwrap(), 200);
        assert_eq!(received.len(), 200);
        for (i, frame) in received.iter().enumerate() {
            assert_eq!(*frame, frame_payload(i));
        }
    }

    #[test]
    fn test_decode_waits_for_whole_frame() {
        let mut ring = RingBuffer::new(64).unwrap();
        ring.put(&5u32.to_be_bytes()).unwrap();
        ring.put(b"abc").unwrap();
        assert!(decode_frame(&mut ring).unwrap().is_none());
        assert_eq!(ring.occupied(), 7);

        ring.put(b"de").unwrap();
        assert_eq!(decode_frame(&mut ring).unwrap().unwrap(), b"abcde");
        assert!(ring.is_empty());
    }
}
