//! Reserve/commit walkthrough.
//!
//! Simulates an I/O layer that can only accept one contiguous buffer per call
//! and may transfer fewer bytes than offered.
//!
//! Run with: cargo run --example zero_copy

use sockfifo::{Config, RingBuffer};

/// Pretend socket send: accepts at most `limit` bytes per call.
fn fake_send(wire: &mut Vec<u8>, span: &[u8], limit: usize) -> usize {
    let n = span.len().min(limit);
    wire.extend_from_slice(&span[..n]);
    n
}

fn main() {
    println!("sockfifo Zero-Copy Example");
    println!("==========================\n");

    let config = Config::new(
        48,   // rounded up to 64 bytes
        true, // metrics on so we can report them
    );
    let mut rb = RingBuffer::with_config(config).unwrap();
    println!("Ring capacity: {} bytes\n", rb.capacity());

    let messages: Vec<String> = (0..20).map(|i| format!("message #{:02};", i)).collect();
    let mut wire = Vec::new();
    let mut pending = messages.iter();
    let mut next = pending.next();

    while next.is_some() || !rb.is_empty() {
        // Application side: copy whole messages in while they fit
        while let Some(msg) = next {
            if rb.put(msg.as_bytes()).is_err() {
                break;
            }
            next = pending.next();
        }

        // Network side: offer the contiguous readable window, commit what went out
        let window = rb.reserve_read();
        if window.is_empty() {
            continue;
        }
        let sent = fake_send(&mut wire, &rb.storage()[window.range()], 7);
        rb.commit_read(sent).unwrap();
        println!(
            "sent {:2} bytes from offset {:2} (window {:2}), {:2} still queued",
            sent,
            window.offset,
            window.len,
            rb.occupied()
        );
    }

    let expected: String = messages.concat();
    assert_eq!(wire, expected.as_bytes());

    let m = rb.metrics();
    println!("\nBytes written: {}", m.bytes_written);
    println!("Bytes read:    {}", m.bytes_read);
    println!("Read commits:  {}", m.read_commits);
    println!("Rejected puts: {}", m.rejected_writes);
}
