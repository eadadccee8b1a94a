//! `std::io` adapters.
//!
//! Reads and writes are partial, like a non-blocking socket: a full buffer
//! rejects writes and an empty one rejects reads with
//! [`io::ErrorKind::WouldBlock`] rather than returning `Ok(0)`, so
//! `write_all`/`read_exact` callers see backpressure instead of a spurious
//! end-of-stream.

use crate::RingBuffer;
use std::io::{self, Read, Write};

impl Write for RingBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.write_some(buf) {
            0 => Err(io::ErrorKind::WouldBlock.into()),
            n => Ok(n),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for RingBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.read_some(buf) {
            0 => Err(io::ErrorKind::WouldBlock.into()),
            n => Ok(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_partial_then_would_block() {
        let mut rb = RingBuffer::new(4).unwrap();
        assert_eq!(rb.write(b"abcdef").unwrap(), 4);
        let err = rb.write(b"g").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WouldBlock);
    }

    #[test]
    fn test_read_empty_would_block() {
        let mut rb = RingBuffer::new(4).unwrap();
        let mut buf = [0u8; 4];
        let err = rb.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WouldBlock);
        assert_eq!(rb.read(&mut []).unwrap(), 0);
    }

    #[test]
    fn test_write_all_read_exact_across_wrap() {
        let mut rb = RingBuffer::new(8).unwrap();
        rb.write_all(b"123456").unwrap();
        let mut four = [0u8; 4];
        rb.read_exact(&mut four).unwrap();
        assert_eq!(&four, b"1234");

        rb.write_all(b"789ab").unwrap();
        let mut rest = [0u8; 7];
        rb.read_exact(&mut rest).unwrap();
        assert_eq!(&rest, b"56789ab");
    }

    #[test]
    fn test_io_copy_into_vec() {
        let mut rb = RingBuffer::new(16).unwrap();
        rb.write_all(b"copy me").unwrap();
        let mut sink = Vec::new();
        // io::copy stops on the WouldBlock error once drained
        let err = io::copy(&mut rb, &mut sink).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WouldBlock);
        assert_eq!(sink, b"copy me");
    }
}
