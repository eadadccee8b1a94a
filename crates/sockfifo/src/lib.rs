//! sockfifo - circular byte buffer for asynchronous socket I/O
//!
//! A fixed-capacity, power-of-two sized byte array addressed through two
//! ever-increasing `u32` cursors, in the style of the Linux kernel `kfifo`.
//! It sits between an application and an asynchronous network layer so the
//! rate data is produced and the rate it is consumed can differ, without
//! queueing intermediate buffers.
//!
//! # Key Features
//!
//! - Wraparound by bitmask, never modulo
//! - Copy-in/copy-out API (`put` / `get`) that splits across the wrap point
//! - Deferred acknowledgment: reserve a contiguous `(offset, len)` window,
//!   hand it to an external I/O operation, then commit the bytes actually
//!   transferred
//! - Borrow-checked reservation guards for synchronous callers
//! - `std::io::Read` / `std::io::Write` adapters
//!
//! The buffer is single-producer/single-consumer by convention and performs no
//! internal synchronization. Callers on different threads must serialize
//! access themselves.
//!
//! # Example
//!
//! ```
//! use sockfifo::RingBuffer;
//!
//! let mut rb = RingBuffer::new(100).unwrap();
//! assert_eq!(rb.capacity(), 128);
//!
//! // Application side: copy a payload in
//! rb.put(b"GET / HTTP/1.1\r\n\r\n").unwrap();
//!
//! // Network side: take a window for an async send, commit what was sent
//! let window = rb.reserve_read();
//! let sent = &rb.storage()[window.range()][..10];
//! assert_eq!(sent, b"GET / HTTP");
//! rb.commit_read(10).unwrap();
//!
//! assert_eq!(rb.occupied(), 8);
//! ```

mod config;
mod error;
mod invariants;
mod io;
mod metrics;
mod reservation;
mod ring;
mod tracing_compat;
mod window;

pub use config::{round_up_pow2, Config, LARGE_SOCKET_CONFIG, MAX_CAPACITY, SMALL_SOCKET_CONFIG};
pub use error::RingError;
pub use metrics::Metrics;
pub use reservation::{ReadReservation, WriteReservation};
pub use ring::RingBuffer;
pub use window::Window;
