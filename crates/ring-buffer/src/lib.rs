//! Bounded Ring Buffer
//!
//! Provides a fixed-capacity FIFO window for per-frame signal history.

mod buffer;

pub use buffer::RingBuffer;
