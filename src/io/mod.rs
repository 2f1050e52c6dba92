//! Sample history storage
//!
//! Circular buffering of incoming mono quanta.

pub mod ring_buffer;
