//! Transport seam for CIP explicit messaging.
//!
//! This module defines the [`Transport`] trait through which the library
//! talks to a PLC. The trait is deliberately narrow: one request goes out,
//! one response comes back. Everything below it — EtherNet/IP session
//! registration, forward-open, TCP socket management — belongs to the
//! implementor, which typically wraps an established explicit-messaging
//! session.
//!
//! # Design
//!
//! - **Protocol agnostic** - The transport moves bytes; it knows nothing
//!   about CIP services or request paths
//! - **Synchronous** - `get_data` blocks until the response arrives or the
//!   transport's timeout expires
//! - **One outstanding request** - Callers never send again before the
//!   previous response has been consumed
//!
//! The handle is acquired when the implementor is constructed and released
//! when it is dropped, on every exit path.
//!
//! # Example
//!
//! A loopback transport answering every request with a canned success
//! envelope:
//!
//! ```
//! use omron_cip::{Result, Transport};
//!
//! struct Loopback;
//!
//! impl Transport for Loopback {
//!     fn send(&mut self, _data: &[u8]) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn get_data(&mut self, buf: &mut [u8]) -> Result<usize> {
//!         let response = [0x81, 0x00, 0x00, 0x00];
//!         buf[..response.len()].copy_from_slice(&response);
//!         Ok(response.len())
//!     }
//! }
//! ```

use std::time::Duration;

use crate::error::Result;

/// Default request timeout expected from transport implementations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// A request/response handle to one PLC.
///
/// Implementations surface send/receive failures and timeouts as
/// [`CipError::Transport`](crate::CipError::Transport).
pub trait Transport {
    /// Sends one encoded CIP request.
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receives one CIP response into `buf` and returns its size.
    ///
    /// A returned size larger than `buf.len()` means the response did not
    /// fit; the caller must treat that as a failure and must not read
    /// `buf`.
    fn get_data(&mut self, buf: &mut [u8]) -> Result<usize>;
}
