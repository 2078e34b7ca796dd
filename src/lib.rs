//! # Omron CIP Tag Discovery Library
//!
//! A Rust library for enumerating the symbolic variables ("tags") of an
//! Omron NJ/NX PLC over an EtherNet/IP + CIP explicit-messaging session.
//!
//! This is a **protocol-only** library—no session management, polling,
//! schedulers, or application-level features. Given an open
//! explicit-messaging session (a [`Transport`] handle), it enumerates every
//! tag, resolves each one's full type descriptor (scalar type, or
//! array-of-scalar with per-dimension bounds), and emits a filtered catalog
//! suitable for a higher layer to subscribe to or read.
//!
//! ## Features
//!
//! - **Protocol-only** — drives the CIP dialog; the EtherNet/IP session is
//!   a collaborator behind the [`Transport`] trait
//! - **Deterministic** — one enumeration is a fixed sequence of
//!   request/response cycles; no retries, caching, or reconnection
//! - **Fail-safe decoding** — bounded, endian-aware buffer cursors with
//!   sticky errors; malformed responses can never read out of bounds
//! - **Complete taxonomy** — CIP status bytes translate to structured
//!   errors with the general and Omron extended status message tables
//!
//! ## Quick Start
//!
//! ```no_run
//! use omron_cip::{Result, TagDiscovery, Transport};
//!
//! # struct EipSession;
//! # impl Transport for EipSession {
//! #     fn send(&mut self, _data: &[u8]) -> Result<()> { Ok(()) }
//! #     fn get_data(&mut self, _buf: &mut [u8]) -> Result<usize> { Ok(0) }
//! # }
//! # impl EipSession { fn open() -> Result<Self> { Ok(EipSession) } }
//! fn main() -> Result<()> {
//!     // Any established explicit-messaging session works; the library
//!     // only needs "send one payload, receive one payload".
//!     let session = EipSession::open()?;
//!
//!     let mut discovery = TagDiscovery::new(session);
//!     let signals = discovery.list_signals()?;
//!     println!("{signals}");
//!
//!     Ok(())
//! }
//! ```
//!
//! Each catalog entry is a flat JSON record:
//!
//! ```json
//! { "name": "Bits", "type": "BOOL", "arrayDimensions": [[0, 17]] }
//! ```
//!
//! ## The Discovery Dialog
//!
//! | Step | Service | Purpose |
//! |------|---------|---------|
//! | Count | Get_Attribute_All (`0x01`) on class `0x6A` | authoritative variable count |
//! | Names | Get_All_Instances (`0x5F`, Omron-specific) | paged name listing, System then User tags |
//! | Resolve | Get_Attribute_All with a symbolic path | full type descriptor per tag |
//!
//! Structures, abbreviated structures and unrecognized data types cannot be
//! read through this library and are filtered from the catalog; everything
//! else — including arrays of those scalar types — is listed with its exact
//! bounds.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T>`]. The library never panics in public
//! code; malformed responses surface as [`CipError::Decode`], controller
//! errors as [`CipError::CipStatus`] with human-readable status messages:
//!
//! ```
//! use omron_cip::CipError;
//!
//! let err = CipError::cip_status(0x1F, vec![0x07, 0x80]);
//! assert_eq!(
//!     err.to_string(),
//!     "Received error status in CIP response: 0x1f, extended: 0x8007 - \
//!      Vendor Specific Error, An inaccessible variable was specified"
//! );
//! ```
//!
//! ## Design Philosophy
//!
//! 1. Each operation does exactly what it says
//! 2. No magic or implicit behavior
//! 3. The application has full control over retry and reconnection
//! 4. Errors are always explicit and descriptive

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod catalog;
pub mod cip;
mod context;
mod discovery;
mod error;
mod serialize;
mod transport;
pub mod util;
mod variable;

// Public re-exports
pub use catalog::{build_signals, is_listable, Signal};
pub use cip::{CipResponse, TagType};
pub use context::{RequestContext, RECV_BUFFER_SIZE, SEND_BUFFER_SIZE};
pub use discovery::TagDiscovery;
pub use error::{extended_status_message, general_status_message, CipError, Result};
pub use serialize::{Endian, FixedBufferDeserializer, FixedBufferSerializer};
pub use transport::{Transport, DEFAULT_TIMEOUT};
pub use variable::{array_size, ArrayInfo, DataType, VariableInfo};
