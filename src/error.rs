//! Error types for CIP explicit messaging.
//!
//! This module defines the [`CipError`] enum and the [`Result`] type alias
//! used throughout the library, together with the CIP status code→message
//! lookup tables.
//!
//! # Error Categories
//!
//! - **CIP status errors** - A response arrived with a non-zero general
//!   status; carries the general status byte and the raw extended status
//!   bytes reported by the controller
//! - **Transport errors** - Send/receive failures and timeouts
//! - **Decode/encode errors** - A response could not be decoded, or a
//!   request did not fit its send buffer
//!
//! No error is recovered locally; every error aborts the running
//! enumeration and is surfaced to the caller.
//!
//! # Example
//!
//! ```
//! use omron_cip::CipError;
//!
//! let err = CipError::cip_status(0x1F, vec![0x07, 0x80]);
//! let msg = err.to_string();
//! assert!(msg.contains("0x1f"));
//! assert!(msg.contains("0x8007"));
//! assert!(msg.contains("Vendor Specific Error"));
//! ```

use std::io;
use thiserror::Error;

use crate::util::to_hex;

/// Returns the standard CIP description for a general status byte.
///
/// Unknown codes yield an empty string, never an error.
///
/// # Example
///
/// ```
/// use omron_cip::general_status_message;
///
/// assert_eq!(general_status_message(0x1F), "Vendor Specific Error");
/// assert_eq!(general_status_message(0x42), "");
/// ```
pub fn general_status_message(status: u8) -> &'static str {
    match status {
        0x00 => "Success",
        0x01 => "Connection Failure",
        0x02 => "Resource Unavailable",
        0x03 => "Invalid Parameter Value",
        0x04 => "Path Segment Error",
        0x05 => "Path Destination Error",
        0x07 => "Connection Lost",
        0x09 => "Invalid Attribute Value",
        0x0C => "Object State Conflict",
        0x11 => "Reply Data Too Large",
        0x13 => "Not Enough Data",
        0x15 => "Too Much Data",
        0x1F => "Vendor Specific Error",
        0x20 => "Invalid Parameter",
        _ => "",
    }
}

/// Returns the Omron description for a 2-byte extended status.
///
/// Extended statuses of any other width, and unknown codes, yield an empty
/// string. The wording follows Omron's published explicit-messaging notes.
///
/// # Example
///
/// ```
/// use omron_cip::extended_status_message;
///
/// assert_eq!(
///     extended_status_message(&[0x07, 0x80]),
///     "An inaccessible variable was specified"
/// );
/// assert_eq!(extended_status_message(&[]), "");
/// ```
pub fn extended_status_message(ext_status: &[u8]) -> &'static str {
    if ext_status.len() != 2 {
        return "";
    }
    let status = u16::from_le_bytes([ext_status[0], ext_status[1]]);
    match status {
        // general status: Object State Conflict
        0x8010 => "Downloading, starting up",
        0x8011 => "Tag memory error",

        // general status: Vendor Specific Error
        0x0102 => "The read target is a variable I/O that cannot be read.",
        0x2104 => "The read target is a variable I/O that cannot be read.",
        0x0104 => "An address or size that exceeds the segment area is specified.",
        0x1103 => "An address or size that exceeds the segment area is specified.",
        0x8001 => "Internal Abnormality",
        0x8007 => "An inaccessible variable was specified",
        0x8029 => "An area that cannot be accessed in bulk was specified in SimpleDataSegment.",
        0x8031 => "Internal error (memory allocation error)",

        // general status: Invalid Parameter
        0x8009 => "Segment Type Abnormal",
        0x800F => "Data length information in the request data is inconsistent",
        0x8017 => "Requesting more than one element for a single data item",
        0x8018 => "Requesting 0 elements or exceeding the range of array data",
        0x8021 => "A value other than 0 or 2 was specified in the AddInfo area.",
        0x8022 => {
            "The Data Type of the Request Service Data does not match the type of TAG \
             information. The AddInfo Length of the Request Service Data is not 0."
        }
        0x8023 => "Internal error (invalid command format)",
        0x8024 => "Internal error (invalid command length)",
        0x8025 => "Internal error (invalid parameter)",
        0x8027 => "Internal error (parameter error)",
        0x8028 => {
            "A value outside the range was written to a variable with a subrange specified. \
             An undefined value was written to an Enum type variable."
        }

        _ => "",
    }
}

/// Reads the extended status bytes as one little-endian integer.
///
/// Only the widths a controller can report (1, 2, 4 or 8 bytes) convert;
/// anything else returns `None`.
fn extended_status_to_int(data: &[u8]) -> Option<u64> {
    match data.len() {
        1 => Some(data[0] as u64),
        2 => Some(u16::from_le_bytes([data[0], data[1]]) as u64),
        4 => Some(u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as u64),
        8 => {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(data);
            Some(u64::from_le_bytes(bytes))
        }
        _ => None,
    }
}

/// Builds the display message for a non-zero CIP response status.
fn cip_status_display(general_status: u8, extended_status: &[u8]) -> String {
    let mut message = format!(
        "Received error status in CIP response: {:#x}",
        general_status
    );
    if !extended_status.is_empty() {
        match extended_status_to_int(extended_status) {
            Some(ext) => message.push_str(&format!(", extended: {ext:#x}")),
            None => message.push_str(&format!(", extended: {}", to_hex(extended_status))),
        }
    }
    let gen_message = general_status_message(general_status);
    let ext_message = extended_status_message(extended_status);
    if !gen_message.is_empty() || !ext_message.is_empty() {
        message.push_str(" - ");
        message.push_str(gen_message);
        if !ext_message.is_empty() {
            message.push_str(", ");
            message.push_str(ext_message);
        }
    }
    message
}

/// Result type alias for CIP operations.
pub type Result<T> = std::result::Result<T, CipError>;

/// Errors that can occur during CIP communication.
#[derive(Debug, Error)]
pub enum CipError {
    /// Send/receive failure or timeout from the transport.
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),

    /// The transport reported a response larger than the receive buffer.
    #[error("receive buffer too small: {needed} bytes needed, capacity is {capacity}")]
    BufferOverflow {
        /// Response size reported by the transport.
        needed: usize,
        /// Capacity of the receive buffer.
        capacity: usize,
    },

    /// The controller answered with a non-zero general status.
    #[error("{}", cip_status_display(*.general_status, .extended_status))]
    CipStatus {
        /// General status byte from the reply envelope.
        general_status: u8,
        /// Raw extended status bytes (0, 2, 4, 6 or 8 of them).
        extended_status: Vec<u8>,
    },

    /// A response could not be decoded.
    #[error("could not decode {what}")]
    Decode {
        /// The record that failed, e.g. `instance=7`.
        what: String,
    },

    /// A request did not fit the send buffer.
    #[error("could not encode {what}")]
    Encode {
        /// The request that failed.
        what: String,
    },
}

impl CipError {
    /// Creates a new `CipStatus` error from the reply envelope fields.
    ///
    /// # Example
    ///
    /// ```
    /// use omron_cip::CipError;
    ///
    /// let err = CipError::cip_status(0x05, vec![]);
    /// assert!(err.to_string().contains("Path Destination Error"));
    /// ```
    pub fn cip_status(general_status: u8, extended_status: Vec<u8>) -> Self {
        Self::CipStatus {
            general_status,
            extended_status,
        }
    }

    /// Creates a new `Decode` error naming the record that failed.
    pub fn decode(what: impl Into<String>) -> Self {
        Self::Decode { what: what.into() }
    }

    /// Creates a new `Encode` error naming the request that failed.
    pub fn encode(what: impl Into<String>) -> Self {
        Self::Encode { what: what.into() }
    }
}
