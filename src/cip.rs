//! CIP explicit-message framing: services, request paths, reply envelope.
//!
//! This module holds the byte-level building blocks of every request the
//! library sends and of the reply envelope it receives.
//!
//! # Request Layout
//!
//! An explicit request is the service byte, the request path length in
//! 16-bit words, the path bytes, and the service-specific data:
//!
//! | Component | Size | Description |
//! |-----------|------|-------------|
//! | Service | 1 byte | e.g. `0x01` Get_Attribute_All |
//! | Path length | 1 byte | in words (paths are always even-length) |
//! | Path | variable | logical or symbolic segments |
//! | Service data | variable | service specific |
//!
//! # Reply Envelope
//!
//! | Component | Size | Description |
//! |-----------|------|-------------|
//! | Reply service | 1 byte | request service with the reply bit set |
//! | Reserved | 1 byte | discarded |
//! | General status | 1 byte | `0x00` = success |
//! | Extended status count | 1 byte | in words |
//! | Extended status | 2 × count | raw bytes |
//! | Payload | variable | service specific |
//!
//! # Example
//!
//! ```
//! use omron_cip::cip::{encode_get_attribute_all, logical_path, CLASS_TAG};
//! use omron_cip::{Endian, FixedBufferSerializer};
//!
//! let mut buf = [0u8; 16];
//! let mut ser = FixedBufferSerializer::new(&mut buf, Endian::Little);
//! encode_get_attribute_all(&mut ser, &logical_path(CLASS_TAG, 0));
//! assert_eq!(
//!     ser.serialized_buffer(),
//!     &[0x01, 0x03, 0x20, 0x6A, 0x25, 0x00, 0x00, 0x00]
//! );
//! ```

use std::fmt;

use crate::error::{CipError, Result};
use crate::serialize::{Endian, FixedBufferDeserializer, FixedBufferSerializer};
use crate::util::to_hex;

/// Get_Attribute_All service code.
pub const SERVICE_GET_ATTRIBUTE_ALL: u8 = 0x01;
/// Omron-specific Get_All_Instances service code.
pub const SERVICE_OMRON_GET_ALL_INSTANCES: u8 = 0x5F;
/// Tag object class.
pub const CLASS_TAG: u8 = 0x6A;
/// Logical segment, 8-bit class id.
pub const SEGMENT_LOGICAL_CLASS_8: u8 = 0x20;
/// Logical segment, 16-bit instance id.
pub const SEGMENT_LOGICAL_INSTANCE_16: u8 = 0x25;
/// Symbolic segment, ANSI extended.
pub const SEGMENT_SYMBOLIC_ANSI: u8 = 0x91;

/// Tag namespace selector for Get_All_Instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum TagType {
    /// Controller-defined tags.
    System = 1,
    /// User-defined tags.
    User = 2,
}

/// Builds the logical request path addressing `class_id`, `instance_id`.
///
/// Instance 0 addresses the class itself. The instance id travels as a
/// 16-bit little-endian value after a pad byte.
pub fn logical_path(class_id: u8, instance_id: u16) -> [u8; 6] {
    let mut buf = [0u8; 6];
    let mut ser = FixedBufferSerializer::new(&mut buf, Endian::Little);
    ser.write_u8(SEGMENT_LOGICAL_CLASS_8);
    ser.write_u8(class_id);
    ser.write_u8(SEGMENT_LOGICAL_INSTANCE_16);
    ser.write_u8(0x00);
    ser.write_u16(instance_id);
    buf
}

/// Builds the symbolic request path addressing a named variable.
///
/// The name travels length-prefixed and zero-padded to an even number of
/// bytes, so the path length is always expressible in words.
///
/// # Errors
///
/// Returns `CipError::Encode` if the name is longer than 255 bytes.
///
/// # Example
///
/// ```
/// use omron_cip::cip::symbolic_path;
///
/// let path = symbolic_path("Bad").unwrap();
/// assert_eq!(path, [0x91, 0x03, b'B', b'a', b'd', 0x00]);
/// ```
pub fn symbolic_path(name: &str) -> Result<Vec<u8>> {
    if name.len() > 255 {
        return Err(CipError::encode(format!(
            "symbolic path: name is {} bytes, limit is 255",
            name.len()
        )));
    }
    let padded_length = name.len() + name.len() % 2;
    let mut buf = vec![0u8; 2 + padded_length];
    let mut ser = FixedBufferSerializer::new(&mut buf, Endian::Little);
    ser.write_u8(SEGMENT_SYMBOLIC_ANSI);
    ser.write_u8(name.len() as u8);
    ser.write_bytes(name.as_bytes());
    Ok(buf)
}

/// Encodes a Get_Attribute_All request for the given path.
///
/// Resets the serializer first; a stale error flag never hides a fresh
/// request.
pub fn encode_get_attribute_all(ser: &mut FixedBufferSerializer<'_>, request_path: &[u8]) {
    ser.reset();
    ser.write_u8(SERVICE_GET_ATTRIBUTE_ALL);
    ser.write_u8((request_path.len() / 2) as u8);
    ser.write_bytes(request_path);
}

/// Encodes an Omron Get_All_Instances request.
///
/// Enumeration starts at `next_instance_id` within the `tag_type`
/// namespace; the four-byte literal after the cursor is required by the
/// controller but undocumented.
pub fn encode_get_all_instances(
    ser: &mut FixedBufferSerializer<'_>,
    next_instance_id: u32,
    tag_type: TagType,
) {
    ser.reset();
    let request_path = logical_path(CLASS_TAG, 0);
    ser.write_u8(SERVICE_OMRON_GET_ALL_INSTANCES);
    ser.write_u8((request_path.len() / 2) as u8);
    ser.write_bytes(&request_path);
    ser.write_u32(next_instance_id);
    ser.write_bytes(&[0x20, 0x00, 0x00, 0x00]);
    ser.write_u16(tag_type as u16);
}

/// Decoded CIP explicit-message reply envelope.
///
/// After [`decode`](Self::decode) the deserializer is positioned at the
/// service payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipResponse {
    /// Request service code with the reply bit set.
    pub reply_service: u8,
    /// General status; `0x00` means success.
    pub general_status: u8,
    /// Raw extended status bytes (`2 ×` the advertised word count).
    pub extended_status: Vec<u8>,
}

impl CipResponse {
    /// Decodes the reply envelope from the front of a response.
    ///
    /// # Errors
    ///
    /// Returns `CipError::Decode` if the response ends inside the
    /// envelope.
    pub fn decode(de: &mut FixedBufferDeserializer<'_>) -> Result<Self> {
        let reply_service = de.read_u8();
        de.advance(1); // reserved
        let general_status = de.read_u8();
        let ext_status_words = de.read_u8();
        let mut extended_status = vec![0u8; ext_status_words as usize * 2];
        de.read_bytes(&mut extended_status);
        if de.has_error() {
            return Err(CipError::decode("CIP response envelope"));
        }
        Ok(Self {
            reply_service,
            general_status,
            extended_status,
        })
    }

    /// Returns whether the general status reports success.
    pub fn is_success(&self) -> bool {
        self.general_status == 0
    }

    /// Translates a non-zero general status into a `CipStatus` error.
    pub fn check_status(&self) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(CipError::cip_status(
                self.general_status,
                self.extended_status.clone(),
            ))
        }
    }
}

impl fmt::Display for CipResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CipResponse(reply_service={:x}, general_status={:x}, extended_status({})='{}')",
            self.reply_service,
            self.general_status,
            self.extended_status.len(),
            to_hex(&self.extended_status)
        )
    }
}
