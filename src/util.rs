//! Formatting helpers shared by error paths and `Display` impls.

use std::fmt::Write;

/// Formats a byte slice as contiguous lowercase hex.
///
/// # Example
///
/// ```
/// use omron_cip::util::to_hex;
///
/// assert_eq!(to_hex(&[0x91, 0x07, 0xC4]), "9107c4");
/// assert_eq!(to_hex(&[]), "");
/// ```
pub fn to_hex(buffer: &[u8]) -> String {
    let mut out = String::with_capacity(buffer.len() * 2);
    for b in buffer {
        // write! to a String cannot fail
        let _ = write!(out, "{b:02x}");
    }
    out
}
