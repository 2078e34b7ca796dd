//! Tag enumeration over CIP explicit messaging.
//!
//! [`TagDiscovery`] drives the whole discovery dialog against one PLC:
//!
//! 1. **Count** - Get_Attribute_All on the tag class reports the total
//!    number of variables; this count is authoritative for the output
//!    length.
//! 2. **Names** - the Omron Get_All_Instances service pages through the
//!    System and then the User tag namespace, each page continuing from a
//!    server-supplied instance-id cursor, until an empty page arrives.
//! 3. **Resolve** - every collected name is resolved to a full
//!    [`VariableInfo`] through a symbolic Get_Attribute_All.
//!
//! Names keep the controller's order, System before User, and that order
//! is the public order of the final catalog.
//!
//! Any transport, status or decode failure aborts the enumeration.
//! Variables with unrecognized data-type bytes are kept (with a warning)
//! and filtered later by the catalog.

use tracing::warn;

use crate::catalog::{build_signals, Signal};
use crate::cip::{
    encode_get_all_instances, encode_get_attribute_all, logical_path, symbolic_path, TagType,
    CLASS_TAG,
};
use crate::context::RequestContext;
use crate::error::{CipError, Result};
use crate::serialize::FixedBufferDeserializer;
use crate::transport::Transport;
use crate::variable::{array_size, ArrayInfo, DataType, VariableInfo};

/// One entry of a Get_All_Instances page.
struct InstanceData {
    id: u32,
    name: String,
}

/// Decodes one instance record from a Get_All_Instances page.
///
/// The entry length field covers everything after itself: two class bytes
/// (always 0x6B on the wire), the instance id repeated as four bytes, the
/// length-prefixed name, and trailing padding.
fn decode_instance_data(
    de: &mut FixedBufferDeserializer<'_>,
    index: u16,
) -> Result<InstanceData> {
    let id = de.read_u32();
    let entry_len = de.read_u16();
    de.advance(2); // class
    de.advance(4); // instance id again
    let name_len = de.read_u8();
    let name = de.read_string(name_len as usize);
    if de.has_error() {
        return Err(CipError::decode(format!("instance={index}")));
    }
    match (entry_len as usize).checked_sub(2 + 4 + 1 + name_len as usize) {
        Some(padding) => {
            de.advance(padding);
        }
        None => {
            return Err(CipError::decode(format!(
                "instance={index}: entry length {entry_len} shorter than its fields"
            )));
        }
    }
    if de.has_error() {
        return Err(CipError::decode(format!("instance={index}")));
    }
    Ok(InstanceData { id, name })
}

/// Enumerates the tags of one PLC.
///
/// Owns the request context (and through it, the transport handle) for the
/// duration of the enumeration. One instance serves one connection; callers
/// wanting parallelism create one per PLC.
///
/// # Example
///
/// ```
/// use omron_cip::{Result, TagDiscovery, Transport};
/// use std::collections::VecDeque;
///
/// struct Session {
///     responses: VecDeque<Vec<u8>>,
/// }
///
/// impl Transport for Session {
///     fn send(&mut self, _data: &[u8]) -> Result<()> {
///         Ok(())
///     }
///
///     fn get_data(&mut self, buf: &mut [u8]) -> Result<usize> {
///         let response = self.responses.pop_front().unwrap_or_default();
///         buf[..response.len()].copy_from_slice(&response);
///         Ok(response.len())
///     }
/// }
///
/// // An empty controller: zero variables, empty System and User pages.
/// let session = Session {
///     responses: [
///         vec![0x81, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
///         vec![0xDF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
///         vec![0xDF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
///     ]
///     .into(),
/// };
///
/// let mut discovery = TagDiscovery::new(session);
/// assert_eq!(discovery.list_signals()?, serde_json::json!([]));
/// # Ok::<(), omron_cip::CipError>(())
/// ```
pub struct TagDiscovery<T: Transport> {
    ctx: RequestContext<T>,
}

impl<T: Transport> TagDiscovery<T> {
    /// Creates a discovery client over an open transport handle.
    pub fn new(transport: T) -> Self {
        Self {
            ctx: RequestContext::new(transport),
        }
    }

    /// Returns a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        self.ctx.transport()
    }

    /// Reads the total number of variables from the tag class.
    pub fn variable_count(&mut self) -> Result<u16> {
        let path = logical_path(CLASS_TAG, 0);
        self.ctx.encode("get attribute all request", |ser| {
            encode_get_attribute_all(ser, &path)
        })?;
        let mut de = self.ctx.request()?;
        de.advance(2); // reserved
        let num = de.read_u16();
        if de.has_error() {
            return Err(CipError::decode(
                "get attribute all response for instance=0",
            ));
        }
        Ok(num)
    }

    /// Reads the name of the tag at `instance_id` (1-based).
    ///
    /// This addresses the instance logically instead of through the vendor
    /// enumeration service, so it also works against controllers that do
    /// not implement Get_All_Instances.
    pub fn variable_name(&mut self, instance_id: u16) -> Result<String> {
        let path = logical_path(CLASS_TAG, instance_id);
        self.ctx.encode("get attribute all request", |ser| {
            encode_get_attribute_all(ser, &path)
        })?;
        let mut de = self.ctx.request()?;
        de.advance(4);
        let name_len = de.read_u8();
        let name = de.read_string(name_len as usize);
        if de.has_error() {
            return Err(CipError::decode(format!(
                "get attribute all response for instance={instance_id}"
            )));
        }
        Ok(name)
    }

    /// Resolves one tag name to its full type descriptor.
    ///
    /// For arrays, the size field on the wire is the per-element byte size;
    /// the returned [`VariableInfo::size`] is the computed size of the
    /// whole array.
    pub fn variable_info(&mut self, name: &str) -> Result<VariableInfo> {
        let path = symbolic_path(name)?;
        self.ctx.encode("get attribute all request", |ser| {
            encode_get_attribute_all(ser, &path)
        })?;
        let mut de = self.ctx.request()?;

        let mut size = de.read_u32();
        let data_type = DataType::from_byte(de.read_u8());
        if !data_type.is_valid() {
            warn!(variable = %name, data_type = %data_type, "variable has unknown data type");
        }

        let mut array_info = None;
        if data_type == DataType::Array {
            let element_type = DataType::from_byte(de.read_u8());
            if !element_type.is_valid() {
                warn!(variable = %name, element_type = %element_type, "array of unknown element type");
            }
            // For arrays the size field is actually the element size; the
            // real size is computed once the dimensions are known.
            let element_size = size;
            let num_dimensions = de.read_u8();
            de.advance(1); // padding
            if num_dimensions == 0 && !de.has_error() {
                return Err(CipError::decode(format!(
                    "array descriptor for variable '{name}': zero dimensions"
                )));
            }

            let mut dimensions = Vec::with_capacity(num_dimensions as usize);
            for _ in 0..num_dimensions {
                dimensions.push(de.read_u32());
            }

            de.advance(8); // opaque
            let _bit_number = de.read_u8();
            de.advance(3); // padding
            let _variable_type_instance_id = de.read_u32();

            let mut start_indices = Vec::with_capacity(num_dimensions as usize);
            for _ in 0..num_dimensions {
                start_indices.push(de.read_u32());
            }

            size = array_size(&dimensions, element_type, element_size);
            array_info = Some(ArrayInfo {
                element_type,
                element_size,
                dimensions,
                start_indices,
            });
        }

        if de.has_error() {
            return Err(CipError::decode(format!(
                "get attribute all response for variable '{name}'"
            )));
        }

        Ok(VariableInfo {
            name: name.to_string(),
            data_type,
            size,
            array_info,
        })
    }

    /// Enumerates every variable through the vendor Get_All_Instances
    /// service and resolves each name.
    ///
    /// # Errors
    ///
    /// Besides transport, status and decode failures, the enumeration
    /// aborts when a page fails to advance the instance-id cursor (the
    /// dialog would never terminate) and when fewer names arrive than the
    /// advertised variable count. More names than the count is a warning;
    /// the surplus is dropped.
    pub fn variables(&mut self) -> Result<Vec<VariableInfo>> {
        let num = self.variable_count()? as usize;

        let mut names = Vec::with_capacity(num);
        for tag_type in [TagType::System, TagType::User] {
            let mut next_instance_id: u32 = 1;
            loop {
                self.ctx.encode("get all instances request", |ser| {
                    encode_get_all_instances(ser, next_instance_id, tag_type)
                })?;
                let mut de = self.ctx.request()?;
                let num_instances = de.read_u16();
                de.advance(2); // unknown

                if num_instances == 0 {
                    break;
                }

                for i in 0..num_instances {
                    let instance = decode_instance_data(&mut de, i)?;
                    if instance.id < next_instance_id {
                        return Err(CipError::decode(format!(
                            "instance={i}: id {} does not advance the cursor {next_instance_id}",
                            instance.id
                        )));
                    }
                    next_instance_id = instance.id + 1;
                    names.push(instance.name);
                }
            }
        }

        if names.len() > num {
            warn!(
                names = names.len(),
                count = num,
                "read more variable names than the variable count"
            );
            names.truncate(num);
        } else if names.len() < num {
            return Err(CipError::decode(format!(
                "variable list: {} names for {num} variables",
                names.len()
            )));
        }

        let mut vars = Vec::with_capacity(num);
        for name in &names {
            vars.push(self.variable_info(name)?);
        }
        Ok(vars)
    }

    /// Enumerates every variable by walking instance ids `1..=count`.
    ///
    /// Slower than [`variables`](Self::variables) — two requests per tag —
    /// but built entirely from standard CIP services.
    pub fn variables_by_instance(&mut self) -> Result<Vec<VariableInfo>> {
        let num = self.variable_count()?;
        let mut vars = Vec::with_capacity(num as usize);
        for i in 0..num {
            let name = self.variable_name(i + 1)?;
            vars.push(self.variable_info(&name)?);
        }
        Ok(vars)
    }

    /// Enumerates, filters and projects the catalog (see [`Signal`]).
    pub fn signals(&mut self) -> Result<Vec<Signal>> {
        Ok(build_signals(&self.variables()?))
    }

    /// Returns the catalog as a JSON array of
    /// `{"name", "type", "arrayDimensions"?}` records.
    pub fn list_signals(&mut self) -> Result<serde_json::Value> {
        let signals = self.signals()?;
        serde_json::to_value(&signals)
            .map_err(|e| CipError::encode(format!("signal catalog: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::ScriptedTransport;

    const OK: [u8; 4] = [0x81, 0x00, 0x00, 0x00];

    fn ok(payload: &[u8]) -> Vec<u8> {
        let mut response = OK.to_vec();
        response.extend_from_slice(payload);
        response
    }

    fn count_response(num: u16) -> Vec<u8> {
        let mut payload = vec![0x00, 0x00];
        payload.extend_from_slice(&num.to_le_bytes());
        ok(&payload)
    }

    fn instance_entry(id: u32, name: &str, extra_padding: u16) -> Vec<u8> {
        let entry_len = 2 + 4 + 1 + name.len() as u16 + extra_padding;
        let mut entry = Vec::new();
        entry.extend_from_slice(&id.to_le_bytes());
        entry.extend_from_slice(&entry_len.to_le_bytes());
        entry.extend_from_slice(&[0x6B, 0x00]); // class
        entry.extend_from_slice(&id.to_le_bytes()); // instance id again
        entry.push(name.len() as u8);
        entry.extend_from_slice(name.as_bytes());
        entry.extend(std::iter::repeat(0xEE).take(extra_padding as usize));
        entry
    }

    fn instances_response(entries: &[Vec<u8>]) -> Vec<u8> {
        let mut payload = Vec::new();
        payload.extend_from_slice(&(entries.len() as u16).to_le_bytes());
        payload.extend_from_slice(&[0x00, 0x00]); // reserved
        for entry in entries {
            payload.extend_from_slice(entry);
        }
        ok(&payload)
    }

    fn scalar_info_response(size: u32, type_code: u8) -> Vec<u8> {
        let mut payload = Vec::new();
        payload.extend_from_slice(&size.to_le_bytes());
        payload.push(type_code);
        ok(&payload)
    }

    fn array_info_response(
        element_size: u32,
        element_code: u8,
        dimensions: &[u32],
        start_indices: &[u32],
    ) -> Vec<u8> {
        let mut payload = Vec::new();
        payload.extend_from_slice(&element_size.to_le_bytes());
        payload.push(DataType::Array.code());
        payload.push(element_code);
        payload.push(dimensions.len() as u8);
        payload.push(0x00); // padding
        for d in dimensions {
            payload.extend_from_slice(&d.to_le_bytes());
        }
        payload.extend_from_slice(&[0u8; 8]); // opaque
        payload.push(0x00); // bit number
        payload.extend_from_slice(&[0u8; 3]); // padding
        payload.extend_from_slice(&0u32.to_le_bytes()); // type instance id
        for s in start_indices {
            payload.extend_from_slice(&s.to_le_bytes());
        }
        ok(&payload)
    }

    /// Instance-id cursors of the Get_All_Instances requests sent for
    /// `tag_type`, in order.
    fn observed_cursors(sent: &[Vec<u8>], tag_type: TagType) -> Vec<u32> {
        sent.iter()
            .filter(|req| req[0] == 0x5F && req[16..18] == (tag_type as u16).to_le_bytes())
            .map(|req| u32::from_le_bytes([req[8], req[9], req[10], req[11]]))
            .collect()
    }

    #[test]
    fn test_empty_plc() {
        // S1: zero variables, one empty page per tag type.
        let transport = ScriptedTransport::new([
            count_response(0),
            instances_response(&[]),
            instances_response(&[]),
        ]);
        let mut discovery = TagDiscovery::new(transport);
        let signals = discovery.list_signals().unwrap();
        assert_eq!(signals, serde_json::json!([]));
    }

    #[test]
    fn test_single_scalar_dint() {
        // S2: one user tag "Counter" of type DINT.
        let transport = ScriptedTransport::new([
            count_response(1),
            instances_response(&[]), // System
            instances_response(&[instance_entry(1, "Counter", 0)]),
            instances_response(&[]),
            scalar_info_response(4, 0xC4),
        ]);
        let mut discovery = TagDiscovery::new(transport);
        let signals = discovery.list_signals().unwrap();
        assert_eq!(
            signals,
            serde_json::json!([{"name": "Counter", "type": "DINT"}])
        );
    }

    #[test]
    fn test_single_bool_array() {
        // S3: BOOL[17] packs into 4 bytes.
        let transport = ScriptedTransport::new([
            count_response(1),
            instances_response(&[]),
            instances_response(&[instance_entry(1, "Bits", 0)]),
            instances_response(&[]),
            array_info_response(1, 0xC1, &[17], &[0]),
        ]);
        let mut discovery = TagDiscovery::new(transport);

        let vars = discovery.variables().unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].size, 4);
        let info = vars[0].array_info.as_ref().unwrap();
        assert_eq!(info.element_type, DataType::Bool);
        assert_eq!(info.element_size, 1);
        assert_eq!(info.dimensions, vec![17]);
        assert_eq!(info.start_indices, vec![0]);

        let signals = build_signals(&vars);
        assert_eq!(
            serde_json::to_value(&signals).unwrap(),
            serde_json::json!([{"name": "Bits", "type": "BOOL", "arrayDimensions": [[0, 17]]}])
        );
    }

    #[test]
    fn test_structure_filtered_from_catalog() {
        // S4: the structure variable stays in `variables` but not in the
        // catalog.
        let transport = ScriptedTransport::new([
            count_response(2),
            instances_response(&[]),
            instances_response(&[instance_entry(1, "A", 0), instance_entry(2, "B", 0)]),
            instances_response(&[]),
            scalar_info_response(2, 0xC3),  // A: INT
            scalar_info_response(64, 0xA2), // B: Structure
        ]);
        let mut discovery = TagDiscovery::new(transport);
        let signals = discovery.list_signals().unwrap();
        assert_eq!(signals, serde_json::json!([{"name": "A", "type": "INT"}]));
    }

    #[test]
    fn test_cip_error_aborts_enumeration() {
        // S5: the info request for "Bad" is answered with a vendor error.
        let transport = ScriptedTransport::new([
            count_response(1),
            instances_response(&[]),
            instances_response(&[instance_entry(1, "Bad", 0)]),
            instances_response(&[]),
            vec![0x81, 0x00, 0x1F, 0x01, 0x07, 0x80],
        ]);
        let mut discovery = TagDiscovery::new(transport);

        let message = discovery.variables().unwrap_err().to_string();
        assert!(message.contains("0x1f"));
        assert!(message.contains("0x8007"));
        assert!(message.contains("Vendor Specific Error"));
        assert!(message.contains("An inaccessible variable was specified"));
    }

    #[test]
    fn test_pagination_cursor_sequence() {
        // S6: two user pages; the cursor follows the highest id seen + 1.
        let transport = ScriptedTransport::new([
            count_response(5),
            instances_response(&[]), // System
            instances_response(&[
                instance_entry(1, "T1", 0),
                instance_entry(2, "T2", 0),
                instance_entry(5, "T5", 0),
            ]),
            instances_response(&[instance_entry(6, "T6", 0), instance_entry(9, "T9", 0)]),
            instances_response(&[]),
            scalar_info_response(2, 0xC3),
            scalar_info_response(2, 0xC3),
            scalar_info_response(2, 0xC3),
            scalar_info_response(2, 0xC3),
            scalar_info_response(2, 0xC3),
        ]);
        let mut discovery = TagDiscovery::new(transport);

        let vars = discovery.variables().unwrap();
        let names: Vec<&str> = vars.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["T1", "T2", "T5", "T6", "T9"]);

        assert_eq!(
            observed_cursors(&discovery.ctx.transport().sent, TagType::User),
            [1, 6, 10]
        );
        assert_eq!(
            observed_cursors(&discovery.ctx.transport().sent, TagType::System),
            [1]
        );
    }

    #[test]
    fn test_system_names_precede_user_names() {
        let transport = ScriptedTransport::new([
            count_response(2),
            instances_response(&[instance_entry(1, "SysTag", 0)]),
            instances_response(&[]),
            instances_response(&[instance_entry(1, "UserTag", 0)]),
            instances_response(&[]),
            scalar_info_response(2, 0xC3),
            scalar_info_response(2, 0xC3),
        ]);
        let mut discovery = TagDiscovery::new(transport);
        let vars = discovery.variables().unwrap();
        let names: Vec<&str> = vars.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["SysTag", "UserTag"]);
    }

    #[test]
    fn test_more_names_than_count_truncates() {
        let transport = ScriptedTransport::new([
            count_response(1),
            instances_response(&[]),
            instances_response(&[instance_entry(1, "Kept", 0), instance_entry(2, "Extra", 0)]),
            instances_response(&[]),
            scalar_info_response(2, 0xC3),
        ]);
        let mut discovery = TagDiscovery::new(transport);
        let vars = discovery.variables().unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].name, "Kept");
    }

    #[test]
    fn test_fewer_names_than_count_fails() {
        let transport = ScriptedTransport::new([
            count_response(3),
            instances_response(&[]),
            instances_response(&[instance_entry(1, "Only", 0), instance_entry(2, "Two", 0)]),
            instances_response(&[]),
        ]);
        let mut discovery = TagDiscovery::new(transport);
        let message = discovery.variables().unwrap_err().to_string();
        assert!(message.contains("2 names for 3 variables"), "{message}");
    }

    #[test]
    fn test_non_advancing_instance_id_fails() {
        let transport = ScriptedTransport::new([
            count_response(2),
            instances_response(&[]),
            instances_response(&[instance_entry(2, "Ok", 0), instance_entry(1, "Stuck", 0)]),
        ]);
        let mut discovery = TagDiscovery::new(transport);
        let message = discovery.variables().unwrap_err().to_string();
        assert!(message.contains("does not advance"), "{message}");
    }

    #[test]
    fn test_instance_entry_padding_skipped() {
        let transport = ScriptedTransport::new([
            count_response(2),
            instances_response(&[]),
            instances_response(&[
                instance_entry(1, "Padded", 5),
                instance_entry(2, "After", 0),
            ]),
            instances_response(&[]),
            scalar_info_response(2, 0xC3),
            scalar_info_response(2, 0xC3),
        ]);
        let mut discovery = TagDiscovery::new(transport);
        let vars = discovery.variables().unwrap();
        let names: Vec<&str> = vars.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["Padded", "After"]);
    }

    #[test]
    fn test_instance_entry_length_too_short_fails() {
        // entry_len = 6 cannot cover class + instance id + name length.
        let mut entry = Vec::new();
        entry.extend_from_slice(&1u32.to_le_bytes());
        entry.extend_from_slice(&6u16.to_le_bytes());
        entry.extend_from_slice(&[0x6B, 0x00]);
        entry.extend_from_slice(&1u32.to_le_bytes());
        entry.push(3);
        entry.extend_from_slice(b"Bad");

        let transport = ScriptedTransport::new([
            count_response(1),
            instances_response(&[]),
            instances_response(&[entry]),
        ]);
        let mut discovery = TagDiscovery::new(transport);
        let message = discovery.variables().unwrap_err().to_string();
        assert!(message.contains("shorter than its fields"), "{message}");
    }

    #[test]
    fn test_truncated_instance_record_fails() {
        let mut entry = instance_entry(1, "Chopped", 0);
        entry.truncate(9);
        let transport = ScriptedTransport::new([
            count_response(1),
            instances_response(&[]),
            instances_response(&[entry]),
        ]);
        let mut discovery = TagDiscovery::new(transport);
        let message = discovery.variables().unwrap_err().to_string();
        assert!(message.contains("instance=0"), "{message}");
    }

    #[test]
    fn test_variable_count() {
        let transport = ScriptedTransport::new([count_response(42)]);
        let mut discovery = TagDiscovery::new(transport);
        assert_eq!(discovery.variable_count().unwrap(), 42);

        // The request addresses the class itself.
        let sent = &discovery.ctx.transport().sent[0];
        assert_eq!(sent, &[0x01, 0x03, 0x20, 0x6A, 0x25, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_variable_count_truncated_payload() {
        let transport = ScriptedTransport::new([ok(&[0x00, 0x00, 0x01])]);
        let mut discovery = TagDiscovery::new(transport);
        let message = discovery.variable_count().unwrap_err().to_string();
        assert!(message.contains("instance=0"), "{message}");
    }

    #[test]
    fn test_variable_name() {
        let mut payload = vec![0u8; 4];
        payload.push(7);
        payload.extend_from_slice(b"Counter");
        let transport = ScriptedTransport::new([ok(&payload)]);
        let mut discovery = TagDiscovery::new(transport);
        assert_eq!(discovery.variable_name(3).unwrap(), "Counter");

        let sent = &discovery.ctx.transport().sent[0];
        assert_eq!(sent, &[0x01, 0x03, 0x20, 0x6A, 0x25, 0x00, 0x03, 0x00]);
    }

    #[test]
    fn test_variable_info_scalar_request_bytes() {
        let transport = ScriptedTransport::new([scalar_info_response(4, 0xC4)]);
        let mut discovery = TagDiscovery::new(transport);
        let var = discovery.variable_info("Counter").unwrap();
        assert_eq!(var.data_type, DataType::Dint);
        assert_eq!(var.size, 4);
        assert!(var.array_info.is_none());

        let sent = &discovery.ctx.transport().sent[0];
        assert_eq!(
            sent,
            &[0x01, 0x05, 0x91, 0x07, b'C', b'o', b'u', b'n', b't', b'e', b'r', 0x00]
        );
    }

    #[test]
    fn test_variable_info_unknown_type_is_kept() {
        let transport = ScriptedTransport::new([scalar_info_response(4, 0x99)]);
        let mut discovery = TagDiscovery::new(transport);
        let var = discovery.variable_info("Odd").unwrap();
        assert_eq!(var.data_type, DataType::Unknown(0x99));
    }

    #[test]
    fn test_variable_info_multi_dimension_array() {
        let transport =
            ScriptedTransport::new([array_info_response(2, 0xC3, &[10, 12], &[1, 5])]);
        let mut discovery = TagDiscovery::new(transport);
        let var = discovery.variable_info("Grid").unwrap();
        assert_eq!(var.size, 240);
        let info = var.array_info.unwrap();
        assert_eq!(info.dimensions, vec![10, 12]);
        assert_eq!(info.start_indices, vec![1, 5]);
    }

    #[test]
    fn test_variable_info_zero_dimensions_fails() {
        let transport = ScriptedTransport::new([array_info_response(2, 0xC3, &[], &[])]);
        let mut discovery = TagDiscovery::new(transport);
        let message = discovery.variable_info("Grid").unwrap_err().to_string();
        assert!(message.contains("zero dimensions"), "{message}");
    }

    #[test]
    fn test_variable_info_truncated_array_descriptor_fails() {
        let mut response = array_info_response(1, 0xC1, &[17], &[0]);
        response.truncate(response.len() - 2);
        let transport = ScriptedTransport::new([response]);
        let mut discovery = TagDiscovery::new(transport);
        let message = discovery.variable_info("Bits").unwrap_err().to_string();
        assert!(message.contains("variable 'Bits'"), "{message}");
    }

    #[test]
    fn test_variables_by_instance() {
        let mut name_payload = vec![0u8; 4];
        name_payload.push(1);
        name_payload.extend_from_slice(b"A");
        let transport = ScriptedTransport::new([
            count_response(1),
            ok(&name_payload),
            scalar_info_response(2, 0xC3),
        ]);
        let mut discovery = TagDiscovery::new(transport);
        let vars = discovery.variables_by_instance().unwrap();
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].name, "A");
        assert_eq!(vars[0].data_type, DataType::Int);
    }
}
