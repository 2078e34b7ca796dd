//! Request context: one transport, two buffers, one request cycle.
//!
//! A [`RequestContext`] couples a [`Transport`] handle with a fixed-capacity
//! send buffer and receive buffer. Requests are encoded into the send
//! buffer, issued with [`request`](RequestContext::request), and the caller
//! gets back a deserializer positioned at the CIP service payload with the
//! reply envelope already validated.
//!
//! Requests are strictly serialized on the handle: the buffers are reused
//! in place, and the borrow returned by `request` must end before the next
//! request can be encoded. Callers wanting parallelism allocate one context
//! per PLC connection.

use crate::cip::CipResponse;
use crate::error::{CipError, Result};
use crate::serialize::{Endian, FixedBufferDeserializer, FixedBufferSerializer};
use crate::transport::Transport;
use crate::util::to_hex;

/// Capacity of the send buffer; requests here are a service header plus a
/// short path, far below this.
pub const SEND_BUFFER_SIZE: usize = 512;

/// Capacity of the receive buffer; bounds the largest Get_All_Instances
/// page the context accepts.
pub const RECV_BUFFER_SIZE: usize = 4096;

/// Couples a transport with reusable send/receive buffers.
///
/// # Example
///
/// ```no_run
/// use omron_cip::cip::{encode_get_attribute_all, logical_path, CLASS_TAG};
/// use omron_cip::{RequestContext, Result, Transport};
///
/// fn variable_count<T: Transport>(ctx: &mut RequestContext<T>) -> Result<u16> {
///     let path = logical_path(CLASS_TAG, 0);
///     ctx.encode("get attribute all request", |ser| {
///         encode_get_attribute_all(ser, &path)
///     })?;
///     let mut de = ctx.request()?;
///     de.advance(2);
///     Ok(de.read_u16())
/// }
/// ```
pub struct RequestContext<T: Transport> {
    transport: T,
    send_buffer: Box<[u8]>,
    recv_buffer: Box<[u8]>,
    send_len: usize,
}

impl<T: Transport> RequestContext<T> {
    /// Creates a context over an open transport handle.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            send_buffer: vec![0u8; SEND_BUFFER_SIZE].into_boxed_slice(),
            recv_buffer: vec![0u8; RECV_BUFFER_SIZE].into_boxed_slice(),
            send_len: 0,
        }
    }

    /// Encodes the next request into the send buffer.
    ///
    /// The closure receives a little-endian serializer over the whole send
    /// buffer. `what` names the request in the error should it not fit.
    ///
    /// # Errors
    ///
    /// Returns `CipError::Encode` if the serializer overflowed.
    pub fn encode(
        &mut self,
        what: &str,
        f: impl FnOnce(&mut FixedBufferSerializer<'_>),
    ) -> Result<()> {
        let mut ser = FixedBufferSerializer::new(&mut self.send_buffer, Endian::Little);
        f(&mut ser);
        if ser.has_error() {
            self.send_len = 0;
            return Err(CipError::encode(what));
        }
        self.send_len = ser.serialized_buffer().len();
        Ok(())
    }

    /// Issues the encoded request and validates the response.
    ///
    /// Sends the encoded prefix of the send buffer, receives one response,
    /// decodes the CIP reply envelope, and checks the general status. On
    /// success the returned deserializer is positioned at the service
    /// payload.
    ///
    /// # Errors
    ///
    /// - `CipError::Transport` - send/receive failure or timeout
    /// - `CipError::BufferOverflow` - the response exceeds the receive
    ///   buffer capacity
    /// - `CipError::Decode` - the response ends inside the reply envelope
    /// - `CipError::CipStatus` - the controller reported a non-zero status
    pub fn request(&mut self) -> Result<FixedBufferDeserializer<'_>> {
        self.transport.send(&self.send_buffer[..self.send_len])?;
        let size = self.transport.get_data(&mut self.recv_buffer)?;
        if size > self.recv_buffer.len() {
            return Err(CipError::BufferOverflow {
                needed: size,
                capacity: self.recv_buffer.len(),
            });
        }

        let response_data = &self.recv_buffer[..size];
        let mut de = FixedBufferDeserializer::new(response_data, Endian::Little);
        let response = CipResponse::decode(&mut de)
            .map_err(|_| CipError::decode(format!("CIP response: {}", to_hex(response_data))))?;
        response.check_status()?;
        Ok(de)
    }

    /// Returns a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}
