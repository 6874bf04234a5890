//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │  Op (1)  │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Response Format
//! ```text
//! ┌──────────┬──────────┬───────────┬─────────────────┐
//! │ 0x03 (1) │ Len (4)  │Status (1) │ Record (opt.)   │
//! └──────────┴──────────┴───────────┴─────────────────┘
//! ```

use std::io::{Read, Write};

use bytes::{Buf, BufMut, Bytes};

use crate::error::{PersonKvError, Result};
use crate::record::read_or_eof;
use super::{Frame, Response};

/// Header size: 1 byte op code + 4 bytes length
pub const HEADER_SIZE: usize = 5;

// =============================================================================
// Frame Encoding/Decoding
// =============================================================================

/// Encode a frame to bytes
///
/// Format: op_code (1) + payload_len (4, big-endian) + payload
///
/// Fails if the payload does not fit the 4-byte length field.
pub fn encode_frame(frame: &Frame) -> Result<Vec<u8>> {
    let payload_len = wire_len(frame.payload.len())?;

    let mut message = Vec::with_capacity(HEADER_SIZE + frame.payload.len());
    message.put_u8(frame.op_code);
    message.put_u32(payload_len);
    message.put_slice(&frame.payload);

    Ok(message)
}

fn wire_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        PersonKvError::Protocol(format!(
            "Payload too large: {} bytes (max {})",
            len,
            u32::MAX
        ))
    })
}

/// Decode a frame from bytes
///
/// The buffer must hold the whole frame; trailing bytes are ignored.
pub fn decode_frame(bytes: &[u8]) -> Result<Frame> {
    if bytes.len() < HEADER_SIZE {
        return Err(PersonKvError::Protocol(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let mut header = &bytes[..HEADER_SIZE];
    let op_code = header.get_u8();
    let payload_len = header.get_u32() as usize;

    let total_len = HEADER_SIZE + payload_len;
    if bytes.len() < total_len {
        return Err(PersonKvError::Protocol(format!(
            "Incomplete payload: expected {} bytes, got {}",
            total_len,
            bytes.len()
        )));
    }

    Ok(Frame::new(
        op_code,
        Bytes::copy_from_slice(&bytes[HEADER_SIZE..total_len]),
    ))
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one request frame from a stream (server side)
///
/// Returns `Ok(None)` if the stream ends before the 5-byte header is
/// complete. The payload is read until `payload_len` bytes arrive or the
/// stream ends; a short payload is returned as is. The buffer grows with
/// the bytes actually received, so a large announced length does not
/// allocate up front.
///
/// A peer that sends part of the payload and then keeps the socket open
/// blocks this call until more bytes, a half-close or the read timeout
/// arrive. Servers should run with a non-zero read timeout.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Option<Frame>> {
    let mut header = [0u8; HEADER_SIZE];
    if !read_or_eof(reader, &mut header)? {
        return Ok(None);
    }

    let mut fields = &header[..];
    let op_code = fields.get_u8();
    let payload_len = fields.get_u32();

    let mut payload = Vec::new();
    reader
        .by_ref()
        .take(u64::from(payload_len))
        .read_to_end(&mut payload)?;

    if payload.len() < payload_len as usize {
        tracing::debug!(
            "Short payload: announced {} bytes, received {}",
            payload_len,
            payload.len()
        );
    }

    Ok(Some(Frame::new(op_code, payload)))
}

/// Write a frame to a stream
pub fn write_frame<W: Write>(writer: &mut W, frame: &Frame) -> Result<()> {
    let bytes = encode_frame(frame)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    write_frame(writer, &response.to_frame()?)
}

/// Read one complete frame from a stream (client side)
///
/// Unlike [`read_frame`], a short header or payload is an error.
pub fn read_frame_exact<R: Read>(reader: &mut R) -> Result<Frame> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    let payload_len = u32::from_be_bytes([header[1], header[2], header[3], header[4]]) as usize;

    let mut payload = vec![0u8; payload_len];
    if payload_len > 0 {
        reader.read_exact(&mut payload)?;
    }

    Ok(Frame::new(header[0], payload))
}

/// Read a complete response from a stream (client side)
pub fn read_response<R: Read>(reader: &mut R) -> Result<Response> {
    Response::from_frame(&read_frame_exact(reader)?)
}
