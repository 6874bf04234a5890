//! Response definitions
//!
//! Represents responses to clients.

use bytes::{BufMut, BytesMut};

use crate::error::{PersonKvError, Result};
use crate::record::{self, Person};
use super::{Frame, OpCode};

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Success = 0x00,
    DuplicateCpf = 0x01,
    ListItem = 0x02,
    EndOfList = 0x03,
    InternalError = 0x04,
}

impl Status {
    /// Parse a raw status byte
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Status::Success),
            0x01 => Some(Status::DuplicateCpf),
            0x02 => Some(Status::ListItem),
            0x03 => Some(Status::EndOfList),
            0x04 => Some(Status::InternalError),
            _ => None,
        }
    }
}

/// A response to send to client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Record carried by a LIST_ITEM response
    pub record: Option<Person>,
}

impl Response {
    /// Create a status-only response
    pub fn status(status: Status) -> Self {
        Self {
            status,
            record: None,
        }
    }

    /// Create a LIST_ITEM response
    pub fn list_item(person: Person) -> Self {
        Self {
            status: Status::ListItem,
            record: Some(person),
        }
    }

    /// Build the response frame
    ///
    /// Payload: status (1) + encoded record for list items.
    pub fn to_frame(&self) -> Result<Frame> {
        let record_len = self.record.as_ref().map_or(0, Person::encoded_len);

        let mut payload = BytesMut::with_capacity(1 + record_len);
        payload.put_u8(self.status as u8);
        if let Some(person) = &self.record {
            payload.put_slice(&record::encode(person)?);
        }

        Ok(Frame::new(OpCode::Response as u8, payload.freeze()))
    }

    /// Parse a response frame received from the server
    pub fn from_frame(frame: &Frame) -> Result<Self> {
        if frame.op() != Some(OpCode::Response) {
            return Err(PersonKvError::Protocol(format!(
                "Unexpected op code in response: 0x{:02x}",
                frame.op_code
            )));
        }

        let (&status_byte, rest) = frame.payload.split_first().ok_or_else(|| {
            PersonKvError::Protocol("Response payload missing status byte".to_string())
        })?;

        let status = Status::from_u8(status_byte).ok_or_else(|| {
            PersonKvError::Protocol(format!("Unknown response status: 0x{:02x}", status_byte))
        })?;

        let record = match status {
            Status::ListItem => Some(record::decode(rest)?),
            _ => None,
        };

        Ok(Self { status, record })
    }
}
