//! Frame definitions
//!
//! One self-delimited message on the wire.

use bytes::Bytes;

/// Operation codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpCode {
    Insert = 0x01,
    List = 0x02,
    Response = 0x03,
}

impl OpCode {
    /// Parse a raw op code byte
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(OpCode::Insert),
            0x02 => Some(OpCode::List),
            0x03 => Some(OpCode::Response),
            _ => None,
        }
    }
}

/// A framed message
///
/// The op code is kept raw so that unknown codes reach the dispatcher,
/// which ignores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Discriminator byte
    pub op_code: u8,

    /// Payload bytes (length is implied)
    pub payload: Bytes,
}

impl Frame {
    /// Create a frame with a raw op code
    pub fn new(op_code: u8, payload: impl Into<Bytes>) -> Self {
        Self {
            op_code,
            payload: payload.into(),
        }
    }

    /// Create an INSERT request carrying an encoded record
    pub fn insert(record: Vec<u8>) -> Self {
        Self::new(OpCode::Insert as u8, record)
    }

    /// Create a LIST request
    pub fn list() -> Self {
        Self::new(OpCode::List as u8, Bytes::new())
    }

    /// The op code, if it is one this protocol knows
    pub fn op(&self) -> Option<OpCode> {
        OpCode::from_u8(self.op_code)
    }
}
