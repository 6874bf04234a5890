//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Frame Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │  Op (1)  │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//! `Len` is a big-endian u32 counting payload bytes only.
//!
//! ### Op Codes
//! - 0x01: INSERT   - Payload: encoded person record
//! - 0x02: LIST     - Payload: empty (ignored)
//! - 0x03: RESPONSE - Payload: status (1) + optional record
//!
//! ### Status Codes
//! - 0x00: SUCCESS
//! - 0x01: DUPLICATE_CPF
//! - 0x02: LIST_ITEM (followed by the encoded record)
//! - 0x03: END_OF_LIST
//! - 0x04: INTERNAL_ERROR

mod frame;
mod response;
mod codec;

pub use frame::{Frame, OpCode};
pub use response::{Response, Status};
pub use codec::{
    decode_frame, encode_frame, read_frame, read_frame_exact, read_response, write_frame,
    write_response, HEADER_SIZE,
};
