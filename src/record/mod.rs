//! Record Module
//!
//! Person records and their on-disk / on-wire byte layout.
//!
//! ## Record Layout
//! ```text
//! ┌──────────┬────────────┬──────────────┬─────────────┬────────────┐
//! │ CPF (11) │NameLen (1) │ Name (0-255) │ Birth (10)  │ Phone (11) │
//! └──────────┴────────────┴──────────────┴─────────────┴────────────┘
//! ```
//!
//! Records are concatenated with no separators. The first 12 bytes
//! (cpf + name_len) are enough to derive the length of the whole record.

mod person;
mod codec;

pub use person::{
    Person, BIRTH_DATE_LEN, CPF_LEN, MAX_NAME_LEN, MIN_RECORD_LEN, PHONE_LEN,
    RECORD_HEADER_LEN, RECORD_TRAILER_LEN,
};
pub use codec::{decode, encode, read_record, record_len};
pub(crate) use codec::read_or_eof;
