//! Person definition
//!
//! The fixed-shape record stored by the server.

use std::borrow::Cow;
use std::fmt;

use crate::error::{PersonKvError, Result};

/// Width of the CPF field
pub const CPF_LEN: usize = 11;

/// Width of the birth date field
pub const BIRTH_DATE_LEN: usize = 10;

/// Width of the phone field
pub const PHONE_LEN: usize = 11;

/// cpf + name_len
pub const RECORD_HEADER_LEN: usize = CPF_LEN + 1;

/// birth_date + phone
pub const RECORD_TRAILER_LEN: usize = BIRTH_DATE_LEN + PHONE_LEN;

/// Size of a record with an empty name
pub const MIN_RECORD_LEN: usize = RECORD_HEADER_LEN + RECORD_TRAILER_LEN;

/// Largest name representable by the one-byte length prefix
pub const MAX_NAME_LEN: usize = u8::MAX as usize;

/// A stored person
///
/// Field contents are opaque bytes: the server never checks that the CPF
/// is numeric or that the birth date is a real date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Unique key
    pub cpf: [u8; CPF_LEN],

    /// Variable-length name (at most 255 bytes once encoded)
    pub name: Vec<u8>,

    /// Birth date, conventionally `DD/MM/YYYY`
    pub birth_date: [u8; BIRTH_DATE_LEN],

    /// Phone, conventionally area code + number
    pub phone: [u8; PHONE_LEN],
}

impl Person {
    /// Build a person from text fields
    ///
    /// Fixed-width fields must match their width exactly and the name
    /// must fit the one-byte length prefix.
    pub fn new(cpf: &str, name: &str, birth_date: &str, phone: &str) -> Result<Self> {
        if name.len() > MAX_NAME_LEN {
            return Err(PersonKvError::NameTooLong(name.len()));
        }

        Ok(Self {
            cpf: fixed("cpf", cpf.as_bytes())?,
            name: name.as_bytes().to_vec(),
            birth_date: fixed("birth_date", birth_date.as_bytes())?,
            phone: fixed("phone", phone.as_bytes())?,
        })
    }

    /// Size of this record once encoded
    pub fn encoded_len(&self) -> usize {
        MIN_RECORD_LEN + self.name.len()
    }

    /// CPF as text, with invalid UTF-8 replaced by U+FFFD
    pub fn cpf_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.cpf)
    }

    /// Name as text, with invalid UTF-8 replaced by U+FFFD
    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    /// Birth date as text, with invalid UTF-8 replaced by U+FFFD
    pub fn birth_date_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.birth_date)
    }

    /// Phone as text, with invalid UTF-8 replaced by U+FFFD
    pub fn phone_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.phone)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CPF: {} | Name: {} | Birth date: {} | Phone: {}",
            self.cpf_lossy(),
            self.name_lossy(),
            self.birth_date_lossy(),
            self.phone_lossy()
        )
    }
}

fn fixed<const N: usize>(field: &'static str, bytes: &[u8]) -> Result<[u8; N]> {
    bytes.try_into().map_err(|_| PersonKvError::InvalidField {
        field,
        expected: N,
        actual: bytes.len(),
    })
}
