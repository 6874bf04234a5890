//! Record codec
//!
//! Encoding and decoding functions for the person record layout.

use std::io::{ErrorKind, Read};

use bytes::{Buf, BufMut};

use crate::error::{PersonKvError, Result};
use super::{
    Person, BIRTH_DATE_LEN, CPF_LEN, MAX_NAME_LEN, PHONE_LEN, RECORD_HEADER_LEN,
    RECORD_TRAILER_LEN,
};

/// Encode a person to bytes
///
/// Format: cpf (11) + name_len (1) + name + birth_date (10) + phone (11)
pub fn encode(person: &Person) -> Result<Vec<u8>> {
    if person.name.len() > MAX_NAME_LEN {
        return Err(PersonKvError::NameTooLong(person.name.len()));
    }

    let mut buf = Vec::with_capacity(person.encoded_len());
    buf.put_slice(&person.cpf);
    buf.put_u8(person.name.len() as u8);
    buf.put_slice(&person.name);
    buf.put_slice(&person.birth_date);
    buf.put_slice(&person.phone);

    Ok(buf)
}

/// Total record length announced by a record header
pub fn record_len(header: &[u8; RECORD_HEADER_LEN]) -> usize {
    RECORD_HEADER_LEN + header[CPF_LEN] as usize + RECORD_TRAILER_LEN
}

/// Decode a person from bytes
///
/// Bytes past the declared record length are ignored.
pub fn decode(bytes: &[u8]) -> Result<Person> {
    if bytes.len() < RECORD_HEADER_LEN {
        return Err(PersonKvError::MalformedRecord {
            expected: RECORD_HEADER_LEN,
            available: bytes.len(),
        });
    }

    let name_len = bytes[CPF_LEN] as usize;
    let total_len = RECORD_HEADER_LEN + name_len + RECORD_TRAILER_LEN;
    if bytes.len() < total_len {
        return Err(PersonKvError::MalformedRecord {
            expected: total_len,
            available: bytes.len(),
        });
    }

    let mut buf = &bytes[..total_len];

    let mut cpf = [0u8; CPF_LEN];
    buf.copy_to_slice(&mut cpf);
    buf.advance(1);

    let mut name = vec![0u8; name_len];
    buf.copy_to_slice(&mut name);

    let mut birth_date = [0u8; BIRTH_DATE_LEN];
    buf.copy_to_slice(&mut birth_date);

    let mut phone = [0u8; PHONE_LEN];
    buf.copy_to_slice(&mut phone);

    Ok(Person {
        cpf,
        name,
        birth_date,
        phone,
    })
}

/// Read the next record from a stream
///
/// Reads the fixed header first, then the body whose length the header
/// announces. Returns `Ok(None)` at end of data, which includes a trailing
/// record that was only partially written.
pub fn read_record<R: Read>(reader: &mut R) -> Result<Option<Person>> {
    let mut header = [0u8; RECORD_HEADER_LEN];
    if !read_or_eof(reader, &mut header)? {
        return Ok(None);
    }

    let mut record = vec![0u8; record_len(&header)];
    record[..RECORD_HEADER_LEN].copy_from_slice(&header);
    if !read_or_eof(reader, &mut record[RECORD_HEADER_LEN..])? {
        tracing::debug!(
            "Truncated trailing record ({} bytes declared), treating as end of data",
            record.len()
        );
        return Ok(None);
    }

    decode(&record).map(Some)
}

/// `read_exact` that reports a short read as `false` instead of an error
pub(crate) fn read_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<bool> {
    match reader.read_exact(buf) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e.into()),
    }
}
