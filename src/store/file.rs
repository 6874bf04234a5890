//! Store
//!
//! File-backed record store.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{PersonKvError, Result};
use crate::record::{read_or_eof, CPF_LEN, RECORD_TRAILER_LEN};

use super::StoreScan;

/// Append-only record file
///
/// Holds only the location. File handles are opened per operation and
/// released on every exit path.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Point a store at a file location
    ///
    /// The file is not touched until the first operation and is created
    /// on the first append.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Check whether a record with this CPF is already stored
    ///
    /// Walks the file from the start, reading only each record's header and
    /// seeking past the rest. A missing or empty file holds no CPFs.
    pub fn exists(&self, cpf: &[u8; CPF_LEN]) -> Result<bool> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        let mut reader = BufReader::new(file);

        let mut stored_cpf = [0u8; CPF_LEN];
        let mut name_len = [0u8; 1];
        loop {
            if !read_or_eof(&mut reader, &mut stored_cpf)? {
                return Ok(false);
            }
            if &stored_cpf == cpf {
                return Ok(true);
            }

            if !read_or_eof(&mut reader, &mut name_len)? {
                return Ok(false);
            }
            let skip = name_len[0] as usize + RECORD_TRAILER_LEN;
            reader.seek_relative(skip as i64)?;
        }
    }

    /// Append an encoded record to the end of the store
    ///
    /// The bytes are written with a single call on a file opened in append
    /// mode, so a record is never interleaved with another write from
    /// this process.
    pub fn append(&self, record: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| PersonKvError::StoreUnavailable {
                path: self.path.clone(),
                source,
            })?;

        file.write_all(record)?;
        file.flush()?;

        Ok(())
    }

    /// Iterate over all stored records, oldest first
    ///
    /// Each call starts again from the beginning of the file.
    pub fn scan(&self) -> Result<StoreScan> {
        match File::open(&self.path) {
            Ok(file) => Ok(StoreScan::new(BufReader::new(file))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoreScan::empty()),
            Err(e) => Err(e.into()),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the store file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current size of the store file in bytes (0 if it does not exist yet)
    pub fn len_bytes(&self) -> Result<u64> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}
