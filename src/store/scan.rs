//! Store Iterator
//!
//! Sequential iteration over all records in a store file.

use std::fs::File;
use std::io::BufReader;

use crate::error::Result;
use crate::record::{read_record, Person};

/// Iterator over stored records in insertion order
///
/// Ends at end of file or at a partially written trailing record. An I/O
/// error is yielded once and ends the iteration. The file is closed as soon
/// as the iterator is exhausted or dropped.
pub struct StoreScan {
    reader: Option<BufReader<File>>,
}

impl StoreScan {
    pub(super) fn new(reader: BufReader<File>) -> Self {
        Self {
            reader: Some(reader),
        }
    }

    /// Scan over a store that does not exist yet
    pub(super) fn empty() -> Self {
        Self { reader: None }
    }
}

impl Iterator for StoreScan {
    type Item = Result<Person>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;

        match read_record(reader) {
            Ok(Some(person)) => Some(Ok(person)),
            Ok(None) => {
                self.reader = None;
                None
            }
            Err(e) => {
                self.reader = None;
                Some(Err(e))
            }
        }
    }
}
