//! Store Module
//!
//! Append-only persistent sequence of encoded person records.
//!
//! ## Responsibilities
//! - Append encoded records to the end of a single file
//! - Linear existence check by CPF (header-then-skip, no decoding)
//! - Lazy sequential scan in insertion order
//!
//! ## File Format
//! ```text
//! ┌────────────────────────────────────────┐
//! │ Record 1 (33 + name_len bytes)         │
//! ├────────────────────────────────────────┤
//! │ Record 2                               │
//! ├────────────────────────────────────────┤
//! │ ...                                    │
//! └────────────────────────────────────────┘
//! ```
//!
//! No header, footer, index or checksum. Every operation opens the file,
//! uses it and drops it before returning.

mod file;
mod scan;

pub use file::Store;
pub use scan::StoreScan;
