//! Engine Module
//!
//! Coordinates access to the record store.
//!
//! ## Responsibilities
//! - Own the `Store`
//! - Gate inserts on the duplicate-CPF check
//! - Serialize the check-then-append sequence

use std::path::Path;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{PersonKvError, Result};
use crate::record::CPF_LEN;
use crate::store::{Store, StoreScan};

/// Outcome of an insert request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Record appended to the store
    Inserted,

    /// A record with the same CPF is already stored; nothing was written
    Duplicate,
}

/// The storage engine
///
/// ## Concurrency Model
///
/// The server handles one connection at a time, so store access is already
/// serialized. `insert` still takes `write_lock` around `exists` + `append`:
/// the pair is a check-then-act sequence and must stay atomic if connections
/// are ever handled concurrently. Scans take no lock.
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Append-only record file
    store: Store,

    /// Serializes exists + append
    write_lock: Mutex<()>,
}

impl Engine {
    /// Open an engine with the given config
    ///
    /// The store file is not created until the first insert.
    pub fn open(config: Config) -> Result<Self> {
        if let Some(parent) = config.store_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(PersonKvError::Config(format!(
                    "Store directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        let store = Store::open(&config.store_path);

        Ok(Self {
            config,
            store,
            write_lock: Mutex::new(()),
        })
    }

    /// Open with a store path (convenience method)
    ///
    /// Uses default config with the specified store file
    pub fn open_path(path: &Path) -> Result<Self> {
        let mut config = Config::default();
        config.store_path = path.to_path_buf();
        Self::open(config)
    }

    /// Insert an encoded record unless its CPF is already stored
    ///
    /// The CPF is the first 11 bytes of `record`. The bytes are stored as
    /// sent; they are not re-validated against the record layout.
    pub fn insert(&self, record: &[u8]) -> Result<InsertOutcome> {
        let cpf: &[u8; CPF_LEN] = record
            .get(..CPF_LEN)
            .and_then(|prefix| prefix.try_into().ok())
            .ok_or(PersonKvError::MalformedRecord {
                expected: CPF_LEN,
                available: record.len(),
            })?;

        let _write_guard = self.write_lock.lock();

        if self.store.exists(cpf)? {
            tracing::info!("Duplicate CPF rejected: {}", String::from_utf8_lossy(cpf));
            return Ok(InsertOutcome::Duplicate);
        }

        self.store.append(record)?;
        tracing::info!("Person inserted: {}", String::from_utf8_lossy(cpf));

        Ok(InsertOutcome::Inserted)
    }

    /// Scan all stored records, oldest first
    pub fn scan(&self) -> Result<StoreScan> {
        self.store.scan()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the underlying store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
