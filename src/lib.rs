//! # personkv
//!
//! A small record store for person records keyed by CPF:
//! - Binary framed protocol over TCP (insert / list)
//! - Append-only, variable-length record file
//! - Duplicate-CPF check by linear scan before every insert
//! - One connection at a time, one request per connection
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                             │
//! │              (accept → serve one request → close)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Protocol Engine                           │
//! │          (frame codec, op-code dispatch, responses)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Engine                                │
//! │            (writer lock around exists + append)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌──────────────┐        ┌──────────────┐
//!               │    Store     │───────▶│ Record Codec │
//!               │ (append-only)│        │              │
//!               └──────────────┘        └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod store;
pub mod protocol;
pub mod engine;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{PersonKvError, Result};
pub use config::Config;
pub use engine::{Engine, InsertOutcome};
pub use record::Person;
pub use client::Client;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of personkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
