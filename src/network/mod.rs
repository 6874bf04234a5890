//! Network Module
//!
//! TCP server and client connection handling.
//!
//! ## Architecture
//! - Single accept loop on the calling thread
//! - One connection handled to completion before the next is accepted
//! - One request per connection; the socket is closed afterwards

mod server;
mod connection;

pub use server::{Server, ShutdownHandle};
pub use connection::{serve_request, Connection, Outcome};
