//! Connection Handler
//!
//! Handles individual client connections.

use std::io::{self, BufReader, BufWriter, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use crate::engine::{Engine, InsertOutcome};
use crate::error::{PersonKvError, Result};
use crate::protocol::{read_frame, write_response, OpCode, Response, Status};
use crate::record::CPF_LEN;

/// What a connection's single request amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The stream ended before a full header arrived; nothing was sent
    NoRequest,

    /// Record stored, SUCCESS sent
    Inserted,

    /// CPF already stored, DUPLICATE_CPF sent
    Duplicate,

    /// Store failure during insert, INTERNAL_ERROR sent
    InsertFailed,

    /// Insert payload too short to carry a CPF; nothing was sent
    MalformedInsert,

    /// `count` LIST_ITEM frames sent, followed by END_OF_LIST
    Listed { count: usize },

    /// Op code not handled; nothing was sent
    UnknownOp(u8),

    /// Peer went away mid-request
    Dropped,
}

/// Serve exactly one request
///
/// Reads one frame, dispatches it by op code and writes the response
/// frame(s). Transport-agnostic so it can run over in-memory buffers.
pub fn serve_request<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    engine: &Engine,
) -> Result<Outcome> {
    let frame = match read_frame(reader)? {
        Some(frame) => frame,
        None => return Ok(Outcome::NoRequest),
    };

    tracing::trace!(
        "Received frame op=0x{:02x} payload_len={}",
        frame.op_code,
        frame.payload.len()
    );

    match frame.op() {
        Some(OpCode::Insert) => insert(writer, engine, &frame.payload),
        Some(OpCode::List) => list(writer, engine),
        _ => {
            tracing::debug!("Ignoring unhandled op code 0x{:02x}", frame.op_code);
            Ok(Outcome::UnknownOp(frame.op_code))
        }
    }
}

fn insert<W: Write>(writer: &mut W, engine: &Engine, record: &[u8]) -> Result<Outcome> {
    if record.len() < CPF_LEN {
        tracing::warn!(
            "Insert payload of {} bytes is too short to hold a CPF",
            record.len()
        );
        return Ok(Outcome::MalformedInsert);
    }

    let (status, outcome) = match engine.insert(record) {
        Ok(InsertOutcome::Inserted) => (Status::Success, Outcome::Inserted),
        Ok(InsertOutcome::Duplicate) => (Status::DuplicateCpf, Outcome::Duplicate),
        Err(e) => {
            tracing::warn!("Insert failed: {}", e);
            (Status::InternalError, Outcome::InsertFailed)
        }
    };

    write_response(writer, &Response::status(status))?;
    Ok(outcome)
}

fn list<W: Write>(writer: &mut W, engine: &Engine) -> Result<Outcome> {
    let mut count = 0;

    match engine.scan() {
        Ok(records) => {
            for record in records {
                match record {
                    Ok(person) => {
                        write_response(writer, &Response::list_item(person))?;
                        count += 1;
                    }
                    Err(e) => {
                        tracing::warn!("Store scan stopped early: {}", e);
                        break;
                    }
                }
            }
        }
        Err(e) => tracing::warn!("Could not open store for listing: {}", e),
    }

    write_response(writer, &Response::status(Status::EndOfList))?;
    tracing::info!("Listed {} people", count);

    Ok(Outcome::Listed { count })
}

/// Handles a single client connection
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Reference to the storage engine
    engine: Arc<Engine>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    pub fn new(stream: TcpStream, engine: Arc<Engine>) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            engine,
            peer_addr,
        })
    }

    /// Configure connection timeouts (0 leaves the socket blocking)
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read_stream = self.reader.get_ref();
        let write_stream = self.writer.get_ref();

        if read_ms > 0 {
            read_stream.set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            write_stream.set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }

        Ok(())
    }

    /// Handle the connection: serve one request, then close
    ///
    /// The socket is shut down whatever the request's outcome.
    pub fn handle(mut self) -> Result<Outcome> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        let result = serve_request(&mut self.reader, &mut self.writer, &self.engine)
            .and_then(|outcome| {
                self.writer.flush()?;
                Ok(outcome)
            });

        let _ = self.writer.get_ref().shutdown(Shutdown::Both);

        match result {
            Ok(outcome) => {
                tracing::debug!("Closing connection from {}: {:?}", self.peer_addr, outcome);
                Ok(outcome)
            }
            Err(PersonKvError::Io(ref e)) if is_disconnect(e) => {
                tracing::debug!("Client {} went away: {}", self.peer_addr, e);
                Ok(Outcome::Dropped)
            }
            Err(e) => {
                tracing::warn!("Error serving {}: {}", self.peer_addr, e);
                Err(e)
            }
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

fn is_disconnect(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof
            // Read timeout (Windows uses TimedOut instead of WouldBlock)
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::TimedOut
    )
}
