//! Client
//!
//! Blocking client for a personkv server. The server closes the connection
//! after every request, so each call opens a fresh one.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};

use crate::error::{PersonKvError, Result};
use crate::protocol::{
    read_frame_exact, read_response, write_frame, Frame, OpCode, Response, Status,
};
use crate::record::{self, Person};

/// Client for a personkv server
#[derive(Debug, Clone)]
pub struct Client {
    addr: String,
}

impl Client {
    /// Create a client for the server at `addr` (host:port)
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    /// Insert a person
    ///
    /// Returns `Status::Success` or `Status::DuplicateCpf` (or
    /// `Status::InternalError` if the server could not write its store).
    pub fn insert(&self, person: &Person) -> Result<Status> {
        let (mut reader, mut writer) = self.connect()?;

        write_frame(&mut writer, &Frame::insert(record::encode(person)?))?;

        let response = read_response(&mut reader)?;
        tracing::debug!("Insert of {} answered with {:?}", person.cpf_lossy(), response.status);

        Ok(response.status)
    }

    /// Fetch every stored person, in insertion order
    pub fn list(&self) -> Result<Vec<Person>> {
        let (mut reader, mut writer) = self.connect()?;

        write_frame(&mut writer, &Frame::list())?;

        let mut people = Vec::new();
        loop {
            let frame = read_frame_exact(&mut reader)?;
            if frame.op() != Some(OpCode::Response) {
                tracing::debug!("Skipping frame with op code 0x{:02x}", frame.op_code);
                continue;
            }
            let response = Response::from_frame(&frame)?;

            match (response.status, response.record) {
                (Status::EndOfList, _) => break,
                (Status::ListItem, Some(person)) => people.push(person),
                (status, _) => {
                    return Err(PersonKvError::Protocol(format!(
                        "Unexpected status in list response: {:?}",
                        status
                    )))
                }
            }
        }

        Ok(people)
    }

    fn connect(&self) -> Result<(BufReader<TcpStream>, BufWriter<TcpStream>)> {
        let addr = self
            .addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| PersonKvError::Config(format!("Cannot resolve {}", self.addr)))?;

        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        Ok((BufReader::new(read_stream), BufWriter::new(stream)))
    }
}
