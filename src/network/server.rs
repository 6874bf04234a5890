//! TCP Server
//!
//! Accepts connections and handles them one at a time.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::Config;
use crate::engine::Engine;
use crate::error::Result;
use super::Connection;

/// TCP server for personkv
///
/// Strictly sequential: a connection is accepted, served and closed before
/// the next one is accepted. A slow client holds up everyone behind it
/// unless read/write timeouts are configured.
pub struct Server {
    config: Config,
    engine: Arc<Engine>,
    listener: TcpListener,
    shutdown: Arc<AtomicBool>,
}

impl Server {
    /// Bind the listen address from the config
    pub fn bind(config: Config, engine: Arc<Engine>) -> Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr)?;

        Ok(Self {
            config,
            engine,
            listener,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Address the server is actually listening on
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Handle that stops `run` from another thread
    pub fn shutdown_handle(&self) -> Result<ShutdownHandle> {
        let mut wake_addr = self.local_addr()?;
        if wake_addr.ip().is_unspecified() {
            let loopback = match wake_addr.ip() {
                IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
                IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::LOCALHOST),
            };
            wake_addr.set_ip(loopback);
        }

        Ok(ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
            wake_addr,
        })
    }

    /// Start the server (blocking)
    ///
    /// Returns once shutdown has been requested.
    pub fn run(&self) -> Result<()> {
        tracing::info!("Listening on {}", self.local_addr()?);

        for stream in self.listener.incoming() {
            if self.shutdown.load(Ordering::SeqCst) {
                break;
            }

            match stream {
                Ok(stream) => self.serve(stream),
                Err(e) => {
                    tracing::warn!("Accept failed: {}", e);
                    continue;
                }
            }
        }

        tracing::info!("Server stopped accepting connections");
        Ok(())
    }

    fn serve(&self, stream: TcpStream) {
        let mut connection = match Connection::new(stream, Arc::clone(&self.engine)) {
            Ok(connection) => connection,
            Err(e) => {
                tracing::warn!("Failed to set up connection: {}", e);
                return;
            }
        };

        if let Err(e) =
            connection.set_timeouts(self.config.read_timeout_ms, self.config.write_timeout_ms)
        {
            tracing::warn!("Failed to set timeouts for {}: {}", connection.peer_addr(), e);
        }

        if let Err(e) = connection.handle() {
            tracing::warn!("Connection ended with error: {}", e);
        }
    }
}

/// Stops a running [`Server`]
///
/// Sets the shutdown flag, then connects to the listener so the blocked
/// `accept` returns and sees it.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
    wake_addr: SocketAddr,
}

impl ShutdownHandle {
    /// Signal the server to shutdown gracefully
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
        if let Err(e) = TcpStream::connect(self.wake_addr) {
            tracing::debug!("Shutdown wake-up connection failed: {}", e);
        }
    }
}
