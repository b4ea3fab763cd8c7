//! TCP transport.
//!
//! Speaks newline-delimited JSON: one `Request` object per line out, one `Reply` object
//! per line back. The connection is opened lazily and dropped after any transport
//! failure so the next exchange reconnects. A reply line longer than
//! `link.max_reply_bytes` counts as a transport failure.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, info};

use super::{Reply, Request, SimulatorLink};
use crate::common::{DashboardError, Result};
use crate::config::LinkConfig;

/// One open connection: a buffered reader and a writer sharing the same socket.
#[derive(Debug)]
struct Connection {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl Connection {
    /// Resolves the configured address and connects to the first reachable endpoint.
    fn open(config: &LinkConfig) -> Result<Self> {
        let addrs = config
            .address
            .to_socket_addrs()
            .map_err(|e| DashboardError::transport("address resolution", e))?;

        let mut last_err = io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} resolved to no addresses", config.address),
        );
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, config.connect_timeout()) {
                Ok(stream) => {
                    stream
                        .set_nodelay(true)
                        .map_err(|e| DashboardError::transport("connect", e))?;
                    let writer = stream
                        .try_clone()
                        .map_err(|e| DashboardError::transport("connect", e))?;
                    info!(%addr, "connected to simulator");
                    return Ok(Self {
                        reader: BufReader::new(stream),
                        writer,
                    });
                }
                Err(e) => last_err = e,
            }
        }
        Err(DashboardError::transport("connect", last_err))
    }

    /// Applies the read/write timeout for the next exchange.
    fn set_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        self.writer
            .set_read_timeout(timeout)
            .and_then(|()| self.writer.set_write_timeout(timeout))
            .map_err(|e| DashboardError::transport("timeout setup", e))
    }

    /// Writes one request line and reads one reply line of at most `limit` bytes.
    fn round_trip(&mut self, request: &Request, limit: u64) -> Result<Reply> {
        let mut line = serde_json::to_vec(request)?;
        line.push(b'\n');
        self.writer
            .write_all(&line)
            .and_then(|()| self.writer.flush())
            .map_err(|e| DashboardError::transport("request send", e))?;

        let mut reply = String::new();
        let read = (&mut self.reader)
            .take(limit)
            .read_line(&mut reply)
            .map_err(|e| DashboardError::transport("reply receive", e))?;
        if read == 0 {
            return Err(DashboardError::transport(
                "reply receive",
                io::Error::new(io::ErrorKind::UnexpectedEof, "simulator closed the connection"),
            ));
        }
        if read as u64 == limit && !reply.ends_with('\n') {
            // The rest of the line is still buffered, so the stream is out of step.
            return Err(DashboardError::transport(
                "reply receive",
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("reply exceeds {limit} bytes"),
                ),
            ));
        }
        Ok(serde_json::from_str(reply.trim_end())?)
    }
}

/// Newline-delimited JSON link to a simulator listening on TCP.
#[derive(Debug)]
pub struct TcpLink {
    config: LinkConfig,
    conn: Option<Connection>,
}

impl TcpLink {
    /// Creates a link that connects on first use.
    pub fn new(config: LinkConfig) -> Self {
        Self { config, conn: None }
    }

    /// Creates a link and connects immediately.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Transport`] if the simulator is unreachable.
    pub fn connect(config: LinkConfig) -> Result<Self> {
        let conn = Connection::open(&config)?;
        Ok(Self {
            config,
            conn: Some(conn),
        })
    }

    /// Returns `true` if a connection is currently open.
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    fn connection(&mut self) -> Result<&mut Connection> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => Connection::open(&self.config)?,
        };
        Ok(self.conn.insert(conn))
    }
}

impl SimulatorLink for TcpLink {
    fn exchange(&mut self, request: &Request) -> Result<Reply> {
        // `run` blocks until the simulator halts, however long that takes.
        let timeout = match request {
            Request::Run => None,
            _ => self.config.io_timeout(),
        };

        let limit = self.config.max_reply_bytes;
        let result = self.connection().and_then(|conn| {
            conn.set_timeout(timeout)?;
            conn.round_trip(request, limit)
        });

        if let Err(e) = &result
            && e.is_retryable()
        {
            debug!(error = %e, "dropping connection");
            self.conn = None;
        }
        result
    }
}
