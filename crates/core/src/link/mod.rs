//! Simulator link and the two clients built on it.
//!
//! Everything the dashboard knows about the simulator flows through one request/reply seam.
//! This module provides:
//! 1. **Protocol:** `Request` and `Reply`, serialized as one JSON object per line.
//! 2. **Seam:** The `SimulatorLink` trait implemented by transports and test doubles.
//! 3. **Clients:** `CommandDispatcher` for side-effecting commands and `StateFetcher`
//!    for the consolidated snapshot.
//! 4. **Transport:** `TcpLink`, a newline-delimited JSON client over TCP.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::Result;
use crate::snapshot::Snapshot;

/// Command dispatcher (advance, run, reset, load).
pub mod dispatcher;
/// Snapshot fetcher with transport retry.
pub mod fetcher;
/// Newline-delimited JSON over TCP.
pub mod tcp;

pub use dispatcher::CommandDispatcher;
pub use fetcher::StateFetcher;
pub use tcp::TcpLink;

/// A side-effecting control command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Execute one cycle.
    Advance,
    /// Execute until the simulator halts.
    Run,
    /// Reinitialize the simulator.
    Reset,
    /// Assemble and load the given program source.
    Load(String),
}

impl Command {
    /// Builds the wire request for this command.
    pub fn to_request(&self) -> Request {
        match self {
            Self::Advance => Request::Advance,
            Self::Run => Request::Run,
            Self::Reset => Request::Reset,
            Self::Load(program) => Request::Load {
                program: program.clone(),
            },
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Advance => f.write_str("advance"),
            Self::Run => f.write_str("run"),
            Self::Reset => f.write_str("reset"),
            Self::Load(program) => write!(f, "load ({} bytes)", program.len()),
        }
    }
}

/// Request sent to the simulator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum Request {
    /// Execute one cycle.
    Advance,
    /// Execute until halt.
    Run,
    /// Reinitialize.
    Reset,
    /// Assemble and load a program.
    Load {
        /// Program source text.
        program: String,
    },
    /// Consolidated state, memory windowed at `line`.
    Snapshot {
        /// First memory display line.
        line: u32,
    },
}

/// Reply received from the simulator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reply {
    /// The command completed.
    Ack,
    /// Consolidated state.
    State {
        /// The snapshot.
        snapshot: Box<Snapshot>,
    },
    /// The simulator rejected the request.
    Error {
        /// Human-readable reason.
        message: String,
    },
}

/// Request/reply channel to the simulator.
///
/// Implementations block until the simulator replies. A transport failure must be
/// reported as [`DashboardError::Transport`](crate::common::DashboardError::Transport)
/// so callers can tell it apart from a simulator-reported failure.
pub trait SimulatorLink {
    /// Sends one request and waits for its reply.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request was not delivered or no reply arrived,
    /// or a shape error if the reply could not be decoded.
    fn exchange(&mut self, request: &Request) -> Result<Reply>;
}

impl<L: SimulatorLink + ?Sized> SimulatorLink for &mut L {
    fn exchange(&mut self, request: &Request) -> Result<Reply> {
        (**self).exchange(request)
    }
}

impl<L: SimulatorLink + ?Sized> SimulatorLink for Box<L> {
    fn exchange(&mut self, request: &Request) -> Result<Reply> {
        (**self).exchange(request)
    }
}
