//! Dashboard error definitions.
//!
//! This module defines the failure taxonomy for the dashboard. It provides:
//! 1. **Remote Failures:** Transport failures and simulator-reported failures.
//! 2. **Shape Failures:** Replies and snapshots that violate the data model invariants.
//! 3. **Coordination Failures:** Queue overflow and illegal state-machine transitions.
//! 4. **Retry Policy:** Which failures may be retried without duplicating simulator side effects.

use std::io;

use thiserror::Error;

use crate::coordinator::Phase;

/// Result alias used by every fallible dashboard operation.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Coarse classification of a [`DashboardError`], used for display and retry decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never reached the simulator or the reply never arrived.
    Transport,
    /// The simulator received the request and reported a failure.
    Simulator,
    /// A reply or snapshot did not match the expected shape.
    Shape,
    /// The coordinator refused the action in its current state.
    Coordination,
    /// The configuration is malformed or inconsistent.
    Config,
}

/// Errors raised while talking to the simulator or coordinating a refresh.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Transport failure while performing `context`.
    #[error("transport failure during {context}: {source}")]
    Transport {
        /// What the link was doing when the failure occurred.
        context: &'static str,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failure reported by the simulator (e.g. malformed program, invalid window).
    #[error("simulator rejected request: {0}")]
    Simulator(String),

    /// Reply or snapshot violates the data model.
    #[error("malformed simulator state: {0}")]
    Shape(String),

    /// The pending action queue is full.
    #[error("action queue full ({0} pending)")]
    QueueFull(usize),

    /// The coordinator was asked to move along an edge it does not have.
    #[error("illegal coordinator transition {from} -> {to}")]
    InvalidTransition {
        /// Phase the coordinator was in.
        from: Phase,
        /// Phase that was requested.
        to: Phase,
    },

    /// Configuration could not be read or is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DashboardError {
    /// Builds a transport error with the given context.
    ///
    /// # Arguments
    ///
    /// * `context` - Short description of the operation that failed.
    /// * `source` - The underlying I/O error.
    pub fn transport(context: &'static str, source: io::Error) -> Self {
        Self::Transport { context, source }
    }

    /// Returns the coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Simulator(_) => ErrorKind::Simulator,
            Self::Shape(_) => ErrorKind::Shape,
            Self::QueueFull(_) | Self::InvalidTransition { .. } => ErrorKind::Coordination,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Returns `true` if a read-only operation failing with this error may be retried.
    ///
    /// Only transport failures qualify. Commands with simulator side effects
    /// are never retried regardless of this value.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}

impl From<serde_json::Error> for DashboardError {
    /// Classifies a JSON failure: I/O and premature EOF are transport failures,
    /// syntax and data errors are shape failures.
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Io => Self::transport("reply decode", io::Error::other(err)),
            Category::Eof => Self::transport(
                "reply decode",
                io::Error::new(io::ErrorKind::UnexpectedEof, err),
            ),
            Category::Syntax | Category::Data => Self::Shape(err.to_string()),
        }
    }
}
