//! Command dispatch.
//!
//! Sends one side-effecting command and resolves once the simulator acknowledges it.
//! Commands are never retried: a retry after an ambiguous failure could advance the
//! simulator twice.

use tracing::{debug, info, warn};

use super::{Command, Reply, SimulatorLink};
use crate::common::{DashboardError, Result};

/// Sends control commands over a borrowed link.
#[derive(Debug)]
pub struct CommandDispatcher<'a, L: ?Sized> {
    link: &'a mut L,
}

impl<'a, L: SimulatorLink + ?Sized> CommandDispatcher<'a, L> {
    /// Creates a dispatcher over `link`.
    pub fn new(link: &'a mut L) -> Self {
        Self { link }
    }

    /// Sends `command` and waits for the simulator's acknowledgement.
    ///
    /// For [`Command::Run`] this blocks until the simulator reports it has stopped.
    ///
    /// # Arguments
    ///
    /// * `command` - The command to execute.
    ///
    /// # Errors
    ///
    /// * [`DashboardError::Transport`] if the exchange failed.
    /// * [`DashboardError::Simulator`] if the simulator rejected the command.
    /// * [`DashboardError::Shape`] if the reply was not an acknowledgement.
    pub fn dispatch(&mut self, command: &Command) -> Result<()> {
        debug!(command = %command, "dispatching");
        let reply = self
            .link
            .exchange(&command.to_request())
            .inspect_err(|e| warn!(command = %command, error = %e, "dispatch failed"))?;

        match reply {
            Reply::Ack => {
                info!(command = %command, "acknowledged");
                Ok(())
            }
            Reply::Error { message } => {
                warn!(command = %command, %message, "simulator rejected command");
                Err(DashboardError::Simulator(message))
            }
            Reply::State { .. } => Err(DashboardError::Shape(format!(
                "expected acknowledgement for {command}, got state"
            ))),
        }
    }
}
