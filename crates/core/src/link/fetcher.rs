//! Consolidated snapshot fetch.
//!
//! One request returns registers, pipeline, memory, and the cycle counter taken at the
//! same simulated instant. Fetching is read-only, so transport failures are retried.

use tracing::{debug, warn};

use super::{Reply, Request, SimulatorLink};
use crate::common::{DashboardError, Result};
use crate::snapshot::Snapshot;

/// Requests snapshots over a borrowed link.
#[derive(Debug)]
pub struct StateFetcher<'a, L: ?Sized> {
    link: &'a mut L,
    retries: u32,
}

impl<'a, L: SimulatorLink + ?Sized> StateFetcher<'a, L> {
    /// Creates a fetcher that retries transport failures up to `retries` extra times.
    pub fn new(link: &'a mut L, retries: u32) -> Self {
        Self { link, retries }
    }

    /// Fetches one validated snapshot with memory windowed at `display_line`.
    ///
    /// # Arguments
    ///
    /// * `display_line` - First memory line to include in the grid.
    ///
    /// # Errors
    ///
    /// * [`DashboardError::Transport`] once all attempts have failed.
    /// * [`DashboardError::Simulator`] if the simulator rejected the window.
    /// * [`DashboardError::Shape`] if the reply is not a well-formed snapshot.
    pub fn fetch_snapshot(&mut self, display_line: u32) -> Result<Snapshot> {
        let request = Request::Snapshot { line: display_line };
        let mut attempt = 0;
        loop {
            match self.link.exchange(&request) {
                Ok(Reply::State { snapshot }) => {
                    snapshot.validate()?;
                    debug!(cycles = snapshot.cycles, line = display_line, "snapshot received");
                    return Ok(*snapshot);
                }
                Ok(Reply::Error { message }) => return Err(DashboardError::Simulator(message)),
                Ok(Reply::Ack) => {
                    return Err(DashboardError::Shape(
                        "expected state, got acknowledgement".into(),
                    ));
                }
                Err(e) if e.is_retryable() && attempt < self.retries => {
                    attempt += 1;
                    warn!(attempt, error = %e, "snapshot fetch failed, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }
}
