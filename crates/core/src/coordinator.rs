//! View coordinator.
//!
//! Drives every refresh through a four-phase state machine. It provides:
//! 1. **Sequencing:** Dispatch, then exactly one snapshot fetch, then all three panels
//!    rendered from that snapshot.
//! 2. **Serialization:** Actions arriving while a refresh is in flight wait in a bounded
//!    FIFO queue; periodic ticks are coalesced.
//! 3. **Failure Handling:** Any failure is reported to the sink and the coordinator
//!    returns to `Idle` so the operator can retry.
//! 4. **Consistency Checks:** Pipeline length must stay constant between snapshots
//!    (a reset may change it); a cycle counter that decreases without a reset is logged.
//!
//! A dispatched `run` cannot be cancelled; the coordinator stays in `Dispatching`
//! until the simulator halts.

use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, trace, warn};

use crate::common::{DashboardError, Result};
use crate::config::DashboardConfig;
use crate::link::{Command, CommandDispatcher, SimulatorLink, StateFetcher};
use crate::snapshot::Snapshot;
use crate::view::{self, DashboardView};

/// Coordinator state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for an action.
    #[default]
    Idle,
    /// A command has been sent and is awaiting acknowledgement.
    Dispatching,
    /// The snapshot request is in flight.
    Fetching,
    /// Panels are being rendered from the snapshot.
    Rendering,
}

impl Phase {
    /// Returns `true` if `self -> next` is an edge of the state machine.
    ///
    /// Every phase may fall back to `Idle`, which is how failures unwind.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Dispatching)
                | (Self::Dispatching, Self::Fetching)
                | (Self::Fetching, Self::Rendering)
                | (_, Self::Idle)
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Dispatching => "dispatching",
            Self::Fetching => "fetching",
            Self::Rendering => "rendering",
        })
    }
}

/// An operator or timer action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Send a command, then refresh.
    Command(Command),
    /// Refresh without sending a command (periodic tick).
    Refresh,
    /// Move the memory window to the given line, then refresh.
    SetWindow(u32),
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        Self::Command(command)
    }
}

/// Destination of rendered views.
///
/// The sink holds the only rendered view tree; it is updated once per successful
/// refresh and told about every failure.
pub trait ViewSink {
    /// Replaces the displayed view.
    fn present(&mut self, view: &DashboardView);

    /// Shows a failure in place of a refreshed view.
    fn report(&mut self, error: &DashboardError);
}

impl<S: ViewSink + ?Sized> ViewSink for &mut S {
    fn present(&mut self, view: &DashboardView) {
        (**self).present(view);
    }

    fn report(&mut self, error: &DashboardError) {
        (**self).report(error);
    }
}

/// Serializes actions through dispatch, fetch, and render.
#[derive(Debug)]
pub struct ViewCoordinator<L, S> {
    link: L,
    sink: S,
    config: DashboardConfig,
    phase: Phase,
    display_line: u32,
    queue: VecDeque<Action>,
    last_cycles: Option<u64>,
    stage_count: Option<usize>,
}

impl<L: SimulatorLink, S: ViewSink> ViewCoordinator<L, S> {
    /// Creates an idle coordinator.
    ///
    /// # Arguments
    ///
    /// * `link` - Channel to the simulator.
    /// * `sink` - Receives rendered views and failure reports.
    /// * `config` - Refresh policy and layout; the initial memory window is
    ///   `config.layout.display_line`.
    pub fn new(link: L, sink: S, config: DashboardConfig) -> Self {
        let display_line = config.layout.display_line;
        Self {
            link,
            sink,
            config,
            phase: Phase::Idle,
            display_line,
            queue: VecDeque::new(),
            last_cycles: None,
            stage_count: None,
        }
    }

    /// Current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Memory line requested with each snapshot.
    pub const fn display_line(&self) -> u32 {
        self.display_line
    }

    /// Number of queued actions.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// The simulator link.
    pub const fn link(&self) -> &L {
        &self.link
    }

    /// The simulator link, mutably.
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// The view sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Queues an action behind any already waiting.
    ///
    /// A `Refresh` is dropped if one is already queued, so a slow simulator does not
    /// accumulate ticks.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::QueueFull`] if `refresh.queue_depth` actions are waiting.
    pub fn submit(&mut self, action: Action) -> Result<()> {
        if action == Action::Refresh && self.queue.contains(&Action::Refresh) {
            trace!("refresh already queued, coalescing tick");
            return Ok(());
        }
        if self.queue.len() >= self.config.refresh.queue_depth {
            warn!(pending = self.queue.len(), "action queue full, rejecting");
            return Err(DashboardError::QueueFull(self.queue.len()));
        }
        self.queue.push_back(action);
        Ok(())
    }

    /// Performs the oldest queued action, if any.
    ///
    /// Failures have already been reported to the sink when this returns.
    pub fn process_next(&mut self) -> Option<Result<()>> {
        let action = self.queue.pop_front()?;
        Some(self.perform(action))
    }

    /// Performs every queued action in order.
    ///
    /// # Returns
    ///
    /// The number of actions that failed.
    pub fn drain(&mut self) -> usize {
        let mut failed = 0;
        while let Some(result) = self.process_next() {
            if result.is_err() {
                failed += 1;
            }
        }
        failed
    }

    /// Performs one action immediately: dispatch, fetch, render.
    ///
    /// Direct calls are serialized by the exclusive borrow: a refresh always runs to
    /// completion and leaves the coordinator in `Idle` before `perform` can be called again.
    ///
    /// # Errors
    ///
    /// Returns the error that aborted the refresh. The sink has been told and the
    /// coordinator is back in `Idle`.
    pub fn perform(&mut self, action: Action) -> Result<()> {
        let result = self.refresh(action);
        if let Err(e) = &result {
            warn!(phase = %self.phase, error = %e, "refresh failed");
            self.phase = Phase::Idle;
            self.sink.report(e);
        }
        result
    }

    /// Moves along one edge of the state machine; any other edge is a coordinator bug.
    fn transition(&mut self, next: Phase) -> Result<()> {
        if !self.phase.can_transition_to(next) {
            return Err(DashboardError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        trace!(from = %self.phase, to = %next, "phase");
        self.phase = next;
        Ok(())
    }

    fn refresh(&mut self, action: Action) -> Result<()> {
        self.transition(Phase::Dispatching)?;
        let resets = action == Action::Command(Command::Reset);
        match action {
            Action::Command(command) => CommandDispatcher::new(&mut self.link).dispatch(&command)?,
            Action::Refresh => trace!("status refresh"),
            Action::SetWindow(line) => {
                debug!(line, "memory window moved");
                self.display_line = line;
            }
        }

        self.transition(Phase::Fetching)?;
        let snapshot = StateFetcher::new(&mut self.link, self.config.refresh.fetch_retries)
            .fetch_snapshot(self.display_line)?;
        self.check_continuity(&snapshot, resets)?;

        self.transition(Phase::Rendering)?;
        let view = view::render(&snapshot, &self.config.layout, self.display_line);
        self.sink.present(&view);

        self.transition(Phase::Idle)
    }

    fn check_continuity(&mut self, snapshot: &Snapshot, resets: bool) -> Result<()> {
        let stages = snapshot.stage_count();
        if let Some(expected) = self.stage_count.replace(stages)
            && expected != stages
            && !resets
        {
            // The new length is kept so the next refresh is checked against it.
            self.last_cycles = Some(snapshot.cycles);
            return Err(DashboardError::Shape(format!(
                "pipeline length changed from {expected} to {stages}"
            )));
        }
        if let Some(previous) = self.last_cycles
            && snapshot.cycles < previous
            && !resets
        {
            warn!(previous, cycles = snapshot.cycles, "cycle counter went backwards without reset");
        }
        self.last_cycles = Some(snapshot.cycles);
        Ok(())
    }
}
