//! Terminal view sink.

use std::io::{self, Write};

use pipedash_core::common::ErrorKind;
use pipedash_core::view::DashboardView;
use pipedash_core::{DashboardError, ViewSink};
use tracing::warn;

/// Prints each view to one writer and each failure to another.
#[derive(Debug)]
pub struct TerminalSink<O, E> {
    out: O,
    err: E,
    failures: usize,
}

impl TerminalSink<io::Stdout, io::Stderr> {
    /// Views to stdout, failures to stderr.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> TerminalSink<O, E> {
    /// Creates a sink over the given writers.
    pub const fn new(out: O, err: E) -> Self {
        Self {
            out,
            err,
            failures: 0,
        }
    }

    /// Number of failures reported so far.
    pub const fn failures(&self) -> usize {
        self.failures
    }
}

impl<O: Write, E: Write> ViewSink for TerminalSink<O, E> {
    fn present(&mut self, view: &DashboardView) {
        if let Err(e) = write!(self.out, "{view}").and_then(|()| self.out.flush()) {
            warn!(error = %e, "failed to write view");
        }
    }

    fn report(&mut self, error: &DashboardError) {
        self.failures += 1;
        let heading = match error.kind() {
            ErrorKind::Transport => "simulator unreachable",
            ErrorKind::Simulator => "simulator error",
            ErrorKind::Shape => "malformed reply",
            ErrorKind::Coordination => "dashboard error",
            ErrorKind::Config => "configuration error",
        };
        if let Err(e) = writeln!(self.err, "!! {heading}: {error}") {
            warn!(error = %e, "failed to write error report");
        }
    }
}
