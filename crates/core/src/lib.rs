//! Operator dashboard library for a remote pipelined-processor simulator.
//!
//! This crate keeps a rendered view consistent with simulator state. It provides:
//! 1. **Snapshot:** The typed, validated state bundle (registers, pipeline, memory, cycles).
//! 2. **Link:** The request/reply seam to the simulator, plus the command dispatcher and state fetcher.
//! 3. **View:** Pure render functions for the register, pipeline, and memory panels, and a text renderer.
//! 4. **Coordinator:** The state machine that serializes user actions and refresh ticks.
//! 5. **Configuration:** JSON-deserializable settings for the link, refresh policy, and layout.

/// Common types (errors, register names).
pub mod common;
/// Dashboard configuration (defaults, link, refresh, and layout settings).
pub mod config;
/// View coordinator state machine.
pub mod coordinator;
/// Simulator link, command dispatcher, and state fetcher.
pub mod link;
/// Snapshot data model and invariants.
pub mod snapshot;
/// Pure render functions and the rendered view tree.
pub mod view;

/// Error type shared by every fallible operation in the crate.
pub use crate::common::{DashboardError, Result};
/// Root configuration type; use `DashboardConfig::default()` or deserialize from JSON.
pub use crate::config::DashboardConfig;
/// Orchestrates dispatch, fetch, and render; construct with `ViewCoordinator::new`.
pub use crate::coordinator::{Action, Phase, ViewCoordinator, ViewSink};
/// Consolidated simulator state returned by one fetch.
pub use crate::snapshot::Snapshot;
