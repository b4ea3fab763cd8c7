//! Rendered view tree.
//!
//! Rendering is a pure function of one snapshot. This module provides:
//! 1. **Panels:** Register, pipeline, and memory render functions, each fed its own
//!    slice of the snapshot.
//! 2. **Composition:** `render`, which builds the whole `DashboardView` from one snapshot
//!    so the panels are always mutually consistent.
//! 3. **Text:** A deterministic plain-text rendering via `Display`.

use crate::config::LayoutConfig;
use crate::snapshot::Snapshot;

/// Memory grid tables.
pub mod memory;
/// Pipeline stage cards.
pub mod pipeline;
/// Register bank slots.
pub mod registers;
/// Plain-text rendering.
pub mod text;

pub use memory::{MemoryRow, MemoryTable};
pub use pipeline::{DecodeFields, PipelinePanel, StageBody, StageCard};
pub use registers::{RegisterPanel, RegisterSlot};

/// Everything the dashboard draws for one snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardView {
    /// Cycle counter.
    pub cycles: u64,
    /// Memory line the grid was windowed at.
    pub display_line: u32,
    /// Register bank.
    pub registers: RegisterPanel,
    /// Pipeline stages.
    pub pipeline: PipelinePanel,
    /// One table per memory block.
    pub memory: Vec<MemoryTable>,
}

/// Renders a whole snapshot.
///
/// # Arguments
///
/// * `snapshot` - The snapshot to draw; consumed read-only.
/// * `layout` - Strides and stage labels.
/// * `display_line` - The memory line the snapshot was requested at.
pub fn render(snapshot: &Snapshot, layout: &LayoutConfig, display_line: u32) -> DashboardView {
    DashboardView {
        cycles: snapshot.cycles,
        display_line,
        registers: registers::render(&snapshot.register_values, &snapshot.register_changed),
        pipeline: pipeline::render(
            &snapshot.pipeline_values,
            &snapshot.pipeline_statuses,
            layout,
        ),
        memory: memory::render(&snapshot.memory_grid, layout),
    }
}
