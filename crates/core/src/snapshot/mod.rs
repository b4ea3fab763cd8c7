//! Consolidated simulator state.
//!
//! A `Snapshot` is one consistent, point-in-time bundle of simulator state returned by a
//! single fetch. It provides:
//! 1. **Register Bank:** Sixteen values and their changed flags, fixed-size by type.
//! 2. **Pipeline:** Stage slots and their status tags, paired index-for-index.
//! 3. **Memory Grid:** Block/sub-row/word nesting windowed at the requested display line.
//! 4. **Cycle Counter:** Cycles executed since the last reset.
//!
//! Snapshots are immutable once received and are dropped after rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::{DashboardError, REGISTER_COUNT, Register, Result};

/// Instruction records and their decode fields.
pub mod instruction;
/// Memory grid layout.
pub mod memory;

pub use instruction::{
    AddrMode, AluOp, ControlOp, InstrMeta, InstrType, Instruction, InterruptOp, MemoryOp,
};
pub use memory::{GridShape, MemoryGrid};

/// Status tag of a pipeline stage slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    /// The stage holds an instruction that completed its work this cycle.
    Valid,
    /// The stage is waiting (hazard or memory latency).
    Stalled,
    /// The stage carries no useful work.
    Bubble,
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Valid => "valid",
            Self::Stalled => "stalled",
            Self::Bubble => "bubble",
        })
    }
}

/// One consistent bundle of register, pipeline, memory, and cycle state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Cycles executed since the last reset.
    pub cycles: u64,
    /// Register values in bank order.
    pub register_values: [u32; REGISTER_COUNT],
    /// Registers written by the last executed command.
    pub register_changed: [bool; REGISTER_COUNT],
    /// Stage slots, first stage first; `None` is an empty stage.
    pub pipeline_values: Vec<Option<Instruction>>,
    /// Status tag per stage slot.
    pub pipeline_statuses: Vec<StageStatus>,
    /// Memory contents windowed at the requested display line.
    pub memory_grid: MemoryGrid,
}

impl Snapshot {
    /// Checks the invariants that the wire format cannot enforce by type.
    ///
    /// Register arrays are fixed-size by construction; this verifies the
    /// pipeline/status pairing and the memory grid shape.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Shape`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.pipeline_values.len() != self.pipeline_statuses.len() {
            return Err(DashboardError::Shape(format!(
                "pipeline has {} stages but {} status tags",
                self.pipeline_values.len(),
                self.pipeline_statuses.len()
            )));
        }
        let _shape = self.memory_grid.shape()?;
        Ok(())
    }

    /// Returns the value of a single register.
    #[inline]
    pub const fn register(&self, reg: Register) -> u32 {
        self.register_values[reg.index()]
    }

    /// Returns whether a register changed during the last command.
    #[inline]
    pub const fn changed(&self, reg: Register) -> bool {
        self.register_changed[reg.index()]
    }

    /// Returns the number of pipeline stages.
    #[inline]
    pub fn stage_count(&self) -> usize {
        self.pipeline_values.len()
    }
}
