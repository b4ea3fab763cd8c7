use pipedash_core::common::{REGISTER_COUNT, Register};
use pipedash_core::snapshot::{Instruction, MemoryGrid, Snapshot, StageStatus};

pub const STAGES: usize = 5;
pub const BLOCKS: usize = 2;
pub const ROWS: usize = 4;
pub const WORDS: usize = 4;

/// Builds a well-formed snapshot: five empty bubble stages and a zeroed 2x4x4 grid.
pub struct SnapshotBuilder {
    snapshot: Snapshot,
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            snapshot: Snapshot {
                cycles: 0,
                register_values: [0; REGISTER_COUNT],
                register_changed: [false; REGISTER_COUNT],
                pipeline_values: vec![None; STAGES],
                pipeline_statuses: vec![StageStatus::Bubble; STAGES],
                memory_grid: MemoryGrid(vec![vec![vec![0; WORDS]; ROWS]; BLOCKS]),
            },
        }
    }

    pub fn cycles(mut self, cycles: u64) -> Self {
        self.snapshot.cycles = cycles;
        self
    }

    pub fn register(mut self, reg: Register, value: u32) -> Self {
        self.snapshot.register_values[reg.index()] = value;
        self
    }

    pub fn changed(mut self, reg: Register) -> Self {
        self.snapshot.register_changed[reg.index()] = true;
        self
    }

    pub fn stage(mut self, index: usize, instr: Instruction, status: StageStatus) -> Self {
        self.snapshot.pipeline_values[index] = Some(instr);
        self.snapshot.pipeline_statuses[index] = status;
        self
    }

    /// Replaces the pipeline with `len` empty bubble stages.
    pub fn stages(mut self, len: usize) -> Self {
        self.snapshot.pipeline_values = vec![None; len];
        self.snapshot.pipeline_statuses = vec![StageStatus::Bubble; len];
        self
    }

    pub fn grid(mut self, grid: Vec<Vec<Vec<u32>>>) -> Self {
        self.snapshot.memory_grid = MemoryGrid(grid);
        self
    }

    pub fn word(mut self, block: usize, row: usize, word: usize, value: u32) -> Self {
        self.snapshot.memory_grid.0[block][row][word] = value;
        self
    }

    pub fn build(self) -> Snapshot {
        self.snapshot
    }
}
