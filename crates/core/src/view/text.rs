//! Plain-text rendering of the view tree.
//!
//! Output is deterministic: fixed column widths, no colour, and a trailing `*` on
//! highlighted registers so the result can be compared in tests and piped to files.

use std::fmt;

use super::pipeline::{ABSENT_FIELD, EMPTY_STAGE};
use super::{DashboardView, MemoryTable, PipelinePanel, RegisterPanel, StageBody};

/// Heavy separator between dashboard sections.
const RULE: &str = "==========================================================";

/// Light separator between panels.
const THIN_RULE: &str = "----------------------------------------------------------";

/// Register slots per text line.
const REGISTERS_PER_LINE: usize = 4;

/// Marker appended to a highlighted register value.
pub const HIGHLIGHT_MARK: char = '*';

impl fmt::Display for RegisterPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "REGISTERS")?;
        for line in self.slots.chunks(REGISTERS_PER_LINE) {
            write!(f, " ")?;
            for slot in line {
                let mark = if slot.highlighted { HIGHLIGHT_MARK } else { ' ' };
                write!(f, " {:<4}{:#010x}{mark}", slot.name, slot.value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for PipelinePanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PIPELINE")?;
        for card in &self.stages {
            let status = card
                .status
                .map_or_else(|| ABSENT_FIELD.to_string(), |s| s.to_string());
            write!(f, "  [{}] {:<10} {:<8} ", card.index, card.label, status)?;
            match &card.body {
                StageBody::Empty => writeln!(f, "{EMPTY_STAGE}")?,
                StageBody::Fetched { raw } => writeln!(f, "{raw}")?,
                StageBody::Decoded { raw, fields } => {
                    writeln!(f, "{raw}")?;
                    for (label, value) in fields.rows() {
                        writeln!(f, "        {label:<6} {value}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for MemoryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MEMORY block {}", self.block)?;
        write!(f, " ")?;
        for column in &self.header {
            write!(f, " {column:>10}")?;
        }
        writeln!(f)?;
        for row in &self.rows {
            write!(f, "  {:>#10x}", row.address)?;
            for cell in &row.cells {
                write!(f, " {cell:#010x}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(
            f,
            "SIMULATOR STATE  cycle {}  memory line {}",
            self.cycles, self.display_line
        )?;
        writeln!(f, "{RULE}")?;
        write!(f, "{}", self.registers)?;
        writeln!(f, "{THIN_RULE}")?;
        write!(f, "{}", self.pipeline)?;
        for table in &self.memory {
            writeln!(f, "{THIN_RULE}")?;
            write!(f, "{table}")?;
        }
        Ok(())
    }
}
