//! Memory grid as laid out for display.
//!
//! The simulator returns memory as a three-level nesting: block, sub-row, word.
//! Sub-rows are stored bottom-up; the memory view reverses them when drawing.

use serde::{Deserialize, Serialize};

use crate::common::{DashboardError, Result};

/// Nested memory contents: `grid[block][sub_row][word]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryGrid(pub Vec<Vec<Vec<u32>>>);

/// Shape of a well-formed grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridShape {
    /// Number of blocks (outer dimension).
    pub blocks: usize,
    /// Sub-rows per block.
    pub rows: usize,
    /// Word slots per sub-row.
    pub words: usize,
}

impl MemoryGrid {
    /// Returns the blocks of the grid in storage order.
    pub fn blocks(&self) -> &[Vec<Vec<u32>>] {
        &self.0
    }

    /// Returns `true` if the grid has no blocks.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the word at the given storage coordinates, if present.
    pub fn word(&self, block: usize, row: usize, word: usize) -> Option<u32> {
        self.0.get(block)?.get(row)?.get(word).copied()
    }

    /// Computes the grid shape, checking that every block and row agree.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Shape`] if blocks differ in sub-row count or
    /// rows differ in word count.
    pub fn shape(&self) -> Result<GridShape> {
        let Some(first) = self.0.first() else {
            return Ok(GridShape {
                blocks: 0,
                rows: 0,
                words: 0,
            });
        };
        let rows = first.len();
        let words = first.first().map_or(0, Vec::len);

        for (b, block) in self.0.iter().enumerate() {
            if block.len() != rows {
                return Err(DashboardError::Shape(format!(
                    "memory block {b} has {} sub-rows, expected {rows}",
                    block.len()
                )));
            }
            if let Some((r, row)) = block.iter().enumerate().find(|(_, row)| row.len() != words) {
                return Err(DashboardError::Shape(format!(
                    "memory block {b} sub-row {r} has {} words, expected {words}",
                    row.len()
                )));
            }
        }

        Ok(GridShape {
            blocks: self.0.len(),
            rows,
            words,
        })
    }
}
