//! Memory panel.
//!
//! Each block of the grid becomes one table. Sub-rows are stored bottom-up, so rows are
//! emitted from the highest sub-row down while address labels count up from zero.

use std::iter;

use crate::config::LayoutConfig;
use crate::snapshot::MemoryGrid;

/// Header of the address column.
pub const ADDRESS_HEADER: &str = "Address";

/// One displayed memory row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryRow {
    /// Address label: row position times the block stride.
    pub address: u64,
    /// Words of the sub-row, one per column.
    pub cells: Vec<u32>,
}

/// One block of the memory grid as a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryTable {
    /// Block index in the grid.
    pub block: usize,
    /// `"Address"` followed by one byte-offset label per word column.
    pub header: Vec<String>,
    /// Body rows, highest stored sub-row first.
    pub rows: Vec<MemoryRow>,
}

impl MemoryTable {
    /// Number of rows including the header.
    pub fn row_count(&self) -> usize {
        self.rows.len() + 1
    }

    /// Number of columns including the address column.
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// Renders one table per block; an empty grid renders nothing.
pub fn render(grid: &MemoryGrid, layout: &LayoutConfig) -> Vec<MemoryTable> {
    grid.blocks()
        .iter()
        .enumerate()
        .map(|(block, sub_rows)| {
            let words = sub_rows.first().map_or(0, Vec::len);
            let header = iter::once(ADDRESS_HEADER.to_string())
                .chain(
                    (0..words as u64)
                        .map(|slot| format!("{:#x}", slot.saturating_mul(layout.word_stride))),
                )
                .collect();
            let rows = sub_rows
                .iter()
                .rev()
                .enumerate()
                .map(|(position, cells)| MemoryRow {
                    address: (position as u64).saturating_mul(layout.block_stride),
                    cells: cells.clone(),
                })
                .collect();
            MemoryTable {
                block,
                header,
                rows,
            }
        })
        .collect()
}
