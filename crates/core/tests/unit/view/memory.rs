use pipedash_core::config::LayoutConfig;
use pipedash_core::snapshot::MemoryGrid;
use pipedash_core::view::memory::{ADDRESS_HEADER, render};
use proptest::prelude::*;
use rstest::rstest;

fn grid_strategy() -> impl Strategy<Value = Vec<Vec<Vec<u32>>>> {
    (0usize..4, 0usize..6, 0usize..6).prop_flat_map(|(b, r, w)| {
        prop::collection::vec(
            prop::collection::vec(prop::collection::vec(any::<u32>(), w), r),
            b,
        )
    })
}

proptest! {
    #[test]
    fn tables_reconstruct_the_grid(grid in grid_strategy()) {
        let layout = LayoutConfig::default();
        let tables = render(&MemoryGrid(grid.clone()), &layout);

        prop_assert_eq!(tables.len(), grid.len());
        for (block, table) in tables.iter().enumerate() {
            let rows = grid[block].len();
            let words = grid[block].first().map_or(0, Vec::len);
            prop_assert_eq!(table.block, block);
            prop_assert_eq!(table.row_count(), rows + 1);
            prop_assert_eq!(table.column_count(), words + 1);
            prop_assert_eq!(table.header[0].as_str(), ADDRESS_HEADER);
            for (w, label) in table.header.iter().skip(1).enumerate() {
                prop_assert_eq!(label, &format!("{:#x}", w * 4));
            }
            for (r, row) in table.rows.iter().enumerate() {
                prop_assert_eq!(row.address, r as u64 * 64);
                prop_assert_eq!(&row.cells, &grid[block][rows - 1 - r]);
            }
        }
    }
}

#[test]
fn test_empty_grid_renders_nothing() {
    assert!(render(&MemoryGrid::default(), &LayoutConfig::default()).is_empty());
}

#[rstest]
#[case(64, 4, &["Address", "0x0", "0x4", "0x8"], &[0, 64])]
#[case(32, 8, &["Address", "0x0", "0x8", "0x10"], &[0, 32])]
fn test_strides(
    #[case] block_stride: u64,
    #[case] word_stride: u64,
    #[case] header: &[&str],
    #[case] addresses: &[u64],
) {
    let layout = LayoutConfig {
        block_stride,
        word_stride,
        ..LayoutConfig::default()
    };
    let grid = MemoryGrid(vec![vec![vec![1, 2, 3], vec![4, 5, 6]]]);

    let table = &render(&grid, &layout)[0];
    assert_eq!(table.header, header);
    assert_eq!(table.rows.iter().map(|r| r.address).collect::<Vec<_>>(), addresses);
    assert_eq!(table.rows[0].cells, vec![4, 5, 6]);
    assert_eq!(table.rows[1].cells, vec![1, 2, 3]);
}

#[test]
fn test_oversized_strides_saturate_labels() {
    let layout = LayoutConfig {
        block_stride: u64::MAX / 2 + 1,
        word_stride: u64::MAX,
        ..LayoutConfig::default()
    };
    let grid = MemoryGrid(vec![vec![vec![0; 3]; 3]]);

    let table = &render(&grid, &layout)[0];
    assert_eq!(table.header[3], format!("{:#x}", u64::MAX));
    assert_eq!(
        table.rows.iter().map(|r| r.address).collect::<Vec<_>>(),
        [0, 1 << 63, u64::MAX]
    );
}
