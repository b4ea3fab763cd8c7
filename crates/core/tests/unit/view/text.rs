use pipedash_core::common::Register;
use pipedash_core::config::LayoutConfig;
use pipedash_core::snapshot::StageStatus;
use pipedash_core::view::{self, text::HIGHLIGHT_MARK};
use pretty_assertions::assert_eq;

use crate::common::builder::{InstructionBuilder, SnapshotBuilder};

fn rendered() -> String {
    let snapshot = SnapshotBuilder::new()
        .cycles(12)
        .register(Register::SP, 0x0ff0)
        .register(Register::PC, 4)
        .changed(Register::PC)
        .stage(0, InstructionBuilder::new(0x2a).build(), StageStatus::Valid)
        .stage(
            1,
            InstructionBuilder::new(0x1012_0000).add(Register::R1, Register::R2).build(),
            StageStatus::Stalled,
        )
        .grid(vec![vec![vec![1, 2], vec![3, 4]]])
        .build();
    view::render(&snapshot, &LayoutConfig::default(), 3).to_string()
}

#[test]
fn test_header_line() {
    let text = rendered();
    let header = text.lines().nth(1).unwrap();
    assert_eq!(header, "SIMULATOR STATE  cycle 12  memory line 3");
}

#[test]
fn test_register_lines_mark_changed_slots() {
    let text = rendered();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines.contains(&"  SP  0x00000ff0  BF  0x00000000  LR  0x00000000  PC  0x00000004*"));
    assert_eq!(text.matches(HIGHLIGHT_MARK).count(), 1);
}

#[test]
fn test_pipeline_lines() {
    let text = rendered();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines.contains(&"  [0] Fetch      valid    0x0000002a"));
    assert!(lines.contains(&"  [1] Decode     stalled  0x10120000"));
    assert!(lines.contains(&"        type   ALU(ADD)"));
    assert!(lines.contains(&"        reg_2  R2"));
    assert!(lines.contains(&"  [2] Execute    bubble   (empty)"));
    // Only the decode stage carries field rows.
    assert_eq!(text.matches("        mode   ").count(), 1);
}

#[test]
fn test_memory_lines() {
    let text = rendered();
    let tail: Vec<&str> = text.lines().rev().take(4).collect();
    assert_eq!(
        tail,
        vec![
            "        0x40 0x00000001 0x00000002",
            "         0x0 0x00000003 0x00000004",
            "     Address        0x0        0x4",
            "MEMORY block 0",
        ]
    );
}
