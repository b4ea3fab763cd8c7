//! Pipeline panel.
//!
//! Verbosity depends on stage position. The first stage has only fetched its
//! instruction, so it shows the raw encoding alone; every later stage also shows the
//! decode fields. This holds even when a later stage's decode fields are absent.

use crate::common::Register;
use crate::config::LayoutConfig;
use crate::snapshot::{AddrMode, InstrMeta, InstrType, Instruction, StageStatus};

/// Placeholder text for a stage holding no instruction.
pub const EMPTY_STAGE: &str = "(empty)";

/// Text drawn for an absent optional decode field.
pub const ABSENT_FIELD: &str = "-";

/// Decode fields shown for every stage after the first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeFields {
    /// Instruction kind and operation.
    pub instr_type: Option<InstrType>,
    /// Addressing mode.
    pub addr_mode: Option<AddrMode>,
    /// First register operand.
    pub reg_1: Option<Register>,
    /// Second register operand.
    pub reg_2: Option<Register>,
    /// Immediate operand.
    pub imm: Option<u32>,
    /// Result, squashed, and writeback flags.
    pub meta: InstrMeta,
}

impl DecodeFields {
    /// Labels of the rows produced by [`DecodeFields::rows`].
    pub const ROW_LABELS: [&'static str; 6] = ["type", "mode", "reg_1", "reg_2", "imm", "meta"];

    fn from_instruction(instr: &Instruction) -> Self {
        Self {
            instr_type: instr.instr_type,
            addr_mode: instr.addr_mode,
            reg_1: instr.reg_1,
            reg_2: instr.reg_2,
            imm: instr.imm,
            meta: instr.meta,
        }
    }

    /// Returns the fields as labeled display rows.
    pub fn rows(&self) -> [(&'static str, String); 6] {
        fn or_absent<T: ToString>(value: Option<T>) -> String {
            value.map_or_else(|| ABSENT_FIELD.to_string(), |v| v.to_string())
        }
        let [t, m, r1, r2, i, meta] = Self::ROW_LABELS;
        [
            (t, or_absent(self.instr_type)),
            (m, or_absent(self.addr_mode)),
            (r1, or_absent(self.reg_1)),
            (r2, or_absent(self.reg_2)),
            (i, or_absent(self.imm.map(|imm| format!("{imm:#x}")))),
            (
                meta,
                format!(
                    "result={:#x} squashed={} writeback={}",
                    self.meta.result, self.meta.squashed, self.meta.writeback
                ),
            ),
        ]
    }
}

/// What a stage card shows besides its label and status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageBody {
    /// No instruction in this stage.
    Empty,
    /// First stage: raw encoding only.
    Fetched {
        /// Raw encoding as text.
        raw: String,
    },
    /// Later stages: raw encoding plus decode fields.
    Decoded {
        /// Raw encoding as text.
        raw: String,
        /// Decode fields.
        fields: DecodeFields,
    },
}

/// One pipeline stage as displayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageCard {
    /// Position in the pipeline, first stage is 0.
    pub index: usize,
    /// Stage label (e.g. `"Decode"`).
    pub label: String,
    /// Status tag, if the simulator reported one for this index.
    pub status: Option<StageStatus>,
    /// Stage contents.
    pub body: StageBody,
}

/// The rendered pipeline, first stage first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelinePanel {
    /// One card per stage.
    pub stages: Vec<StageCard>,
}

/// Renders the pipeline stages with their statuses.
///
/// # Arguments
///
/// * `stages` - Stage slots; `None` is an empty stage.
/// * `statuses` - Status tags paired index-for-index with `stages`.
/// * `layout` - Supplies stage labels.
pub fn render(
    stages: &[Option<Instruction>],
    statuses: &[StageStatus],
    layout: &LayoutConfig,
) -> PipelinePanel {
    let cards = stages
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let body = match slot {
                None => StageBody::Empty,
                Some(instr) if index == 0 => StageBody::Fetched {
                    raw: instr.raw_text(),
                },
                Some(instr) => StageBody::Decoded {
                    raw: instr.raw_text(),
                    fields: DecodeFields::from_instruction(instr),
                },
            };
            StageCard {
                index,
                label: layout.stage_label(index, stages.len()),
                status: statuses.get(index).copied(),
                body,
            }
        })
        .collect();
    PipelinePanel { stages: cards }
}
