//! Instruction records carried by pipeline stages.
//!
//! An instruction record is the simulator's view of one in-flight instruction:
//! 1. **Encoding:** The raw 32-bit word as fetched.
//! 2. **Decode Fields:** Instruction kind, addressing mode, operands, and immediate,
//!    populated once the instruction has passed decode.
//! 3. **Execution Metadata:** Result value, squash flag, and writeback flag.
//!
//! The instruction kind is a closed enum. On the wire it is serde's externally
//! tagged form, e.g. `{"ALU": "ADD"}`, so the variant name is recovered by
//! matching rather than by inspecting field names.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::Register;

/// Instruction kind with its per-kind operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstrType {
    /// Arithmetic/logic operation.
    #[serde(rename = "ALU")]
    Alu(AluOp),
    /// Load or store.
    Memory(MemoryOp),
    /// Branch, call, or return.
    Control(ControlOp),
    /// No-op or halt.
    Interrupt(InterruptOp),
}

impl InstrType {
    /// Returns the display name of the variant (e.g. `"ALU"`).
    pub const fn variant_name(&self) -> &'static str {
        match self {
            Self::Alu(_) => "ALU",
            Self::Memory(_) => "Memory",
            Self::Control(_) => "Control",
            Self::Interrupt(_) => "Interrupt",
        }
    }

    /// Returns the mnemonic carried by the variant (e.g. `"ADD"`).
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Self::Alu(op) => op.mnemonic(),
            Self::Memory(op) => op.mnemonic(),
            Self::Control(op) => op.mnemonic(),
            Self::Interrupt(op) => op.mnemonic(),
        }
    }
}

impl fmt::Display for InstrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.variant_name(), self.mnemonic())
    }
}

/// Arithmetic/logic operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum AluOp {
    Mov,
    Add,
    Sub,
    Imul,
    Idiv,
    And,
    Or,
    Xor,
    Cmp,
    Mod,
    Not,
    Lsl,
    Lsr,
}

impl AluOp {
    /// Returns the assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Mov => "MOV",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Imul => "IMUL",
            Self::Idiv => "IDIV",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Cmp => "CMP",
            Self::Mod => "MOD",
            Self::Not => "NOT",
            Self::Lsl => "LSL",
            Self::Lsr => "LSR",
        }
    }
}

/// Memory operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemoryOp {
    /// Load register from memory.
    Ldr,
    /// Store register to memory.
    Str,
}

impl MemoryOp {
    /// Returns the assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Ldr => "LDR",
            Self::Str => "STR",
        }
    }
}

/// Control-transfer operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum ControlOp {
    Beq,
    Blt,
    Bgt,
    Bne,
    B,
    Call,
    Ret,
    Bge,
    Ble,
}

impl ControlOp {
    /// Returns the assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Beq => "BEQ",
            Self::Blt => "BLT",
            Self::Bgt => "BGT",
            Self::Bne => "BNE",
            Self::B => "B",
            Self::Call => "CALL",
            Self::Ret => "RET",
            Self::Bge => "BGE",
            Self::Ble => "BLE",
        }
    }
}

/// Interrupt-class operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InterruptOp {
    /// No operation.
    Nop,
    /// Halt the processor.
    Hlt,
}

impl InterruptOp {
    /// Returns the assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Nop => "NOP",
            Self::Hlt => "HLT",
        }
    }
}

/// Operand addressing modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddrMode {
    /// Two register operands.
    RegReg,
    /// Two register operands plus an offset.
    RegRegOff,
    /// Register and immediate.
    RegImm,
    /// Immediate only.
    Imm,
    /// Single register.
    Reg,
}

impl fmt::Display for AddrMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Execution metadata attached to an instruction as it moves down the pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrMeta {
    /// Value produced by execute or memory.
    pub result: u32,
    /// Effects were discarded (e.g. a mispredicted control transfer).
    pub squashed: bool,
    /// Result is committed to the destination register.
    pub writeback: bool,
}

/// One in-flight instruction as reported by a pipeline stage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Raw 32-bit encoding.
    pub instr_raw: u32,
    /// Decoded kind, absent before decode.
    #[serde(default)]
    pub instr_type: Option<InstrType>,
    /// Decoded addressing mode, absent before decode.
    #[serde(default)]
    pub addr_mode: Option<AddrMode>,
    /// First register operand.
    #[serde(default)]
    pub reg_1: Option<Register>,
    /// Second register operand.
    #[serde(default)]
    pub reg_2: Option<Register>,
    /// Immediate operand.
    #[serde(default)]
    pub imm: Option<u32>,
    /// Execution metadata.
    #[serde(default)]
    pub meta: InstrMeta,
}

impl Instruction {
    /// Returns the raw encoding as zero-padded hex text (e.g. `0x0000002a`).
    pub fn raw_text(&self) -> String {
        format!("{:#010x}", self.instr_raw)
    }
}
