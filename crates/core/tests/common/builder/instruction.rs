use pipedash_core::common::Register;
use pipedash_core::snapshot::{AddrMode, AluOp, InstrMeta, InstrType, Instruction, InterruptOp};

pub struct InstructionBuilder {
    instr: Instruction,
}

impl Default for InstructionBuilder {
    fn default() -> Self {
        Self::new(0)
    }
}

impl InstructionBuilder {
    pub fn new(raw: u32) -> Self {
        Self {
            instr: Instruction {
                instr_raw: raw,
                ..Instruction::default()
            },
        }
    }

    pub fn kind(mut self, kind: InstrType) -> Self {
        self.instr.instr_type = Some(kind);
        self
    }

    pub fn mode(mut self, mode: AddrMode) -> Self {
        self.instr.addr_mode = Some(mode);
        self
    }

    pub fn reg_1(mut self, reg: Register) -> Self {
        self.instr.reg_1 = Some(reg);
        self
    }

    pub fn reg_2(mut self, reg: Register) -> Self {
        self.instr.reg_2 = Some(reg);
        self
    }

    pub fn imm(mut self, imm: u32) -> Self {
        self.instr.imm = Some(imm);
        self
    }

    pub fn result(mut self, result: u32) -> Self {
        self.instr.meta.result = result;
        self
    }

    pub fn squashed(mut self) -> Self {
        self.instr.meta.squashed = true;
        self
    }

    pub fn writeback(mut self) -> Self {
        self.instr.meta.writeback = true;
        self
    }

    pub fn meta(mut self, meta: InstrMeta) -> Self {
        self.instr.meta = meta;
        self
    }

    // --- Helpers for Common Instructions ---

    /// `ADD reg_1, reg_2` in register-register mode.
    pub fn add(self, rd: Register, rs: Register) -> Self {
        self.kind(InstrType::Alu(AluOp::Add))
            .mode(AddrMode::RegReg)
            .reg_1(rd)
            .reg_2(rs)
    }

    /// `MOV reg_1, #imm`.
    pub fn mov_imm(self, rd: Register, imm: u32) -> Self {
        self.kind(InstrType::Alu(AluOp::Mov))
            .mode(AddrMode::RegImm)
            .reg_1(rd)
            .imm(imm)
    }

    pub fn halt(self) -> Self {
        self.kind(InstrType::Interrupt(InterruptOp::Hlt))
    }

    pub fn build(self) -> Instruction {
        self.instr
    }
}
