//! Register bank naming.
//!
//! The simulator exposes sixteen 32-bit registers in a fixed order. This module provides:
//! 1. **Naming:** The canonical index-to-name table shared by the snapshot and the views.
//! 2. **References:** A `Register` enum used by instruction records for operand fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of architectural registers in the bank.
pub const REGISTER_COUNT: usize = 16;

/// Register names, indexed by register number.
pub const REGISTER_NAMES: [&str; REGISTER_COUNT] = [
    "R0", "R1", "R2", "R3", "R4", "R5", "R6", "R7", "R8", "R9", "R10", "R11", "SP", "BF", "LR",
    "PC",
];

/// A register reference as carried by instruction records.
///
/// Discriminants match the register's index in the bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Register {
    /// General-purpose register 0.
    R0 = 0,
    /// General-purpose register 1.
    R1,
    /// General-purpose register 2.
    R2,
    /// General-purpose register 3.
    R3,
    /// General-purpose register 4.
    R4,
    /// General-purpose register 5.
    R5,
    /// General-purpose register 6.
    R6,
    /// General-purpose register 7.
    R7,
    /// General-purpose register 8.
    R8,
    /// General-purpose register 9.
    R9,
    /// General-purpose register 10.
    R10,
    /// General-purpose register 11.
    R11,
    /// Stack pointer.
    SP,
    /// Base/flag register (written by compares, read by branches).
    BF,
    /// Link register.
    LR,
    /// Program counter.
    PC,
}

impl Register {
    /// All registers in bank order.
    pub const ALL: [Self; REGISTER_COUNT] = [
        Self::R0,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
        Self::R8,
        Self::R9,
        Self::R10,
        Self::R11,
        Self::SP,
        Self::BF,
        Self::LR,
        Self::PC,
    ];

    /// Returns the register's index in the bank.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the register's display name.
    #[inline]
    pub const fn name(self) -> &'static str {
        REGISTER_NAMES[self as usize]
    }

    /// Looks up a register by bank index.
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
