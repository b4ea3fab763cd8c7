//! Register bank panel.

use crate::common::{REGISTER_COUNT, REGISTER_NAMES};

/// One register as displayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterSlot {
    /// Register name (e.g. `"SP"`).
    pub name: &'static str,
    /// Current value.
    pub value: u32,
    /// Drawn distinguished because the last command wrote it.
    pub highlighted: bool,
}

/// The rendered register bank, in bank order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterPanel {
    /// One slot per register.
    pub slots: Vec<RegisterSlot>,
}

impl RegisterPanel {
    /// Returns the slots drawn highlighted.
    pub fn highlighted(&self) -> impl Iterator<Item = &RegisterSlot> {
        self.slots.iter().filter(|slot| slot.highlighted)
    }
}

/// Renders the register bank; slot `i` is highlighted iff `changed[i]`.
pub fn render(values: &[u32; REGISTER_COUNT], changed: &[bool; REGISTER_COUNT]) -> RegisterPanel {
    let slots = REGISTER_NAMES
        .iter()
        .zip(values.iter().zip(changed))
        .map(|(&name, (&value, &highlighted))| RegisterSlot {
            name,
            value,
            highlighted,
        })
        .collect();
    RegisterPanel { slots }
}
