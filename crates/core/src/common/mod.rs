//! Common utilities and types used throughout the dashboard.
//!
//! This module provides the building blocks shared by the link, snapshot, and view layers:
//! 1. **Error Handling:** The `DashboardError` taxonomy and crate-wide `Result` alias.
//! 2. **Register Naming:** The fixed index-to-name mapping of the simulator's register bank.

/// Error taxonomy and result alias.
pub mod error;

/// Register names and the register reference type.
pub mod reg;

pub use error::{DashboardError, ErrorKind, Result};
pub use reg::{REGISTER_COUNT, REGISTER_NAMES, Register};
