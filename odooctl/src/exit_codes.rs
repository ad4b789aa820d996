//! Stable exit codes for odooctl CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed (invalid config, unmatched workspace, spawn failure, ...).
pub const INVALID: i32 = 1;
/// `odooctl pick` ended without a selection.
pub const NO_SELECTION: i32 = 2;
