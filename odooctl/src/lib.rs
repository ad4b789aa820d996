//! Developer tooling for local Odoo server instances.
//!
//! The crate discovers running Odoo servers, stops them, opens files in the
//! IDE and lets the user choose between options through an external picker.
//! The architecture keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (command-line recognition,
//!   instance addresses, menu mapping, editor arguments). No I/O.
//! - **[`io`]**: Side-effecting adapters (process table, subprocesses, config).
//!   Each sits behind a trait or a small struct so tests can substitute it.
//!
//! Orchestration modules ([`instances`], [`menu`]) combine the two to
//! implement CLI commands.

pub mod core;
pub mod exit_codes;
pub mod instances;
pub mod io;
pub mod logging;
pub mod menu;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
