//! Error types and the diagnostics sink for the front end.
//!
//! This module defines the diagnostics produced while compiling a unit.
//! It includes:
//!
//! - Error structures tagged with the source line they refer to
//! - Specific error variants for syntax, declaration and semantic problems
//! - Error names and tips used when rendering diagnostics
//! - The append-only `Diagnostics` sink shared by every pass
//!
//! Nothing in here is fatal: every pass records what it finds and carries on.

pub mod errors;

#[cfg(test)]
mod tests;
