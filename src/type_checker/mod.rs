//! Type checking and semantic analysis module.
//!
//! This module walks the linked AST once, top down, and:
//!
//! - Resolves every identifier and call through the scope chain
//! - Records the line each symbol was last used on
//! - Gives every expression its type, `void` when it cannot be resolved
//! - Checks assignments, operands, call arguments and returns for matching types
//! - Reports a program without an entry point
//!
//! There is no implicit conversion between types.

pub mod type_checker;
