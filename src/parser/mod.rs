//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses precedence climbing for
//! expressions and handles:
//!
//! - Statement parsing (declarations, functions, control flow)
//! - Expression parsing (binary ops, function calls, literals)
//! - `<type> <name>` declarators with recovery for missing or misspelled types
//! - Error recovery and reporting
//!
//! Declarations are entered into the symbol table of the scope being
//! parsed, so redeclarations are reported as soon as they are seen.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
