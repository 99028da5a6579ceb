//! Compilation pipeline.
//!
//! `compiler::compile` chains the lexer, parser, parent pass and type
//! checker over one source text and returns the analyzed program together
//! with its diagnostics.

pub mod compiler;
