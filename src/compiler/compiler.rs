//! Main compiler module.
//!
//! Runs the whole front end over one source text: tokenize, parse, link
//! parents and type check. Each stage's duration is logged at `info`.

use std::time::Instant;

use tracing::info;

use crate::{
    ast::ast::Program,
    errors::errors::Diagnostics,
    lexer::lexer::tokenize,
    parser::parser::parse,
    scope::parents::assign_parents,
    type_checker::type_checker::type_check,
};

/// The analyzed tree of one unit and every diagnostic recorded for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    pub program: Program,
    pub diagnostics: Diagnostics,
}

impl Compilation {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

pub fn compile(source: &str) -> Compilation {
    let start = Instant::now();

    let tokens = tokenize(source);
    info!(tokens = tokens.len(), elapsed = ?start.elapsed(), "tokenized");

    let parse_start = Instant::now();
    let (mut program, mut diagnostics) = parse(tokens);
    info!(statements = program.statements.len(), elapsed = ?parse_start.elapsed(), "parsed");

    let link_start = Instant::now();
    assign_parents(&mut program);
    info!(elapsed = ?link_start.elapsed(), "linked");

    let type_check_start = Instant::now();
    type_check(&mut program, &mut diagnostics);
    info!(elapsed = ?type_check_start.elapsed(), "type checked");

    info!(errors = diagnostics.len(), elapsed = ?start.elapsed(), "front end finished");
    Compilation {
        program,
        diagnostics,
    }
}
