//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! Expressions are parsed by precedence climbing over NUD/LED handlers,
//! statements by dispatch on their leading keyword.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for primary and prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//!
//! The parser never stops at the first error. Problems are recorded in its
//! diagnostics and parsing carries on, assuming missing tokens were present.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{Arena, BlockId, ExprId, Program, StmtId},
        expressions::Expr,
        statements::Stmt,
    },
    errors::errors::{Diagnostics, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    symbol_table::symbol_table::{SymbolKind, SymbolTable, SymbolTableEntry},
    MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_top_level_stmt,
    types::Declarator,
};

/// Deepest nesting of blocks and sub-expressions the parser descends into.
pub const MAX_NESTING: usize = 128;

/// The main parser structure that maintains parsing state.
///
/// Besides the token cursor and lookup tables it owns the arena the tree is
/// built into, the global symbol table and the stack of open blocks, so
/// declarations land in their scope as soon as they are parsed.
pub struct Parser {
    /// The list of tokens to parse, always ending with EOF
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for primary and prefix expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for infix expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for operator precedence
    binding_power_lookup: BPLookup,
    arena: Arena,
    globals: SymbolTable,
    /// Blocks currently open, innermost last. Empty at the top level.
    scopes: Vec<BlockId>,
    /// Set once an `entry` function has been seen
    has_entry: bool,
    /// Blocks and primary expressions currently being parsed
    nesting: usize,
    /// Tree depth of each expression, indexed like the arena
    expr_depths: Vec<usize>,
    /// Set after a too deep construct was skipped. Missing tokens are not
    /// reported until an expected token is found again.
    recovering: bool,
    diagnostics: Diagnostics,
}

impl Parser {
    /// Creates a new Parser instance.
    ///
    /// A stream that does not end with EOF gets one appended.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let line = tokens.last().map(|token| token.line).unwrap_or(1);
            tokens.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), line));
        }

        Parser {
            tokens,
            pos: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            arena: Arena::new(),
            globals: SymbolTable::new(),
            scopes: vec![],
            has_entry: false,
            nesting: 0,
            expr_depths: vec![],
            recovering: false,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the token after the current one, or EOF at the end.
    pub fn peek_token(&self) -> &Token {
        let index = (self.pos + 1).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Advances to the next token and returns the previous one.
    /// Never moves past EOF.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if token.kind != TokenKind::EOF {
            self.pos += 1;
        }
        token
    }

    /// Line of the most recently consumed token.
    pub fn previous_line(&self) -> u32 {
        match self.pos {
            0 => self.current_token().line,
            pos => self.tokens[pos - 1].line,
        }
    }

    /// Consumes a token of the expected kind.
    ///
    /// Otherwise records `message` against the current token and returns
    /// `None` without advancing, so the caller can carry on as if the token
    /// had been there.
    pub fn expect(&mut self, expected_kind: TokenKind, message: &str) -> Option<Token> {
        if self.current_token_kind() == expected_kind {
            self.recovering = false;
            return Some(self.advance());
        }

        if self.recovering {
            return None;
        }

        let token = self.current_token().value.clone();
        let line = if expected_kind == TokenKind::Semicolon {
            self.previous_line()
        } else {
            self.current_token().line
        };
        self.error(
            line,
            ErrorImpl::UnexpectedTokenDetailed {
                token,
                message: String::from(message),
            },
        );
        None
    }

    /// Enters a block or sub-expression.
    ///
    /// Past `MAX_NESTING` this records the problem, skips the construct and
    /// returns false; the caller must not descend. Every successful call is
    /// paired with `leave_nesting`.
    pub fn enter_nesting(&mut self) -> bool {
        if self.nesting >= MAX_NESTING {
            self.too_deep();
            return false;
        }

        self.nesting += 1;
        true
    }

    pub fn leave_nesting(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }

    /// Reports a construct nested past `MAX_NESTING` and skips over it.
    pub fn too_deep(&mut self) {
        let line = self.current_token().line;
        debug!(line, "nesting limit reached");
        self.error(line, ErrorImpl::NestingTooDeep { limit: MAX_NESTING });
        self.synchronize();
        self.recovering = true;
    }

    /// Depth of the expression tree rooted at `id`.
    pub fn expr_depth(&self, id: ExprId) -> usize {
        self.expr_depths.get(id.0).copied().unwrap_or(0)
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn error(&mut self, line: u32, error: ErrorImpl) {
        self.diagnostics.record(line, error);
    }

    /// Records the current token as one that cannot appear here.
    pub fn unexpected_token(&mut self) {
        let token = self.current_token().clone();
        let error = match token.kind {
            TokenKind::Illegal => ErrorImpl::UnrecognisedToken { token: token.value },
            _ => ErrorImpl::UnexpectedToken { token: token.value },
        };
        self.error(token.line, error);
    }

    /// Skips tokens until a `;` is consumed outside braces, a balanced
    /// `{ ... }` group closes, an unmatched `}` is reached or EOF.
    pub fn synchronize(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.current_token_kind() {
                TokenKind::EOF => return,
                TokenKind::Semicolon => {
                    self.advance();
                    if depth == 0 {
                        return;
                    }
                }
                TokenKind::OpenCurly => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::CloseCurly => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                    self.advance();
                    if depth == 0 {
                        return;
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Skips tokens until one of `stop` or EOF, without consuming it.
    pub fn skip_until(&mut self, stop: &[TokenKind]) {
        while self.has_tokens() && !stop.contains(&self.current_token_kind()) {
            self.advance();
        }
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Precedence of `kind` as an infix operator, -1 if it is not one.
    pub fn binding_power(&self, kind: TokenKind) -> i32 {
        if !self.led_lookup.contains_key(&kind) {
            return -1;
        }

        self.binding_power_lookup
            .get(&kind)
            .map(|bp| bp.value())
            .unwrap_or(-1)
    }

    /// True if `kind` can begin an expression.
    pub fn starts_expression(&self, kind: TokenKind) -> bool {
        self.nud_lookup.contains_key(&kind)
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (primary) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a prefix operator with its own precedence entry.
    pub fn prefix(&mut self, kind: TokenKind, binding_power: BindingPower, nud_fn: NUDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    pub fn push_expr(&mut self, expr: Expr, line: u32) -> ExprId {
        let depth = expr
            .children()
            .into_iter()
            .map(|child| self.expr_depth(child))
            .max()
            .unwrap_or(0)
            + 1;

        let id = self.arena.add_expr(expr, line);
        self.expr_depths.push(depth);
        id
    }

    pub fn push_stmt(&mut self, stmt: Stmt, line: u32) -> StmtId {
        self.arena.add_stmt(stmt, line)
    }

    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.arena.expr(id).expr
    }

    /// Flags a node whose type stands in for a declaration error.
    pub fn mark_unresolved(&mut self, id: ExprId) {
        self.arena.expr_mut(id).unresolved = true;
    }

    /// Allocates a block and makes it the current scope.
    pub fn open_block(&mut self, line: u32) -> BlockId {
        let block = self.arena.add_block(line);
        self.scopes.push(block);
        trace!(block = block.0, line, "opened block");
        block
    }

    pub fn close_block(&mut self) {
        self.scopes.pop();
    }

    pub fn add_to_block(&mut self, block: BlockId, stmt: StmtId) {
        self.arena.block_mut(block).statements.push(stmt);
    }

    /// Marks an `entry` function, returning whether one was already seen.
    pub fn mark_entry(&mut self) -> bool {
        std::mem::replace(&mut self.has_entry, true)
    }

    /// True while parsing inside any block.
    pub fn in_block(&self) -> bool {
        !self.scopes.is_empty()
    }

    fn current_table_mut(&mut self) -> &mut SymbolTable {
        match self.scopes.last() {
            Some(block) => &mut self.arena.block_mut(*block).symbol_table,
            None => &mut self.globals,
        }
    }

    /// Declares a variable or parameter in the current scope, reporting a
    /// redeclaration in that same scope. The first entry is kept.
    pub fn declare_variable(&mut self, declarator: &Declarator, kind: SymbolKind) {
        let entry = symbol_entry(declarator, kind);
        if !self.current_table_mut().add(entry) {
            self.error(
                declarator.line,
                ErrorImpl::VariableAlreadyDeclared {
                    variable: declarator.name.clone(),
                },
            );
        }
    }

    /// Declares a function in the global scope.
    pub fn declare_function(&mut self, declarator: &Declarator) {
        let entry = symbol_entry(declarator, SymbolKind::Function);
        if !self.globals.add(entry) {
            self.error(
                declarator.line,
                ErrorImpl::FunctionAlreadyDeclared {
                    function: declarator.name.clone(),
                },
            );
        }
    }

    /// Hands over the tree and everything recorded while building it.
    pub fn finish(self, statements: Vec<StmtId>) -> (Program, Diagnostics) {
        let end_line = self.current_token().line;
        let program = Program::new(self.arena, statements, self.globals, end_line);
        (program, self.diagnostics)
    }
}

fn symbol_entry(declarator: &Declarator, kind: SymbolKind) -> SymbolTableEntry {
    let mut entry = SymbolTableEntry::new(
        declarator.name.clone(),
        declarator.data_type,
        kind,
        declarator.line,
    );
    entry.unresolved = declarator.unresolved;
    entry
}

/// Parses a stream of tokens into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses all statements until EOF. The
/// returned tree has not been linked yet; see `scope::parents`.
pub fn parse(tokens: Vec<Token>) -> (Program, Diagnostics) {
    let mut parser = Parser::new(tokens);
    create_token_lookups(&mut parser);

    let mut body = vec![];

    while parser.has_tokens() {
        if let Some(stmt) = parse_top_level_stmt(&mut parser) {
            body.push(stmt);
        }
    }

    debug!(statements = body.len(), "parsed program");
    parser.finish(body)
}
