use crate::symbol_table::symbol_table::SymbolTable;

use super::{
    expressions::{Expr, ExprNode},
    statements::{CodeBlock, FunctionDecl, Stmt, StmtNode},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StmtId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub usize);

/// Any node that can be the parent of another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    Program,
    Stmt(StmtId),
    Expr(ExprId),
    Block(BlockId),
}

/// A node that owns a symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeId {
    Program,
    Block(BlockId),
}

/// Storage for every statement, expression and block of one unit.
///
/// Ids are only handed out by the `add_*` methods, so lookups by id
/// never miss.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Arena {
    stmts: Vec<StmtNode>,
    exprs: Vec<ExprNode>,
    blocks: Vec<CodeBlock>,
}

impl Arena {
    pub fn new() -> Self {
        Arena::default()
    }

    pub fn add_stmt(&mut self, stmt: Stmt, line: u32) -> StmtId {
        self.stmts.push(StmtNode {
            stmt,
            line,
            parent: None,
        });
        StmtId(self.stmts.len() - 1)
    }

    pub fn add_expr(&mut self, expr: Expr, line: u32) -> ExprId {
        let data_type = expr.initial_type();
        self.exprs.push(ExprNode {
            expr,
            line,
            data_type,
            unresolved: false,
            parent: None,
        });
        ExprId(self.exprs.len() - 1)
    }

    pub fn add_block(&mut self, line: u32) -> BlockId {
        self.blocks.push(CodeBlock::new(line));
        BlockId(self.blocks.len() - 1)
    }

    pub fn stmt(&self, id: StmtId) -> &StmtNode {
        &self.stmts[id.0]
    }

    pub fn stmt_mut(&mut self, id: StmtId) -> &mut StmtNode {
        &mut self.stmts[id.0]
    }

    pub fn expr(&self, id: ExprId) -> &ExprNode {
        &self.exprs[id.0]
    }

    pub fn expr_mut(&mut self, id: ExprId) -> &mut ExprNode {
        &mut self.exprs[id.0]
    }

    pub fn block(&self, id: BlockId) -> &CodeBlock {
        &self.blocks[id.0]
    }

    pub fn block_mut(&mut self, id: BlockId) -> &mut CodeBlock {
        &mut self.blocks[id.0]
    }

    /// Every statement in allocation order, which is source order.
    pub fn stmts(&self) -> impl Iterator<Item = (StmtId, &StmtNode)> {
        self.stmts
            .iter()
            .enumerate()
            .map(|(index, node)| (StmtId(index), node))
    }

    pub fn exprs(&self) -> impl Iterator<Item = (ExprId, &ExprNode)> {
        self.exprs
            .iter()
            .enumerate()
            .map(|(index, node)| (ExprId(index), node))
    }

    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &CodeBlock)> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(index, block)| (BlockId(index), block))
    }
}

/// Root of the tree for one compilation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub arena: Arena,
    pub statements: Vec<StmtId>,
    /// Global scope: top-level variables and every function
    pub symbol_table: SymbolTable,
    /// The first function declared with `entry`
    pub entry_point: Option<StmtId>,
    /// Line of the end-of-input token
    pub end_line: u32,
    pub parents_assigned: bool,
}

impl Program {
    pub fn new(arena: Arena, statements: Vec<StmtId>, symbol_table: SymbolTable, end_line: u32) -> Self {
        Program {
            arena,
            statements,
            symbol_table,
            entry_point: None,
            end_line,
            parents_assigned: false,
        }
    }

    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        match node {
            NodeId::Program => None,
            NodeId::Stmt(id) => self.arena.stmt(id).parent,
            NodeId::Expr(id) => self.arena.expr(id).parent,
            NodeId::Block(id) => self.arena.block(id).parent,
        }
    }

    pub fn table(&self, scope: ScopeId) -> &SymbolTable {
        match scope {
            ScopeId::Program => &self.symbol_table,
            ScopeId::Block(id) => &self.arena.block(id).symbol_table,
        }
    }

    pub fn table_mut(&mut self, scope: ScopeId) -> &mut SymbolTable {
        match scope {
            ScopeId::Program => &mut self.symbol_table,
            ScopeId::Block(id) => &mut self.arena.block_mut(id).symbol_table,
        }
    }

    /// The first function declared as `name`, wherever it was defined.
    pub fn function(&self, name: &str) -> Option<(StmtId, &FunctionDecl)> {
        self.arena.stmts().find_map(|(id, node)| match &node.stmt {
            Stmt::Function(function) if function.prototype.name == name => Some((id, function)),
            _ => None,
        })
    }

    /// Function declaration behind `entry_point`.
    pub fn entry_function(&self) -> Option<&FunctionDecl> {
        let id = self.entry_point?;
        match &self.arena.stmt(id).stmt {
            Stmt::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Writes every scope's symbol table, globals first.
    pub fn dump_symbol_tables(&self, out: &mut impl std::fmt::Write) -> std::fmt::Result {
        writeln!(out, "global:")?;
        write!(out, "{}", self.symbol_table)?;
        for (id, block) in self.arena.blocks() {
            writeln!(out, "block {} (line {}):", id.0, block.line)?;
            write!(out, "{}", block.symbol_table)?;
        }
        Ok(())
    }
}
