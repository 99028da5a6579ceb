use crate::symbol_table::symbol_table::SymbolTable;

use super::{
    ast::{BlockId, ExprId, NodeId, ScopeId, StmtId},
    types::DataType,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub data_type: DataType,
    pub line: u32,
    /// The type specifier was missing or misspelled
    pub unresolved: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub name: String,
    pub return_type: DataType,
    pub parameters: Vec<Parameter>,
    /// The return type specifier was missing or misspelled
    pub unresolved: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub prototype: Prototype,
    /// Parameters are declared in this block's table
    pub body: BlockId,
    pub is_entry: bool,
}

/// `let <type> <name> = <value>;`
///
/// `assignment` is always an `Expr::Assignment` whose target is the
/// `Expr::Variable` being declared.
#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub name: String,
    pub data_type: DataType,
    pub assignment: ExprId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseIf {
    pub condition: ExprId,
    pub body: BlockId,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(ExprId),
    Let(LetStmt),
    Return {
        value: Option<ExprId>,
        /// Owning function, filled in by the parent pass
        function: Option<StmtId>,
    },
    Conditional {
        condition: ExprId,
        consequence: BlockId,
        clauses: Vec<ElseIf>,
        otherwise: Option<BlockId>,
    },
    While {
        condition: ExprId,
        body: BlockId,
    },
    For {
        /// A `Let` statement; `None` only when recovery dropped it
        initialization: Option<StmtId>,
        condition: ExprId,
        action: Option<ExprId>,
        body: BlockId,
    },
    Function(FunctionDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StmtNode {
    pub stmt: Stmt,
    pub line: u32,
    pub parent: Option<NodeId>,
}

/// A braced statement list with its own scope.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub statements: Vec<StmtId>,
    pub symbol_table: SymbolTable,
    pub line: u32,
    pub parent: Option<NodeId>,
    pub enclosing_scope: Option<ScopeId>,
}

impl CodeBlock {
    pub fn new(line: u32) -> Self {
        CodeBlock {
            statements: vec![],
            symbol_table: SymbolTable::new(),
            line,
            parent: None,
            enclosing_scope: None,
        }
    }
}
