use crate::lexer::tokens::TokenKind;

use super::{
    ast::{ExprId, NodeId},
    types::DataType,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Dash => Some(BinaryOp::Subtract),
            TokenKind::Star => Some(BinaryOp::Multiply),
            TokenKind::Slash => Some(BinaryOp::Divide),
            TokenKind::Equals => Some(BinaryOp::Equal),
            TokenKind::NotEquals => Some(BinaryOp::NotEqual),
            TokenKind::Less => Some(BinaryOp::Less),
            TokenKind::LessEquals => Some(BinaryOp::LessEqual),
            TokenKind::Greater => Some(BinaryOp::Greater),
            TokenKind::GreaterEquals => Some(BinaryOp::GreaterEqual),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Not,
    Negate,
}

/// Every expression kind. Children are arena ids owned by this node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Integer(i64),
    Float(f64),
    Byte(u8),
    Boolean(bool),
    /// A name resolved through the scope chain during analysis
    Identifier { name: String },
    Call { name: String, arguments: Vec<ExprId> },
    /// The variable a `let` declares; its type is the declared one
    Variable { name: String, data_type: DataType },
    Binary { operator: BinaryOp, left: ExprId, right: ExprId },
    Prefix { operator: PrefixOp, operand: ExprId },
    Assignment { target: ExprId, value: ExprId },
    /// Stand-in for a value the source left out
    ZeroValue(DataType),
}

impl Expr {
    /// Child expressions in source order.
    pub fn children(&self) -> Vec<ExprId> {
        match self {
            Expr::Call { arguments, .. } => arguments.clone(),
            Expr::Binary { left, right, .. } => vec![*left, *right],
            Expr::Prefix { operand, .. } => vec![*operand],
            Expr::Assignment { target, value } => vec![*target, *value],
            Expr::Integer(_)
            | Expr::Float(_)
            | Expr::Byte(_)
            | Expr::Boolean(_)
            | Expr::Identifier { .. }
            | Expr::Variable { .. }
            | Expr::ZeroValue(_) => vec![],
        }
    }

    /// The type an expression has before analysis runs.
    ///
    /// Literals and declared variables carry a fixed type; everything else
    /// starts out `Void` and is resolved by the type checker.
    pub fn initial_type(&self) -> DataType {
        match self {
            Expr::Integer(_) => DataType::Int,
            Expr::Float(_) => DataType::Float,
            Expr::Byte(_) => DataType::Byte,
            Expr::Boolean(_) => DataType::Bool,
            Expr::Variable { data_type, .. } => *data_type,
            Expr::ZeroValue(data_type) => *data_type,
            Expr::Identifier { .. }
            | Expr::Call { .. }
            | Expr::Binary { .. }
            | Expr::Prefix { .. }
            | Expr::Assignment { .. } => DataType::Void,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprNode {
    pub expr: Expr,
    pub line: u32,
    pub data_type: DataType,
    /// Set when `data_type` is `Void` because of an error already reported,
    /// such as an unknown name or a missing type specifier. Mismatches
    /// against such a node are not reported again.
    pub unresolved: bool,
    pub parent: Option<NodeId>,
}
