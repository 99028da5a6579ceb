use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

/// The closed set of value types.
///
/// `Void` is both the type of functions returning nothing and the
/// "unresolved" type given to names and expressions that failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Bool,
    Int,
    Float,
    Byte,
    String,
    Void,
}

impl DataType {
    /// Maps a type specifier keyword to its type.
    pub fn from_token(kind: TokenKind) -> Option<DataType> {
        match kind {
            TokenKind::TypeBool => Some(DataType::Bool),
            TokenKind::TypeInt => Some(DataType::Int),
            TokenKind::TypeFloat => Some(DataType::Float),
            TokenKind::TypeByte => Some(DataType::Byte),
            TokenKind::TypeString => Some(DataType::String),
            TokenKind::TypeVoid => Some(DataType::Void),
            _ => None,
        }
    }

    pub fn size_in_bits(self) -> u32 {
        match self {
            DataType::Int | DataType::Float | DataType::String => 64,
            DataType::Byte | DataType::Bool => 8,
            DataType::Void => 0,
        }
    }

    pub fn is_void(self) -> bool {
        self == DataType::Void
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DataType::Bool => "bool",
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Byte => "byte",
            DataType::String => "string",
            DataType::Void => "void",
        };
        write!(f, "{}", name)
    }
}
