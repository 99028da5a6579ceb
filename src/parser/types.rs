//! Type specifier parsing.
//!
//! Declarations, function headers and parameters all start with a
//! `<type> <name>` pair. This module parses that pair and salvages the two
//! common mistakes:
//!
//! - the type was left out (`let x = 1;`)
//! - the type was misspelled (`let itn x = 1;`)
//!
//! Both are reported and the name is still declared, with type `void`.

use crate::{
    ast::types::DataType,
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// A parsed `<type> <name>` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub name: String,
    pub data_type: DataType,
    pub line: u32,
    /// `data_type` is a stand-in for a missing or misspelled specifier
    pub unresolved: bool,
}

/// Parses a type specifier followed by a name.
///
/// `follow` lists the tokens allowed right after the name; it is how an
/// omitted type is told apart from a misspelled one. Returns `None`, having
/// recorded an error and consumed nothing, if neither heuristic applies.
pub fn parse_declarator(parser: &mut Parser, follow: &[TokenKind]) -> Option<Declarator> {
    let current = parser.current_token().clone();
    let next = parser.peek_token().clone();

    if current.is_type_specifier() && next.kind == TokenKind::Identifier {
        parser.advance();
        parser.advance();
        return Some(Declarator {
            name: next.value,
            data_type: DataType::from_token(current.kind).unwrap_or(DataType::Void),
            line: next.line,
            unresolved: false,
        });
    }

    if current.kind == TokenKind::Identifier && follow.contains(&next.kind) {
        parser.advance();
        parser.error(
            current.line,
            ErrorImpl::MissingTypeSpecifier {
                name: current.value.clone(),
            },
        );
        return Some(Declarator {
            name: current.value,
            data_type: DataType::Void,
            line: current.line,
            unresolved: true,
        });
    }

    if current.kind == TokenKind::Identifier && next.kind == TokenKind::Identifier {
        parser.advance();
        parser.advance();
        parser.error(
            current.line,
            ErrorImpl::MisspelledTypeSpecifier {
                token: current.value,
            },
        );
        return Some(Declarator {
            name: next.value,
            data_type: DataType::Void,
            line: next.line,
            unresolved: true,
        });
    }

    let message = if current.is_type_specifier() {
        "expected identifier after type specifier"
    } else {
        "expected type specifier"
    };
    parser.error(
        current.line,
        ErrorImpl::UnexpectedTokenDetailed {
            token: current.value,
            message: String::from(message),
        },
    );
    None
}
