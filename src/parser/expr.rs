use tracing::trace;

use crate::{
    ast::{
        ast::ExprId,
        expressions::{BinaryOp, Expr, PrefixOp},
        types::DataType,
    },
    errors::errors::ErrorImpl,
    lexer::tokens::{Token, TokenKind},
};

use super::{
    lookups::BindingPower,
    parser::{Parser, MAX_NESTING},
};

/// Parses a full expression, assignment included.
pub fn parse_expr(parser: &mut Parser) -> Option<ExprId> {
    let left = parse_primary(parser)?;
    Some(parse_binary_rhs(parser, BindingPower::Assignment.value(), left))
}

/// Precedence climbing over the infix operators.
///
/// Folds operators binding at least `min_bp` into `left`. When the operator
/// after the right operand binds tighter than the current one, the right
/// side is parsed first with a raised threshold, which makes every level
/// left-associative. A chain whose tree would grow past `MAX_NESTING` is
/// cut off and the rest of it skipped.
pub fn parse_binary_rhs(parser: &mut Parser, min_bp: i32, mut left: ExprId) -> ExprId {
    loop {
        let bp = parser.binding_power(parser.current_token_kind());
        if bp < min_bp {
            return left;
        }

        if parser.expr_depth(left) >= MAX_NESTING {
            parser.too_deep();
            return left;
        }

        let operator = parser.advance();
        let mut right = match parse_primary(parser) {
            Some(right) => right,
            // Only this operator is abandoned
            None => return left,
        };

        if bp < parser.binding_power(parser.current_token_kind()) {
            right = parse_binary_rhs(parser, bp + 1, right);
        }

        let handler = match parser.get_led_lookup().get(&operator.kind).copied() {
            Some(handler) => handler,
            None => return left,
        };
        left = handler(parser, left, operator, right);
    }
}

/// Parses one primary expression through the NUD table.
///
/// A token that cannot start an expression is reported once; parsing then
/// retries on the following tokens but never skips `;`, `{`, `}`, `)` or
/// EOF, which belong to the enclosing construct.
pub fn parse_primary(parser: &mut Parser) -> Option<ExprId> {
    let mut reported = false;

    loop {
        let kind = parser.current_token_kind();
        if let Some(handler) = parser.get_nud_lookup().get(&kind).copied() {
            trace!(token = %kind, "primary expression");
            if !parser.enter_nesting() {
                return None;
            }
            let expr = handler(parser);
            parser.leave_nesting();
            return expr;
        }

        if !reported {
            parser.unexpected_token();
            reported = true;
        }

        if matches!(
            kind,
            TokenKind::Semicolon
                | TokenKind::OpenCurly
                | TokenKind::CloseCurly
                | TokenKind::CloseParen
                | TokenKind::EOF
        ) {
            return None;
        }
        parser.advance();
    }
}

pub fn parse_primary_expr(parser: &mut Parser) -> Option<ExprId> {
    let token = parser.advance();

    let expr = match token.kind {
        TokenKind::Integer => match token.value.parse::<i64>() {
            Ok(value) => Expr::Integer(value),
            Err(_) => {
                parser.error(token.line, ErrorImpl::NumberParseError { token: token.value });
                Expr::ZeroValue(DataType::Int)
            }
        },
        TokenKind::Float => match token.value.parse::<f64>() {
            Ok(value) => Expr::Float(value),
            Err(_) => {
                parser.error(token.line, ErrorImpl::NumberParseError { token: token.value });
                Expr::ZeroValue(DataType::Float)
            }
        },
        TokenKind::Byte => match token.value.chars().next().map(u8::try_from) {
            Some(Ok(value)) => Expr::Byte(value),
            _ => {
                parser.error(token.line, ErrorImpl::NumberParseError { token: token.value });
                Expr::ZeroValue(DataType::Byte)
            }
        },
        TokenKind::True => Expr::Boolean(true),
        TokenKind::False => Expr::Boolean(false),
        _ => {
            parser.error(token.line, ErrorImpl::UnexpectedToken { token: token.value });
            return None;
        }
    };

    Some(parser.push_expr(expr, token.line))
}

/// A bare name, or a call when followed by `(`.
pub fn parse_identifier_expr(parser: &mut Parser) -> Option<ExprId> {
    let name = parser.advance();

    if parser.current_token_kind() != TokenKind::OpenParen {
        return Some(parser.push_expr(Expr::Identifier { name: name.value }, name.line));
    }

    parser.advance();
    let mut arguments = vec![];

    while !matches!(
        parser.current_token_kind(),
        TokenKind::CloseParen | TokenKind::Semicolon | TokenKind::CloseCurly | TokenKind::EOF
    ) {
        match parse_expr(parser) {
            Some(argument) => arguments.push(argument),
            None => break,
        }

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen, "expected `)` after call arguments");

    Some(parser.push_expr(
        Expr::Call {
            name: name.value,
            arguments,
        },
        name.line,
    ))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Option<ExprId> {
    let operator_token = parser.advance();
    let operator = match operator_token.kind {
        TokenKind::Bang => PrefixOp::Not,
        _ => PrefixOp::Negate,
    };

    let operand = parse_primary(parser)?;

    Some(parser.push_expr(Expr::Prefix { operator, operand }, operator_token.line))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Option<ExprId> {
    parser.advance();
    let expr = parse_expr(parser);
    parser.expect(TokenKind::CloseParen, "expected `)` to close the group");

    expr
}

pub fn parse_binary_expr(parser: &mut Parser, left: ExprId, operator: Token, right: ExprId) -> ExprId {
    let Some(op) = BinaryOp::from_token(operator.kind) else {
        return left;
    };

    parser.push_expr(
        Expr::Binary {
            operator: op,
            left,
            right,
        },
        operator.line,
    )
}

/// Only a plain identifier may be assigned to. Anything else is reported,
/// but the node is built regardless.
pub fn parse_assignment_expr(parser: &mut Parser, left: ExprId, operator: Token, right: ExprId) -> ExprId {
    if !matches!(parser.expr(left), Expr::Identifier { .. }) {
        parser.error(operator.line, ErrorImpl::InvalidAssignmentTarget);
    }

    parser.push_expr(
        Expr::Assignment {
            target: left,
            value: right,
        },
        operator.line,
    )
}
