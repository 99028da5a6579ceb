use tracing::trace;

use crate::{
    ast::{
        ast::{BlockId, ExprId, StmtId},
        expressions::Expr,
        statements::{ElseIf, FunctionDecl, LetStmt, Parameter, Prototype, Stmt},
        types::DataType,
    },
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
    symbol_table::symbol_table::SymbolKind,
};

use super::{
    expr::parse_expr,
    parser::Parser,
    types::{parse_declarator, Declarator},
};

/// Dispatches on the current token; anything without a statement handler
/// is parsed as an expression statement.
pub fn parse_stmt(parser: &mut Parser) -> Option<StmtId> {
    let kind = parser.current_token_kind();
    trace!(token = %kind, line = parser.current_token().line, "statement");

    if let Some(handler) = parser.get_stmt_lookup().get(&kind).copied() {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

/// Top-level statements get panic-mode recovery: a token that can neither
/// start a statement nor an expression is reported and skipped, and an
/// expression statement is attempted from the next token.
pub fn parse_top_level_stmt(parser: &mut Parser) -> Option<StmtId> {
    let kind = parser.current_token_kind();
    if parser.get_stmt_lookup().contains_key(&kind) || parser.starts_expression(kind) {
        return parse_stmt(parser);
    }

    parser.unexpected_token();
    parser.advance();

    if parser.starts_expression(parser.current_token_kind()) {
        return parse_expression_stmt(parser);
    }
    None
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Option<StmtId> {
    let line = parser.current_token().line;

    match parse_expr(parser) {
        Some(expr) => {
            parser.expect(TokenKind::Semicolon, "expected `;` after expression");
            Some(parser.push_stmt(Stmt::Expression(expr), line))
        }
        None => {
            // A stray `)` or `{` stops the expression without being consumed
            if matches!(
                parser.current_token_kind(),
                TokenKind::Semicolon | TokenKind::CloseParen | TokenKind::OpenCurly
            ) {
                parser.advance();
            }
            None
        }
    }
}

/// `{ statements }` as a new scope.
pub fn parse_block(parser: &mut Parser) -> BlockId {
    let block = parser.open_block(parser.current_token().line);
    parse_block_body(parser, block);
    parser.close_block();

    block
}

/// Parses `{ statements }` into an already opened block.
pub fn parse_block_body(parser: &mut Parser, block: BlockId) {
    if !parser.enter_nesting() {
        return;
    }

    parser.expect(TokenKind::OpenCurly, "expected `{` to open a block");

    while !matches!(
        parser.current_token_kind(),
        TokenKind::CloseCurly | TokenKind::EOF
    ) {
        if let Some(stmt) = parse_stmt(parser) {
            parser.add_to_block(block, stmt);
        }
    }

    parser.expect(TokenKind::CloseCurly, "expected `}` to close the block");
    parser.leave_nesting();
}

/// Condition of an `if`, `else if` or `while`. A missing one becomes
/// `false` of type bool.
fn parse_condition(parser: &mut Parser) -> ExprId {
    let line = parser.current_token().line;

    if parser.current_token_kind() == TokenKind::OpenCurly {
        parser.error(
            line,
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("expected condition"),
            },
        );
        return parser.push_expr(Expr::ZeroValue(DataType::Bool), line);
    }

    match parse_expr(parser) {
        Some(condition) => condition,
        None => parser.push_expr(Expr::ZeroValue(DataType::Bool), line),
    }
}

pub fn parse_let_stmt(parser: &mut Parser) -> Option<StmtId> {
    let let_token = parser.advance();

    let declarator = match parse_declarator(parser, &[TokenKind::Assignment]) {
        Some(declarator) => declarator,
        None => {
            parser.synchronize();
            return None;
        }
    };

    Some(parse_let_rest(parser, let_token.line, declarator))
}

/// Everything after the declared name: initializer and `;`.
fn parse_let_rest(parser: &mut Parser, line: u32, declarator: Declarator) -> StmtId {
    parser.declare_variable(&declarator, SymbolKind::Variable);

    let Declarator {
        name,
        data_type,
        line: name_line,
        unresolved,
    } = declarator;

    let target = parser.push_expr(
        Expr::Variable {
            name: name.clone(),
            data_type,
        },
        name_line,
    );

    let value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        parse_expr(parser)
    } else {
        parser.error(
            name_line,
            ErrorImpl::MissingInitializer {
                variable: name.clone(),
            },
        );
        None
    };
    let value = match value {
        Some(value) => value,
        None => {
            let zero = parser.push_expr(Expr::ZeroValue(data_type), name_line);
            if unresolved {
                parser.mark_unresolved(zero);
            }
            zero
        }
    };
    if unresolved {
        parser.mark_unresolved(target);
    }

    let assignment = parser.push_expr(Expr::Assignment { target, value }, name_line);

    parser.expect(TokenKind::Semicolon, "expected `;` after declaration");

    parser.push_stmt(
        Stmt::Let(LetStmt {
            name,
            data_type,
            assignment,
        }),
        line,
    )
}

pub fn parse_if_stmt(parser: &mut Parser) -> Option<StmtId> {
    let if_token = parser.advance();

    let condition = parse_condition(parser);
    let consequence = parse_block(parser);

    let mut clauses = vec![];
    let mut otherwise = None;

    while parser.current_token_kind() == TokenKind::Else {
        parser.advance();

        if parser.current_token_kind() == TokenKind::If {
            let line = parser.advance().line;
            let condition = parse_condition(parser);
            let body = parse_block(parser);
            clauses.push(ElseIf {
                condition,
                body,
                line,
            });
        } else {
            otherwise = Some(parse_block(parser));
            break;
        }
    }

    Some(parser.push_stmt(
        Stmt::Conditional {
            condition,
            consequence,
            clauses,
            otherwise,
        },
        if_token.line,
    ))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Option<StmtId> {
    let while_token = parser.advance();

    let condition = parse_condition(parser);
    let body = parse_block(parser);

    Some(parser.push_stmt(Stmt::While { condition, body }, while_token.line))
}

/// `for (let <type> <name> = <expr>; <condition>; <action>) { ... }`
///
/// The body scope is opened before the initializer so the loop variable is
/// declared inside it.
pub fn parse_for_stmt(parser: &mut Parser) -> Option<StmtId> {
    let for_token = parser.advance();

    parser.expect(TokenKind::OpenParen, "expected `(` after `for`");

    let body = parser.open_block(for_token.line);

    // TODO: accept an expression statement here once loops over existing
    // variables are supported.
    let initialization = if parser.current_token_kind() == TokenKind::Let {
        parse_let_stmt(parser)
    } else {
        parser.error(
            parser.current_token().line,
            ErrorImpl::ForInitializerNotLet {
                token: parser.current_token().value.clone(),
            },
        );
        parser.skip_until(&[
            TokenKind::Semicolon,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
        ]);
        if parser.current_token_kind() == TokenKind::Semicolon {
            parser.advance();
        }
        None
    };

    let condition_line = parser.current_token().line;
    let condition = if parser.current_token_kind() == TokenKind::Semicolon {
        parser.error(
            condition_line,
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("expected condition"),
            },
        );
        parser.push_expr(Expr::ZeroValue(DataType::Bool), condition_line)
    } else {
        match parse_expr(parser) {
            Some(condition) => condition,
            None => parser.push_expr(Expr::ZeroValue(DataType::Bool), condition_line),
        }
    };
    parser.expect(TokenKind::Semicolon, "expected `;` after loop condition");

    let action = match parser.current_token_kind() {
        TokenKind::CloseParen | TokenKind::OpenCurly => None,
        _ => parse_expr(parser),
    };
    parser.expect(TokenKind::CloseParen, "expected `)` after loop header");

    parse_block_body(parser, body);
    parser.close_block();

    Some(parser.push_stmt(
        Stmt::For {
            initialization,
            condition,
            action,
            body,
        },
        for_token.line,
    ))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Option<StmtId> {
    let return_token = parser.advance();

    let value = match parser.current_token_kind() {
        TokenKind::Semicolon | TokenKind::CloseCurly => None,
        _ => parse_expr(parser),
    };

    parser.expect(TokenKind::Semicolon, "expected `;` after return");

    Some(parser.push_stmt(
        Stmt::Return {
            value,
            function: None,
        },
        return_token.line,
    ))
}

/// `function <type> <name>(<type> <name>, ...) { ... }`, or `entry` in
/// place of `function` for the entry point.
pub fn parse_function_stmt(parser: &mut Parser) -> Option<StmtId> {
    let keyword = parser.advance();
    let is_entry = keyword.kind == TokenKind::Entry;

    let declarator = match parse_declarator(parser, &[TokenKind::OpenParen]) {
        Some(declarator) => declarator,
        None => {
            parser.synchronize();
            return None;
        }
    };

    if parser.in_block() {
        parser.error(
            keyword.line,
            ErrorImpl::NestedFunction {
                function: declarator.name.clone(),
            },
        );
    }

    if is_entry && parser.mark_entry() {
        parser.error(
            keyword.line,
            ErrorImpl::MultipleEntryPoints {
                function: declarator.name.clone(),
            },
        );
    }

    // Declared before the body so recursive calls resolve
    parser.declare_function(&declarator);

    let body = parser.open_block(keyword.line);

    parser.expect(TokenKind::OpenParen, "expected `(` after function name");

    let mut parameters = vec![];
    while !matches!(
        parser.current_token_kind(),
        TokenKind::CloseParen | TokenKind::OpenCurly | TokenKind::EOF
    ) {
        match parse_declarator(parser, &[TokenKind::Comma, TokenKind::CloseParen]) {
            Some(parameter) => {
                parser.declare_variable(&parameter, SymbolKind::Parameter);
                parameters.push(Parameter {
                    name: parameter.name,
                    data_type: parameter.data_type,
                    line: parameter.line,
                    unresolved: parameter.unresolved,
                });
            }
            None => parser.skip_until(&[
                TokenKind::Comma,
                TokenKind::CloseParen,
                TokenKind::OpenCurly,
            ]),
        }

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen, "expected `)` after parameters");

    parse_block_body(parser, body);
    parser.close_block();

    Some(parser.push_stmt(
        Stmt::Function(FunctionDecl {
            prototype: Prototype {
                name: declarator.name,
                return_type: declarator.data_type,
                parameters,
                unresolved: declarator.unresolved,
            },
            body,
            is_entry,
        }),
        keyword.line,
    ))
}
