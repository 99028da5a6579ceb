//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - Variable declarations and their recovery heuristics
//! - Function declarations
//! - Expressions and operator precedence
//! - Control flow statements
//! - Error recovery on malformed input

use super::parser::{parse, MAX_NESTING};
use crate::{
    ast::{
        ast::{ExprId, Program},
        expressions::{BinaryOp, Expr, PrefixOp},
        statements::Stmt,
        types::DataType,
    },
    errors::errors::Diagnostics,
    lexer::lexer::tokenize,
    symbol_table::symbol_table::SymbolKind,
};

fn parse_source(source: &str) -> (Program, Diagnostics) {
    parse(tokenize(source))
}

fn stmt(program: &Program, index: usize) -> &Stmt {
    &program.arena.stmt(program.statements[index]).stmt
}

fn expr(program: &Program, id: ExprId) -> &Expr {
    &program.arena.expr(id).expr
}

fn expression_stmt(program: &Program, index: usize) -> &Expr {
    match stmt(program, index) {
        Stmt::Expression(id) => expr(program, *id),
        other => panic!("expected expression statement, found {:?}", other),
    }
}

#[test]
fn test_parse_variable_declaration() {
    let (program, diagnostics) = parse_source("let int x = 42;");

    assert!(diagnostics.is_empty());
    assert_eq!(program.statements.len(), 1);

    let Stmt::Let(let_stmt) = stmt(&program, 0) else {
        panic!("expected let statement");
    };
    assert_eq!(let_stmt.name, "x");
    assert_eq!(let_stmt.data_type, DataType::Int);

    let Expr::Assignment { target, value } = expr(&program, let_stmt.assignment) else {
        panic!("expected assignment");
    };
    assert_eq!(
        expr(&program, *target),
        &Expr::Variable {
            name: String::from("x"),
            data_type: DataType::Int
        }
    );
    assert_eq!(expr(&program, *value), &Expr::Integer(42));
    assert!(program.symbol_table.find("x"));
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let (program, diagnostics) = parse_source("1 + 2 * 3;");
    assert!(diagnostics.is_empty());

    let Expr::Binary {
        operator: BinaryOp::Add,
        left,
        right,
    } = expression_stmt(&program, 0)
    else {
        panic!("expected addition at the root");
    };
    assert_eq!(expr(&program, *left), &Expr::Integer(1));
    assert!(matches!(
        expr(&program, *right),
        Expr::Binary {
            operator: BinaryOp::Multiply,
            ..
        }
    ));
}

#[test]
fn test_same_precedence_is_left_associative() {
    let (program, _) = parse_source("1 + 2 + 3;");

    let Expr::Binary { left, right, .. } = expression_stmt(&program, 0) else {
        panic!("expected binary expression");
    };
    assert!(matches!(
        expr(&program, *left),
        Expr::Binary {
            operator: BinaryOp::Add,
            ..
        }
    ));
    assert_eq!(expr(&program, *right), &Expr::Integer(3));
}

#[test]
fn test_comparison_binds_looser_than_arithmetic() {
    let (program, _) = parse_source("x + 1 < y * 2;");

    let Expr::Binary {
        operator: BinaryOp::Less,
        left,
        right,
    } = expression_stmt(&program, 0)
    else {
        panic!("expected comparison at the root");
    };
    assert!(matches!(expr(&program, *left), Expr::Binary { operator: BinaryOp::Add, .. }));
    assert!(matches!(expr(&program, *right), Expr::Binary { operator: BinaryOp::Multiply, .. }));
}

#[test]
fn test_chained_assignment_reports_invalid_target() {
    let (program, diagnostics) = parse_source("a = b = c;");

    assert_eq!(diagnostics.count("InvalidAssignmentTarget"), 1);
    let Expr::Assignment { target, value } = expression_stmt(&program, 0) else {
        panic!("expected assignment");
    };
    assert!(matches!(expr(&program, *target), Expr::Assignment { .. }));
    assert_eq!(
        expr(&program, *value),
        &Expr::Identifier {
            name: String::from("c")
        }
    );
}

#[test]
fn test_assignment_to_literal_is_still_built() {
    let (program, diagnostics) = parse_source("1 = 2;");

    assert_eq!(diagnostics.count("InvalidAssignmentTarget"), 1);
    assert!(matches!(expression_stmt(&program, 0), Expr::Assignment { .. }));
}

#[test]
fn test_prefix_operators() {
    let (program, diagnostics) = parse_source("!done; -x * 2;");
    assert!(diagnostics.is_empty());

    assert!(matches!(
        expression_stmt(&program, 0),
        Expr::Prefix {
            operator: PrefixOp::Not,
            ..
        }
    ));
    let Expr::Binary { left, .. } = expression_stmt(&program, 1) else {
        panic!("expected binary expression");
    };
    assert!(matches!(
        expr(&program, *left),
        Expr::Prefix {
            operator: PrefixOp::Negate,
            ..
        }
    ));
}

#[test]
fn test_grouping_overrides_precedence() {
    let (program, _) = parse_source("(1 + 2) * 3;");

    let Expr::Binary {
        operator: BinaryOp::Multiply,
        left,
        ..
    } = expression_stmt(&program, 0)
    else {
        panic!("expected multiplication at the root");
    };
    assert!(matches!(expr(&program, *left), Expr::Binary { operator: BinaryOp::Add, .. }));
}

#[test]
fn test_parse_call_arguments() {
    let (program, diagnostics) = parse_source("add(1, x + 2);");
    assert!(diagnostics.is_empty());

    let Expr::Call { name, arguments } = expression_stmt(&program, 0) else {
        panic!("expected call");
    };
    assert_eq!(name, "add");
    assert_eq!(arguments.len(), 2);
}

#[test]
fn test_literal_types() {
    let (program, diagnostics) = parse_source("1.5; 'a'; true;");
    assert!(diagnostics.is_empty());

    assert_eq!(expression_stmt(&program, 0), &Expr::Float(1.5));
    assert_eq!(expression_stmt(&program, 1), &Expr::Byte(b'a'));
    assert_eq!(expression_stmt(&program, 2), &Expr::Boolean(true));
}

#[test]
fn test_missing_type_specifier() {
    let (program, diagnostics) = parse_source("let x = 1;");

    assert_eq!(diagnostics.count("MissingTypeSpecifier"), 1);
    let Stmt::Let(let_stmt) = stmt(&program, 0) else {
        panic!("expected let statement");
    };
    assert_eq!(let_stmt.name, "x");
    assert_eq!(let_stmt.data_type, DataType::Void);
}

#[test]
fn test_misspelled_type_specifier() {
    let (program, diagnostics) = parse_source("let itn x = 1;");

    assert_eq!(diagnostics.count("MisspelledTypeSpecifier"), 1);
    assert_eq!(diagnostics.len(), 1);
    let Stmt::Let(let_stmt) = stmt(&program, 0) else {
        panic!("expected let statement");
    };
    assert_eq!(let_stmt.name, "x");
    assert!(program.symbol_table.find("x"));
    assert!(!program.symbol_table.find("itn"));
}

#[test]
fn test_missing_initializer_synthesizes_zero_value() {
    let (program, diagnostics) = parse_source("let int x;");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.count("MissingInitializer"), 1);

    let Stmt::Let(let_stmt) = stmt(&program, 0) else {
        panic!("expected let statement");
    };
    let Expr::Assignment { value, .. } = expr(&program, let_stmt.assignment) else {
        panic!("expected assignment");
    };
    assert_eq!(expr(&program, *value), &Expr::ZeroValue(DataType::Int));
}

#[test]
fn test_unsalvageable_declaration_synchronizes() {
    let (program, diagnostics) = parse_source("let 5 = 1; let int y = 2;");

    assert_eq!(diagnostics.count("UnexpectedTokenDetailed"), 1);
    assert_eq!(program.statements.len(), 1);
    assert!(program.symbol_table.find("y"));
}

#[test]
fn test_missing_semicolon_is_assumed() {
    let (program, diagnostics) = parse_source("let int x = 1\nlet int y = 2;");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.iter().next().unwrap().get_line(), 1);
    assert_eq!(program.statements.len(), 2);
}

#[test]
fn test_redeclaration_in_same_block() {
    let (program, diagnostics) =
        parse_source("entry int main() { let int x = 1; let float x = 2.0; return 0; }");

    assert_eq!(diagnostics.count("VariableAlreadyDeclared"), 1);

    let Stmt::Function(function) = stmt(&program, 0) else {
        panic!("expected function");
    };
    let body = program.arena.block(function.body);
    assert_eq!(body.statements.len(), 3);
    assert_eq!(body.symbol_table.get("x").unwrap().data_type, DataType::Int);
}

#[test]
fn test_shadowing_in_inner_scope_is_allowed() {
    let (_, diagnostics) = parse_source("let int x = 1; entry int main() { let int x = 2; }");

    assert_eq!(diagnostics.count("VariableAlreadyDeclared"), 0);
}

#[test]
fn test_function_declaration() {
    let (program, diagnostics) =
        parse_source("function float scale(float value, int times) { return value; }");
    assert!(diagnostics.is_empty());

    let Stmt::Function(function) = stmt(&program, 0) else {
        panic!("expected function");
    };
    assert!(!function.is_entry);
    assert_eq!(function.prototype.name, "scale");
    assert_eq!(function.prototype.return_type, DataType::Float);
    assert_eq!(function.prototype.parameters.len(), 2);
    assert_eq!(function.prototype.parameters[1].data_type, DataType::Int);

    let global = program.symbol_table.get("scale").unwrap();
    assert_eq!(global.kind, SymbolKind::Function);
    assert_eq!(global.data_type, DataType::Float);

    let body = &program.arena.block(function.body).symbol_table;
    assert_eq!(body.get("value").unwrap().kind, SymbolKind::Parameter);
    assert!(body.find("times"));
}

#[test]
fn test_parameter_with_missing_type() {
    let (program, diagnostics) = parse_source("function int f(int a, b) { return a; }");

    assert_eq!(diagnostics.count("MissingTypeSpecifier"), 1);
    let Stmt::Function(function) = stmt(&program, 0) else {
        panic!("expected function");
    };
    assert_eq!(function.prototype.parameters[1].name, "b");
    assert_eq!(function.prototype.parameters[1].data_type, DataType::Void);
}

#[test]
fn test_multiple_entry_points() {
    let (program, diagnostics) =
        parse_source("entry int a() { return 0; } entry int b() { return 1; }");

    assert_eq!(diagnostics.count("MultipleEntryPoints"), 1);
    assert_eq!(program.statements.len(), 2);
}

#[test]
fn test_duplicate_function() {
    let (_, diagnostics) = parse_source("function int f() { return 0; } function int f() { return 1; }");

    assert_eq!(diagnostics.count("FunctionAlreadyDeclared"), 1);
}

#[test]
fn test_nested_function_is_reported_and_parsed() {
    let (program, diagnostics) =
        parse_source("entry int main() { function int inner() { return 1; } return 0; }");

    assert_eq!(diagnostics.count("NestedFunction"), 1);
    assert!(program.function("inner").is_some());
}

#[test]
fn test_conditional_with_clauses() {
    let (program, diagnostics) =
        parse_source("if a { x = 1; } else if b { x = 2; } else if c { } else { x = 3; }");
    assert!(diagnostics.is_empty());

    let Stmt::Conditional {
        clauses, otherwise, ..
    } = stmt(&program, 0)
    else {
        panic!("expected conditional");
    };
    assert_eq!(clauses.len(), 2);
    assert!(otherwise.is_some());
}

#[test]
fn test_missing_condition_becomes_bool_zero_value() {
    let (program, diagnostics) = parse_source("while { }");

    assert_eq!(diagnostics.len(), 1);
    let Stmt::While { condition, .. } = stmt(&program, 0) else {
        panic!("expected while loop");
    };
    assert_eq!(expr(&program, *condition), &Expr::ZeroValue(DataType::Bool));
}

#[test]
fn test_for_loop_variable_lives_in_body() {
    let (program, diagnostics) =
        parse_source("for (let int i = 0; i < 10; i = i + 1) { let int j = i; }");
    assert!(diagnostics.is_empty());

    let Stmt::For {
        initialization,
        action,
        body,
        ..
    } = stmt(&program, 0)
    else {
        panic!("expected for loop");
    };
    assert!(initialization.is_some());
    assert!(action.is_some());

    let table = &program.arena.block(*body).symbol_table;
    assert!(table.find("i"));
    assert!(table.find("j"));
    assert!(!program.symbol_table.find("i"));
}

#[test]
fn test_for_initializer_must_be_let() {
    let (program, diagnostics) = parse_source("for (i = 0; i < 10; i = i + 1) { }");

    assert_eq!(diagnostics.count("ForInitializerNotLet"), 1);
    assert_eq!(diagnostics.len(), 1);
    let Stmt::For { initialization, .. } = stmt(&program, 0) else {
        panic!("expected for loop");
    };
    assert!(initialization.is_none());
}

#[test]
fn test_return_with_and_without_value() {
    let (program, diagnostics) = parse_source("function void f() { return; } function int g() { return 1; }");
    assert!(diagnostics.is_empty());

    let Stmt::Function(f) = stmt(&program, 0) else {
        panic!("expected function");
    };
    let ret = program.arena.block(f.body).statements[0];
    assert!(matches!(
        program.arena.stmt(ret).stmt,
        Stmt::Return { value: None, .. }
    ));
}

#[test]
fn test_unrecognised_token_in_expression() {
    let (program, diagnostics) = parse_source("let int x = @;");

    assert_eq!(diagnostics.count("UnrecognisedToken"), 1);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(program.statements.len(), 1);
}

#[test]
fn test_top_level_panic_mode_recovers() {
    let (program, diagnostics) = parse_source(") x = 1;");

    assert_eq!(diagnostics.count("UnexpectedToken"), 1);
    assert_eq!(program.statements.len(), 1);
    assert!(matches!(expression_stmt(&program, 0), Expr::Assignment { .. }));
}

#[test]
fn test_garbage_input_terminates() {
    for source in [
        "}}} ) @ let ;;; entry (",
        "function",
        "let int",
        "for (",
        "if x { else } else else",
        "entry int main( { return",
        "f(1, , 2; ((((",
        "x = = = ;",
    ] {
        let (_, diagnostics) = parse_source(source);
        assert!(!diagnostics.is_empty(), "no diagnostics for {:?}", source);
    }
}

#[test]
fn test_parsing_is_deterministic() {
    let source = "function int f(int a) { return a * 2; }\nentry int main() { let int x = f(3); return x; }";

    assert_eq!(parse_source(source), parse_source(source));
}

#[test]
fn test_end_line_is_eof_line() {
    let (program, _) = parse_source("let int x = 1;\n\n");

    assert_eq!(program.end_line, 3);
}

#[test]
fn test_deeply_nested_parentheses_are_cut_off() {
    let source = format!(
        "let int x = {}1{};\nlet int y = 2;",
        "(".repeat(10_000),
        ")".repeat(10_000)
    );
    let (program, diagnostics) = parse_source(&source);

    assert_eq!(diagnostics.count("NestingTooDeep"), 1);
    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
    assert_eq!(program.statements.len(), 2);
    assert!(program.symbol_table.find("y"));
}

#[test]
fn test_deeply_nested_blocks_are_cut_off() {
    let source = format!(
        "entry int main() {{\n{}{}return 0;\n}}",
        "if true {\n".repeat(2_000),
        "}\n".repeat(2_000)
    );
    let (program, diagnostics) = parse_source(&source);

    assert_eq!(diagnostics.count("NestingTooDeep"), 1);
    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);

    let Stmt::Function(main) = stmt(&program, 0) else {
        panic!("expected function");
    };
    assert_eq!(program.arena.block(main.body).statements.len(), 2);
}

#[test]
fn test_long_operator_chain_is_cut_off() {
    let source = format!("let int x = 1{};\nlet int y = 2;", " + 1".repeat(10_000));
    let (program, diagnostics) = parse_source(&source);

    assert_eq!(diagnostics.count("NestingTooDeep"), 1);
    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
    assert!(program.symbol_table.find("y"));

    let binaries = program
        .arena
        .exprs()
        .filter(|(_, node)| matches!(node.expr, Expr::Binary { .. }))
        .count();
    assert!(binaries <= MAX_NESTING);
}

#[test]
fn test_bad_condition_keeps_loop_body() {
    let (program, diagnostics) = parse_source("while ) { let int a = 1; }\nlet int b = 2;");

    assert_eq!(diagnostics.count("UnexpectedToken"), 1);
    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);

    let Stmt::While { condition, body } = stmt(&program, 0) else {
        panic!("expected while loop");
    };
    assert_eq!(expr(&program, *condition), &Expr::ZeroValue(DataType::Bool));
    assert!(program.arena.block(*body).symbol_table.find("a"));
    assert!(!program.symbol_table.find("a"));
    assert!(program.symbol_table.find("b"));
}

#[test]
fn test_stray_paren_in_block_is_skipped() {
    let (program, diagnostics) = parse_source("entry int main() { ) return 0; }");

    assert_eq!(diagnostics.count("UnexpectedToken"), 1);
    assert_eq!(diagnostics.len(), 1);

    let Stmt::Function(main) = stmt(&program, 0) else {
        panic!("expected function");
    };
    let statements = &program.arena.block(main.body).statements;
    assert_eq!(statements.len(), 1);
    assert!(matches!(
        program.arena.stmt(statements[0]).stmt,
        Stmt::Return { .. }
    ));
}

#[test]
fn test_omitted_types_are_flagged_unresolved() {
    let (program, _) = parse_source("function itn f(x, int y) { let z = 1; return y; }");

    let Stmt::Function(f) = stmt(&program, 0) else {
        panic!("expected function");
    };
    assert!(f.prototype.unresolved);
    assert!(f.prototype.parameters[0].unresolved);
    assert!(!f.prototype.parameters[1].unresolved);
    assert!(program.symbol_table.get("f").unwrap().unresolved);

    let table = &program.arena.block(f.body).symbol_table;
    assert!(table.get("x").unwrap().unresolved);
    assert!(table.get("z").unwrap().unresolved);
    assert!(!table.get("y").unwrap().unresolved);

    let (_, target) = program
        .arena
        .exprs()
        .find(|(_, node)| matches!(&node.expr, Expr::Variable { name, .. } if name == "z"))
        .unwrap();
    assert!(target.unresolved);
}
