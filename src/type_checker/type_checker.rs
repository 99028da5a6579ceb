use tracing::debug;

use crate::{
    ast::{
        ast::{BlockId, ExprId, NodeId, Program, StmtId},
        expressions::Expr,
        statements::Stmt,
        types::DataType,
    },
    errors::errors::{Diagnostics, ErrorImpl},
    scope::{
        lookup::{nearest_scope, scope_lookup},
        parents::assign_parents,
    },
    symbol_table::symbol_table::{SymbolKind, SymbolTableEntry},
};

/// State of one analysis run: the tree being annotated and the sink
/// diagnostics go to.
#[derive(Debug)]
pub struct TypeChecker<'a> {
    pub program: &'a mut Program,
    pub diagnostics: &'a mut Diagnostics,
}

impl<'a> TypeChecker<'a> {
    pub fn new(program: &'a mut Program, diagnostics: &'a mut Diagnostics) -> Self {
        TypeChecker {
            program,
            diagnostics,
        }
    }

    pub fn error(&mut self, line: u32, error: ErrorImpl) {
        self.diagnostics.record(line, error);
    }

    /// Resolves `name` through the scopes enclosing `node` and marks the
    /// entry as used on `line`.
    pub fn fetch_symbol(&mut self, node: ExprId, name: &str, line: u32) -> Option<SymbolTableEntry> {
        let scope = nearest_scope(self.program, NodeId::Expr(node));
        let scope = scope_lookup(self.program, scope, name)?;

        let entry = self.program.table_mut(scope).get_mut(name)?;
        entry.usage_line = Some(line);
        Some(entry.clone())
    }

    /// True if `id` is `Void` because of an error reported earlier.
    pub fn is_unresolved(&self, id: ExprId) -> bool {
        self.program.arena.expr(id).unresolved
    }
}

/// Types `id` and its children, storing the result on the node.
///
/// A node left `Void` by an error that was already reported is flagged
/// unresolved, and mismatches involving it are not reported again. A
/// declared `void` is an ordinary type and mismatches against it are.
pub fn type_check_expr(type_checker: &mut TypeChecker, id: ExprId) -> DataType {
    let node = type_checker.program.arena.expr(id).clone();

    let (data_type, unresolved) = match node.expr {
        Expr::Integer(_) | Expr::Float(_) | Expr::Byte(_) | Expr::Boolean(_) => {
            (node.expr.initial_type(), false)
        }
        Expr::Variable { .. } | Expr::ZeroValue(_) => (node.expr.initial_type(), node.unresolved),
        Expr::Identifier { name } => match type_checker.fetch_symbol(id, &name, node.line) {
            Some(entry) => (entry.data_type, entry.unresolved),
            None => {
                type_checker.error(node.line, ErrorImpl::UnknownIdentifier { identifier: name });
                (DataType::Void, true)
            }
        },
        Expr::Call { name, arguments } => {
            type_check_call(type_checker, id, name, &arguments, node.line)
        }
        Expr::Binary { left, right, .. } => {
            let left_type = type_check_expr(type_checker, left);
            let right_type = type_check_expr(type_checker, right);
            let unresolved = type_checker.is_unresolved(left) || type_checker.is_unresolved(right);

            if unresolved {
                (DataType::Void, true)
            } else if left_type == right_type {
                (left_type, false)
            } else {
                type_checker.error(
                    node.line,
                    ErrorImpl::BinaryTypeMatchError {
                        left: left_type.to_string(),
                        right: right_type.to_string(),
                    },
                );
                (DataType::Void, true)
            }
        }
        Expr::Prefix { operand, .. } => {
            let data_type = type_check_expr(type_checker, operand);
            (data_type, type_checker.is_unresolved(operand))
        }
        Expr::Assignment { target, value } => {
            let received = type_check_expr(type_checker, value);
            let expected = type_check_expr(type_checker, target);
            let unresolved = type_checker.is_unresolved(value) || type_checker.is_unresolved(target);

            if unresolved {
                (DataType::Void, true)
            } else if expected == received {
                (expected, false)
            } else {
                type_checker.error(
                    node.line,
                    ErrorImpl::TypeMatchError {
                        expected: expected.to_string(),
                        received: received.to_string(),
                    },
                );
                (DataType::Void, true)
            }
        }
    };

    let node = type_checker.program.arena.expr_mut(id);
    node.data_type = data_type;
    node.unresolved = unresolved;
    data_type
}

/// A call has the return type of the function it names. Arguments are
/// checked against the prototype of the first function with that name.
fn type_check_call(
    type_checker: &mut TypeChecker,
    id: ExprId,
    name: String,
    arguments: &[ExprId],
    line: u32,
) -> (DataType, bool) {
    let received: Vec<(DataType, bool)> = arguments
        .iter()
        .map(|argument| {
            let data_type = type_check_expr(type_checker, *argument);
            (data_type, type_checker.is_unresolved(*argument))
        })
        .collect();

    let Some(entry) = type_checker.fetch_symbol(id, &name, line) else {
        type_checker.error(line, ErrorImpl::UnknownIdentifier { identifier: name });
        return (DataType::Void, true);
    };

    if entry.kind != SymbolKind::Function {
        type_checker.error(line, ErrorImpl::NotAFunction { identifier: name });
        return (DataType::Void, true);
    }

    let expected: Vec<(DataType, bool)> = match type_checker.program.function(&name) {
        Some((_, function)) => function
            .prototype
            .parameters
            .iter()
            .map(|parameter| (parameter.data_type, parameter.unresolved))
            .collect(),
        None => return (entry.data_type, entry.unresolved),
    };

    if received.len() > expected.len() {
        type_checker.error(
            line,
            ErrorImpl::UnexpectedArguments {
                expected: expected.len(),
                received: received.len(),
            },
        );
    } else if received.len() < expected.len() {
        type_checker.error(
            line,
            ErrorImpl::MissingArguments {
                expected: expected.len(),
                received: received.len(),
            },
        );
    }

    for ((expected, parameter_unresolved), (received, argument_unresolved)) in
        expected.iter().zip(&received)
    {
        if expected != received && !*parameter_unresolved && !*argument_unresolved {
            type_checker.error(
                line,
                ErrorImpl::ArgumentTypeMatchError {
                    expected: expected.to_string(),
                    received: received.to_string(),
                },
            );
        }
    }

    (entry.data_type, entry.unresolved)
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, id: StmtId) {
    let node = type_checker.program.arena.stmt(id).clone();

    match node.stmt {
        Stmt::Expression(expr) => {
            type_check_expr(type_checker, expr);
        }
        Stmt::Let(let_stmt) => {
            type_check_expr(type_checker, let_stmt.assignment);
        }
        Stmt::Return { value, function } => {
            let received = match value {
                Some(value) => type_check_expr(type_checker, value),
                None => DataType::Void,
            };

            let Some(function) = function else {
                type_checker.error(node.line, ErrorImpl::ReturnOutsideFunction);
                return;
            };

            let (expected, expected_unresolved) =
                match &type_checker.program.arena.stmt(function).stmt {
                    Stmt::Function(function) => {
                        (function.prototype.return_type, function.prototype.unresolved)
                    }
                    _ => return,
                };

            let unresolved = expected_unresolved
                || value.is_some_and(|value| type_checker.is_unresolved(value));
            if expected != received && !unresolved {
                type_checker.error(
                    node.line,
                    ErrorImpl::ReturnTypeMatchError {
                        expected: expected.to_string(),
                        received: received.to_string(),
                    },
                );
            }
        }
        Stmt::Conditional {
            condition,
            consequence,
            clauses,
            otherwise,
        } => {
            type_check_expr(type_checker, condition);
            type_check_block(type_checker, consequence);

            for clause in clauses {
                type_check_expr(type_checker, clause.condition);
                type_check_block(type_checker, clause.body);
            }

            if let Some(otherwise) = otherwise {
                type_check_block(type_checker, otherwise);
            }
        }
        Stmt::While { condition, body } => {
            type_check_expr(type_checker, condition);
            type_check_block(type_checker, body);
        }
        Stmt::For {
            initialization,
            condition,
            action,
            body,
        } => {
            if let Some(initialization) = initialization {
                type_check_stmt(type_checker, initialization);
            }
            type_check_expr(type_checker, condition);
            if let Some(action) = action {
                type_check_expr(type_checker, action);
            }
            type_check_block(type_checker, body);
        }
        Stmt::Function(function) => type_check_block(type_checker, function.body),
    }
}

pub fn type_check_block(type_checker: &mut TypeChecker, id: BlockId) {
    let statements = type_checker.program.arena.block(id).statements.clone();

    for stmt in statements {
        type_check_stmt(type_checker, stmt);
    }
}

/// Resolves every name and types every expression of `program`.
///
/// Links the tree first if that has not happened yet. Reports a missing
/// entry point once, at the end-of-input line.
pub fn type_check(program: &mut Program, diagnostics: &mut Diagnostics) {
    if !program.parents_assigned {
        assign_parents(program);
    }

    let before = diagnostics.len();
    let statements = program.statements.clone();
    let mut type_checker = TypeChecker::new(program, diagnostics);

    for stmt in statements {
        type_check_stmt(&mut type_checker, stmt);
    }

    if type_checker.program.entry_point.is_none() {
        let line = type_checker.program.end_line;
        type_checker.error(line, ErrorImpl::NoEntryPoint);
    }

    debug!(errors = diagnostics.len() - before, "type checked program");
}
