use tracing::debug;

use crate::ast::{
    ast::{BlockId, ExprId, NodeId, Program, StmtId},
    statements::Stmt,
};

use super::lookup::nearest_scope;

/// Links every node of `program` to its lexically enclosing node.
///
/// Also fills in each block's enclosing scope, the owning function of every
/// `return` and the program's entry point. Running it again recomputes the
/// same links.
pub fn assign_parents(program: &mut Program) {
    program.entry_point = None;

    let statements = program.statements.clone();
    for stmt in statements {
        link_stmt(program, stmt, NodeId::Program);
    }

    program.parents_assigned = true;
    debug!(entry_point = ?program.entry_point, "assigned parents");
}

fn link_stmt(program: &mut Program, id: StmtId, parent: NodeId) {
    program.arena.stmt_mut(id).parent = Some(parent);

    let owner = NodeId::Stmt(id);
    let stmt = program.arena.stmt(id).stmt.clone();
    match stmt {
        Stmt::Expression(expr) => link_expr(program, expr, owner),
        Stmt::Let(let_stmt) => link_expr(program, let_stmt.assignment, owner),
        Stmt::Return { value, .. } => {
            if let Some(value) = value {
                link_expr(program, value, owner);
            }

            let function = owning_function(program, id);
            if let Stmt::Return { function: slot, .. } = &mut program.arena.stmt_mut(id).stmt {
                *slot = function;
            }
        }
        Stmt::Conditional {
            condition,
            consequence,
            clauses,
            otherwise,
        } => {
            link_expr(program, condition, owner);
            link_block(program, consequence, owner);
            for clause in clauses {
                link_expr(program, clause.condition, owner);
                link_block(program, clause.body, owner);
            }
            if let Some(otherwise) = otherwise {
                link_block(program, otherwise, owner);
            }
        }
        Stmt::While { condition, body } => {
            link_expr(program, condition, owner);
            link_block(program, body, owner);
        }
        Stmt::For {
            initialization,
            condition,
            action,
            body,
        } => {
            // The initializer's value is evaluated outside the loop scope
            if let Some(initialization) = initialization {
                link_stmt(program, initialization, owner);
            }
            link_block(program, body, owner);

            // Condition and action see the loop variable
            link_expr(program, condition, NodeId::Block(body));
            if let Some(action) = action {
                link_expr(program, action, NodeId::Block(body));
            }
        }
        Stmt::Function(function) => {
            if function.is_entry && program.entry_point.is_none() {
                program.entry_point = Some(id);
            }
            link_block(program, function.body, owner);
        }
    }
}

fn link_block(program: &mut Program, id: BlockId, parent: NodeId) {
    let enclosing = nearest_scope(program, parent);

    let block = program.arena.block_mut(id);
    block.parent = Some(parent);
    block.enclosing_scope = Some(enclosing);

    let statements = block.statements.clone();
    for stmt in statements {
        link_stmt(program, stmt, NodeId::Block(id));
    }
}

fn link_expr(program: &mut Program, id: ExprId, parent: NodeId) {
    program.arena.expr_mut(id).parent = Some(parent);

    let children = program.arena.expr(id).expr.children();
    for child in children {
        link_expr(program, child, NodeId::Expr(id));
    }
}

/// Walks up from a `return` to the first enclosing function statement.
fn owning_function(program: &Program, id: StmtId) -> Option<StmtId> {
    let mut current = program.parent_of(NodeId::Stmt(id));

    while let Some(node) = current {
        if let NodeId::Stmt(stmt) = node {
            if let Stmt::Function(_) = program.arena.stmt(stmt).stmt {
                return Some(stmt);
            }
        }
        current = program.parent_of(node);
    }

    None
}
