use crate::{
    ast::ast::{NodeId, Program, ScopeId},
    symbol_table::symbol_table::SymbolTableEntry,
};

/// The scope `node` belongs to: the node itself if it is a block or the
/// program, otherwise the nearest one above it.
pub fn nearest_scope(program: &Program, node: NodeId) -> ScopeId {
    let mut current = Some(node);

    while let Some(node) = current {
        match node {
            NodeId::Program => return ScopeId::Program,
            NodeId::Block(block) => return ScopeId::Block(block),
            NodeId::Stmt(_) | NodeId::Expr(_) => current = program.parent_of(node),
        }
    }

    ScopeId::Program
}

/// Finds the scope declaring `name`, starting at `scope` and following each
/// block's enclosing scope outwards. The global table is checked last.
pub fn scope_lookup(program: &Program, scope: ScopeId, name: &str) -> Option<ScopeId> {
    let mut scope = scope;

    loop {
        if program.table(scope).find(name) {
            return Some(scope);
        }

        scope = match scope {
            ScopeId::Program => return None,
            ScopeId::Block(block) => program
                .arena
                .block(block)
                .enclosing_scope
                .unwrap_or(ScopeId::Program),
        };
    }
}

/// Resolves `name` as seen from `node`.
pub fn resolve<'a>(program: &'a Program, node: NodeId, name: &str) -> Option<&'a SymbolTableEntry> {
    let scope = scope_lookup(program, nearest_scope(program, node), name)?;
    program.table(scope).get(name)
}
