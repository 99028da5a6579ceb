/// AST (Abstract Syntax Tree) module
/// All nodes live in an arena owned by the `Program` and refer to each other
/// through typed ids.
///
/// Submodules:
/// - ast: Ids, the arena and the `Program` root
/// - expressions: Expression kinds and operators
/// - statements: Statement kinds and code blocks
/// - types: The closed set of value types
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
