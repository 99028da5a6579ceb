//! Tree linking and name resolution.
//!
//! After parsing, `parents::assign_parents` points every node at its
//! enclosing node. `lookup` then walks those links to resolve a name
//! through the chain of enclosing scopes, innermost first and the global
//! table last.

pub mod lookup;
pub mod parents;
