//! Per-scope symbol tables.
//!
//! One table exists for the global Program scope and one for every code
//! block. Tables are filled by the parser while their scope is open and
//! consulted by name resolution afterwards.

pub mod symbol_table;
