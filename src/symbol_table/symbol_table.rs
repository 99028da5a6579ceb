use std::{collections::HashMap, fmt::Display};

use crate::ast::types::DataType;

/// What a symbol names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Parameter,
    Function,
}

/// Information about one identifier declared in a scope.
///
/// Everything except `usage_line` is fixed once the entry is created.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolTableEntry {
    pub name: String,
    /// Stored type for variables, return type for functions
    pub data_type: DataType,
    pub kind: SymbolKind,
    /// Size in bits, not bytes
    pub size: u32,
    /// Reserved for arrays, always 0
    pub dimensions: u32,
    pub decl_line: u32,
    /// Last line the name was resolved at
    pub usage_line: Option<u32>,
    /// Reserved for code generation
    pub mem_addr: u64,
    /// Declared without a usable type specifier
    pub unresolved: bool,
}

impl SymbolTableEntry {
    pub fn new(name: String, data_type: DataType, kind: SymbolKind, decl_line: u32) -> Self {
        SymbolTableEntry {
            name,
            data_type,
            kind,
            size: data_type.size_in_bits(),
            dimensions: 0,
            decl_line,
            usage_line: None,
            mem_addr: 0,
            unresolved: false,
        }
    }
}

impl Display for SymbolTableEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[\"{}\"] type: [{}] size: {}bits dimensions: {} decl-line: {}",
            self.name, self.data_type, self.size, self.dimensions, self.decl_line
        )
    }
}

/// Name to entry mapping for one lexical scope.
///
/// Append-only: an existing entry is never replaced or removed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SymbolTable {
    elements: HashMap<String, SymbolTableEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            elements: HashMap::new(),
        }
    }

    /// Returns true if `name` is declared in this table.
    pub fn find(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    /// Inserts `entry` by name. Returns false, leaving the table unchanged,
    /// if the name is already present.
    pub fn add(&mut self, entry: SymbolTableEntry) -> bool {
        if self.find(&entry.name) {
            return false;
        }

        self.elements.insert(entry.name.clone(), entry);
        true
    }

    pub fn get(&self, name: &str) -> Option<&SymbolTableEntry> {
        self.elements.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SymbolTableEntry> {
        self.elements.get_mut(name)
    }

    /// Entries sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &SymbolTableEntry> {
        let mut entries: Vec<&SymbolTableEntry> = self.elements.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Display for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for entry in self.iter() {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}
