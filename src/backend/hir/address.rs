//! Addresses and labels
//!
//! Every operand in HIR is an [`Address`]. The leading character of its
//! textual form is a tag naming the storage class:
//!
//! | Tag | Meaning | Numbering |
//! |-----|---------|-----------|
//! | `$` | global variable | whole program |
//! | `@` | local variable | per function |
//! | `%` | parameter | per function |
//! | `&` | temporary | per function |
//! | `?` | pooled string literal | whole program |
//! | `~` | label | whole program |
//!
//! Variables also carry their source name (`$0_x`), integer constants are
//! written as-is and an identifier that resolved nowhere renders as
//! `unknown`.

use std::fmt;

/// Storage class requested when a name is declared
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageKind {
    Global,
    Local,
    Param,
}

/// Operand of an HIR instruction
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Address {
    Global { index: u32, name: String },
    Local { index: u32, name: String },
    Param { index: u32, name: String },
    Temp(u32),
    Str(u32),
    Const(i64),
    /// Lookup found no binding in any enclosing scope
    Unresolved,
}

impl Address {
    pub fn variable(kind: StorageKind, index: u32, name: &str) -> Self {
        let name = name.to_string();
        match kind {
            StorageKind::Global => Address::Global { index, name },
            StorageKind::Local => Address::Local { index, name },
            StorageKind::Param => Address::Param { index, name },
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Address::Global { index, name } => write!(f, "${index}_{name}"),
            Address::Local { index, name } => write!(f, "@{index}_{name}"),
            Address::Param { index, name } => write!(f, "%{index}_{name}"),
            Address::Temp(index) => write!(f, "&{index}"),
            Address::Str(index) => write!(f, "?{index}"),
            Address::Const(value) => write!(f, "{value}"),
            Address::Unresolved => write!(f, "unknown"),
        }
    }
}

/// Control-flow label, unique across the whole program
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub u32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "~{}", self.0)
    }
}

/// Monotonic index source for one address family
#[derive(Debug, Default, Clone)]
pub struct Counter {
    next: u32,
}

impl Counter {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn fresh(&mut self) -> u32 {
        let index = self.next;
        self.next += 1;
        index
    }

    /// Number of indices handed out so far
    pub fn count(&self) -> u32 {
        self.next
    }
}
