//! Lowering context for AST to HIR translation
//!
//! This module provides the symbol table used while generating HIR: a tree
//! of scope frames stored in an arena (each frame knows its parent) and the
//! counters that mint addresses, temporaries and labels.
//!
//! Counters come in two families:
//! - program-wide: globals, labels and the string pool, never reset;
//! - per function: locals, parameters and temporaries, reset by
//!   [`LoweringContext::enter_function`].

use crate::backend::hir::{Address, CodeBuffer, Counter, Instr, Label, StorageKind};
use crate::backend::lower::error::CodegenError;
use crate::common::ast::Ident;
use log::trace;
use std::collections::HashMap;

/// Index of a scope frame in the arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);
}

#[derive(Debug, Default)]
struct Scope {
    parent: Option<ScopeId>,
    bindings: HashMap<String, Address>,
}

/// All counters and pools shared by every scope of one compilation
#[derive(Debug, Default)]
struct Indexer {
    // Program-wide
    globals: Counter,
    labels: Counter,
    strings: Vec<String>,

    // Per function
    locals: Counter,
    params: Counter,
    temps: Counter,
    current_fn: Option<String>,
}

/// Context for lowering the AST to HIR
///
/// One context serves exactly one compilation; create a fresh one per
/// program so that indices always start at zero.
#[derive(Debug)]
pub struct LoweringContext {
    scopes: Vec<Scope>,
    current: ScopeId,
    indexer: Indexer,
}

impl LoweringContext {
    /// Create a context holding only the program (global) scope
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
            current: ScopeId::ROOT,
            indexer: Indexer::default(),
        }
    }

    // ========================================================================
    // Scope management
    // ========================================================================

    pub fn current_scope(&self) -> ScopeId {
        self.current
    }

    /// Open a scope nested in the current one and make it current
    pub fn enter_scope(&mut self) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            parent: Some(self.current),
            bindings: HashMap::new(),
        });
        trace!("enter scope {} (parent {})", id.0, self.current.0);
        self.current = id;
        id
    }

    /// Return to the parent of the current scope
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current.0].parent {
            trace!("exit scope {} (back to {})", self.current.0, parent.0);
            self.current = parent;
        }
    }

    /// Run `f` inside a fresh nested scope, leaving it afterwards even when
    /// `f` fails
    pub fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.enter_scope();
        let result = f(self);
        self.exit_scope();
        result
    }

    // ========================================================================
    // Names
    // ========================================================================

    /// Bind `name` in the current scope to a fresh address of `kind`.
    ///
    /// Shadowing a binding of an enclosing scope is allowed; binding the
    /// same name twice in one scope is not.
    pub fn declare(&mut self, name: &Ident, kind: StorageKind) -> Result<Address, CodegenError> {
        if self.scopes[self.current.0].bindings.contains_key(name.name) {
            return Err(CodegenError::DuplicateDeclaration {
                name: name.name.to_string(),
                span: name.span,
            });
        }

        let index = match kind {
            StorageKind::Global => self.indexer.globals.fresh(),
            StorageKind::Local => self.indexer.locals.fresh(),
            StorageKind::Param => self.indexer.params.fresh(),
        };
        let addr = Address::variable(kind, index, name.name);
        self.scopes[self.current.0]
            .bindings
            .insert(name.name.to_string(), addr.clone());
        Ok(addr)
    }

    /// Resolve `name` from the current scope outward.
    ///
    /// A name bound nowhere yields [`Address::Unresolved`] rather than an
    /// error.
    pub fn lookup(&self, name: &str) -> Address {
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            let frame = &self.scopes[id.0];
            if let Some(addr) = frame.bindings.get(name) {
                return addr.clone();
            }
            scope = frame.parent;
        }
        Address::Unresolved
    }

    // ========================================================================
    // Program-wide allocation
    // ========================================================================

    /// Pool `text`, returning the address of its (first) pool entry
    pub fn intern_string(&mut self, text: &str) -> Address {
        let index = match self.indexer.strings.iter().position(|s| s == text) {
            Some(index) => index,
            None => {
                self.indexer.strings.push(text.to_string());
                self.indexer.strings.len() - 1
            }
        };
        Address::Str(index as u32)
    }

    pub fn new_label(&mut self) -> Label {
        Label(self.indexer.labels.fresh())
    }

    pub fn global_count(&self) -> u32 {
        self.indexer.globals.count()
    }

    pub fn label_count(&self) -> u32 {
        self.indexer.labels.count()
    }

    pub fn strings(&self) -> &[String] {
        &self.indexer.strings
    }

    /// The `str` preamble, one line per pooled literal in pool order
    pub fn string_pool_code(&self) -> CodeBuffer {
        let mut code = CodeBuffer::new();
        for (index, text) in self.indexer.strings.iter().enumerate() {
            code.push(Instr::Str {
                index: index as u32,
                text: text.clone(),
            });
        }
        code
    }

    // ========================================================================
    // Per-function allocation
    // ========================================================================

    /// Reset the per-function counters and record `name` as the function
    /// that `ret`/`retf` refer to
    pub fn enter_function(&mut self, name: &str) {
        self.indexer.locals = Counter::new();
        self.indexer.params = Counter::new();
        self.indexer.temps = Counter::new();
        self.indexer.current_fn = Some(name.to_string());
    }

    /// Name of the function being lowered (empty outside any function)
    pub fn current_function(&self) -> &str {
        self.indexer.current_fn.as_deref().unwrap_or_default()
    }

    pub fn new_temp(&mut self) -> Address {
        Address::Temp(self.indexer.temps.fresh())
    }

    pub fn local_count(&self) -> u32 {
        self.indexer.locals.count()
    }

    pub fn param_count(&self) -> u32 {
        self.indexer.params.count()
    }

    pub fn temp_count(&self) -> u32 {
        self.indexer.temps.count()
    }
}

impl Default for LoweringContext {
    fn default() -> Self {
        Self::new()
    }
}
