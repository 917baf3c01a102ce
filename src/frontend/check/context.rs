use crate::common::ast::Ident;
use crate::common::span::Span;
use im::HashMap;

// Built-in I/O routines callable without a declaration
const BUILTINS: [&str; 2] = ["scanf", "printf"];

// Naming context
//
// Persistent: entering a scope or adding a binding yields a new context and
// leaves the old one untouched, so a block's bindings vanish as soon as the
// block has been checked.
#[derive(Clone, Debug, Default)]
pub struct NameContext<'src> {
    // Every variable visible here (name -> declaration site)
    visible: HashMap<&'src str, Span>,

    // Variables declared in the innermost scope only
    innermost: HashMap<&'src str, Span>,

    // Functions declared so far (prototype or definition)
    functions: HashMap<&'src str, Span>,
}

impl<'src> NameContext<'src> {
    pub fn new() -> Self {
        Self::default()
    }

    // Scopes

    pub fn enter_scope(&self) -> Self {
        Self {
            visible: self.visible.clone(),
            innermost: HashMap::new(),
            functions: self.functions.clone(),
        }
    }

    // Variables

    /// Bind `ident` in the innermost scope. On a clash within that scope the
    /// span of the earlier declaration is returned instead.
    pub fn with_variable(&self, ident: &Ident<'src>) -> Result<Self, Span> {
        if let Some(previous) = self.innermost.get(ident.name) {
            return Err(*previous);
        }

        let mut new_ctx = self.clone();
        new_ctx.visible.insert(ident.name, ident.span);
        new_ctx.innermost.insert(ident.name, ident.span);
        Ok(new_ctx)
    }

    pub fn lookup_variable(&self, name: &str) -> Option<Span> {
        self.visible.get(name).copied()
    }

    // Functions

    pub fn with_function(&self, ident: &Ident<'src>) -> Self {
        let mut new_ctx = self.clone();
        new_ctx.functions.entry(ident.name).or_insert(ident.span);
        new_ctx
    }

    pub fn is_callable(&self, name: &str) -> bool {
        BUILTINS.contains(&name) || self.functions.contains_key(name)
    }
}
