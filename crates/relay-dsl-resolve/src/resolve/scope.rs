//! Lexical scope tree.
//!
//! Scopes live in a single arena owned by the analysis result and are
//! addressed by [`ScopeId`] handles; a scope holds `NodeId` handles to the
//! declarations bound in it. Handles in both directions keep the
//! node↔scope graph free of ownership cycles, and they stay valid for the
//! whole run; the resolver dereferences scopes long after the builder's
//! traversal window over them has closed.

use indexmap::IndexMap;
use relay_dsl_ast::{NodeId, ScopeId, Span};
use tracing::trace;

use crate::error::Diagnostic;
use crate::reporter::Reporter;

/// One node of the scope tree: name→declaration bindings plus the parent
/// link used for ancestor lookup.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    parent: Option<ScopeId>,
    bindings: IndexMap<String, NodeId>,
}

impl Scope {
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Bindings in insertion order.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.bindings.iter().map(|(name, &node)| (name.as_str(), node))
    }

    /// Binding in this scope only (no ancestor walk).
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.bindings.get(name).copied()
    }
}

/// Arena holding every scope of an analysis run.
#[derive(Debug, Clone, Default)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a scope under `parent` (None only for the root).
    pub fn alloc(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId::new(self.scopes.len());
        self.scopes.push(Scope {
            parent,
            bindings: IndexMap::new(),
        });
        trace!(scope = ?id, ?parent, "allocated scope");
        id
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    /// Bind `name` to a declaration in `scope`.
    ///
    /// A second definition of the same name in the same scope overwrites
    /// the first (last write wins) and raises one `DuplicateDefinitions`
    /// diagnostic carrying both declarations.
    pub fn bind(
        &mut self,
        scope: ScopeId,
        name: &str,
        node: NodeId,
        span: Span,
        reporter: &mut Reporter,
    ) {
        let bindings = &mut self.scopes[scope.index()].bindings;

        if let Some(&previous) = bindings.get(name) {
            reporter.report(Diagnostic::DuplicateDefinitions {
                name: name.to_string(),
                previous,
                next: node,
                span,
            });
        }

        trace!(?scope, name, ?node, "bound name");
        bindings.insert(name.to_string(), node);
    }

    /// Ancestor-chain lookup: the nearest scope defining `name` wins.
    ///
    /// Iterative over the parent handles, so deeply nested programs cannot
    /// exhaust the call stack. Never mutates the tree.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<NodeId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.index()];
            if let Some(node) = scope.get(name) {
                return Some(node);
            }
            current = scope.parent;
        }
        None
    }

    /// Number of scopes allocated so far.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
