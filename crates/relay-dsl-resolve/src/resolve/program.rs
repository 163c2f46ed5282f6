//! Analysis entry point and the resulting [`Program`].

use relay_dsl_ast::{Ast, NodeId, ScopeId};
use tracing::debug;

use crate::error::Diagnostic;
use crate::reporter::Reporter;
use crate::resolve::scope::ScopeTree;
use crate::resolve::{binder, names};

/// Fully analyzed program: the annotated tree, the scope tree, and every
/// diagnostic raised along the way.
#[derive(Debug)]
pub struct Program {
    ast: Ast,
    scopes: ScopeTree,
    root: ScopeId,
    diagnostics: Vec<Diagnostic>,
}

/// Run semantic analysis over a parsed tree.
///
/// Passes run in fixed order (identifier allocation, scope construction,
/// reference resolution) and always complete: diagnostics are collected,
/// never raised as control flow.
pub fn analyze(mut ast: Ast) -> Program {
    let mut reporter = Reporter::new();
    let mut scopes = ScopeTree::new();
    let root = scopes.alloc(None);

    binder::assign_ids(&mut ast, &mut reporter);
    binder::build_scopes(&mut ast, &mut scopes, root, &mut reporter);
    names::resolve_references(&mut ast, &scopes);

    debug!(
        nodes = ast.len(),
        scopes = scopes.len(),
        diagnostics = reporter.diagnostics().len(),
        "analysis complete"
    );

    Program {
        ast,
        scopes,
        root,
        diagnostics: reporter.into_diagnostics(),
    }
}

impl Program {
    /// The annotated syntax tree.
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    /// The root (top-level) scope.
    pub fn root_scope(&self) -> ScopeId {
        self.root
    }

    /// Look up a top-level name, with the same ancestor-chain semantics the
    /// resolver uses (from the root there are no ancestors to walk).
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.scopes.lookup(self.root, name)
    }

    /// Diagnostics in the order they were raised.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
