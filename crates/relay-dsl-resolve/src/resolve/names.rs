//! Reference resolution pass.
//!
//! Independent second walk over every node: each reference's name is looked
//! up from the scope recorded on it during scope construction, following
//! parent links until a binding is found or the root is exhausted.
//! Resolution is total: afterwards every reference carries either the
//! declaration it denotes or an explicit [`Resolution::Unresolved`].
//! Scopes are never mutated here.

use relay_dsl_ast::{visit, Ast, NodeKind, Resolution};
use tracing::{debug, trace};

use crate::resolve::scope::ScopeTree;

/// Resolve every reference in the tree against the scope tree.
///
/// # Panics
/// Panics if a reference was never assigned a scope; the scope builder
/// guarantees it records one for every reference before this pass runs.
pub fn resolve_references(ast: &mut Ast, scopes: &ScopeTree) {
    let order = visit(ast);
    let mut resolved = 0usize;
    let mut unresolved = 0usize;

    for id in order {
        let node = ast.node(id);
        let NodeKind::Reference { name } = &node.kind else {
            continue;
        };
        let name = name.clone();
        let scope = node
            .meta
            .scope
            .expect("reference has no recorded scope; scope builder must run first");

        let resolution = match scopes.lookup(scope, &name) {
            Some(declaration) => {
                resolved += 1;
                Resolution::Declaration(declaration)
            }
            None => {
                unresolved += 1;
                Resolution::Unresolved
            }
        };

        trace!(?id, name, ?resolution, "resolved reference");
        ast.node_mut(id).meta.resolution = Some(resolution);
    }

    debug!(resolved, unresolved, "reference resolution complete");
}
