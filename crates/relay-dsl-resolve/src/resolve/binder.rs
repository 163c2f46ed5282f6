//! Identifier allocation and scope construction.
//!
//! Two of the three analysis passes live here:
//!
//! - [`assign_ids`] stamps every node with a unique object id, contiguous
//!   from 1 in document order
//! - [`build_scopes`] replays the ENTER/EXIT edge events, opens scopes at
//!   the edges that call for one, binds declarations into the scope that
//!   contains them, and records the active scope on every reference
//!
//! # Scope-opening rule
//!
//! An edge opens a scope if any of:
//! 1. its child node is a scoped kind ([`NodeKind::opens_scope`])
//! 2. it is the body block of a `function`, handler, `template`, or `for`
//! 3. it is a branch block of an `if`
//!
//! Rules 2 and 3 depend on where a block sits, not on any node's own kind,
//! so they are kept as a positional table ([`block_opens_scope`]) separate
//! from the per-kind capability.
//!
//! Binding happens on a node's ENTER event before any scope the node
//! itself opens, so a declaration's name lands in the enclosing scope
//! while everything beneath it lands in the new one.

use relay_dsl_ast::{
    traverse, visit, Ast, AssignOp, AssignTarget, Edge, EdgeChild, Field, NodeId, NodeKind,
    ScopeId,
};
use tracing::{debug, trace};

use crate::error::Diagnostic;
use crate::reporter::Reporter;
use crate::resolve::scope::ScopeTree;

/// Assign every node its object id, in document order.
///
/// Pure aside from the metadata write; no failure modes.
pub fn assign_ids(ast: &mut Ast, reporter: &mut Reporter) {
    let order = visit(ast);
    for id in order {
        let meta = &mut ast.node_mut(id).meta;
        debug_assert!(meta.object_id.is_none(), "object id assigned twice");
        meta.object_id = Some(reporter.reserve_id());
    }
}

/// Build the scope tree rooted at `root` and bind all declarations.
///
/// # Panics
/// Panics if the traversal's ENTER/EXIT events are unbalanced. That is a
/// defect in the traversal contract, not malformed input, so it is an
/// assertion rather than a diagnostic.
pub fn build_scopes(
    ast: &mut Ast,
    scopes: &mut ScopeTree,
    root: ScopeId,
    reporter: &mut Reporter,
) {
    let events = traverse(ast);
    let mut stack = vec![root];

    for edge in events {
        if edge.is_exit {
            if edge_opens_scope(ast, &edge) {
                let closed = stack.pop();
                trace!(scope = ?closed, "closed scope");
                assert!(!stack.is_empty(), "scope stack underflow during traversal");
            }
            continue;
        }

        let current = *stack.last().expect("scope stack empty during traversal");

        if let EdgeChild::Node(id) = edge.child {
            bind_node(ast, scopes, current, id, reporter);
        }

        if edge_opens_scope(ast, &edge) {
            stack.push(scopes.alloc(Some(current)));
        }
    }

    assert_eq!(
        stack,
        vec![root],
        "scope stack unbalanced after traversal"
    );
    debug!(scopes = scopes.len(), "scope construction complete");
}

/// Binding rule, applied once per node on its ENTER event.
fn bind_node(
    ast: &mut Ast,
    scopes: &mut ScopeTree,
    current: ScopeId,
    id: NodeId,
    reporter: &mut Reporter,
) {
    let span = ast.node(id).span;

    match &ast.node(id).kind {
        NodeKind::Assign {
            target: AssignTarget::Name(name),
            op: AssignOp::Assign,
            ..
        } => {
            let name = name.clone();
            scopes.bind(current, &name, id, span, reporter);
        }

        // Tuple targets and augmented operators bind nothing; the value
        // subtree is still traversed normally.
        NodeKind::Assign { .. } => {
            reporter.report(Diagnostic::OnlySimpleAssignments { assign: id, span });
        }

        kind if kind.is_binding_decl() => match kind.name() {
            Some(name) => {
                let name = name.to_string();
                scopes.bind(current, &name, id, span, reporter);
            }
            None => {
                reporter.report(Diagnostic::UnboundAnonymousItem { item: id, span });
            }
        },

        NodeKind::Reference { .. } => {
            ast.node_mut(id).meta.scope = Some(current);
        }

        _ => {}
    }
}

/// Full scope-opening predicate over one edge.
///
/// Deterministic, so the EXIT handler re-evaluates it to decide whether to
/// pop rather than tracking what the ENTER pushed.
fn edge_opens_scope(ast: &Ast, edge: &Edge) -> bool {
    match edge.child {
        EdgeChild::Node(id) => ast.node(id).kind.opens_scope(),
        EdgeChild::Block => {
            let parent = edge.parent.expect("block edge without a parent");
            block_opens_scope(&ast.node(parent).kind, edge.field)
        }
    }
}

/// Positional half of the scope-opening rule: which (parent kind, field)
/// positions isolate their block.
fn block_opens_scope(parent: &NodeKind, field: Field) -> bool {
    match (parent, field) {
        (
            NodeKind::Function(_)
            | NodeKind::Handler(_)
            | NodeKind::Template(_)
            | NodeKind::For { .. },
            Field::Body,
        ) => true,
        (NodeKind::If { .. }, Field::ThenBranch | Field::ElseBranch) => true,
        _ => false,
    }
}
