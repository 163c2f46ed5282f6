//! Tree traversal protocol.
//!
//! Two walks over the [`Ast`], shared by all analysis passes:
//!
//! - [`visit`] - every node exactly once, in document pre-order
//! - [`traverse`] - every parent→child structural edge as an ENTER/EXIT
//!   event pair, tagged with the field linking them
//!
//! Both return owned event lists (the events carry only handles), so a pass
//! can replay them while mutating node metadata.
//!
//! # Edges
//!
//! Scalar node fields (an assignment's value, an `if` condition) produce a
//! [`EdgeChild::Node`] edge. Block-valued fields (bodies, branches) produce
//! one [`EdgeChild::Block`] edge wrapping a node edge per element; the
//! element edges carry the same parent and field as their block. Scope
//! construction keys off this distinction: kind-based opening looks at node
//! edges, positional opening at block edges.

use super::node::{Ast, NodeId, NodeKind};

/// Structural position of a child under its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Top-level declaration (no parent).
    Root,
    /// Assignment value.
    Value,
    /// `if` condition.
    Condition,
    /// Handler `every` rate expression.
    Rate,
    /// `for` iterable.
    Iterable,
    /// Declaration, handler, block, or `for` body.
    Body,
    /// `if` then-branch.
    ThenBranch,
    /// `if` else-branch.
    ElseBranch,
}

/// What sits at the child end of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeChild {
    Node(NodeId),
    /// A block-valued field; its elements follow as their own node edges.
    Block,
}

/// One ENTER or EXIT occurrence of a structural edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub parent: Option<NodeId>,
    pub field: Field,
    pub child: EdgeChild,
    /// false for the ENTER event, true for the matching EXIT after all of
    /// the child's descendants have been visited.
    pub is_exit: bool,
}

/// Every node exactly once, in document pre-order.
pub fn visit(ast: &Ast) -> Vec<NodeId> {
    let mut order = Vec::with_capacity(ast.len());
    for &root in ast.roots() {
        visit_node(ast, root, &mut order);
    }
    order
}

fn visit_node(ast: &Ast, id: NodeId, order: &mut Vec<NodeId>) {
    order.push(id);

    match &ast.node(id).kind {
        NodeKind::Assign { value, .. } => {
            visit_node(ast, *value, order);
        }

        NodeKind::Class(decl)
        | NodeKind::Function(decl)
        | NodeKind::Graph(decl)
        | NodeKind::Node(decl)
        | NodeKind::Template(decl) => {
            if let Some(body) = &decl.body {
                for &item in body {
                    visit_node(ast, item, order);
                }
            }
        }

        NodeKind::Handler(handler) => {
            if let Some(rate) = handler.rate {
                visit_node(ast, rate, order);
            }
            for &item in &handler.body {
                visit_node(ast, item, order);
            }
        }

        NodeKind::Config(block) | NodeKind::Globals(block) | NodeKind::State(block) => {
            for &item in &block.body {
                visit_node(ast, item, order);
            }
        }

        NodeKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            visit_node(ast, *condition, order);
            for &item in then_branch {
                visit_node(ast, item, order);
            }
            if let Some(else_branch) = else_branch {
                for &item in else_branch {
                    visit_node(ast, item, order);
                }
            }
        }

        NodeKind::For { iterable, body } => {
            visit_node(ast, *iterable, order);
            for &item in body {
                visit_node(ast, item, order);
            }
        }

        NodeKind::Reference { .. } | NodeKind::Literal(_) => {}
    }
}

/// ENTER/EXIT structural-edge events for the whole tree, in document order.
pub fn traverse(ast: &Ast) -> Vec<Edge> {
    let mut events = Vec::new();
    for &root in ast.roots() {
        traverse_node(ast, None, Field::Root, root, &mut events);
    }
    events
}

fn traverse_node(
    ast: &Ast,
    parent: Option<NodeId>,
    field: Field,
    id: NodeId,
    events: &mut Vec<Edge>,
) {
    events.push(Edge {
        parent,
        field,
        child: EdgeChild::Node(id),
        is_exit: false,
    });

    match &ast.node(id).kind {
        NodeKind::Assign { value, .. } => {
            traverse_node(ast, Some(id), Field::Value, *value, events);
        }

        NodeKind::Class(decl)
        | NodeKind::Function(decl)
        | NodeKind::Graph(decl)
        | NodeKind::Node(decl)
        | NodeKind::Template(decl) => {
            if let Some(body) = &decl.body {
                traverse_block(ast, id, Field::Body, body, events);
            }
        }

        NodeKind::Handler(handler) => {
            if let Some(rate) = handler.rate {
                traverse_node(ast, Some(id), Field::Rate, rate, events);
            }
            traverse_block(ast, id, Field::Body, &handler.body, events);
        }

        NodeKind::Config(block) | NodeKind::Globals(block) | NodeKind::State(block) => {
            traverse_block(ast, id, Field::Body, &block.body, events);
        }

        NodeKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            traverse_node(ast, Some(id), Field::Condition, *condition, events);
            traverse_block(ast, id, Field::ThenBranch, then_branch, events);
            if let Some(else_branch) = else_branch {
                traverse_block(ast, id, Field::ElseBranch, else_branch, events);
            }
        }

        NodeKind::For { iterable, body } => {
            traverse_node(ast, Some(id), Field::Iterable, *iterable, events);
            traverse_block(ast, id, Field::Body, body, events);
        }

        NodeKind::Reference { .. } | NodeKind::Literal(_) => {}
    }

    events.push(Edge {
        parent,
        field,
        child: EdgeChild::Node(id),
        is_exit: true,
    });
}

fn traverse_block(
    ast: &Ast,
    parent: NodeId,
    field: Field,
    body: &[NodeId],
    events: &mut Vec<Edge>,
) {
    events.push(Edge {
        parent: Some(parent),
        field,
        child: EdgeChild::Block,
        is_exit: false,
    });

    for &item in body {
        traverse_node(ast, Some(parent), field, item, events);
    }

    events.push(Edge {
        parent: Some(parent),
        field,
        child: EdgeChild::Block,
        is_exit: true,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::node::{AssignOp, AssignTarget, Block, Decl, Literal};
    use crate::foundation::Span;

    fn span() -> Span {
        Span::zero(0)
    }

    fn assign(ast: &mut Ast, name: &str, value: NodeId) -> NodeId {
        ast.push(
            NodeKind::Assign {
                target: AssignTarget::Name(name.into()),
                op: AssignOp::Assign,
                value,
            },
            span(),
        )
    }

    #[test]
    fn test_visit_single_node() {
        let mut ast = Ast::new();
        let id = ast.push_root(NodeKind::Literal(Literal::Bool(true)), span());

        assert_eq!(visit(&ast), vec![id]);
    }

    #[test]
    fn test_visit_pre_order() {
        // state { x = 1; y = x }
        let mut ast = Ast::new();
        let one = ast.push(NodeKind::Literal(Literal::Int(1)), span());
        let x = assign(&mut ast, "x", one);
        let x_ref = ast.push(NodeKind::Reference { name: "x".into() }, span());
        let y = assign(&mut ast, "y", x_ref);
        let state = ast.push_root(NodeKind::State(Block { body: vec![x, y] }), span());

        assert_eq!(visit(&ast), vec![state, x, one, y, x_ref]);
    }

    #[test]
    fn test_visit_covers_every_node_once() {
        // if c { a = 1 } else { b = 2 }
        let mut ast = Ast::new();
        let cond = ast.push(NodeKind::Reference { name: "c".into() }, span());
        let one = ast.push(NodeKind::Literal(Literal::Int(1)), span());
        let a = assign(&mut ast, "a", one);
        let two = ast.push(NodeKind::Literal(Literal::Int(2)), span());
        let b = assign(&mut ast, "b", two);
        ast.push_root(
            NodeKind::If {
                condition: cond,
                then_branch: vec![a],
                else_branch: Some(vec![b]),
            },
            span(),
        );

        let order = visit(&ast);
        assert_eq!(order.len(), ast.len());

        let mut seen = std::collections::HashSet::new();
        for id in order {
            assert!(seen.insert(id), "node visited twice");
        }
    }

    #[test]
    fn test_traverse_events_balance() {
        let mut ast = Ast::new();
        let one = ast.push(NodeKind::Literal(Literal::Int(1)), span());
        let x = assign(&mut ast, "x", one);
        let body = vec![x];
        let func = ast.push_root(NodeKind::Function(Decl::named("f", body)), span());

        let events = traverse(&ast);

        // Every ENTER has a matching later EXIT for the same edge.
        let mut stack = Vec::new();
        for event in &events {
            if event.is_exit {
                let entered: &Edge = stack.pop().expect("EXIT without ENTER");
                assert_eq!(entered.parent, event.parent);
                assert_eq!(entered.field, event.field);
                assert_eq!(entered.child, event.child);
            } else {
                stack.push(event);
            }
        }
        assert!(stack.is_empty(), "unbalanced traversal");

        // The function root edge comes first and carries no parent.
        assert_eq!(
            events[0],
            Edge {
                parent: None,
                field: Field::Root,
                child: EdgeChild::Node(func),
                is_exit: false,
            }
        );
    }

    #[test]
    fn test_traverse_block_edges() {
        // function f() { x = 1 }
        let mut ast = Ast::new();
        let one = ast.push(NodeKind::Literal(Literal::Int(1)), span());
        let x = assign(&mut ast, "x", one);
        let func = ast.push_root(NodeKind::Function(Decl::named("f", vec![x])), span());

        let events = traverse(&ast);

        // The body block edge wraps the element edge.
        let block_enter = events
            .iter()
            .position(|e| e.child == EdgeChild::Block && !e.is_exit)
            .expect("no block ENTER");
        let elem_enter = events
            .iter()
            .position(|e| e.child == EdgeChild::Node(x) && !e.is_exit)
            .expect("no element ENTER");
        let block_exit = events
            .iter()
            .position(|e| e.child == EdgeChild::Block && e.is_exit)
            .expect("no block EXIT");

        assert!(block_enter < elem_enter && elem_enter < block_exit);

        // Element edges inherit the block's parent and field.
        assert_eq!(events[elem_enter].parent, Some(func));
        assert_eq!(events[elem_enter].field, Field::Body);
    }

    #[test]
    fn test_traverse_if_branch_fields() {
        let mut ast = Ast::new();
        let cond = ast.push(NodeKind::Reference { name: "c".into() }, span());
        let one = ast.push(NodeKind::Literal(Literal::Int(1)), span());
        let a = assign(&mut ast, "a", one);
        ast.push_root(
            NodeKind::If {
                condition: cond,
                then_branch: vec![a],
                else_branch: None,
            },
            span(),
        );

        let events = traverse(&ast);
        assert!(events
            .iter()
            .any(|e| e.field == Field::Condition && e.child == EdgeChild::Node(cond)));
        assert!(events
            .iter()
            .any(|e| e.field == Field::ThenBranch && e.child == EdgeChild::Block));
        assert!(!events.iter().any(|e| e.field == Field::ElseBranch));
    }

    #[test]
    fn test_traverse_handler_rate_edge() {
        let mut ast = Ast::new();
        let rate = ast.push(NodeKind::Literal(Literal::Int(1)), span());
        ast.push_root(
            NodeKind::Handler(crate::ast::node::HandlerDecl {
                event: "tick".into(),
                params: vec!["event".into()],
                rate: Some(rate),
                body: vec![],
            }),
            span(),
        );

        let events = traverse(&ast);
        assert!(events
            .iter()
            .any(|e| e.field == Field::Rate && e.child == EdgeChild::Node(rate)));
    }
}
