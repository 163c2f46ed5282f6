//! Syntax nodes for the Relay DSL.
//!
//! The parser produces a flat [`Ast`] arena; structure is expressed through
//! [`NodeId`] handles rather than owning pointers. The semantic-analysis
//! stage never changes the tree shape; it only writes into each node's
//! [`Metadata`] slot (object ids, recorded scopes, reference resolutions).
//!
//! # Design
//!
//! - **Closed kind set** - [`NodeKind`] is a tagged enum over the fixed set
//!   of Relay constructs; passes dispatch with exhaustive matches
//! - **Handles, not pointers** - child links, scope links, and resolved
//!   declarations are all index handles, so the scope tree can reference
//!   declarations (and nodes reference scopes) without ownership cycles
//! - **Metadata is analysis-owned** - the parser leaves [`Metadata`] at its
//!   default; only the resolve crate writes it

use serde::{Deserialize, Serialize};

use crate::foundation::{ScopeId, Span};

/// Handle into the [`Ast`] node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Flat arena of syntax nodes plus the ordered top-level declarations.
///
/// Nodes are pushed bottom-up by the parser (children before parents), so
/// arena order is not document order; document order is defined by
/// [`walk::visit`](crate::ast::walk::visit).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ast {
    nodes: Vec<SyntaxNode>,
    roots: Vec<NodeId>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node and return its handle.
    pub fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let index = self.nodes.len();
        assert!(index <= u32::MAX as usize, "too many syntax nodes");

        self.nodes.push(SyntaxNode {
            kind,
            span,
            meta: Metadata::default(),
        });
        NodeId(index as u32)
    }

    /// Allocate a node and register it as a top-level declaration.
    pub fn push_root(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = self.push(kind, span);
        self.roots.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SyntaxNode {
        &mut self.nodes[id.index()]
    }

    /// Top-level declarations in document order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Total number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A single syntax element: its kind, source location, and the metadata
/// slot written by semantic analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub span: Span,
    pub meta: Metadata,
}

/// Analysis results attached to a node.
///
/// The parser leaves this at its default. `scope` and `resolution` are only
/// meaningful on [`NodeKind::Reference`] nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Unique id, contiguous from 1 in document order. Assigned exactly
    /// once by the identifier-allocation pass.
    pub object_id: Option<u32>,
    /// Scope that was active where this reference occurred.
    pub scope: Option<ScopeId>,
    /// Outcome of reference resolution. `None` means the resolver has not
    /// run yet; after analysis every reference holds `Some`.
    pub resolution: Option<Resolution>,
}

/// Outcome of resolving a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// The declaration this reference denotes.
    Declaration(NodeId),
    /// No enclosing scope defines the name.
    Unresolved,
}

/// The closed set of Relay syntax constructs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// `target op value`, e.g. `deadline = event_time`
    Assign {
        target: AssignTarget,
        op: AssignOp,
        value: NodeId,
    },

    /// `class name<T> { ... }`
    Class(Decl),
    /// `function name(...) { ... }`
    Function(Decl),
    /// `graph name { ... }`
    Graph(Decl),
    /// `node name { ... }` inside a graph
    Node(Decl),
    /// `template name<T> { ... }`
    Template(Decl),

    /// `on event(params) every rate { ... }`
    Handler(HandlerDecl),

    /// `config { ... }`
    Config(Block),
    /// `globals { ... }`
    Globals(Block),
    /// `state { ... }`
    State(Block),

    /// `if condition { ... } else { ... }`
    If {
        condition: NodeId,
        then_branch: Vec<NodeId>,
        else_branch: Option<Vec<NodeId>>,
    },
    /// `for ... in iterable { ... }`
    For {
        iterable: NodeId,
        body: Vec<NodeId>,
    },

    /// Bare name use, resolved against the scope tree.
    Reference { name: String },
    /// Literal value; opaque to semantic analysis.
    Literal(Literal),
}

/// Shared shape of composite declarations (class, function, graph, node,
/// template).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decl {
    /// Declared name; anonymous declarations are legal syntax but are
    /// never reachable by lookup.
    pub name: Option<String>,
    /// Generic-argument syntax, stored verbatim and never interpreted
    /// at this stage.
    pub generics: Vec<String>,
    /// Ordered body, where the construct has one.
    pub body: Option<Vec<NodeId>>,
}

impl Decl {
    pub fn named(name: impl Into<String>, body: Vec<NodeId>) -> Self {
        Self {
            name: Some(name.into()),
            generics: Vec::new(),
            body: Some(body),
        }
    }
}

/// `on event(params) [every rate] { body }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerDecl {
    /// Event the handler reacts to. Handlers are dispatched by event, not
    /// looked up by name, so this is not a binding.
    pub event: String,
    pub params: Vec<String>,
    /// Optional `every <expr>` rate limit.
    pub rate: Option<NodeId>,
    pub body: Vec<NodeId>,
}

/// Anonymous block construct (`config`, `globals`, `state`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub body: Vec<NodeId>,
}

/// Left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssignTarget {
    /// Single bare identifier; the only form that binds a name.
    Name(String),
    /// Destructuring tuple target, e.g. `(a, b)`. Binds nothing.
    Tuple(Vec<String>),
}

/// Assignment operator. Only plain `=` introduces a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
}

/// Literal value kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl NodeKind {
    /// Declared name, for the kinds that can carry one.
    pub fn name(&self) -> Option<&str> {
        match self {
            NodeKind::Class(decl)
            | NodeKind::Function(decl)
            | NodeKind::Graph(decl)
            | NodeKind::Node(decl)
            | NodeKind::Template(decl) => decl.name.as_deref(),
            _ => None,
        }
    }

    /// Whether this node, as a child edge, opens a new lexical scope.
    ///
    /// This is the kind-based half of the scope-opening rule; the
    /// positional half (which parent field a block sits in) lives with the
    /// traversal-driven builder.
    pub fn opens_scope(&self) -> bool {
        matches!(
            self,
            NodeKind::Class(_)
                | NodeKind::Config(_)
                | NodeKind::Function(_)
                | NodeKind::Graph(_)
                | NodeKind::Handler(_)
                | NodeKind::Node(_)
                | NodeKind::Globals(_)
                | NodeKind::State(_)
                | NodeKind::Template(_)
        )
    }

    /// Whether this kind is a composite declaration that binds its name
    /// into the enclosing scope.
    pub fn is_binding_decl(&self) -> bool {
        matches!(
            self,
            NodeKind::Class(_)
                | NodeKind::Function(_)
                | NodeKind::Graph(_)
                | NodeKind::Node(_)
                | NodeKind::Template(_)
        )
    }
}
