//! Resolution passes over the parsed tree.
//!
//! Pass order is fixed: identifier allocation ([`binder::assign_ids`]),
//! scope construction ([`binder::build_scopes`]), then reference
//! resolution ([`names::resolve_references`]). [`program::analyze`] runs
//! them in order and assembles the result.

pub mod binder;
pub mod names;
pub mod program;
pub mod scope;


pub use program::{analyze, Program};
pub use scope::{Scope, ScopeTree};
