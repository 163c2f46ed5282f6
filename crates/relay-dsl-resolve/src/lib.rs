//! Name binding and reference resolution for the Relay DSL.
//!
//! Consumes the parsed syntax tree from `relay-dsl-ast` and runs three
//! passes over it:
//!
//! 1. identifier allocation - every node gets a unique id in document order
//! 2. scope construction - the lexical scope tree is built and every
//!    declaration bound into the scope containing it
//! 3. reference resolution - every bare-name reference is resolved to the
//!    declaration it denotes, or explicitly marked unresolved
//!
//! Findings (duplicate definitions, non-simple assignment targets,
//! anonymous declarations) are collected as diagnostics; analysis always
//! completes and returns a full [`Program`].

pub mod error;
pub mod reporter;
pub mod resolve;

pub use error::{Diagnostic, DiagnosticFormatter};
pub use reporter::Reporter;
pub use resolve::{analyze, Program, Scope, ScopeTree};
