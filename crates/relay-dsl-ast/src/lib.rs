//! # Relay DSL: AST and foundation types
//!
//! Shared data model for the Relay DSL compiler pipeline.
//!
//! This crate defines:
//! - `foundation` - spans, source files, and handle types
//! - `ast` - the syntax-tree arena produced by the parser, plus the
//!   traversal protocol (`visit`, `traverse`) the analysis passes rely on
//!
//! The lexer and parser live in sibling crates; semantic analysis lives in
//! `relay-dsl-resolve`. Splitting the AST out keeps the analysis crate free
//! of parser dependencies and lets both sides compile independently.

pub mod ast;
pub mod foundation;

pub use ast::*;
pub use foundation::{ScopeId, Span, SourceFile, SourceMap};
