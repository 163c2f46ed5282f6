//! Per-run diagnostic sink and identifier source.
//!
//! One [`Reporter`] is created per analysis run and threaded by `&mut`
//! through all passes; it is the only run-wide mutable state. It hands out
//! the monotonic object-id counter and accumulates diagnostics in the order
//! they are raised, with no deduplication.

use crate::error::Diagnostic;

#[derive(Debug)]
pub struct Reporter {
    next_id: u32,
    diagnostics: Vec<Diagnostic>,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            diagnostics: Vec::new(),
        }
    }

    /// Record a finding. Never interrupts the walk.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Hand out the next object id. Ids start at 1 and never repeat within
    /// a run.
    pub fn reserve_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_dsl_ast::{Ast, Literal, NodeKind, Span};

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let mut reporter = Reporter::new();
        assert_eq!(reporter.reserve_id(), 1);
        assert_eq!(reporter.reserve_id(), 2);
        assert_eq!(reporter.reserve_id(), 3);
    }

    #[test]
    fn test_diagnostics_keep_order() {
        let span = Span::zero(0);
        let mut ast = Ast::new();
        let node = ast.push(NodeKind::Literal(Literal::Int(0)), span);

        let mut reporter = Reporter::new();
        reporter.report(Diagnostic::OnlySimpleAssignments { assign: node, span });
        reporter.report(Diagnostic::UnboundAnonymousItem { item: node, span });

        let diagnostics = reporter.into_diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert!(matches!(
            diagnostics[0],
            Diagnostic::OnlySimpleAssignments { .. }
        ));
        assert!(matches!(
            diagnostics[1],
            Diagnostic::UnboundAnonymousItem { .. }
        ));
    }
}
