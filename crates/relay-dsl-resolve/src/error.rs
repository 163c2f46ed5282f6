//! Analysis diagnostics.
//!
//! Every finding is a value collected by the [`Reporter`](crate::Reporter),
//! never a control-flow interrupt: the walk continues past all of them and
//! the caller gets the complete ordered list. There are exactly three
//! kinds and no severity levels.
//!
//! Internal invariant violations (scope-stack imbalance) are not
//! diagnostics; they indicate a defect in the traversal contract and fail
//! an assertion instead.

use relay_dsl_ast::{NodeId, SourceMap, Span};
use thiserror::Error;

/// A non-fatal analysis finding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// A scope already had a binding for this name. The new declaration
    /// replaces the old one in the scope regardless.
    #[error("'{name}' is defined more than once in the same scope")]
    DuplicateDefinitions {
        name: String,
        previous: NodeId,
        next: NodeId,
        span: Span,
    },

    /// Assignment whose target is not a single bare identifier (or whose
    /// operator is not plain `=`); it binds nothing.
    #[error("only simple `name = value` assignments can introduce a binding")]
    OnlySimpleAssignments { assign: NodeId, span: Span },

    /// Composite declaration without a name; it is never reachable by
    /// lookup, though its own scope and bindings still exist.
    #[error("anonymous declaration is not bound to any name")]
    UnboundAnonymousItem { item: NodeId, span: Span },
}

impl Diagnostic {
    /// Source location of the offending construct.
    pub fn span(&self) -> Span {
        match self {
            Diagnostic::DuplicateDefinitions { span, .. }
            | Diagnostic::OnlySimpleAssignments { span, .. }
            | Diagnostic::UnboundAnonymousItem { span, .. } => *span,
        }
    }
}

/// Formats diagnostics with source context.
///
/// Produces `error: <message>` followed by the file location, the source
/// line, and a caret underline.
pub struct DiagnosticFormatter<'a> {
    sources: &'a SourceMap,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(sources: &'a SourceMap) -> Self {
        Self { sources }
    }

    /// Format a single diagnostic with its source snippet.
    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let span = diagnostic.span();
        let mut output = String::new();

        output.push_str(&format!("error: {diagnostic}\n"));

        let file_path = self.sources.file_path(&span);
        let (line, col) = self.sources.line_col(&span);
        output.push_str(&format!("  --> {}:{}:{}\n", file_path.display(), line, col));

        let file = self.sources.file(&span);
        if let Some(source_line) = file.line_text(line) {
            let source_line = source_line.trim_end_matches('\n');
            output.push_str("   |\n");
            output.push_str(&format!("{line:3} | {source_line}\n"));

            let start_col = col as usize;
            let span_len = (span.end - span.start) as usize;
            let end_col = (start_col + span_len).min(source_line.len() + 1);
            let underline = " ".repeat(start_col.saturating_sub(1))
                + &"^".repeat(end_col.saturating_sub(start_col).max(1));
            output.push_str(&format!("   | {underline}\n"));
        }

        output
    }

    /// Format all diagnostics separated by blank lines.
    pub fn format_all(&self, diagnostics: &[Diagnostic]) -> String {
        diagnostics
            .iter()
            .map(|d| self.format(d))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_dsl_ast::{Ast, Literal, NodeKind};
    use std::path::PathBuf;

    fn test_sources() -> SourceMap {
        let mut sources = SourceMap::new();
        sources.add_file(
            PathBuf::from("test.relay"),
            "x = 1\nx = 2".to_string(),
        );
        sources
    }

    fn dummy_node(span: Span) -> NodeId {
        let mut ast = Ast::new();
        ast.push(NodeKind::Literal(Literal::Int(0)), span)
    }

    #[test]
    fn test_diagnostic_display() {
        let span = Span::new(0, 6, 11, 2);
        let node = dummy_node(span);
        let diagnostic = Diagnostic::DuplicateDefinitions {
            name: "x".to_string(),
            previous: node,
            next: node,
            span,
        };

        let display = format!("{diagnostic}");
        assert!(display.contains("'x'"));
        assert!(display.contains("more than once"));
    }

    #[test]
    fn test_formatter_snippet_and_caret() {
        let sources = test_sources();
        let span = Span::new(0, 6, 11, 2); // second "x = 2"
        let node = dummy_node(span);

        let diagnostic = Diagnostic::DuplicateDefinitions {
            name: "x".to_string(),
            previous: node,
            next: node,
            span,
        };

        let formatter = DiagnosticFormatter::new(&sources);
        let formatted = formatter.format(&diagnostic);

        assert!(formatted.contains("error:"));
        assert!(formatted.contains("test.relay:2:1"));
        assert!(formatted.contains("x = 2"));
        assert!(formatted.contains("^^^^^"));
    }

    #[test]
    fn test_formatter_multiple() {
        let sources = test_sources();
        let span = Span::new(0, 0, 5, 1);
        let node = dummy_node(span);

        let diagnostics = vec![
            Diagnostic::OnlySimpleAssignments { assign: node, span },
            Diagnostic::UnboundAnonymousItem { item: node, span },
        ];

        let formatter = DiagnosticFormatter::new(&sources);
        let formatted = formatter.format_all(&diagnostics);

        assert!(formatted.contains("simple `name = value`"));
        assert!(formatted.contains("anonymous declaration"));
    }
}
