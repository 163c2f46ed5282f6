//! Foundation types shared across the compiler pipeline.

pub mod span;

pub use span::{Span, SourceFile, SourceMap};

use serde::{Deserialize, Serialize};

/// Handle into the scope tree built during resolution.
///
/// Scopes are owned by the analysis result, not by syntax nodes; nodes only
/// carry this handle in their metadata. Defined here (rather than in the
/// resolve crate) because node metadata has to name the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeId(u32);

impl ScopeId {
    pub fn new(index: usize) -> Self {
        assert!(index <= u32::MAX as usize, "too many scopes");
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}
