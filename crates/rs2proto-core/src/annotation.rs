//! Annotation scanning
//!
//! A declaration is selected for generation when its own doc block contains
//! the inclusion marker:
//!
//! ```rust,ignore
//! /// Customer order.
//! ///
//! /// @rs2proto
//! pub struct Order {
//!     pub id: String,
//! }
//! ```
//!
//! Docs on fields, on neighbouring items and inner (`//!`) docs never select a
//! declaration.

use crate::loader::{DeclId, DocIndex};

/// Marker token used when none is configured.
pub const DEFAULT_MARKER: &str = "@rs2proto";

/// Answers whether a declaration carries the inclusion marker.
pub struct AnnotationScanner<'a> {
    docs: &'a DocIndex,
    marker: &'a str,
}

impl<'a> AnnotationScanner<'a> {
    pub fn new(docs: &'a DocIndex, marker: &'a str) -> Self {
        Self { docs, marker }
    }

    /// Returns `false` for unknown declarations, undocumented declarations
    /// and an empty marker.
    pub fn is_annotated(&self, id: &DeclId) -> bool {
        if self.marker.is_empty() {
            return false;
        }
        self.docs
            .get(id)
            .is_some_and(|lines| lines.iter().any(|line| line.contains(self.marker)))
    }
}
