//! Document rendering.
//!
//! A document is the top-level edge list wrapped in the outer braces:
//! `a|b(c)` renders as `{"a":{},"b":{"c":{}}}`. Separators always come out
//! as `,` whichever of `|` or `,` was written.

use serde::{Deserialize, Serialize};

use crate::syntax::EdgeList;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Single line, no whitespace.
    #[default]
    Compact,
    /// Indented, one entry per line.
    Pretty,
}

pub fn document(edges: &EdgeList, style: RenderStyle) -> serde_json::Result<String> {
    match style {
        RenderStyle::Compact => serde_json::to_string(edges),
        RenderStyle::Pretty => serde_json::to_string_pretty(edges),
    }
}

/// The document as a JSON value, for callers that want to inspect it.
///
/// Repeated names collapse to the last occurrence, as with any JSON decoder.
pub fn to_value(edges: &EdgeList) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(edges)
}
