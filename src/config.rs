//! Parser configuration.

use serde::{Deserialize, Serialize};

use crate::trace::{self, TraceLevel};

/// Nesting limit used unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Largest nesting limit the CLI accepts. Parsing itself is flat, but
/// rendering and `Debug` output walk the tree recursively.
pub const MAX_DEPTH_CEILING: usize = 1024;

/// What to do with input left over after a complete edge sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingPolicy {
    /// Unconsumed input is an error.
    #[default]
    Reject,
    /// Stop after the last edge and ignore the rest, e.g. `a)` reads as `a`.
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub trace: TraceLevel,
    pub trailing: TrailingPolicy,
    /// Maximum number of nested `(` groups. Values above
    /// [`MAX_DEPTH_CEILING`] parse fine but may not render on small stacks.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            trace: trace::level(),
            trailing: TrailingPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    pub fn with_trace(mut self, trace: TraceLevel) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_trailing(mut self, trailing: TrailingPolicy) -> Self {
        self.trailing = trailing;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
