//! Rule trace logging.
//!
//! With tracing enabled every grammar rule writes one fixed line when it is
//! entered. The lines go to a dedicated trace sink so they never mix with the
//! translated document.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::output::OutputSink;

static TRACE_ALL: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceLevel {
    #[default]
    None,
    All,
}

impl TraceLevel {
    pub fn is_enabled(&self) -> bool {
        *self == TraceLevel::All
    }
}

/// Sets the process-wide trace level picked up by [`crate::ParserConfig::default`].
///
/// Call before parsing starts; parses already configured are unaffected.
pub fn set_level(level: TraceLevel) {
    TRACE_ALL.store(level.is_enabled(), Ordering::Relaxed);
}

/// The process-wide trace level.
pub fn level() -> TraceLevel {
    if TRACE_ALL.load(Ordering::Relaxed) {
        TraceLevel::All
    } else {
        TraceLevel::None
    }
}

/// The grammar rules that announce themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Sequence,
    Edge,
    Identifier,
}

impl Rule {
    pub const fn trace_line(&self) -> &'static str {
        match self {
            Rule::Sequence => "called S",
            Rule::Edge => "called E",
            Rule::Identifier => "called W",
        }
    }
}

/// Writes rule entries to a sink when the level allows it.
pub struct Tracer<'s> {
    level: TraceLevel,
    sink: &'s mut dyn OutputSink,
}

impl<'s> Tracer<'s> {
    pub fn new(level: TraceLevel, sink: &'s mut dyn OutputSink) -> Self {
        Self { level, sink }
    }

    pub fn enter(&mut self, rule: Rule) {
        if self.level.is_enabled() {
            self.sink.emit(rule.trace_line());
        }
    }

    /// Writes a free-form line, e.g. the final status.
    pub fn note(&mut self, text: &str) {
        if self.level.is_enabled() {
            self.sink.emit(text);
        }
    }
}
