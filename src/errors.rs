//! graphparser error handling
//!
//! Every failure is a [`GraphError`]: what went wrong ([`ErrorKind`]), where it
//! happened ([`SourceInfo`]) and how to help ([`DiagnosticInfo`]). Errors are
//! rendered through miette so the CLI can point at the offending character.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use thiserror::Error;

use crate::syntax::Span;

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// The input a parse ran over, kept for error reporting.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    /// Create a source context for an edge expression
    pub fn from_input(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

impl Default for SourceContext {
    fn default() -> Self {
        Self::from_input("<input>", "")
    }
}

// ============================================================================
// ERROR TYPES
// ============================================================================

/// The single error type for the crate
#[derive(Debug)]
pub struct GraphError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Where it happened
    pub source_info: SourceInfo,
    /// How to help
    pub diagnostic_info: DiagnosticInfo,
}

/// Everything that can go wrong
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("no input found")]
    NoInput,

    #[error("expected an edge name, found {}", describe(.found))]
    ExpectedIdentifier { found: Option<char> },

    #[error("expected ')' to close nested edges, found {}", describe(.found))]
    UnclosedGroup { found: Option<char> },

    #[error("unexpected trailing input starting with {found:?}")]
    TrailingInput { found: char },

    #[error("edges nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("failed to render document: {message}")]
    Render { message: String },
}

fn describe(found: &Option<char>) -> String {
    match found {
        Some(ch) => format!("{ch:?}"),
        None => "end of input".to_string(),
    }
}

/// Context-specific source information
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
}

/// Diagnostic enhancement data
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NoInput,
    InvalidInput,
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::NoInput => write!(f, "no input"),
            ErrorCategory::InvalidInput => write!(f, "invalid input"),
            ErrorCategory::Internal => write!(f, "internal error"),
        }
    }
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NoInput => ErrorCategory::NoInput,
            Self::ExpectedIdentifier { .. }
            | Self::UnclosedGroup { .. }
            | Self::TrailingInput { .. }
            | Self::NestingTooDeep { .. } => ErrorCategory::InvalidInput,
            Self::Render { .. } => ErrorCategory::Internal,
        }
    }

    /// Get error code suffix for diagnostic codes
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::NoInput => "no_input",
            Self::ExpectedIdentifier { .. } => "expected_identifier",
            Self::UnclosedGroup { .. } => "unclosed_group",
            Self::TrailingInput { .. } => "trailing_input",
            Self::NestingTooDeep { .. } => "nesting_too_deep",
            Self::Render { .. } => "render",
        }
    }

    fn default_help(&self) -> &'static str {
        match self {
            Self::NoInput => "pass the edge expression as an argument, e.g. 'friends(achievements)'",
            Self::ExpectedIdentifier { .. } => {
                "edge names start with a letter or '_' and continue with letters, digits or '_'"
            }
            Self::UnclosedGroup { .. } => "add ')' after the last nested edge",
            Self::TrailingInput { .. } => "remove the characters after the last edge",
            Self::NestingTooDeep { .. } => "flatten the expression or raise the depth limit",
            Self::Render { .. } => "This is an internal error. Please report this as a bug.",
        }
    }

    fn primary_label(&self) -> &'static str {
        match self {
            Self::NoInput => "no input",
            Self::ExpectedIdentifier { .. } => "expected edge name here",
            Self::UnclosedGroup { .. } => "group opened here is never closed",
            Self::TrailingInput { .. } => "unparsed input",
            Self::NestingTooDeep { .. } => "too deep",
            Self::Render { .. } => "while rendering this input",
        }
    }
}

impl GraphError {
    /// The input source was not supplied at all.
    pub fn no_input() -> Self {
        SourceContext::default().report(ErrorKind::NoInput, unspanned())
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Byte offset the primary label points at.
    pub fn offset(&self) -> usize {
        self.source_info.primary_span.offset()
    }

    /// Internal failures count as invalid input; there are only three outcomes.
    pub fn status(&self) -> Status {
        match self.category() {
            ErrorCategory::NoInput => Status::NoInput,
            ErrorCategory::InvalidInput | ErrorCategory::Internal => Status::InvalidInput,
        }
    }
}

impl std::error::Error for GraphError {}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category() {
            ErrorCategory::NoInput => write!(f, "error: {}", self.kind),
            ErrorCategory::InvalidInput => write!(f, "invalid input: {}", self.kind),
            ErrorCategory::Internal => write!(f, "internal error: {}", self.kind),
        }
    }
}

impl Diagnostic for GraphError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if matches!(self.kind, ErrorKind::NoInput | ErrorKind::Render { .. }) {
            return None;
        }
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.kind.primary_label().to_string()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_info.source)
    }
}

// ============================================================================
// ERROR CREATION
// ============================================================================

/// Context-aware error creation
pub trait ErrorReporting {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> GraphError;

    fn expected_identifier(&self, found: Option<char>, span: SourceSpan) -> GraphError {
        self.report(ErrorKind::ExpectedIdentifier { found }, span)
    }

    fn unclosed_group(&self, found: Option<char>, span: SourceSpan) -> GraphError {
        self.report(ErrorKind::UnclosedGroup { found }, span)
    }

    fn trailing_input(&self, found: char, span: SourceSpan) -> GraphError {
        self.report(ErrorKind::TrailingInput { found }, span)
    }

    fn nesting_too_deep(&self, limit: usize, span: SourceSpan) -> GraphError {
        self.report(ErrorKind::NestingTooDeep { limit }, span)
    }

    /// Internal errors indicate a bug, not a user error.
    fn render_failure(&self, message: impl Into<String>) -> GraphError {
        self.report(
            ErrorKind::Render {
                message: message.into(),
            },
            unspanned(),
        )
    }
}

impl ErrorReporting for SourceContext {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> GraphError {
        let error_code = format!("graphparser::parse::{}", kind.code_suffix());
        let help = Some(kind.default_help().to_string());

        GraphError {
            kind,
            source_info: SourceInfo {
                source: self.to_named_source(),
                primary_span: span,
            },
            diagnostic_info: DiagnosticInfo { help, error_code },
        }
    }
}

// ============================================================================
// STATUS - Outcome of one top-level run
// ============================================================================

/// The three outcomes of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Valid,
    NoInput,
    InvalidInput,
}

impl Status {
    pub fn of<T>(result: &Result<T, GraphError>) -> Status {
        match result {
            Ok(_) => Status::Valid,
            Err(e) => e.status(),
        }
    }

    /// Result constants of the original graph parser.
    pub const fn code(&self) -> i32 {
        match self {
            Status::Valid => 1,
            Status::NoInput => -1,
            Status::InvalidInput => -2,
        }
    }

    /// Process exit code used by the CLI.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Status::Valid => 0,
            Status::InvalidInput => 1,
            Status::NoInput => 2,
        }
    }

    /// Human-readable status line.
    pub const fn message(&self) -> &'static str {
        match self {
            Status::Valid => "string accepted",
            Status::NoInput => "error: no input found!",
            Status::InvalidInput => "invalid input",
        }
    }

    pub fn is_valid(&self) -> bool {
        *self == Status::Valid
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

/// Placeholder span for errors not tied to a location in the input.
pub fn unspanned() -> SourceSpan {
    SourceSpan::from(0..0)
}

/// Converts a syntax Span to a miette SourceSpan.
pub fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::from(span.start..span.end)
}

/// Prints a GraphError with full miette diagnostics
pub fn print_error(error: GraphError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(ErrorKind::NoInput.category(), ErrorCategory::NoInput);
        assert_eq!(
            ErrorKind::UnclosedGroup { found: None }.category(),
            ErrorCategory::InvalidInput
        );
        assert_eq!(
            ErrorKind::NestingTooDeep { limit: 3 }.category(),
            ErrorCategory::InvalidInput
        );
    }

    #[test]
    fn test_report_sets_code_and_span() {
        let source = SourceContext::from_input("<input>", "a(b");
        let err = source.unclosed_group(None, to_source_span(Span::new(1, 3)));
        assert_eq!(err.diagnostic_info.error_code, "graphparser::parse::unclosed_group");
        assert_eq!(err.offset(), 1);
        assert_eq!(err.status(), Status::InvalidInput);
        assert!(err.diagnostic_info.help.is_some());
    }

    #[test]
    fn test_display_messages() {
        let source = SourceContext::from_input("<input>", "1");
        let err = source.expected_identifier(Some('1'), unspanned());
        assert_eq!(err.to_string(), "invalid input: expected an edge name, found '1'");

        let err = source.expected_identifier(None, unspanned());
        assert_eq!(
            err.to_string(),
            "invalid input: expected an edge name, found end of input"
        );

        assert_eq!(GraphError::no_input().to_string(), "error: no input found");
    }

    #[test]
    fn test_status_codes_are_distinct() {
        assert_eq!(Status::Valid.code(), 1);
        assert_eq!(Status::NoInput.code(), -1);
        assert_eq!(Status::InvalidInput.code(), -2);
        assert_ne!(Status::NoInput.exit_code(), Status::InvalidInput.exit_code());
        assert_eq!(Status::Valid.exit_code(), 0);
    }

    #[test]
    fn test_no_input_has_no_label() {
        assert!(GraphError::no_input().labels().is_none());
    }
}
