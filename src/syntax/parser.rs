//! Edge Parser - recursive descent over a single cursor
//!
//! Grammar, one character of lookahead and no backtracking:
//!
//! ```text
//! S := E ( ('|' | ',') S )?
//! E := W ( '(' S ')' )?
//! W := [A-Za-z_][A-Za-z0-9_]*
//! ```
//!
//! Each rule returns as soon as it fails; the first failure at any depth
//! aborts the whole parse and the cursor is left where consumption stopped.
//! Nesting is tracked on an explicit stack of open groups rather than the
//! call stack, so `max_depth` bounds memory, not native stack use.

use crate::config::{ParserConfig, TrailingPolicy};
use crate::errors::{to_source_span, ErrorReporting, GraphError, SourceContext};
use crate::output::{OutputSink, StderrSink};
use crate::syntax::{Cursor, Edge, EdgeList, Span};
use crate::trace::{Rule, Tracer};

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parse an edge expression with the default configuration.
///
/// Trace lines, if the process-wide level enables them, go to stderr.
pub fn parse(input: &str) -> Result<EdgeList, GraphError> {
    let mut trace = StderrSink::new();
    parse_with(input, &ParserConfig::default(), &mut trace)
}

/// Parse an edge expression, writing trace lines to `trace`.
pub fn parse_with(
    input: &str,
    config: &ParserConfig,
    trace: &mut dyn OutputSink,
) -> Result<EdgeList, GraphError> {
    Parser::new(input, config, trace).parse_document()
}

// ============================================================================
// PARSER STATE
// ============================================================================

pub struct Parser<'src, 's> {
    cursor: Cursor<'src>,
    tracer: Tracer<'s>,
    trailing: TrailingPolicy,
    max_depth: usize,
}

/// An edge whose `(` has been consumed and whose children are being collected.
struct OpenGroup {
    name: String,
    span: Span,
    open: usize,
    siblings: Vec<Edge>,
}

/// What the Edge rule found after the identifier.
enum EdgeStart {
    Leaf(Edge),
    Group(OpenGroup),
}

impl<'src, 's> Parser<'src, 's> {
    pub fn new(input: &'src str, config: &ParserConfig, trace: &'s mut dyn OutputSink) -> Self {
        Self {
            cursor: Cursor::new(input),
            tracer: Tracer::new(config.trace, trace),
            trailing: config.trailing,
            max_depth: config.max_depth,
        }
    }

    /// Parse the whole input as one sequence, then apply the trailing policy.
    pub fn parse_document(mut self) -> Result<EdgeList, GraphError> {
        let edges = self.sequence()?;

        if self.trailing == TrailingPolicy::Reject {
            if let Some(found) = self.cursor.peek() {
                let span = Span::new(self.cursor.offset(), self.cursor.input().len());
                return Err(self.source().trailing_input(found, to_source_span(span)));
            }
        }

        Ok(edges)
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    // ------------------------------------------------------------------------
    // S := E ( ('|' | ',') S )?
    // ------------------------------------------------------------------------

    /// Drives S and E without native recursion. Every sibling counts as one
    /// entry into S; a `(` pushes the enclosing list onto `groups` and a `)`
    /// pops it, so stack use is flat whatever the nesting depth.
    fn sequence(&mut self) -> Result<EdgeList, GraphError> {
        let mut groups: Vec<OpenGroup> = Vec::new();
        let mut edges = Vec::new();

        'entry: loop {
            self.tracer.enter(Rule::Sequence);
            match self.edge(groups.len())? {
                EdgeStart::Group(group) => {
                    groups.push(OpenGroup {
                        siblings: std::mem::take(&mut edges),
                        ..group
                    });
                    continue 'entry;
                }
                EdgeStart::Leaf(edge) => edges.push(edge),
            }

            // An edge just completed: continue the current list or close groups.
            loop {
                if let Some('|') | Some(',') = self.cursor.peek() {
                    self.cursor.advance();
                    continue 'entry;
                }

                let Some(group) = groups.pop() else {
                    return Ok(EdgeList::new(edges));
                };

                if !self.cursor.at(')') {
                    let span = Span::new(group.open, self.cursor.offset());
                    return Err(self
                        .source()
                        .unclosed_group(self.cursor.peek(), to_source_span(span)));
                }
                self.cursor.advance();

                let children = std::mem::replace(&mut edges, group.siblings);
                edges.push(Edge {
                    name: group.name,
                    span: group.span,
                    children: EdgeList::new(children),
                });
            }
        }
    }

    // ------------------------------------------------------------------------
    // E := W ( '(' S ')' )?
    // ------------------------------------------------------------------------

    /// Recognises the identifier and, if present, the opening `(`. The group
    /// body and its `)` are handled by `sequence`.
    fn edge(&mut self, depth: usize) -> Result<EdgeStart, GraphError> {
        self.tracer.enter(Rule::Edge);
        let (name, span) = self.identifier()?;

        if !self.cursor.at('(') {
            return Ok(EdgeStart::Leaf(Edge::leaf(name, span)));
        }

        let open = self.cursor.offset();
        if depth >= self.max_depth {
            let span = Span::new(open, open + 1);
            return Err(self
                .source()
                .nesting_too_deep(self.max_depth, to_source_span(span)));
        }
        self.cursor.advance();

        Ok(EdgeStart::Group(OpenGroup {
            name,
            span,
            open,
            siblings: Vec::new(),
        }))
    }

    // ------------------------------------------------------------------------
    // W := [A-Za-z_][A-Za-z0-9_]*
    // ------------------------------------------------------------------------

    fn identifier(&mut self) -> Result<(String, Span), GraphError> {
        self.tracer.enter(Rule::Identifier);
        let start = self.cursor.offset();

        match self.cursor.peek() {
            Some(ch) if is_identifier_start(ch) => self.cursor.advance(),
            found => {
                let end = start + found.map_or(0, char::len_utf8);
                return Err(self
                    .source()
                    .expected_identifier(found, to_source_span(Span::new(start, end))));
            }
        }

        while matches!(self.cursor.peek(), Some(ch) if is_identifier_continue(ch)) {
            self.cursor.advance();
        }

        let end = self.cursor.offset();
        let name = self.cursor.input()[start..end].to_string();
        Ok((name, Span::new(start, end)))
    }

    // ------------------------------------------------------------------------
    // ERROR HANDLING
    // ------------------------------------------------------------------------

    /// Copies the input into a report context. Only called on failure.
    fn source(&self) -> SourceContext {
        SourceContext::from_input("<input>", self.cursor.input())
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_identifier_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::output::{NullSink, OutputBuffer};
    use crate::trace::TraceLevel;

    fn config() -> ParserConfig {
        ParserConfig::default().with_trace(TraceLevel::None)
    }

    fn parse_ok(input: &str) -> EdgeList {
        parse_with(input, &config(), &mut NullSink).unwrap()
    }

    fn parse_err(input: &str) -> GraphError {
        parse_with(input, &config(), &mut NullSink).unwrap_err()
    }

    #[test]
    fn test_identifier_stops_at_first_non_matching() {
        let config = config();
        let mut sink = NullSink;
        let mut parser = Parser::new("ab_9(x", &config, &mut sink);
        let (name, span) = parser.identifier().unwrap();
        assert_eq!(name, "ab_9");
        assert_eq!(span, Span::new(0, 4));
        assert_eq!(parser.offset(), 4);
    }

    #[test]
    fn test_identifier_failure_consumes_nothing() {
        let config = config();
        let mut sink = NullSink;
        let mut parser = Parser::new("9a", &config, &mut sink);
        let err = parser.identifier().unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExpectedIdentifier { found: Some('9') });
        assert_eq!(parser.offset(), 0);
    }

    #[test]
    fn test_leaf_and_nested_edges() {
        let edges = parse_ok("a(b,c)|d");
        assert_eq!(edges.names().collect::<Vec<_>>(), vec!["a", "d"]);
        let a = edges.get("a").unwrap();
        assert_eq!(a.children.names().collect::<Vec<_>>(), vec!["b", "c"]);
        assert!(edges.get("d").unwrap().is_leaf());
    }

    #[test]
    fn test_spans_point_at_names() {
        let edges = parse_ok("ab(cd)");
        let ab = &edges.edges[0];
        assert_eq!(ab.span, Span::new(0, 2));
        assert_eq!(ab.children.edges[0].span, Span::new(3, 5));
    }

    #[test]
    fn test_empty_group_is_invalid() {
        let err = parse_err("a()");
        assert_eq!(err.kind, ErrorKind::ExpectedIdentifier { found: Some(')') });
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn test_unclosed_group_reports_open_paren() {
        let err = parse_err("a(b");
        assert_eq!(err.kind, ErrorKind::UnclosedGroup { found: None });
        assert_eq!(err.offset(), 1);
    }

    #[test]
    fn test_wrong_closer() {
        let err = parse_err("a(b]");
        assert_eq!(err.kind, ErrorKind::UnclosedGroup { found: Some(']') });
    }

    #[test]
    fn test_depth_limit() {
        let limited = config().with_max_depth(2);
        assert!(parse_with("a(b(c))", &limited, &mut NullSink).is_ok());

        let err = parse_with("a(b(c(d)))", &limited, &mut NullSink).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NestingTooDeep { limit: 2 });
        assert_eq!(err.offset(), 5);
    }

    #[test]
    fn test_zero_depth_allows_flat_lists_only() {
        let flat = config().with_max_depth(0);
        assert!(parse_with("a,b|c", &flat, &mut NullSink).is_ok());
        assert!(parse_with("a(b)", &flat, &mut NullSink).is_err());
    }

    #[test]
    fn test_trailing_policy() {
        let err = parse_err("a)");
        assert_eq!(err.kind, ErrorKind::TrailingInput { found: ')' });
        assert_eq!(err.offset(), 1);

        let lenient = config().with_trailing(TrailingPolicy::Ignore);
        let edges = parse_with("a)", &lenient, &mut NullSink).unwrap();
        assert_eq!(edges.names().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_whitespace_is_not_skipped() {
        assert_eq!(
            parse_err("a, b").kind,
            ErrorKind::ExpectedIdentifier { found: Some(' ') }
        );
    }

    #[test]
    fn test_non_ascii_letters_rejected() {
        assert_eq!(
            parse_err("é").kind,
            ErrorKind::ExpectedIdentifier { found: Some('é') }
        );
    }

    #[test]
    fn test_trace_follows_rule_entry() {
        let traced = config().with_trace(TraceLevel::All);
        let mut buffer = OutputBuffer::new();
        parse_with("a(b)", &traced, &mut buffer).unwrap();
        assert_eq!(
            buffer.lines(),
            vec!["called S", "called E", "called W", "called S", "called E", "called W"]
        );
    }

    #[test]
    fn test_trace_continues_after_closed_group() {
        let traced = config().with_trace(TraceLevel::All);
        let mut buffer = OutputBuffer::new();
        let edges = parse_with("a(b),c", &traced, &mut buffer).unwrap();
        assert_eq!(edges.names().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(buffer.lines().len(), 9);
        assert_eq!(buffer.lines()[6..], ["called S", "called E", "called W"]);
    }

    #[test]
    fn test_siblings_resume_in_enclosing_group() {
        let edges = parse_ok("a(b(c),d)|e");
        let a = edges.get("a").unwrap();
        assert_eq!(a.children.names().collect::<Vec<_>>(), vec!["b", "d"]);
        assert_eq!(a.children.get("b").unwrap().children.names().collect::<Vec<_>>(), vec!["c"]);
        assert!(edges.get("e").unwrap().is_leaf());
    }

    #[test]
    fn test_errors_carry_the_input() {
        use miette::Diagnostic;

        let err = parse_err("a(b");
        let source = err.source_code().unwrap();
        let contents = source
            .read_span(&err.source_info.primary_span, 0, 0)
            .unwrap();
        assert_eq!(contents.data(), b"(b");
    }

    #[test]
    fn test_trace_stops_at_failure() {
        let traced = config().with_trace(TraceLevel::All);
        let mut buffer = OutputBuffer::new();
        assert!(parse_with("a,", &traced, &mut buffer).is_err());
        assert_eq!(
            buffer.lines(),
            vec!["called S", "called E", "called W", "called S", "called E", "called W"]
        );
    }
}
