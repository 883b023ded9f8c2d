//! Output sinks for translated documents and trace lines.
//!
//! Results and traces are written through separate sinks so that a traced run
//! still produces a clean document on stdout.

// ============================================================================
// OUTPUT SINKS: OutputBuffer, StdoutSink, StderrSink and NullSink
// ============================================================================

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Destination for one line of output at a time.
pub trait OutputSink {
    fn emit(&mut self, text: &str);
}

/// OutputBuffer: collects output into a String for testing or programmatic capture.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    pub buffer: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn lines(&self) -> Vec<&str> {
        self.buffer.lines().collect()
    }
}

impl OutputSink for OutputBuffer {
    fn emit(&mut self, text: &str) {
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(text);
    }
}

/// StdoutSink: writes output to stdout for CLI use.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, text: &str) {
        println!("{text}");
    }
}

/// StderrSink: writes dimmed lines to stderr, coloured only on a terminal.
pub struct StderrSink {
    stream: StandardStream,
}

impl StderrSink {
    pub fn new() -> Self {
        let choice = if atty::is(atty::Stream::Stderr) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stream: StandardStream::stderr(choice),
        }
    }
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for StderrSink {
    fn emit(&mut self, text: &str) {
        let _ = self
            .stream
            .set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_dimmed(true));
        let _ = writeln!(self.stream, "{text}");
        let _ = self.stream.reset();
    }
}

/// A null output sink for running without output.
pub struct NullSink;

impl OutputSink for NullSink {
    fn emit(&mut self, _text: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_joins_lines() {
        let mut buffer = OutputBuffer::new();
        buffer.emit("one");
        buffer.emit("two");
        assert_eq!(buffer.as_str(), "one\ntwo");
        assert_eq!(buffer.lines(), vec!["one", "two"]);
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = OutputBuffer::default();
        assert!(buffer.lines().is_empty());
    }
}
