//! Translation pipeline: parse, render, commit.
//!
//! The document reaches the output sink only after the whole input parsed, so
//! a failed run writes nothing there.

use crate::{
    config::ParserConfig,
    errors::{ErrorReporting, GraphError, SourceContext, Status},
    output::OutputSink,
    render::{self, RenderStyle},
    syntax::parser::parse_with,
    trace::Tracer,
};

/// Translate an edge expression into its compact document text.
pub fn translate(
    input: &str,
    config: &ParserConfig,
    trace: &mut dyn OutputSink,
) -> Result<String, GraphError> {
    translate_styled(input, config, RenderStyle::Compact, trace)
}

fn translate_styled(
    input: &str,
    config: &ParserConfig,
    style: RenderStyle,
    trace: &mut dyn OutputSink,
) -> Result<String, GraphError> {
    let edges = parse_with(input, config, trace)?;
    render::document(&edges, style).map_err(|e| {
        SourceContext::from_input("<input>", input).render_failure(e.to_string())
    })
}

// ============================================================================
// TRANSLATOR - Wrapper with separate result and trace sinks
// ============================================================================

pub struct Translator<'o> {
    config: ParserConfig,
    style: RenderStyle,
    output: &'o mut dyn OutputSink,
    trace: &'o mut dyn OutputSink,
}

impl<'o> Translator<'o> {
    pub fn new(output: &'o mut dyn OutputSink, trace: &'o mut dyn OutputSink) -> Self {
        Self {
            config: ParserConfig::default(),
            style: RenderStyle::default(),
            output,
            trace,
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Translate `input` and commit the document to the output sink.
    ///
    /// `None` stands for an input that was never supplied. The status line is
    /// written to the trace sink when tracing is enabled.
    pub fn run(&mut self, input: Option<&str>) -> Result<(), GraphError> {
        let result = match input {
            Some(input) => translate_styled(input, &self.config, self.style, &mut *self.trace),
            None => Err(GraphError::no_input()),
        };

        let status = Status::of(&result);
        Tracer::new(self.config.trace, &mut *self.trace).note(status.message());

        let document = result?;
        self.output.emit(&document);
        Ok(())
    }

    /// Like [`Translator::run`], reduced to the outcome.
    pub fn run_status(&mut self, input: Option<&str>) -> Status {
        Status::of(&self.run(input))
    }
}
