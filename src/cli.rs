//! The graphparser Command-Line Interface.
//!
//! This module parses arguments and dispatches to the library. Documents go
//! to stdout; trace lines and diagnostics go to stderr.

use std::process;

use clap::{Parser, Subcommand};

use crate::{
    config::{ParserConfig, TrailingPolicy, DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING},
    engine::Translator,
    errors::{print_error, GraphError, Status},
    output::{StderrSink, StdoutSink},
    render::RenderStyle,
    syntax::{parser::parse_with, EdgeList},
    trace::{TraceLevel, Tracer},
};

// ============================================================================
// CLI ARGUMENTS - Command-line argument definitions
// ============================================================================

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "graphparser",
    version,
    about = "Translates edge expressions like 'a|b(c,d)' into nested JSON objects."
)]
pub struct GraphArgs {
    /// Print a line for every grammar rule entered, on stderr.
    #[arg(long, global = true)]
    pub trace: bool,

    /// Accept input left over after the last edge instead of failing.
    #[arg(long, global = true)]
    pub allow_trailing: bool,

    /// Maximum number of nested groups (at most 1024).
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH, value_parser = parse_max_depth)]
    pub max_depth: usize,

    #[command(subcommand)]
    pub command: ArgsCommand,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum ArgsCommand {
    /// Print the translated document.
    Translate {
        /// The edge expression, e.g. 'friends(relationship|achievements)'.
        input: Option<String>,
        /// Indent the document.
        #[arg(long)]
        pretty: bool,
    },
    /// Parse only and print whether the input is accepted.
    Check {
        /// The edge expression to check.
        input: Option<String>,
    },
    /// Show the parsed edge tree.
    Ast {
        /// The edge expression to parse.
        input: Option<String>,
    },
}

impl GraphArgs {
    pub fn config(&self) -> ParserConfig {
        let trace = if self.trace {
            TraceLevel::All
        } else {
            TraceLevel::None
        };
        let trailing = if self.allow_trailing {
            TrailingPolicy::Ignore
        } else {
            TrailingPolicy::Reject
        };

        ParserConfig::default()
            .with_trace(trace)
            .with_trailing(trailing)
            .with_max_depth(self.max_depth)
    }
}

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() {
    let args = GraphArgs::parse();
    let status = execute(args);
    process::exit(status.exit_code());
}

/// Runs one parsed command line and returns its outcome.
pub fn execute(args: GraphArgs) -> Status {
    let config = args.config();

    match args.command {
        ArgsCommand::Translate { input, pretty } => {
            let style = if pretty {
                RenderStyle::Pretty
            } else {
                RenderStyle::Compact
            };
            let mut output = StdoutSink;
            let mut trace = StderrSink::new();
            let result = Translator::new(&mut output, &mut trace)
                .with_config(config)
                .with_style(style)
                .run(input.as_deref());
            report(result)
        }

        ArgsCommand::Check { input } => {
            let result = parse_input(input.as_deref(), &config).map(|_| ());
            let status = Status::of(&result);
            println!("{status}");
            report(result);
            status
        }

        ArgsCommand::Ast { input } => {
            let result = parse_input(input.as_deref(), &config).map(|edges| print_ast(&edges));
            report(result)
        }
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Parses `input` and notes the status line on the trace, as `Translator` does.
fn parse_input(input: Option<&str>, config: &ParserConfig) -> Result<EdgeList, GraphError> {
    let mut trace = StderrSink::new();
    let result = match input {
        Some(input) => parse_with(input, config, &mut trace),
        None => Err(GraphError::no_input()),
    };
    Tracer::new(config.trace, &mut trace).note(Status::of(&result).message());
    result
}

fn parse_max_depth(arg: &str) -> Result<usize, String> {
    let depth: usize = arg.parse().map_err(|e| format!("{e}"))?;
    if depth > MAX_DEPTH_CEILING {
        return Err(format!("nesting limit must be at most {MAX_DEPTH_CEILING}"));
    }
    Ok(depth)
}

fn report(result: Result<(), GraphError>) -> Status {
    let status = Status::of(&result);
    if let Err(e) = result {
        print_error(e);
    }
    status
}

fn print_ast(edges: &EdgeList) {
    println!("{edges:#?}");
}
