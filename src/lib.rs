//! graphparser
//!
//! Translates edge expressions such as `relationship|friends(achievements)`
//! into nested JSON objects:
//!
//! ```text
//! {"relationship":{},"friends":{"achievements":{}}}
//! ```

pub use crate::config::{ParserConfig, TrailingPolicy};
pub use crate::engine::{translate, Translator};
pub use crate::errors::{ErrorCategory, ErrorKind, GraphError, Status};
pub use crate::render::RenderStyle;
pub use crate::syntax::parser::{parse, parse_with};
pub use crate::syntax::{Edge, EdgeList, Span};
pub use crate::trace::TraceLevel;

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod output;
pub mod render;
pub mod syntax;
pub mod trace;
