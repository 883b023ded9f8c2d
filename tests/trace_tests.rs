//! Rule trace output and its separation from the translated document.

use graphparser::output::OutputBuffer;
use graphparser::trace::{self, TraceLevel};
use graphparser::{parse_with, ParserConfig, Status, Translator};

fn traced() -> ParserConfig {
    ParserConfig::default().with_trace(TraceLevel::All)
}

#[test]
fn test_trace_order_for_sequence() {
    let mut trace = OutputBuffer::new();
    parse_with("a|b", &traced(), &mut trace).unwrap();
    assert_eq!(
        trace.lines(),
        vec!["called S", "called E", "called W", "called S", "called E", "called W"]
    );
}

#[test]
fn test_failed_identifier_is_still_traced() {
    let mut trace = OutputBuffer::new();
    assert!(parse_with("1", &traced(), &mut trace).is_err());
    assert_eq!(trace.lines(), vec!["called S", "called E", "called W"]);
}

#[test]
fn test_document_stays_clean_when_traced() {
    let mut output = OutputBuffer::new();
    let mut trace = OutputBuffer::new();
    let status = Translator::new(&mut output, &mut trace)
        .with_config(traced())
        .run_status(Some("a(b)"));

    assert_eq!(status, Status::Valid);
    assert_eq!(output.as_str(), r#"{"a":{"b":{}}}"#);
    assert!(trace.lines().iter().all(|line| !line.contains('{')));
    assert_eq!(trace.lines().last(), Some(&"string accepted"));
}

#[test]
fn test_status_lines_for_failures() {
    let mut output = OutputBuffer::new();
    let mut trace = OutputBuffer::new();
    let mut translator = Translator::new(&mut output, &mut trace).with_config(traced());
    assert_eq!(translator.run_status(Some("a(")), Status::InvalidInput);
    assert_eq!(translator.run_status(None), Status::NoInput);

    let lines = trace.lines();
    assert!(lines.contains(&"invalid input"));
    assert_eq!(lines.last(), Some(&"error: no input found!"));
    assert!(output.as_str().is_empty());
}

#[test]
fn test_process_wide_level_feeds_default_config() {
    trace::set_level(TraceLevel::All);
    assert_eq!(ParserConfig::default().trace, TraceLevel::All);
    assert_eq!(
        ParserConfig::default().with_trace(TraceLevel::None).trace,
        TraceLevel::None
    );
    trace::set_level(TraceLevel::None);
    assert_eq!(trace::level(), TraceLevel::None);
}
