//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use atlantis_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_syntax() {
    let err = Error::syntax("give 0 1 silv", "malformed unit");
    assert!(matches!(err.kind, ErrorKind::Syntax { .. }));
    assert_eq!(err.line(), Some("give 0 1 silv"));
    assert!(err.is_fatal());
}

#[test]
fn error_deprecated() {
    let err = Error::deprecated("nospoils", "deprecated. Use SPOILS instead");
    assert!(matches!(err.kind, ErrorKind::Deprecated { .. }));
    assert_eq!(err.line(), Some("nospoils"));
    assert!(!err.is_fatal());
}

#[test]
fn error_config() {
    let err = Error::config("log filter is empty");
    assert!(matches!(err.kind, ErrorKind::Config(_)));
    assert_eq!(err.line(), None);
    assert!(err.is_fatal());
}

#[test]
fn error_internal() {
    let err = Error::new(ErrorKind::Internal("oops".to_string()));
    assert!(err.is_fatal());
    assert!(format!("{err}").contains("oops"));
}

// =============================================================================
// Error Display
// =============================================================================

#[test]
fn error_display_syntax() {
    let err = Error::syntax("study", "missing skill");
    assert_eq!(format!("{err}"), "study: missing skill");
}

#[test]
fn error_display_config() {
    let err = Error::config("direction vocabulary is empty");
    assert_eq!(
        format!("{err}"),
        "configuration error: direction vocabulary is empty"
    );
}

#[test]
fn error_display_io() {
    let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file").into();
    assert!(format!("{err}").starts_with("i/o error: "));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_builders() {
    let ctx = ErrorContext::new()
        .with_source("orders.txt")
        .with_position(4, 7)
        .with_frame("unit 12");
    assert_eq!(ctx.source.as_deref(), Some("orders.txt"));
    assert_eq!(ctx.line, Some(4));
    assert_eq!(ctx.column, Some(7));
    assert_eq!(ctx.stack, vec!["unit 12".to_string()]);
}

#[test]
fn context_display() {
    let ctx = ErrorContext::new().with_source("report.txt").with_position(3, 1);
    assert_eq!(format!("{ctx}"), "at report.txt:3:1");
}

#[test]
fn context_attached_to_error() {
    let err = Error::syntax("unit 0", "invalid unit")
        .with_context(ErrorContext::new().with_source("orders.txt").with_line(2));
    let ctx = err.context.as_ref().unwrap();
    assert_eq!(ctx.line, Some(2));
    assert_eq!(format!("{err}"), "unit 0: invalid unit");
}
