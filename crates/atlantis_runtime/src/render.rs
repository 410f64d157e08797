//! Rendering of parsed events.
//!
//! Text output puts one event per line in `Debug` form. JSON output uses the
//! `serde` representation of the event types.

use std::fmt::Write;

use atlantis_foundation::{Error, ErrorKind, Result};
use atlantis_orders::RecordedOrder;
use atlantis_report::ReportEvent;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::session::Session;

/// Both halves of a session, for JSON output.
#[derive(Serialize)]
struct Document<'a> {
    report: &'a [ReportEvent],
    orders: &'a [RecordedOrder],
}

/// Renders report events.
///
/// # Errors
///
/// Returns an internal error if JSON serialization fails.
pub fn render_report(events: &[ReportEvent], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(events.iter().fold(String::new(), |mut out, event| {
            let _ = writeln!(out, "{event:?}");
            out
        })),
        OutputFormat::Json => to_json(events),
    }
}

/// Renders recorded orders.
///
/// # Errors
///
/// Returns an internal error if JSON serialization fails.
pub fn render_orders(orders: &[RecordedOrder], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(orders.iter().fold(String::new(), |mut out, order| {
            let _ = writeln!(out, "{}", order_line(order));
            out
        })),
        OutputFormat::Json => to_json(orders),
    }
}

/// Renders everything a session holds.
///
/// JSON output is a single array when only one of report events or orders
/// is present, and an object with `report` and `orders` keys otherwise.
///
/// # Errors
///
/// Returns an internal error if JSON serialization fails.
pub fn render_session(session: &Session, format: OutputFormat) -> Result<String> {
    let (report, orders) = (session.report(), session.orders());
    match format {
        _ if orders.is_empty() => render_report(report, format),
        _ if report.is_empty() => render_orders(orders, format),
        OutputFormat::Text => Ok(render_report(report, format)? + &render_orders(orders, format)?),
        OutputFormat::Json => to_json(&Document { report, orders }),
    }
}

/// Formats one recorded order as `[@]Order [;comment]`.
#[must_use]
pub fn order_line(order: &RecordedOrder) -> String {
    let mut line = String::new();
    if order.meta.permanent {
        line.push('@');
    }
    let _ = write!(line, "{:?}", order.order);
    if let Some(comment) = &order.meta.comment {
        let _ = write!(line, " ;{comment}");
    }
    line
}

/// Formats an error with the file and line it came from.
#[must_use]
pub fn describe_error(error: &Error) -> String {
    let severity = if error.is_fatal() { "error" } else { "warning" };
    match &error.context {
        Some(context) => {
            let mut place = context.source.clone().unwrap_or_default();
            if let Some(line) = context.line {
                let _ = write!(place, ":{line}");
            }
            for frame in &context.stack {
                let _ = write!(place, " ({frame})");
            }
            format!("{severity}: {place}: {error}")
        }
        None => format!("{severity}: {error}"),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))
}
