//! Parse sessions over report and orders files.
//!
//! A [`Session`] accumulates everything parsed from the files it is given:
//! report events, recorded orders, and the order lines that were rejected.
//! Order errors carry the file name and line number they came from.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use atlantis_foundation::{Error, ErrorContext, Result};
use atlantis_orders::{OrderLog, OrdersParser, RecordedOrder};
use atlantis_report::{ReportEvent, ReportLog, ReportParser, ReportReader};
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;

/// Accumulated results of parsing reports and orders.
pub struct Session {
    config: RuntimeConfig,
    report: Vec<ReportEvent>,
    orders: OrdersParser<OrderLog>,
    errors: Vec<Error>,
    template_reached: bool,
}

impl Session {
    /// Creates an empty session.
    #[must_use]
    pub fn new(config: RuntimeConfig) -> Self {
        let orders = OrdersParser::with_directions(OrderLog::new(), config.directions.clone());
        Self {
            config,
            report: Vec::new(),
            orders,
            errors: Vec::new(),
            template_reached: false,
        }
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Report events parsed so far.
    #[must_use]
    pub fn report(&self) -> &[ReportEvent] {
        &self.report
    }

    /// Orders recorded so far.
    #[must_use]
    pub fn orders(&self) -> &[RecordedOrder] {
        self.orders.consumer().entries()
    }

    /// Order lines that were rejected, or accepted with a deprecation.
    #[must_use]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Returns `true` if any collected error is fatal.
    #[must_use]
    pub fn has_fatal_errors(&self) -> bool {
        self.errors.iter().any(Error::is_fatal)
    }

    /// Returns `true` if the last report read had an orders template.
    #[must_use]
    pub const fn template_reached(&self) -> bool {
        self.template_reached
    }

    /// Forgets everything parsed so far.
    pub fn clear(&mut self) {
        self.report.clear();
        self.orders.consumer_mut().clear();
        self.errors.clear();
        self.template_reached = false;
    }

    /// Parses a report file.
    ///
    /// # Errors
    ///
    /// See [`parse_report`](Self::parse_report).
    pub fn load_report(&mut self, path: &Path, with_template: bool) -> Result<()> {
        let file = File::open(path)?;
        self.parse_report(&path.display().to_string(), BufReader::new(file), with_template)
    }

    /// Parses an orders file.
    ///
    /// # Errors
    ///
    /// See [`parse_orders`](Self::parse_orders).
    pub fn load_orders(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path)?;
        self.parse_orders(&path.display().to_string(), BufReader::new(file))
    }

    /// Parses a report read from `reader`.
    ///
    /// With `with_template`, the orders template at the end of the report
    /// is parsed as orders. Template errors are numbered from the template
    /// header.
    ///
    /// # Errors
    ///
    /// Returns read errors, and in strict mode the first fatal order error.
    pub fn parse_report<R: BufRead>(
        &mut self,
        source: &str,
        reader: R,
        with_template: bool,
    ) -> Result<()> {
        let log = if self.config.show_lines {
            ReportLog::with_lines()
        } else {
            ReportLog::new()
        };
        let mut parser = ReportParser::new(log);
        let mut reader = ReportReader::new(reader);
        self.template_reached = parser.parse(&mut reader)?;
        let mut events = parser.into_consumer();
        info!(source, events = events.len(), "parsed report");
        self.report.extend(events.take());

        if !(with_template && self.template_reached) {
            return Ok(());
        }
        debug!(source, "parsing orders template");
        for (index, line) in reader.enumerate() {
            let context = ErrorContext::new()
                .with_source(source)
                .with_line(index + 1)
                .with_frame("orders template");
            self.order_line_in(&line?, context)?;
        }
        Ok(())
    }

    /// Parses an orders file read from `reader`.
    ///
    /// # Errors
    ///
    /// Returns read errors, and in strict mode the first fatal order error.
    pub fn parse_orders<R: BufRead>(&mut self, source: &str, reader: R) -> Result<()> {
        let before = self.orders().len();
        for (index, line) in reader.lines().enumerate() {
            let context = ErrorContext::new()
                .with_source(source)
                .with_line(index + 1);
            self.order_line_in(&line?, context)?;
        }
        info!(source, orders = self.orders().len() - before, "parsed orders");
        Ok(())
    }

    /// Parses a single order line.
    ///
    /// Returns the number of orders the line recorded. A deprecated order
    /// is recorded before its error is returned.
    ///
    /// # Errors
    ///
    /// Returns the syntax or deprecation error for the line.
    pub fn order_line(&mut self, line: &str) -> Result<usize> {
        let before = self.orders().len();
        self.orders.parse_line(line)?;
        Ok(self.orders().len() - before)
    }

    fn order_line_in(&mut self, line: &str, context: ErrorContext) -> Result<()> {
        let Err(err) = self.orders.parse_line(line) else {
            return Ok(());
        };
        let err = err.with_context(context);
        if self.config.strict && err.is_fatal() {
            return Err(err);
        }
        warn!(error = %err, "skipping order line");
        self.errors.push(err);
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlantis_foundation::ErrorKind;
    use atlantis_orders::{Order, Spoils};

    const REPORT: &str = "Atlantis Report For:\n\
                          Mathoyoh (3) (War 2, Trade 1, Magic 2)\n\
                          July, Year 2\n\
                          \n\
                          Declared Attitudes (default Neutral):\n\
                          Unclaimed silver: 10.\n\
                          \n\
                          forest (13,41) in Bidswaul, 1248 peasants (wood elves), $624.\n\
                          \n\
                          Orders Template (Long Format):\n\
                          \n\
                          #atlantis 3 \"secret\"\n\
                          unit 679\n\
                          tax\n\
                          give 0 10 silver\n\
                          #end\n";

    #[test]
    fn report_without_template() {
        let mut session = Session::default();
        session
            .parse_report("report.txt", REPORT.as_bytes(), false)
            .unwrap();
        assert!(session.template_reached());
        assert!(session.orders().is_empty());
        let names: Vec<_> = session.report().iter().map(ReportEvent::name).collect();
        assert_eq!(
            names,
            vec![
                "faction",
                "faction_date",
                "faction_attitudes",
                "faction_unclaimed",
                "region"
            ]
        );
    }

    #[test]
    fn report_with_template() {
        let mut session = Session::default();
        session
            .parse_report("report.txt", REPORT.as_bytes(), true)
            .unwrap();
        let orders: Vec<_> = session.orders().iter().map(|o| &o.order).collect();
        assert_eq!(orders.len(), 4);
        assert_eq!(orders[1], &Order::Unit { unit: 679 });
        assert_eq!(orders[2], &Order::Tax);

        let err = &session.errors()[0];
        assert!(err.is_fatal());
        let context = err.context.as_ref().unwrap();
        assert_eq!(context.source.as_deref(), Some("report.txt"));
        assert_eq!(context.line, Some(5));
        assert_eq!(context.stack, vec!["orders template".to_string()]);
    }

    #[test]
    fn raw_lines_follow_the_config() {
        let mut session = Session::new(RuntimeConfig::default().with_lines(true));
        session
            .parse_report("report.txt", "Atlantis Report For:\n".as_bytes(), false)
            .unwrap();
        assert_eq!(session.report().len(), 1);
        assert_eq!(session.report()[0].name(), "line");
    }

    #[test]
    fn orders_collect_errors_with_line_numbers() {
        let mut session = Session::default();
        session
            .parse_orders("orders.txt", "unit 12\nstudy\nwork\nnospoils on\n".as_bytes())
            .unwrap();
        let orders: Vec<_> = session.orders().iter().map(|o| &o.order).collect();
        assert_eq!(
            orders,
            vec![
                &Order::Unit { unit: 12 },
                &Order::Work,
                &Order::Spoils {
                    spoils: Spoils::None
                }
            ]
        );
        assert_eq!(session.errors().len(), 2);
        assert_eq!(session.errors()[0].context.as_ref().unwrap().line, Some(2));
        assert!(!session.errors()[1].is_fatal());
        assert!(session.has_fatal_errors());
    }

    #[test]
    fn strict_mode_stops_at_the_first_bad_line() {
        let mut session = Session::new(RuntimeConfig::default().with_strict(true));
        let err = session
            .parse_orders("orders.txt", "nospoils on\nunit 0\ntax\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Syntax { .. }));
        assert_eq!(err.context.unwrap().line, Some(2));
        assert_eq!(session.orders().len(), 1);
        assert_eq!(session.errors().len(), 1);
    }

    #[test]
    fn single_lines() {
        let mut session = Session::default();
        assert_eq!(session.order_line("; note").unwrap(), 1);
        assert_eq!(session.order_line("").unwrap(), 0);
        assert!(session.order_line("give").is_err());
        session.clear();
        assert!(session.orders().is_empty());
    }

    #[test]
    fn missing_file() {
        let mut session = Session::default();
        let err = session
            .load_orders(Path::new("/nonexistent/orders.txt"))
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Io(_)));
    }
}
