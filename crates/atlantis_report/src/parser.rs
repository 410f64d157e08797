//! The report parser.
//!
//! [`ReportParser`] feeds unwrapped lines through the [`Section`] state
//! machine and hands each one to the entity grammar the section selects.

use std::io::BufRead;
use std::sync::LazyLock;

use atlantis_foundation::Result;
use regex::Regex;
use tracing::{debug, trace};

use crate::battle::parse_battle_line;
use crate::consumer::ReportConsumer;
use crate::events::MessageKind;
use crate::faction::{parse_faction_line, parse_message};
use crate::item::parse_item;
use crate::reader::ReportReader;
use crate::region::parse_region_line;
use crate::section::{Handler, Section};
use crate::skill::parse_skill;
use crate::structure::parse_structure;

/// Weather lines contain a `;` that is not a comment.
static WEATHER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^  .* was (?:unnaturally |an unnatural )?.+ last month; it will be .+ next month")
        .expect("valid regex")
});

/// Parses turn reports and game master reports.
pub struct ReportParser<C: ReportConsumer> {
    consumer: C,
    section: Section,
}

impl<C: ReportConsumer> ReportParser<C> {
    /// Creates a parser at the start of a report.
    pub fn new(consumer: C) -> Self {
        Self {
            consumer,
            section: Section::Start,
        }
    }

    /// Returns a reference to the consumer.
    pub const fn consumer(&self) -> &C {
        &self.consumer
    }

    /// Returns a mutable reference to the consumer.
    pub fn consumer_mut(&mut self) -> &mut C {
        &mut self.consumer
    }

    /// Consumes the parser, returning its consumer.
    pub fn into_consumer(self) -> C {
        self.consumer
    }

    /// Returns the section the last line left the parser in.
    pub const fn section(&self) -> Section {
        self.section
    }

    /// Parses a whole report from `reader`.
    ///
    /// Returns `true` if the orders template was reached. The reader is
    /// then positioned just after the template header, so the remaining
    /// lines can go to an orders parser. Returns `false` at end of input.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying reader.
    pub fn parse<R: BufRead>(&mut self, reader: &mut ReportReader<R>) -> Result<bool> {
        self.section = Section::Start;
        while let Some(line) = reader.read_line()? {
            if !line.trim().is_empty() {
                self.parse_line(line.trim_end());
            }
            if self.section == Section::OrdersTemplate {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Parses one logical report line.
    ///
    /// The raw line always goes to [`ReportConsumer::line`] first. Comments
    /// are then cut off and the line is routed by the current section.
    pub fn parse_line(&mut self, line: &str) {
        self.consumer.line(line);
        let line = if WEATHER.is_match(line) {
            line
        } else {
            line.split_once(';').map_or(line, |(head, _)| head)
        };

        let (section, handler) = self.section.advance(line);
        if section != self.section {
            debug!(from = ?self.section, to = ?section, "entering report section");
            self.section = section;
        }

        let c = &mut self.consumer;
        let matched = match handler {
            Handler::Skill => deliver(parse_skill(line), |skill| c.skill(skill)),
            Handler::Item => deliver(parse_item(line), |item| c.item(item)),
            Handler::Structure => deliver(parse_structure(line), |s| c.structure(s)),
            Handler::Region => parse_region_line(line, c),
            Handler::Faction => parse_faction_line(line, c),
            Handler::Error => {
                c.faction_event(parse_message(MessageKind::Error, line));
                true
            }
            Handler::Event => {
                c.faction_event(parse_message(MessageKind::Event, line));
                true
            }
            Handler::Battle => parse_battle_line(line, c),
            Handler::Nothing => true,
        };
        if !matched {
            trace!(section = ?self.section, line, "unrecognized report line");
        }
    }
}

/// Passes a parsed entity on, returning whether there was one.
fn deliver<T>(entity: Option<T>, send: impl FnOnce(T)) -> bool {
    entity.map(send).is_some()
}
