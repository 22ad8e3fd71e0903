//! Streaming output formatting.
//!
//! The printer renders each selected line the moment it is emitted and
//! flushes after every write, so large inputs show progress and an
//! interrupted run never leaves a partially written line. Matches and
//! context lines use `:` and `-` field separators respectively, following
//! the grep convention, with a `--` line between non-adjacent context
//! groups.

use std::io::Write;

use colored::Colorize;

use crate::errors::{SearchError, SearchResult};
use crate::results::{MatchResult, ResultSink};
use crate::source::InputSource;

/// Writes match results to an output sink as they arrive.
#[derive(Debug)]
pub struct Printer<W: Write> {
    writer: W,
    show_filename: bool,
    line_numbers: bool,
    group_separators: bool,
    color: bool,
    current_source: String,
    source_changed: bool,
    last_emitted: Option<u64>,
    printed_any: bool,
}

impl<W: Write> Printer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            show_filename: false,
            line_numbers: true,
            group_separators: false,
            color: false,
            current_source: String::new(),
            source_changed: false,
            last_emitted: None,
            printed_any: false,
        }
    }

    /// Prefix every output line with the source name
    pub fn with_filename(mut self, yes: bool) -> Self {
        self.show_filename = yes;
        self
    }

    /// Prefix every output line with its line number (on by default)
    pub fn line_numbers(mut self, yes: bool) -> Self {
        self.line_numbers = yes;
        self
    }

    /// Print `--` between non-adjacent context groups; enabled when context
    /// windows are configured
    pub fn group_separators(mut self, yes: bool) -> Self {
        self.group_separators = yes;
        self
    }

    /// Colorize source names and line numbers
    pub fn color(mut self, yes: bool) -> Self {
        self.color = yes;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_result(&mut self, result: &MatchResult) -> std::io::Result<()> {
        let number = result.line.number;

        let adjacent = !self.source_changed
            && self.last_emitted.is_some_and(|last| number <= last + 1);
        if self.group_separators && self.printed_any && !adjacent {
            writeln!(self.writer, "--")?;
        }

        let sep = if result.is_context { "-" } else { ":" };
        if self.show_filename {
            if self.color {
                write!(self.writer, "{}{}", self.current_source.blue(), sep)?;
            } else {
                write!(self.writer, "{}{}", self.current_source, sep)?;
            }
        }
        if self.line_numbers {
            if self.color {
                write!(self.writer, "{}{}", number.to_string().green(), sep)?;
            } else {
                write!(self.writer, "{}{}", number, sep)?;
            }
        }
        self.writer.write_all(&result.line.bytes)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        self.source_changed = false;
        self.last_emitted = Some(number);
        self.printed_any = true;
        Ok(())
    }
}

impl<W: Write> ResultSink for Printer<W> {
    fn begin_source(&mut self, source: &InputSource) -> SearchResult<()> {
        self.current_source = source.to_string();
        self.source_changed = true;
        self.last_emitted = None;
        Ok(())
    }

    fn emit(&mut self, result: &MatchResult) -> SearchResult<()> {
        self.write_result(result).map_err(SearchError::output_error)
    }
}
