//! Search result types: the per-line emission record, the sink that
//! consumes it, and the run-level summary that determines exit status.

use crate::errors::SearchResult;
use crate::source::{InputSource, Line};

/// Process exit code when at least one line matched.
pub const EXIT_MATCH: i32 = 0;
/// Process exit code when no line matched and no error occurred.
pub const EXIT_NO_MATCH: i32 = 1;
/// Process exit code for usage, pattern, or input errors.
pub const EXIT_ERROR: i32 = 2;
/// Process exit code when the output sink failed (e.g. a closed pipe).
pub const EXIT_OUTPUT_ERROR: i32 = 3;

/// A line selected for output, either because it matched (post-inversion)
/// or because it falls inside a context window around a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub line: Line,
    /// True when the line is shown only because of a context window
    pub is_context: bool,
}

impl MatchResult {
    pub fn matched(line: Line) -> Self {
        Self {
            line,
            is_context: false,
        }
    }

    pub fn context(line: Line) -> Self {
        Self {
            line,
            is_context: true,
        }
    }
}

/// Consumes match results as they are produced, one source at a time.
///
/// The engine calls `begin_source` before the first result of each source,
/// then `emit` for every selected line in input order. Implementations must
/// not buffer beyond a single line so output stays streaming.
pub trait ResultSink {
    fn begin_source(&mut self, source: &InputSource) -> SearchResult<()> {
        let _ = source;
        Ok(())
    }

    fn emit(&mut self, result: &MatchResult) -> SearchResult<()>;
}

/// Sink that discards all results; used for count-only and quiet modes
/// where the match count from the engine is all that matters.
#[derive(Debug, Default)]
pub struct NullSink;

impl ResultSink for NullSink {
    fn emit(&mut self, _result: &MatchResult) -> SearchResult<()> {
        Ok(())
    }
}

/// Accumulated outcome of a whole run, across all sources.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Match count per source searched to completion, in input order
    pub source_counts: Vec<(InputSource, u64)>,
    /// Total number of matching (non-context) lines
    pub match_count: u64,
    /// Whether any source was opened successfully
    pub saw_any_input: bool,
    /// Whether any per-source error occurred
    pub error_occurred: bool,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_source(&mut self, source: InputSource, match_count: u64) {
        self.saw_any_input = true;
        self.match_count += match_count;
        self.source_counts.push((source, match_count));
    }

    pub fn sources_searched(&self) -> usize {
        self.source_counts.len()
    }

    pub fn record_error(&mut self) {
        self.error_occurred = true;
    }

    /// Exit status per the grep convention: errors dominate, then
    /// match/no-match.
    pub fn exit_code(&self) -> i32 {
        if self.error_occurred {
            EXIT_ERROR
        } else if self.match_count > 0 {
            EXIT_MATCH
        } else {
            EXIT_NO_MATCH
        }
    }
}
