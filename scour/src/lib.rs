//! scour: a line-oriented pattern search engine.
//!
//! Compiles a pattern (regex or literal) into a matcher, streams lines from
//! standard input or named files, applies match, inversion, and context
//! rules, and formats results incrementally. See the `scour-cli` crate for
//! the command-line front end.

pub mod config;
pub mod errors;
pub mod printer;
pub mod results;
pub mod search;
pub mod source;

pub use config::SearchConfig;
pub use errors::{SearchError, SearchResult};
pub use printer::Printer;
pub use results::{MatchResult, NullSink, ResultSink, RunSummary};
pub use search::{search, Searcher};
pub use source::{InputSource, Line};
