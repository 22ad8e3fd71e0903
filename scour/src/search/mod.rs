//! The search pipeline: pattern compilation, per-line matching with context
//! tracking, and the source loop that drives a whole run.
//!
//! Sources are processed strictly sequentially and each line is consumed in
//! arrival order, because the context windows are stateful and file-scoped.
//! The only suspension point is waiting on the next unit of input.

pub mod context;
pub mod engine;
pub mod matcher;
pub mod processor;

pub use engine::{search, sources, Searcher};
pub use matcher::{PatternDefinition, PatternMatcher};
pub use processor::LineProcessor;
