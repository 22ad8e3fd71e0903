use tracing::{debug, info};

use super::matcher::{PatternDefinition, PatternMatcher};
use super::processor::LineProcessor;
use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};
use crate::results::{ResultSink, RunSummary};
use crate::source::InputSource;

/// Compiled search state: one matcher plus one processor, reused across all
/// sources of a run.
#[derive(Debug)]
pub struct Searcher {
    processor: LineProcessor,
}

impl Searcher {
    /// Compiles the pattern from the configuration. Fails with
    /// [`SearchError::InvalidPattern`] on bad regex syntax.
    pub fn new(config: &SearchConfig) -> SearchResult<Self> {
        let matcher = PatternMatcher::compile(&PatternDefinition::from(config))?;
        Ok(Self {
            processor: LineProcessor::new(
                matcher,
                config.invert_match,
                config.context_before,
                config.context_after,
            ),
        })
    }

    /// Searches a single source to completion, returning its match count.
    /// Read failures are attributed to the source's path.
    pub fn search_source<S: ResultSink + ?Sized>(
        &self,
        source: &InputSource,
        sink: &mut S,
    ) -> SearchResult<u64> {
        debug!(%source, "searching source");
        let reader = source.open()?;
        sink.begin_source(source)?;
        self.processor.process(reader, sink).map_err(|e| match e {
            SearchError::IoError(io) => match source.path() {
                Some(path) => SearchError::source_error(path, io),
                None => SearchError::IoError(io),
            },
            other => other,
        })
    }
}

/// The sources a configuration names, in order; no paths means stdin.
pub fn sources(config: &SearchConfig) -> Vec<InputSource> {
    if config.paths.is_empty() {
        vec![InputSource::Stdin]
    } else {
        config
            .paths
            .iter()
            .map(|p| InputSource::file(p.clone()))
            .collect()
    }
}

/// Runs a full search over every configured source, sequentially.
///
/// Per-source failures are handed to `on_error` and recorded in the summary
/// without aborting the remaining sources. Output-sink failures abort the
/// run immediately and are returned as the outer error.
pub fn search<S, F>(
    config: &SearchConfig,
    sink: &mut S,
    mut on_error: F,
) -> SearchResult<RunSummary>
where
    S: ResultSink + ?Sized,
    F: FnMut(&InputSource, &SearchError),
{
    info!(pattern = %config.pattern, "starting search");
    let searcher = Searcher::new(config)?;
    let mut summary = RunSummary::new();

    for source in sources(config) {
        match searcher.search_source(&source, sink) {
            Ok(count) => summary.record_source(source, count),
            Err(e) if e.is_output_error() => return Err(e),
            Err(e) => {
                on_error(&source, &e);
                summary.record_error();
            }
        }
    }

    info!(
        matches = summary.match_count,
        sources = summary.sources_searched(),
        "search complete"
    );
    Ok(summary)
}
