use regex::bytes::{Regex, RegexBuilder};
use tracing::debug;

use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};

/// A pattern together with the flags that govern its compilation.
#[derive(Debug, Clone, Default)]
pub struct PatternDefinition {
    pub text: String,
    /// Treat `text` as a literal string rather than a regex
    pub fixed_string: bool,
    pub ignore_case: bool,
    pub whole_word: bool,
}

impl From<&SearchConfig> for PatternDefinition {
    fn from(config: &SearchConfig) -> Self {
        Self {
            text: config.pattern.clone(),
            fixed_string: config.fixed_strings,
            ignore_case: config.ignore_case,
            whole_word: config.word_regexp,
        }
    }
}

/// Strategy for pattern matching
#[derive(Debug, Clone)]
pub enum MatchStrategy {
    /// Raw substring search; only valid for case-sensitive literals with no
    /// word-boundary requirement
    Literal(Vec<u8>),
    Regex(Regex),
}

/// A compiled, immutable line predicate. Compilation happens once; matching
/// is stateless and safe to call repeatedly.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    strategy: MatchStrategy,
}

impl PatternMatcher {
    /// Compiles a pattern definition into a matcher.
    ///
    /// Fixed-string patterns that need case folding or word boundaries are
    /// escaped and routed through the regex engine so the three flags stay
    /// independently composable.
    pub fn compile(def: &PatternDefinition) -> SearchResult<Self> {
        let strategy = if def.fixed_string && !def.ignore_case && !def.whole_word {
            debug!("compiled literal matcher for {:?}", def.text);
            MatchStrategy::Literal(def.text.clone().into_bytes())
        } else {
            let mut pattern = if def.fixed_string {
                regex::escape(&def.text)
            } else {
                def.text.clone()
            };
            if def.whole_word {
                pattern = format!(r"\b(?:{})\b", pattern);
            }
            let regex = RegexBuilder::new(&pattern)
                .case_insensitive(def.ignore_case)
                .build()
                .map_err(|e| SearchError::invalid_pattern(&def.text, e))?;
            debug!("compiled regex matcher for {:?}", def.text);
            MatchStrategy::Regex(regex)
        };
        Ok(Self { strategy })
    }

    /// Whether the line contains a match. Operates on raw bytes so that
    /// non-UTF-8 input is searchable.
    pub fn is_match(&self, line: &[u8]) -> bool {
        match &self.strategy {
            MatchStrategy::Literal(needle) => contains_subslice(line, needle),
            MatchStrategy::Regex(regex) => regex.is_match(line),
        }
    }
}

fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}
