use std::io::BufRead;

use tracing::{debug, trace};

use super::context::ContextBuffer;
use super::matcher::PatternMatcher;
use crate::errors::SearchResult;
use crate::results::{MatchResult, ResultSink};
use crate::source::LineReader;

/// Applies the matcher to a single source, line by line, and routes the
/// selected lines to a sink.
///
/// Lines are consumed strictly in arrival order; context-window correctness
/// depends on it. The look-behind buffer holds at most `context_before`
/// lines, so memory stays bounded regardless of input size.
#[derive(Debug)]
pub struct LineProcessor {
    matcher: PatternMatcher,
    invert: bool,
    context_before: usize,
    context_after: usize,
}

impl LineProcessor {
    pub fn new(
        matcher: PatternMatcher,
        invert: bool,
        context_before: usize,
        context_after: usize,
    ) -> Self {
        Self {
            matcher,
            invert,
            context_before,
            context_after,
        }
    }

    /// Streams one source through the matcher, emitting matches and context
    /// to the sink in input order. Returns the number of matching lines.
    ///
    /// A line inside the trailing window of one match and the leading window
    /// of the next is emitted exactly once: trailing context is emitted
    /// immediately and never enters the look-behind buffer.
    pub fn process<R: BufRead, S: ResultSink + ?Sized>(
        &self,
        reader: R,
        sink: &mut S,
    ) -> SearchResult<u64> {
        let mut before = ContextBuffer::new(self.context_before);
        let mut after_remaining = 0usize;
        let mut match_count = 0u64;

        for line in LineReader::new(reader) {
            let line = line?;
            let matched = self.matcher.is_match(&line.bytes) != self.invert;
            trace!(number = line.number, matched, "processed line");

            if matched {
                for buffered in before.drain() {
                    sink.emit(&MatchResult::context(buffered))?;
                }
                sink.emit(&MatchResult::matched(line))?;
                match_count += 1;
                after_remaining = self.context_after;
            } else if after_remaining > 0 {
                // Trailing context is emitted immediately; it never re-enters
                // the look-behind buffer, which is what merges ranges.
                sink.emit(&MatchResult::context(line))?;
                after_remaining -= 1;
            } else {
                before.push(line);
            }
        }

        debug!(match_count, "source processed");
        Ok(match_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::matcher::PatternDefinition;
    use std::io::Cursor;

    #[derive(Default)]
    struct CollectSink {
        emitted: Vec<(u64, String, bool)>,
    }

    impl ResultSink for CollectSink {
        fn emit(&mut self, result: &MatchResult) -> SearchResult<()> {
            self.emitted.push((
                result.line.number,
                result.line.text_lossy().into_owned(),
                result.is_context,
            ));
            Ok(())
        }
    }

    fn processor(pattern: &str, invert: bool, before: usize, after: usize) -> LineProcessor {
        let matcher = PatternMatcher::compile(&PatternDefinition {
            text: pattern.to_string(),
            ..Default::default()
        })
        .unwrap();
        LineProcessor::new(matcher, invert, before, after)
    }

    fn run(processor: &LineProcessor, input: &str) -> (u64, Vec<(u64, String, bool)>) {
        let mut sink = CollectSink::default();
        let count = processor
            .process(Cursor::new(input.as_bytes().to_vec()), &mut sink)
            .unwrap();
        (count, sink.emitted)
    }

    #[test]
    fn test_basic_match() {
        let (count, emitted) = run(&processor("an", false, 0, 0), "apple\nbanana\ncherry\n");
        assert_eq!(count, 1);
        assert_eq!(emitted, vec![(2, "banana".to_string(), false)]);
    }

    #[test]
    fn test_no_match() {
        let (count, emitted) = run(&processor("xyz", false, 0, 0), "apple\nbanana\ncherry\n");
        assert_eq!(count, 0);
        assert!(emitted.is_empty());
    }

    #[test]
    fn test_invert_match() {
        let (count, emitted) = run(&processor("an", true, 0, 0), "apple\nbanana\ncherry\n");
        assert_eq!(count, 2);
        let numbers: Vec<u64> = emitted.iter().map(|e| e.0).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn test_before_and_after_context() {
        let (count, emitted) = run(&processor("MATCH", false, 1, 1), "a\nb\nMATCH\nc\nd\n");
        assert_eq!(count, 1);
        assert_eq!(
            emitted,
            vec![
                (2, "b".to_string(), true),
                (3, "MATCH".to_string(), false),
                (4, "c".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_before_context_flushed_in_order() {
        let (_, emitted) = run(&processor("MATCH", false, 3, 0), "a\nb\nc\nMATCH\n");
        let numbers: Vec<u64> = emitted.iter().map(|e| e.0).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_before_window_bounded() {
        let (_, emitted) = run(&processor("MATCH", false, 2, 0), "a\nb\nc\nd\nMATCH\n");
        let numbers: Vec<u64> = emitted.iter().map(|e| e.0).collect();
        assert_eq!(numbers, vec![3, 4, 5]);
    }

    #[test]
    fn test_overlapping_context_emitted_once() {
        // The line between the two matches is trailing context for the first
        // and would be leading context for the second; it must appear once.
        let (count, emitted) = run(&processor("MATCH", false, 1, 1), "MATCH\ngap\nMATCH\n");
        assert_eq!(count, 2);
        assert_eq!(
            emitted,
            vec![
                (1, "MATCH".to_string(), false),
                (2, "gap".to_string(), true),
                (3, "MATCH".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_adjacent_matches_reset_after_window() {
        let (count, emitted) = run(&processor("M", false, 0, 2), "M\nM\nx\ny\nz\n");
        assert_eq!(count, 2);
        let numbers: Vec<u64> = emitted.iter().map(|e| e.0).collect();
        // After-window restarts at the second match
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert!(!emitted[1].2, "second M is a match, not context");
    }

    #[test]
    fn test_context_free_run_equals_match_set_of_context_run() {
        let input = "a\nMATCH one\nb\nc\nMATCH two\nd\n";
        let (_, plain) = run(&processor("MATCH", false, 0, 0), input);
        let (_, with_context) = run(&processor("MATCH", false, 2, 2), input);
        let matches_only: Vec<_> = with_context.into_iter().filter(|e| !e.2).collect();
        assert_eq!(plain, matches_only);
    }

    #[test]
    fn test_double_invert_restores_match_set() {
        let input = "apple\nbanana\ncherry\n";
        let (_, original) = run(&processor("an", false, 0, 0), input);
        // Inverting the inverted selection reproduces the original set
        let (_, inverted) = run(&processor("an", true, 0, 0), input);
        let all: Vec<u64> = vec![1, 2, 3];
        let inverted_numbers: Vec<u64> = inverted.iter().map(|e| e.0).collect();
        let reinverted: Vec<u64> = all
            .into_iter()
            .filter(|n| !inverted_numbers.contains(n))
            .collect();
        assert_eq!(
            original.iter().map(|e| e.0).collect::<Vec<_>>(),
            reinverted
        );
    }
}
