use std::collections::VecDeque;

use crate::source::Line;

/// Fixed-capacity look-behind window of recent lines.
///
/// Holds at most `capacity` lines regardless of input size; pushing into a
/// full buffer evicts the oldest entry. A capacity of zero disables
/// buffering entirely.
#[derive(Debug)]
pub struct ContextBuffer {
    lines: VecDeque<Line>,
    capacity: usize,
}

impl ContextBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: Line) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Returns the buffered lines in arrival order and clears the buffer.
    pub fn drain(&mut self) -> impl Iterator<Item = Line> + '_ {
        self.lines.drain(..)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(number: u64) -> Line {
        Line::new(format!("line {}", number).into_bytes(), number)
    }

    #[test]
    fn test_fifo_eviction() {
        let mut buffer = ContextBuffer::new(2);
        buffer.push(line(1));
        buffer.push(line(2));
        buffer.push(line(3));
        assert_eq!(buffer.len(), 2);

        let numbers: Vec<u64> = buffer.drain().map(|l| l.number).collect();
        assert_eq!(numbers, vec![2, 3]);
    }

    #[test]
    fn test_drain_clears() {
        let mut buffer = ContextBuffer::new(3);
        buffer.push(line(1));
        buffer.drain().for_each(drop);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_zero_capacity_holds_nothing() {
        let mut buffer = ContextBuffer::new(0);
        buffer.push(line(1));
        buffer.push(line(2));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_bounded_under_large_input() {
        let mut buffer = ContextBuffer::new(4);
        for i in 1..=100_000 {
            buffer.push(line(i));
            assert!(buffer.len() <= 4);
        }
        let numbers: Vec<u64> = buffer.drain().map(|l| l.number).collect();
        assert_eq!(numbers, vec![99_997, 99_998, 99_999, 100_000]);
    }
}
