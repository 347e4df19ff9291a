use std::ops::Range;

/// Char range of a token or node in the script source.
#[derive(Debug, Clone, Copy, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Span {
        Span { start, end }
    }

    pub fn to_range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn extend(&self, span: Span) -> Span {
        Span {
            start: self.start,
            end: span.end,
        }
    }
}

impl Eq for Span {}

impl PartialEq for Span {
    fn eq(&self, _: &Self) -> bool {
        // spans never take part in comparing tokens or nodes
        true
    }
}

impl From<Range<usize>> for Span {
    fn from(r: Range<usize>) -> Self {
        Self {
            start: r.start,
            end: r.end,
        }
    }
}
