use std::fmt;

/// Byte range into the script source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn with_end_from(self, other: Span) -> Self {
        let mut result = self;
        result.end = other.end;
        result
    }

    pub fn empty_at(pos: usize) -> Self {
        Span {
            start: pos,
            end: pos,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_end_from_keeps_start() {
        let a = Span { start: 2, end: 4 };
        let b = Span { start: 7, end: 11 };
        assert_eq!(a.with_end_from(b), Span { start: 2, end: 11 });
    }

    #[test]
    fn empty_at_has_no_width() {
        let span = Span::empty_at(5);
        assert_eq!(span.start, span.end);
        assert_eq!(span.to_string(), "5..5");
    }
}
