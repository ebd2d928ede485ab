//! Forward segment iteration: drives [`crate::Checker::is_break_at`] across every valid
//! position and yields a record per MANDATORY/ALLOWED verdict.

use crate::class::BreakType;
use crate::error::LbcError;
use crate::Checker;

/// One yielded segment: the text since the previous break (or start of text), up to but not
/// including `index`, and the verdict that ended it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Code-unit position of the break that ended this segment.
    pub index: usize,
    /// Always [`BreakType::Mandatory`] or [`BreakType::Allowed`].
    pub break_type: BreakType,
    /// The text from the previous yielded segment's end (or 0) up to `index`.
    pub text: String,
}

/// Iterator returned by [`Checker::iterate`]. Scans `0 ..= text_length`, skipping UNKNOWN and
/// FORBIDDEN positions, and yields once per MANDATORY/ALLOWED position.
#[derive(Debug)]
pub struct Segments<'a> {
    checker: &'a mut Checker,
    pos: usize,
    segment_start: usize,
}

impl<'a> Segments<'a> {
    pub(crate) fn new(checker: &'a mut Checker) -> Self {
        Segments { checker, pos: 0, segment_start: 0 }
    }
}

impl Iterator for Segments<'_> {
    type Item = Result<Segment, LbcError>;

    fn next(&mut self) -> Option<Self::Item> {
        let text_length = self.checker.code_unit_len();
        while self.pos <= text_length {
            let position = self.pos;
            self.pos += 1;
            let verdict = match self.checker.is_break_at(position) {
                Ok(v) => v,
                Err(e) => return Some(Err(e)),
            };
            if matches!(verdict, BreakType::Mandatory | BreakType::Allowed) {
                let text = self.checker.text_slice(self.segment_start, position).to_owned();
                self.segment_start = position;
                return Some(Ok(Segment { index: position, break_type: verdict, text }));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::make_checker;

    #[test]
    fn hello_breaker_scenario() {
        let mut checker = make_checker(None, None, None, None).unwrap();
        checker.set_text("Hello, breaker");
        let segments: Vec<Segment> = checker.iterate().collect::<Result<_, _>>().unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].index, 7);
        assert_eq!(segments[0].break_type, BreakType::Allowed);
        assert_eq!(segments[0].text, "Hello, ");
        assert_eq!(segments[1].index, 14);
        assert_eq!(segments[1].break_type, BreakType::Mandatory);
        assert_eq!(segments[1].text, "breaker");
    }

    #[test]
    fn iterator_segments_cover_the_whole_text() {
        let mut checker = make_checker(None, None, None, None).unwrap();
        let text = "a\nb";
        checker.set_text(text);
        let segments: Vec<Segment> = checker.iterate().collect::<Result<_, _>>().unwrap();
        let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, text);
        assert_eq!(segments.last().unwrap().index, text.len());
    }
}
