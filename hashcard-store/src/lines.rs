//! Predicate-filtered line streaming over a mapped byte buffer.

use crate::error::{Error, Result};

/// Lazy iterator over the lines of a byte buffer.
///
/// Each yielded line keeps its trailing newline; the final line of an
/// unterminated buffer is yielded without one. Lines are decoded as
/// UTF-8 before the predicate sees them, and a line that fails to
/// decode is a hard error. The stream is single-pass; restart by
/// remapping the file and building a new stream.
pub struct LineStream<'a, P> {
    buf: &'a [u8],
    pos: usize,
    predicate: P,
}

impl<'a, P> LineStream<'a, P>
where
    P: FnMut(&str) -> bool,
{
    /// Stream the lines of `buf` that satisfy `predicate`.
    pub fn new(buf: &'a [u8], predicate: P) -> Self {
        Self {
            buf,
            pos: 0,
            predicate,
        }
    }
}

impl<'a, P> Iterator for LineStream<'a, P>
where
    P: FnMut(&str) -> bool,
{
    type Item = Result<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        let buf = self.buf;
        while self.pos < buf.len() {
            let start = self.pos;
            let end = match buf[start..].iter().position(|&b| b == b'\n') {
                Some(nl) => start + nl + 1,
                None => buf.len(),
            };
            self.pos = end;

            let Ok(line) = std::str::from_utf8(&buf[start..end]) else {
                return Some(Err(Error::InvalidEncoding { offset: start }));
            };
            if (self.predicate)(line) {
                return Some(Ok(line));
            }
        }
        None
    }
}
