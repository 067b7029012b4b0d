//! Buffered, rewindable stream reader with transparent line unfolding.
//!
//! The reader keeps a circular byte buffer over an arbitrary [`Read`] source.
//! Bytes stay in the buffer until they are consumed *and* no bookmark points
//! at or before them; when the write cursor would catch up with the oldest
//! retained byte the buffer doubles and is repacked at offset 0.
//!
//! A fold (the exact byte sequence CR LF SPACE, RFC 2425 §5.8.1) is skipped
//! before every unit is peeked or read, so none of the grammar above this
//! layer ever observes it.

use std::io::{ErrorKind, Read};

use super::error::{ParseError, ParseErrorKind};
use crate::error::VCardResult;

const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const FOLD: [u8; 3] = [b'\r', b'\n', b' '];

#[derive(Debug, Clone, Copy)]
struct Bookmark {
    index: usize,
    offset: usize,
    line: usize,
    line_start: usize,
}

/// Stream reader used by every grammar primitive.
pub struct VCardReader<R> {
    source: R,
    source_name: String,
    buffer: Vec<u8>,
    /// Ring index of the next unread byte.
    pos: usize,
    /// Ring index the next refill writes to.
    end: usize,
    /// Buffered bytes between `pos` and `end`.
    unread: usize,
    exhausted: bool,
    bookmark: Option<Bookmark>,
    /// Bytes handed out by `read` since the bookmark was set.
    since_bookmark: Vec<u8>,
    /// Physical bytes consumed since the start of the stream.
    offset: usize,
    line: usize,
    line_start: usize,
}

impl<R: Read> VCardReader<R> {
    /// Opens a reader over `source`, skipping a leading UTF-8 BOM.
    ///
    /// ## Errors
    /// Returns `VCardError::Io` if the first read from `source` fails.
    pub fn open(source: R, source_name: impl Into<String>, capacity: usize) -> VCardResult<Self> {
        let mut reader = Self {
            source,
            source_name: source_name.into(),
            buffer: vec![0; capacity.max(1)],
            pos: 0,
            end: 0,
            unread: 0,
            exhausted: false,
            bookmark: None,
            since_bookmark: Vec::new(),
            offset: 0,
            line: 1,
            line_start: 0,
        };

        if reader.ensure(BOM.len())? && (0..BOM.len()).all(|k| reader.byte_at(k) == BOM[k]) {
            reader.advance(BOM.len());
            reader.line_start = reader.offset;
        }

        Ok(reader)
    }

    /// Name of the underlying source, as reported in errors.
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Current ring buffer capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the 1-based `(line, column)` of the next unread byte.
    #[must_use]
    pub fn location(&self) -> (usize, usize) {
        (self.line, self.offset - self.line_start + 1)
    }

    /// Builds a parse error positioned at the next unread byte.
    #[must_use]
    pub fn error(&self, kind: ParseErrorKind, message: impl Into<String>) -> ParseError {
        let (line, column) = self.location();
        ParseError::new(kind, self.source_name.clone(), line, column, message)
    }

    /// Returns whether no more input remains.
    ///
    /// ## Errors
    /// Returns `VCardError::Io` if refilling the buffer fails.
    pub fn at_end(&mut self) -> VCardResult<bool> {
        Ok(self.peek_byte()?.is_none())
    }

    /// Returns the next byte as a `char` without consuming it.
    ///
    /// ## Errors
    /// Returns `VCardError::Io` if refilling the buffer fails.
    pub fn peek(&mut self) -> VCardResult<Option<char>> {
        Ok(self.peek_byte()?.map(char::from))
    }

    /// Consumes the next byte and returns it as a `char`.
    ///
    /// ## Errors
    /// Returns an `UnexpectedEof` parse error at end of input, or
    /// `VCardError::Io` if refilling the buffer fails.
    pub fn read(&mut self) -> VCardResult<char> {
        Ok(char::from(self.read_byte()?))
    }

    /// Returns the next UTF-8 codepoint without consuming it.
    ///
    /// Malformed sequences decode to U+FFFD.
    ///
    /// ## Errors
    /// Returns `VCardError::Io` if refilling the buffer fails.
    pub fn peek_rune(&mut self) -> VCardResult<Option<char>> {
        let Some(lead) = self.peek_byte()? else {
            return Ok(None);
        };

        let width = utf8_width(lead);
        let mut bytes = [lead, 0, 0, 0];
        let mut filled = 1;
        let mut k = 1;

        while filled < width {
            if self.is_fold_at(k)? {
                k += FOLD.len();
                continue;
            }
            if !self.ensure(k + 1)? || !is_continuation(self.byte_at(k)) {
                break;
            }
            bytes[filled] = self.byte_at(k);
            filled += 1;
            k += 1;
        }

        Ok(Some(decode_utf8(&bytes[..filled])))
    }

    /// Consumes the next UTF-8 codepoint.
    ///
    /// ## Errors
    /// Returns an `UnexpectedEof` parse error at end of input, or
    /// `VCardError::Io` if refilling the buffer fails.
    pub fn read_rune(&mut self) -> VCardResult<char> {
        let lead = self.read_byte()?;

        let width = utf8_width(lead);
        let mut bytes = [lead, 0, 0, 0];
        let mut filled = 1;

        while filled < width {
            match self.peek_byte()? {
                Some(b) if is_continuation(b) => {
                    bytes[filled] = self.read_byte()?;
                    filled += 1;
                }
                _ => break,
            }
        }

        Ok(decode_utf8(&bytes[..filled]))
    }

    /// Marks the current position as the rewind point, replacing any
    /// previous bookmark.
    pub fn set_bookmark(&mut self) {
        self.bookmark = Some(Bookmark {
            index: self.pos,
            offset: self.offset,
            line: self.line,
            line_start: self.line_start,
        });
        self.since_bookmark.clear();
    }

    /// Returns the characters read since the bookmark was set.
    #[must_use]
    pub fn read_since_bookmark(&self) -> String {
        String::from_utf8_lossy(&self.since_bookmark).into_owned()
    }

    /// Rewinds to the bookmark and clears it. Does nothing without one.
    pub fn return_to_bookmark(&mut self) {
        if let Some(mark) = self.bookmark.take() {
            self.unread += self.offset - mark.offset;
            self.pos = mark.index;
            self.offset = mark.offset;
            self.line = mark.line;
            self.line_start = mark.line_start;
        }
        self.since_bookmark.clear();
    }

    /// Clears the bookmark, keeping everything read since it.
    pub fn unset_bookmark(&mut self) {
        self.bookmark = None;
        self.since_bookmark.clear();
    }

    fn peek_byte(&mut self) -> VCardResult<Option<u8>> {
        self.skip_folds()?;
        if self.ensure(1)? {
            Ok(Some(self.byte_at(0)))
        } else {
            Ok(None)
        }
    }

    fn read_byte(&mut self) -> VCardResult<u8> {
        let Some(byte) = self.peek_byte()? else {
            return Err(self
                .error(ParseErrorKind::UnexpectedEof, "unexpected end of input")
                .into());
        };

        self.advance(1);
        if self.bookmark.is_some() {
            self.since_bookmark.push(byte);
        }
        if byte == b'\n' {
            self.line += 1;
            self.line_start = self.offset;
        }

        Ok(byte)
    }

    fn skip_folds(&mut self) -> VCardResult<()> {
        while self.is_fold_at(0)? {
            self.advance(2);
            self.line += 1;
            self.line_start = self.offset;
            self.advance(1);
        }
        Ok(())
    }

    fn is_fold_at(&mut self, k: usize) -> VCardResult<bool> {
        Ok(self.ensure(k + FOLD.len())?
            && (0..FOLD.len()).all(|i| self.byte_at(k + i) == FOLD[i]))
    }

    fn byte_at(&self, k: usize) -> u8 {
        self.buffer[(self.pos + k) % self.buffer.len()]
    }

    fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n) % self.buffer.len();
        self.unread -= n;
        self.offset += n;
    }

    /// Makes sure at least `n` unread bytes are buffered. Returns `false` if
    /// the source ran dry first.
    fn ensure(&mut self, n: usize) -> VCardResult<bool> {
        while self.unread < n {
            if self.fill()? == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn retained(&self) -> usize {
        self.unread + self.bookmark.map_or(0, |mark| self.offset - mark.offset)
    }

    fn oldest(&self) -> usize {
        self.bookmark.map_or(self.pos, |mark| mark.index)
    }

    fn fill(&mut self) -> VCardResult<usize> {
        if self.exhausted {
            return Ok(0);
        }
        if self.retained() == self.buffer.len() {
            self.grow();
        }

        let oldest = self.oldest();
        let writable = if self.end < oldest {
            oldest - self.end
        } else {
            self.buffer.len() - self.end
        };

        let read = loop {
            match self.source.read(&mut self.buffer[self.end..self.end + writable]) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        };

        if read == 0 {
            self.exhausted = true;
        } else {
            self.end = (self.end + read) % self.buffer.len();
            self.unread += read;
        }

        Ok(read)
    }

    fn grow(&mut self) {
        let capacity = self.buffer.len();
        let retained = self.retained();
        let oldest = self.oldest();

        let mut grown = vec![0; capacity * 2];
        let head = retained.min(capacity - oldest);
        grown[..head].copy_from_slice(&self.buffer[oldest..oldest + head]);
        grown[head..retained].copy_from_slice(&self.buffer[..retained - head]);

        if let Some(mark) = self.bookmark.as_mut() {
            mark.index = 0;
        }
        self.pos = retained - self.unread;
        self.end = retained;
        self.buffer = grown;

        tracing::trace!(from = capacity, to = capacity * 2, "Grew reader buffer");
    }
}

fn utf8_width(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

fn decode_utf8(bytes: &[u8]) -> char {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VCardError;

    /// Hands out at most `chunk` bytes per `read` call to force refills.
    struct Trickle<'a> {
        data: &'a [u8],
        chunk: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.chunk.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    fn reader(input: &str) -> VCardReader<&[u8]> {
        VCardReader::open(input.as_bytes(), "input", 16).unwrap()
    }

    fn read_n<R: Read>(reader: &mut VCardReader<R>, n: usize) -> String {
        (0..n).map(|_| reader.read().unwrap()).collect()
    }

    #[test]
    fn reads_and_peeks() {
        let mut r = reader("AB");
        assert_eq!(r.peek().unwrap(), Some('A'));
        assert_eq!(r.read().unwrap(), 'A');
        assert_eq!(r.read().unwrap(), 'B');
        assert!(r.at_end().unwrap());
        assert_eq!(r.peek().unwrap(), None);
    }

    #[test]
    fn read_past_end_is_eof() {
        let mut r = reader("A");
        r.read().unwrap();
        let err = r.read().unwrap_err();
        match err {
            VCardError::Parse(e) => assert_eq!(e.kind, ParseErrorKind::UnexpectedEof),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn skips_bom() {
        let mut input = BOM.to_vec();
        input.extend_from_slice(b"FN");
        let mut r = VCardReader::open(input.as_slice(), "input", 8).unwrap();
        assert_eq!(r.location(), (1, 1));
        assert_eq!(read_n(&mut r, 2), "FN");
    }

    #[test]
    fn unfolds_crlf_space() {
        let mut r = reader("AB\r\n CD\r\n EF");
        assert_eq!(read_n(&mut r, 6), "ABCDEF");
        assert!(r.at_end().unwrap());
    }

    #[test]
    fn leaves_other_line_breaks_alone() {
        let mut r = reader("A\r\nB\r\n\tC");
        assert_eq!(read_n(&mut r, 8), "A\r\nB\r\n\tC");
    }

    #[test]
    fn unfolds_inside_multibyte_rune() {
        let mut r = VCardReader::open(&b"\xC3\r\n \xA9!"[..], "input", 4).unwrap();
        assert_eq!(r.peek_rune().unwrap(), Some('é'));
        assert_eq!(r.read_rune().unwrap(), 'é');
        assert_eq!(r.read_rune().unwrap(), '!');
    }

    #[test]
    fn malformed_utf8_is_replaced() {
        let mut r = VCardReader::open(&b"\xE6A"[..], "input", 4).unwrap();
        assert_eq!(r.read_rune().unwrap(), char::REPLACEMENT_CHARACTER);
        assert_eq!(r.read_rune().unwrap(), 'A');
    }

    #[test]
    fn tracks_lines_and_columns() {
        let mut r = reader("AB\r\nCD");
        assert_eq!(r.location(), (1, 1));
        read_n(&mut r, 4);
        assert_eq!(r.location(), (2, 1));
        r.read().unwrap();
        assert_eq!(r.location(), (2, 2));
    }

    #[test]
    fn bookmark_rewind_replays_same_characters() {
        let text = "BEGIN:vCard\r\nFN:Somebody With A Long\r\n  Name\r\n";
        let source = Trickle {
            data: text.as_bytes(),
            chunk: 3,
        };
        let mut r = VCardReader::open(source, "input", 4).unwrap();
        r.read().unwrap();

        r.set_bookmark();
        let first = read_n(&mut r, 30);
        assert_eq!(r.read_since_bookmark(), first);
        r.return_to_bookmark();
        let second = read_n(&mut r, 30);

        assert_eq!(first, second);
        assert!(r.capacity() > 4);
    }

    #[test]
    fn unset_bookmark_commits() {
        let mut r = reader("ABCD");
        r.set_bookmark();
        read_n(&mut r, 2);
        r.unset_bookmark();
        r.return_to_bookmark();
        assert_eq!(r.read().unwrap(), 'C');
        assert_eq!(r.read_since_bookmark(), "");
    }

    #[test]
    fn rewind_restores_location() {
        let mut r = reader("A\r\nB");
        r.set_bookmark();
        read_n(&mut r, 4);
        assert_eq!(r.location(), (2, 2));
        r.return_to_bookmark();
        assert_eq!(r.location(), (1, 1));
    }

    #[test]
    fn grows_when_bookmark_pins_buffer() {
        let text = "X".repeat(100);
        let mut r = VCardReader::open(text.as_bytes(), "input", 8).unwrap();
        r.set_bookmark();
        assert_eq!(read_n(&mut r, 100), text);
        assert!(r.capacity() >= 100);
        r.return_to_bookmark();
        assert_eq!(read_n(&mut r, 100), text);
    }

    #[test]
    fn steady_reading_does_not_grow() {
        let text = "Y".repeat(1000);
        let mut r = VCardReader::open(text.as_bytes(), "input", 8).unwrap();
        assert_eq!(read_n(&mut r, 1000), text);
        assert_eq!(r.capacity(), 8);
    }
}
