use std::io::Read;

use bstr::ByteSlice;
use tracing::{debug, warn};

use super::{BLOCK_CLOSE, BLOCK_OPEN, Lexer};
use crate::{
    diagnostics::ErrorSink,
    error::{LexerError, SyntaxErrorKind},
    token::{TextRef, Token},
};

/// Outcome of one recognizer attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Scan {
    /// The input does not start with this kind of token; try the next one.
    NotApplicable,
    Matched(Token),
    /// The construct started but is broken and the error has been reported.
    /// Carries the token for the part recognized before the breakage; the
    /// lexer hands it out followed by [`Token::Error`].
    Malformed(Token),
}

#[derive(Debug, Clone, Copy)]
pub(super) enum Recognizer {
    EndOfInput,
    /// A single byte mapped to its token.
    Punctuation(u8, Token),
    End,
    Symbol,
    Integer,
    Block,
}

impl Recognizer {
    /// Earlier recognizers take precedence.
    pub(super) const PRIORITY: [Recognizer; 8] = [
        Recognizer::EndOfInput,
        Recognizer::Punctuation(b'/', Token::Slash),
        Recognizer::Punctuation(b'*', Token::Star),
        Recognizer::Punctuation(b'.', Token::Dot),
        Recognizer::End,
        Recognizer::Symbol,
        Recognizer::Integer,
        Recognizer::Block,
    ];

    pub(super) fn scan<R: Read, S: ErrorSink>(
        self,
        lexer: &mut Lexer<R, S>,
    ) -> Result<Scan, LexerError> {
        match self {
            Recognizer::EndOfInput => lexer.read_end_of_input(),
            Recognizer::Punctuation(byte, token) => lexer.read_punctuation(byte, token),
            Recognizer::End => lexer.read_end(),
            Recognizer::Symbol => lexer.read_symbol(),
            Recognizer::Integer => lexer.read_integer(),
            Recognizer::Block => lexer.read_block(),
        }
    }
}

impl<R: Read, S: ErrorSink> Lexer<R, S> {
    fn read_end_of_input(&mut self) -> Result<Scan, LexerError> {
        Ok(match self.source.peek(0)? {
            None => Scan::Matched(Token::EndOfInput),
            Some(_) => Scan::NotApplicable,
        })
    }

    fn read_punctuation(&mut self, byte: u8, token: Token) -> Result<Scan, LexerError> {
        if self.source.peek(0)? != Some(byte) {
            return Ok(Scan::NotApplicable);
        }
        self.source.consume()?;
        Ok(Scan::Matched(token))
    }

    /// Any number of consecutive newlines make a single `End`.
    fn read_end(&mut self) -> Result<Scan, LexerError> {
        let mut scan = Scan::NotApplicable;
        while self.source.peek(0)? == Some(b'\n') {
            self.source.consume()?;
            scan = Scan::Matched(Token::End);
        }
        Ok(scan)
    }

    fn read_symbol(&mut self) -> Result<Scan, LexerError> {
        if !self.source.peek(0)?.is_some_and(|b| b.is_ascii_alphabetic()) {
            return Ok(Scan::NotApplicable);
        }
        let text = self.capture_while(u8::is_ascii_alphanumeric)?;
        Ok(Scan::Matched(Token::String(text)))
    }

    /// The digits only live in the arena long enough to be parsed.
    fn read_integer(&mut self) -> Result<Scan, LexerError> {
        if !self.source.peek(0)?.is_some_and(|b| b.is_ascii_digit()) {
            return Ok(Scan::NotApplicable);
        }
        let mark = self.text.len();
        let digits = self.capture_while(u8::is_ascii_digit)?;
        let value = parse_integer(self.text.get(digits));
        self.text.truncate(mark);
        Ok(Scan::Matched(Token::Integer(value)))
    }

    /// `{{{`, then raw bytes up to the first `}}}`. Returns the open marker
    /// and queues the body and the close marker.
    ///
    /// If the stream ends inside the block, the open marker is still handed
    /// out, followed by [`Token::Error`]; the partial body is discarded.
    fn read_block(&mut self) -> Result<Scan, LexerError> {
        if !self.source.matches(BLOCK_OPEN)? {
            return Ok(Scan::NotApplicable);
        }
        self.source.skip(BLOCK_OPEN.len())?;

        let start = self.text.reserve();
        loop {
            if self.source.matches(BLOCK_CLOSE)? {
                self.source.skip(BLOCK_CLOSE.len())?;
                break;
            }
            match self.source.consume()? {
                Some(byte) => self.text.append(byte)?,
                None => {
                    self.text.truncate(start);
                    self.syntax_error(SyntaxErrorKind::UnclosedBlock);
                    return Ok(Scan::Malformed(Token::BlockOpen));
                }
            }
        }

        let body = self.text.terminate(start)?;
        debug!(len = body.len, "scanned block");
        self.queue.enqueue(Token::String(body));
        self.queue.enqueue(Token::BlockClose);
        Ok(Scan::Matched(Token::BlockOpen))
    }

    /// Copies bytes into a new arena entry while `accept` holds.
    fn capture_while(&mut self, accept: fn(&u8) -> bool) -> Result<TextRef, LexerError> {
        let start = self.text.reserve();
        while let Some(byte) = self.source.peek(0)? {
            if !accept(&byte) {
                break;
            }
            self.text.append(byte)?;
            self.source.consume()?;
        }
        Ok(self.text.terminate(start)?)
    }
}

/// Decimal value of an ASCII digit run; saturates at `i64::MAX`.
fn parse_integer(digits: &[u8]) -> i64 {
    match digits.to_str().ok().and_then(|s| s.parse().ok()) {
        Some(value) => value,
        None => {
            warn!(digits = %digits.as_bstr(), "integer literal out of range");
            i64::MAX
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(b"0", 0)]
    #[case(b"007", 7)]
    #[case(b"9223372036854775807", i64::MAX)]
    #[case(b"9223372036854775808", i64::MAX)]
    #[case(b"123456789012345678901234567890", i64::MAX)]
    fn parse_integer_cases(#[case] digits: &[u8], #[case] expected: i64) {
        assert_eq!(parse_integer(digits), expected);
    }

    #[test]
    fn priority_order() {
        let names: Vec<_> = Recognizer::PRIORITY
            .iter()
            .map(|r| match r {
                Recognizer::EndOfInput => "eof",
                Recognizer::Punctuation(b'/', _) => "/",
                Recognizer::Punctuation(b'*', _) => "*",
                Recognizer::Punctuation(b'.', _) => ".",
                Recognizer::Punctuation(..) => "?",
                Recognizer::End => "end",
                Recognizer::Symbol => "symbol",
                Recognizer::Integer => "integer",
                Recognizer::Block => "block",
            })
            .collect();
        assert_eq!(
            names,
            ["eof", "/", "*", ".", "end", "symbol", "integer", "block"]
        );
    }
}
