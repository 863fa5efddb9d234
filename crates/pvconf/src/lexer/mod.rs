//! Lexer: turns a config byte stream into tokens.
//!
//! Overview
//! - The lexer owns a [`ByteSource`] (input buffer with lookahead), a
//!   [`TextArena`] (symbol and block-body text) and a [`TokenQueue`] (tokens
//!   produced ahead of time).
//! - [`Lexer::next_token`] hands out queued tokens first. Otherwise it skips
//!   blanks and runs the recognizers in priority order: end of input, `/`,
//!   `*`, `.`, newlines, symbol, integer, block. The first one that applies
//!   produces the token.
//! - A block `{{{ body }}}` is scanned in one go. The call returns
//!   [`Token::BlockOpen`] and queues the body and [`Token::BlockClose`] for the
//!   next two calls. If the stream ends inside the block, the open marker is
//!   followed by [`Token::Error`] instead.
//!
//! Errors
//! - Syntax errors go to the [`ErrorSink`] as
//!   `config parse error:<line>:<col> <description>` and come back as
//!   [`Token::Error`]. The lexer keeps working afterwards; stopping is the
//!   caller's decision.
//! - Read and allocation failures are returned as [`LexerError`].

mod recognizer;

use std::{io::Read, iter::FusedIterator};

use bstr::BStr;
use tracing::trace;

use self::recognizer::{Recognizer, Scan};
use crate::{
    diagnostics::{ErrorSink, TracingSink},
    error::{LexerError, SyntaxError, SyntaxErrorKind},
    options::LexerOptions,
    source::ByteSource,
    text_arena::TextArena,
    token::{Position, TextRef, Token},
    token_queue::TokenQueue,
};

/// Opens a block.
pub const BLOCK_OPEN: &[u8; 3] = b"{{{";
/// Closes a block.
pub const BLOCK_CLOSE: &[u8; 3] = b"}}}";

/// Tokenizer over a config byte stream.
///
/// The reader is only read from, never closed; pass `&mut file` to keep
/// using the file afterwards.
pub struct Lexer<R, S = TracingSink> {
    source: ByteSource<R>,
    text: TextArena,
    queue: TokenQueue,
    sink: S,

    /// Where the most recent dispatch started, after skipping blanks.
    token_position: Position,
    last_error: Option<SyntaxError>,
    /// Set once the iterator has yielded a terminal token.
    finished: bool,

    /// Options
    recover_on_error: bool,
    #[cfg(any(test, feature = "fuzzing"))]
    panic_on_error: bool,
}

impl<R: Read> Lexer<R> {
    /// Creates a lexer with default options that logs syntax errors through
    /// `tracing`.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, LexerOptions::default())
    }

    /// Creates a lexer with `options` that logs syntax errors through
    /// `tracing`.
    pub fn with_options(reader: R, options: LexerOptions) -> Self {
        Self::with_sink(reader, options, TracingSink)
    }
}

impl<R: Read, S: ErrorSink> Lexer<R, S> {
    /// Creates a lexer that sends syntax error messages to `sink`.
    pub fn with_sink(reader: R, options: LexerOptions, sink: S) -> Self {
        Self {
            source: ByteSource::with_capacity(reader, options.effective_buffer_capacity()),
            text: TextArena::with_capacity(options.text_capacity),
            queue: TokenQueue::new(),
            sink,
            token_position: Position::START,
            last_error: None,
            finished: false,
            recover_on_error: options.recover_on_error,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: options.panic_on_error,
        }
    }

    /// Returns the next token.
    ///
    /// A stream ends with [`Token::EndOfInput`] or [`Token::Error`]; asking
    /// again after either is allowed and keeps scanning from where the lexer
    /// stopped.
    ///
    /// # Errors
    ///
    /// Returns [`LexerError::Io`] if the reader fails and
    /// [`LexerError::Alloc`] if the text arena cannot grow. Both are final:
    /// after a read failure every later call fails too.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        if let Some(token) = self.queue.dequeue() {
            trace!(?token, "dequeued token");
            return Ok(token);
        }

        self.skip_blanks()?;
        self.token_position = self.source.position();

        let mark = self.text.len();
        for recognizer in Recognizer::PRIORITY {
            let scan = match recognizer.scan(self) {
                Ok(scan) => scan,
                Err(err) => {
                    // Drop whatever the failed recognizer had captured.
                    self.text.truncate(mark);
                    return Err(err);
                }
            };
            match scan {
                Scan::NotApplicable => {}
                Scan::Matched(token) => {
                    trace!(?token, position = %self.token_position, "scanned token");
                    return Ok(token);
                }
                Scan::Malformed(lead) => {
                    self.queue.enqueue(Token::Error);
                    return Ok(lead);
                }
            }
        }

        // End of input always matches, so there is a byte here.
        let Some(byte) = self.source.peek(0)? else {
            return Ok(Token::EndOfInput);
        };
        self.syntax_error(SyntaxErrorKind::CannotHandleCharacter(byte));
        if self.recover_on_error {
            self.source.consume()?;
        }
        Ok(Token::Error)
    }

    fn skip_blanks(&mut self) -> Result<(), LexerError> {
        while let Some(b' ' | b'\t') = self.source.peek(0)? {
            self.source.consume()?;
        }
        Ok(())
    }

    fn syntax_error(&mut self, kind: SyntaxErrorKind) {
        let err = SyntaxError {
            kind,
            position: self.source.position(),
        };
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(!self.panic_on_error, "{err}");
        self.sink.report(&err.to_string());
        self.last_error = Some(err);
    }
}

impl<R, S> Lexer<R, S> {
    /// Text of a [`Token::String`]; `None` for every other token.
    pub fn string(&self, token: Token) -> Option<&BStr> {
        match token {
            Token::String(text) => Some(self.text.get(text)),
            _ => None,
        }
    }

    /// Text behind a reference taken from a [`Token::String`].
    ///
    /// # Panics
    ///
    /// Panics if `text` did not come from this lexer.
    pub fn text(&self, text: TextRef) -> &BStr {
        self.text.get(text)
    }

    /// Text of every live `String` token, plus terminators.
    pub fn arena(&self) -> &TextArena {
        &self.text
    }

    /// Line and column of the next unconsumed byte.
    pub fn position(&self) -> Position {
        self.source.position()
    }

    /// Where the most recently scanned token started. Tokens handed out from
    /// the queue report the start of the block that produced them.
    pub fn token_position(&self) -> Position {
        self.token_position
    }

    /// The most recent syntax error, if any.
    pub fn last_error(&self) -> Option<&SyntaxError> {
        self.last_error.as_ref()
    }

    /// The error sink, e.g. to inspect collected messages.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Releases the reader and the sink.
    pub fn into_parts(self) -> (R, S) {
        (self.source.into_inner(), self.sink)
    }
}

/// Yields tokens up to and including the first [`Token::EndOfInput`] or
/// [`Token::Error`], or the first fatal error, then stops.
impl<R: Read, S: ErrorSink> Iterator for Lexer<R, S> {
    type Item = Result<Token, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let item = self.next_token();
        self.finished = match &item {
            Ok(token) => token.is_terminal(),
            Err(_) => true,
        };
        Some(item)
    }
}

impl<R: Read, S: ErrorSink> FusedIterator for Lexer<R, S> {}
