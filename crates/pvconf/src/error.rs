use std::{collections::TryReserveError, io};

use thiserror::Error;

use crate::token::Position;

/// Failures that make further tokenizing impossible.
///
/// Syntax problems in the input are not `LexerError`s; they are reported
/// through the [`ErrorSink`](crate::ErrorSink) and surfaced as
/// [`Token::Error`](crate::Token::Error).
#[derive(Error, Debug)]
pub enum LexerError {
    /// The reader returned an error other than `Interrupted`.
    #[error("failed to read config input: {0}")]
    Io(#[from] io::Error),
    /// The text arena could not allocate room for more token text.
    #[error("failed to grow text arena: {0}")]
    Alloc(#[from] TryReserveError),
}

/// A positioned syntax error, as sent to the error sink.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("config parse error:{}:{} {kind}", .position.line, .position.column)]
pub struct SyntaxError {
    /// What went wrong.
    pub kind: SyntaxErrorKind,
    /// Where the lexer stood when it detected the problem.
    pub position: Position,
}

/// The syntax problems the lexer reports.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// No token starts with this byte.
    #[error("cannot handle character: {}", format_byte(*.0))]
    CannotHandleCharacter(u8),
    /// The input ended between `{{{` and `}}}`.
    #[error("unclosed block")]
    UnclosedBlock,
}

fn format_byte(b: u8) -> String {
    match b {
        b'\n' => "\\n".into(),
        b'\r' => "\\r".into(),
        b'\t' => "\\t".into(),
        b'\0' => "\\0".into(),
        b if b.is_ascii_graphic() || b == b' ' => char::from(b).to_string(),
        b => format!("\\x{b:02X}"),
    }
}
