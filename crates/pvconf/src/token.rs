use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Line and column of a byte in the input. Both start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// 1-based line; incremented by every newline byte.
    pub line: usize,
    /// 1-based column within the line, counted in bytes.
    pub column: usize,
}

impl Position {
    /// Position of the first byte of an input.
    pub const START: Position = Position { line: 1, column: 1 };

    /// Creates a position from a 1-based line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Moves past `byte`.
    #[inline]
    pub(crate) fn advance(&mut self, byte: u8) {
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Reference to an entry in the lexer's [`TextArena`](crate::TextArena).
///
/// `offset` is where the entry starts; `len` excludes the nul terminator the
/// arena stores after every entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextRef {
    /// Arena offset of the first byte.
    pub offset: usize,
    /// Length in bytes, without the terminator.
    pub len: usize,
}

/// A lexical token.
///
/// Tokens are small `Copy` values. Text payloads live in the lexer's arena
/// and are looked up with [`Lexer::string`](crate::Lexer::string).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Token {
    /// The input is exhausted.
    EndOfInput,
    /// One or more consecutive newlines; separates statements.
    End,
    /// A syntax error was reported to the error sink.
    Error,
    /// `{{{`
    BlockOpen,
    /// `}}}`
    BlockClose,
    /// `/`
    Slash,
    /// `*`
    Star,
    /// `.`
    Dot,
    /// A decimal digit run.
    Integer(i64),
    /// A symbol or a block body.
    String(TextRef),
}

impl Token {
    /// The token's kind, without its payload.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::EndOfInput => TokenKind::EndOfInput,
            Token::End => TokenKind::End,
            Token::Error => TokenKind::Error,
            Token::BlockOpen => TokenKind::BlockOpen,
            Token::BlockClose => TokenKind::BlockClose,
            Token::Slash => TokenKind::Slash,
            Token::Star => TokenKind::Star,
            Token::Dot => TokenKind::Dot,
            Token::Integer(_) => TokenKind::Integer,
            Token::String(_) => TokenKind::String,
        }
    }

    /// Whether the token ends a token stream.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Token::EndOfInput | Token::Error)
    }
}

/// Payload-free discriminant of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TokenKind {
    /// [`Token::EndOfInput`]
    EndOfInput,
    /// [`Token::End`]
    End,
    /// [`Token::Error`]
    Error,
    /// [`Token::BlockOpen`]
    BlockOpen,
    /// [`Token::BlockClose`]
    BlockClose,
    /// [`Token::Slash`]
    Slash,
    /// [`Token::Star`]
    Star,
    /// [`Token::Dot`]
    Dot,
    /// [`Token::Integer`]
    Integer,
    /// [`Token::String`]
    String,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::EndOfInput => "<end of file>",
            TokenKind::End => "<end>",
            TokenKind::Error => "<TOKEN ERROR>",
            TokenKind::BlockOpen => "{{{",
            TokenKind::BlockClose => "}}}",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Dot => ".",
            TokenKind::Integer => "<integer>",
            TokenKind::String => "<string>",
        })
    }
}
