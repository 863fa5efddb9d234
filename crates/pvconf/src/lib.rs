//! A buffered, streaming tokenizer for file-preview configuration files.
//!
//! A config file maps file extensions and mimetypes to embedded shell
//! scripts. The [`Lexer`] turns the raw bytes of such a file into [`Token`]s
//! for a parser to consume:
//!
//! ```rust
//! use pvconf::{Lexer, Token};
//!
//! let mut lexer = Lexer::new("preview{{{echo hi}}}".as_bytes());
//!
//! let name = lexer.next_token().unwrap();
//! assert_eq!(lexer.string(name).unwrap(), "preview");
//! assert_eq!(lexer.next_token().unwrap(), Token::BlockOpen);
//! let body = lexer.next_token().unwrap();
//! assert_eq!(lexer.string(body).unwrap(), "echo hi");
//! assert_eq!(lexer.next_token().unwrap(), Token::BlockClose);
//! assert_eq!(lexer.next_token().unwrap(), Token::EndOfInput);
//! ```
//!
//! Syntax errors are reported through an [`ErrorSink`] and surfaced as
//! [`Token::Error`]; read and allocation failures are returned as
//! [`LexerError`].

mod chunk_utils;
mod diagnostics;
mod error;
mod lexer;
mod options;
mod source;
mod text_arena;
mod token;
mod token_queue;

#[cfg(test)]
mod tests;

pub use chunk_utils::{ChunkedReader, produce_chunks};
pub use diagnostics::{ErrorSink, StderrSink, TracingSink};
pub use error::{LexerError, SyntaxError, SyntaxErrorKind};
pub use lexer::{BLOCK_CLOSE, BLOCK_OPEN, Lexer};
pub use options::{LexerOptions, MIN_BUFFER_CAPACITY};
pub use source::ByteSource;
pub use text_arena::TextArena;
pub use token::{Position, TextRef, Token, TokenKind};
pub use token_queue::TokenQueue;
