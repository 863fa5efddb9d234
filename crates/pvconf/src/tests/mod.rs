
use std::io::Read;

use crate::{Lexer, LexerOptions, Token, TokenKind};

/// A token with its text copied out of the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Owned {
    Text(Vec<u8>),
    Integer(i64),
    Bare(TokenKind),
}

/// Lexes `reader` to the first terminal token, collecting the tokens and the
/// messages sent to the sink.
pub(crate) fn lex_owned<R: Read>(reader: R, options: LexerOptions) -> (Vec<Owned>, Vec<String>) {
    let mut messages = Vec::new();
    let mut lexer = Lexer::with_sink(reader, options, &mut messages);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token().expect("lexing failed");
        tokens.push(match token {
            Token::String(text) => Owned::Text(lexer.text(text).to_vec()),
            Token::Integer(value) => Owned::Integer(value),
            other => Owned::Bare(other.kind()),
        });
        if token.is_terminal() {
            break;
        }
    }
    drop(lexer);
    (tokens, messages)
}

/// Splits `payload` into consecutive chunks whose sizes are derived from
/// `splits`; whatever remains becomes the last chunk.
pub(crate) fn split_by<'a>(payload: &'a [u8], splits: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = payload;
    for &s in splits {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(1 + s % rest.len());
        chunks.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}

/// Tests run per property; fewer under miri or `test-fast`.
pub(crate) fn property_tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if cfg!(feature = "test-fast") {
        100
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    };
    #[cfg(miri)]
    let tests = 10;
    tests
}
