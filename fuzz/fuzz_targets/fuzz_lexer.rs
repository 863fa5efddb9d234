#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pvconf::{ChunkedReader, Lexer, LexerOptions, Token};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    /// Lookahead buffer size; clamped by the lexer.
    buffer_capacity: u8,
    recover_on_error: bool,
    split_seed: u64,
    data: &'a [u8],
}

/// A token with its text copied out, comparable across lexers.
#[derive(Debug, PartialEq, Eq)]
enum Owned {
    Text(Vec<u8>),
    Other(Token),
}

fn lex<R: std::io::Read>(reader: R, options: LexerOptions) -> (Vec<Owned>, Vec<String>) {
    let mut messages = Vec::new();
    let mut lexer = Lexer::with_sink(reader, options, &mut messages);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token().expect("in-memory reads never fail");
        tokens.push(match lexer.string(token) {
            Some(text) => Owned::Text(text.to_vec()),
            None => Owned::Other(token),
        });
        if token == Token::EndOfInput {
            break;
        }
        // Without recovery the offending byte stays put.
        if token == Token::Error && !options.recover_on_error {
            break;
        }
    }
    drop(lexer);
    (tokens, messages)
}

/// Deterministic chunk boundaries from a seed (xorshift).
fn split(data: &[u8], mut seed: u64) -> Vec<&[u8]> {
    let mut chunks = Vec::new();
    let mut rest = data;
    seed |= 1;
    while !rest.is_empty() {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        let size = 1 + (seed % 17) as usize;
        let (head, tail) = rest.split_at(size.min(rest.len()));
        chunks.push(head);
        rest = tail;
    }
    chunks
}

fuzz_target!(|input: Input<'_>| {
    let options = LexerOptions {
        buffer_capacity: usize::from(input.buffer_capacity),
        recover_on_error: input.recover_on_error,
        panic_on_error: false,
        ..LexerOptions::default()
    };

    let whole = lex(input.data, options);
    let pieces = lex(ChunkedReader::new(split(input.data, input.split_seed)), options);
    assert_eq!(whole, pieces, "chunking changed the token stream");

    let errors = whole
        .0
        .iter()
        .filter(|t| **t == Owned::Other(Token::Error))
        .count();
    assert_eq!(errors, whole.1.len(), "one message per error token");
});
