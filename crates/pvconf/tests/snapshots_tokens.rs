#![expect(missing_docs)]

use core::fmt::Write;

use pvconf::{ChunkedReader, Lexer, LexerOptions, Token};

/// Renders one line per token, `<line>:<col> <token>`, followed by the
/// messages the sink received.
fn render_reader<R: std::io::Read>(reader: R, options: LexerOptions) -> String {
    let mut messages = Vec::new();
    let mut lexer = Lexer::with_sink(reader, options, &mut messages);
    let mut out = String::new();
    while let Some(token) = lexer.next() {
        let token = token.expect("lexing failed");
        let position = lexer.token_position();
        match token {
            Token::String(_) => {
                let text = lexer.string(token).expect("string token");
                writeln!(out, "{position} String {text:?}").unwrap();
            }
            Token::Integer(value) => writeln!(out, "{position} Integer {value}").unwrap(),
            other => writeln!(out, "{position} {}", other.kind()).unwrap(),
        }
    }
    drop(lexer);
    for message in messages {
        writeln!(out, "error: {message}").unwrap();
    }
    out
}

/// Renders `input` whole, then checks that every small chunking and buffer
/// size renders the same.
fn render(input: &str, options: LexerOptions) -> String {
    let whole = render_reader(input.as_bytes(), options);
    for chunk_size in 1..=7 {
        for buffer_capacity in [4, 5, 9] {
            let reader = ChunkedReader::with_chunk_size(input.as_bytes(), chunk_size);
            let options = LexerOptions {
                buffer_capacity,
                ..options
            };
            assert_eq!(
                render_reader(reader, options),
                whole,
                "chunk size {chunk_size}, buffer capacity {buffer_capacity}"
            );
        }
    }
    whole
}

#[test]
fn snapshot_preview_rule() {
    let input = "preview md text/markdown {{{\n  glow \"$f\"\n}}}\n";
    insta::assert_snapshot!(render(input, LexerOptions::default()), @r#"
    1:1 String "preview"
    1:9 String "md"
    1:12 String "text"
    1:16 /
    1:17 String "markdown"
    1:26 {{{
    1:26 String "\n  glow \"$f\"\n"
    1:26 }}}
    3:4 <end>
    4:1 <end of file>
    "#);
}

#[test]
fn snapshot_priority_and_wildcards() {
    let input = "priority any */* 10\n\n\nremove tar .tar.gz\n";
    insta::assert_snapshot!(render(input, LexerOptions::default()), @r#"
    1:1 String "priority"
    1:10 String "any"
    1:14 *
    1:15 /
    1:16 *
    1:18 Integer 10
    1:20 <end>
    4:1 String "remove"
    4:8 String "tar"
    4:12 .
    4:13 String "tar"
    4:16 .
    4:17 String "gz"
    4:19 <end>
    5:1 <end of file>
    "#);
}

#[test]
fn snapshot_unclosed_block() {
    let input = "a\n{{{ unterminated";
    insta::assert_snapshot!(render(input, LexerOptions::default()), @r#"
    1:1 String "a"
    1:2 <end>
    2:1 {{{
    2:1 <TOKEN ERROR>
    error: config parse error:2:17 unclosed block
    "#);
}

#[test]
fn snapshot_recovery_skips_unknown_bytes() {
    let options = LexerOptions {
        recover_on_error: true,
        ..LexerOptions::default()
    };
    let first = render("ls # comment\n", options);
    insta::assert_snapshot!(first, @r#"
    1:1 String "ls"
    1:4 <TOKEN ERROR>
    error: config parse error:1:4 cannot handle character: #
    "#);

    // The iterator stops at the error; lexing on picks up after the skipped byte.
    let mut messages = Vec::new();
    let mut lexer = Lexer::with_sink("ls # comment\n".as_bytes(), options, &mut messages);
    let mut out = String::new();
    loop {
        let token = lexer.next_token().expect("lexing failed");
        writeln!(out, "{} {}", lexer.token_position(), token.kind()).unwrap();
        if token == Token::EndOfInput {
            break;
        }
    }
    drop(lexer);
    insta::assert_snapshot!(out, @r"
    1:1 <string>
    1:4 <TOKEN ERROR>
    1:6 <string>
    1:13 <end>
    2:1 <end of file>
    ");
    assert_eq!(messages.len(), 1);
}
