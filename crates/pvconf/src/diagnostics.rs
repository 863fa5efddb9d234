//! Error sinks: where the lexer sends positioned syntax error messages.

use std::io::{self, Write};

/// Receives fully formatted syntax error messages, such as
/// `config parse error:3:1 unclosed block`.
pub trait ErrorSink {
    /// Called once per syntax error, in input order.
    fn report(&mut self, message: &str);
}

/// Emits every message as a `tracing` error event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&mut self, message: &str) {
        tracing::error!(target: "pvconf", "{message}");
    }
}

/// Writes `<program>: <message>` lines to standard error.
#[derive(Debug, Clone)]
pub struct StderrSink {
    program: String,
}

impl StderrSink {
    /// Creates a sink that prefixes messages with `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn write_to<W: Write>(&self, out: &mut W, message: &str) -> io::Result<()> {
        writeln!(out, "{}: {message}", self.program)
    }
}

impl ErrorSink for StderrSink {
    fn report(&mut self, message: &str) {
        // Nowhere left to report a failing stderr.
        let _ = self.write_to(&mut io::stderr().lock(), message);
    }
}

/// Collects messages, mostly useful in tests.
impl ErrorSink for Vec<String> {
    fn report(&mut self, message: &str) {
        self.push(message.to_owned());
    }
}

impl<S: ErrorSink + ?Sized> ErrorSink for &mut S {
    fn report(&mut self, message: &str) {
        (**self).report(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stderr_sink_prefixes_program_name() {
        let sink = StderrSink::new("ctpv");
        let mut out = Vec::new();
        sink.write_to(&mut out, "config parse error:1:1 unclosed block")
            .unwrap();
        assert_eq!(out, b"ctpv: config parse error:1:1 unclosed block\n");
    }

    #[test]
    fn collecting_through_a_reference() {
        let mut messages = Vec::new();
        {
            let mut sink: &mut Vec<String> = &mut messages;
            sink.report("first");
            ErrorSink::report(&mut sink, "second");
        }
        assert_eq!(messages, ["first", "second"]);
    }
}
