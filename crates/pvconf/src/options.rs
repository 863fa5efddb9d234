/// Smallest input buffer the lexer accepts. Block markers are three bytes
/// long, so the buffer must hold at least the two bytes of lookahead past the
/// cursor plus one byte of slack.
pub const MIN_BUFFER_CAPACITY: usize = 4;

/// Configuration options for the [`Lexer`](crate::Lexer).
///
/// # Examples
///
/// ```rust
/// use pvconf::{Lexer, LexerOptions};
///
/// let options = LexerOptions {
///     buffer_capacity: 64,
///     recover_on_error: true,
///     ..Default::default()
/// };
/// let lexer = Lexer::with_options("a b c".as_bytes(), options);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LexerOptions {
    /// Size of the input buffer in bytes.
    ///
    /// Input is read from the underlying stream in blocks of at most this many
    /// bytes. Values below [`MIN_BUFFER_CAPACITY`] are raised to it.
    ///
    /// # Default
    ///
    /// `1024`
    pub buffer_capacity: usize,

    /// Initial capacity of the text arena in bytes.
    ///
    /// The arena grows as needed; this only sizes the first allocation.
    ///
    /// # Default
    ///
    /// `1024`
    pub text_capacity: usize,

    /// Whether to skip the offending byte after reporting
    /// `cannot handle character`.
    ///
    /// When `false`, the byte stays in the input and asking for another token
    /// reports the same error again.
    ///
    /// # Default
    ///
    /// `false`
    pub recover_on_error: bool,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on syntax errors instead of returning [`Token::Error`](crate::Token::Error).
    ///
    /// Enabled only in test builds to produce backtraces on lexing failures.
    pub panic_on_error: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: 1024,
            text_capacity: 1024,
            recover_on_error: false,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: false,
        }
    }
}

impl LexerOptions {
    pub(crate) fn effective_buffer_capacity(&self) -> usize {
        self.buffer_capacity.max(MIN_BUFFER_CAPACITY)
    }
}
