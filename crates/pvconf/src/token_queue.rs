use crate::token::Token;

/// Bounded FIFO of tokens produced ahead of time.
///
/// A fixed ring of `N` slots; `head` is the next slot to dequeue and `tail`
/// the next slot to fill. Dequeuing never shifts the remaining tokens.
#[derive(Debug, Clone)]
pub struct TokenQueue<const N: usize = 16> {
    slots: [Option<Token>; N],
    head: usize,
    tail: usize,
    len: usize,
}

impl<const N: usize> Default for TokenQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TokenQueue<N> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        const { assert!(N > 0, "token queue needs at least one slot") };
        Self {
            slots: [None; N],
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    /// Appends `token` at the back.
    ///
    /// # Panics
    ///
    /// Panics if the queue is full.
    pub fn enqueue(&mut self, token: Token) {
        assert!(!self.is_full(), "token queue overflow ({N} slots)");
        self.slots[self.tail] = Some(token);
        self.tail = (self.tail + 1) % N;
        self.len += 1;
    }

    /// Removes the token at the front.
    pub fn dequeue(&mut self) -> Option<Token> {
        let token = self.slots[self.head].take()?;
        self.head = (self.head + 1) % N;
        self.len -= 1;
        Some(token)
    }

    /// Whether no tokens are queued.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether every slot holds a token.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Number of queued tokens.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of slots, `N`.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut q = TokenQueue::<16>::new();
        assert!(q.is_empty());
        q.enqueue(Token::BlockOpen);
        q.enqueue(Token::Integer(3));
        q.enqueue(Token::BlockClose);
        assert_eq!(q.len(), 3);
        assert_eq!(q.dequeue(), Some(Token::BlockOpen));
        assert_eq!(q.dequeue(), Some(Token::Integer(3)));
        assert_eq!(q.dequeue(), Some(Token::BlockClose));
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn wraps_around_without_losing_tokens() {
        let mut q = TokenQueue::<3>::new();
        for round in 0..10 {
            q.enqueue(Token::Integer(round));
            q.enqueue(Token::Integer(round + 100));
            assert_eq!(q.dequeue(), Some(Token::Integer(round)));
            assert_eq!(q.dequeue(), Some(Token::Integer(round + 100)));
        }
        assert!(q.is_empty());
    }

    #[test]
    fn uses_every_slot() {
        let mut q = TokenQueue::<2>::new();
        q.enqueue(Token::Dot);
        q.enqueue(Token::Star);
        assert!(q.is_full());
        assert_eq!(q.capacity(), 2);
    }

    #[test]
    #[should_panic(expected = "token queue overflow")]
    fn overflow_is_a_bug() {
        let mut q = TokenQueue::<1>::new();
        q.enqueue(Token::Dot);
        q.enqueue(Token::Dot);
    }
}
