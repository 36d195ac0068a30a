/// A cursor over a borrowed byte slice (alloc-less port of [`std::io::Cursor`])
///
/// Every slice handed out by the cursor borrows from the underlying buffer,
/// not from the cursor, so parsed messages can outlive the cursor that parsed them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor<'a> {
  t: &'a [u8],
  cursor: usize,
}

impl<'a> Cursor<'a> {
  /// Creates a new cursor
  pub fn new(t: &'a [u8]) -> Cursor<'a> {
    Cursor { t, cursor: 0 }
  }

  /// Unwraps the cursor, discarding its internal position
  pub fn into_inner(self) -> &'a [u8] {
    self.t
  }

  /// Take the next byte in the cursor, returning None
  /// if the cursor is exhausted.
  ///
  /// Runs in O(1) time.
  pub fn next(&mut self) -> Option<u8> {
    self.take_exact(1).map(|a| a[0])
  }

  /// Look at the next byte without advancing the position.
  ///
  /// Runs in O(1) time.
  pub fn peek(&self) -> Option<u8> {
    self.t.get(self.cursor).copied()
  }

  /// Take `n` bytes from the cursor, returning None
  /// (and leaving the position untouched) if fewer
  /// than `n` bytes remain.
  ///
  /// Runs in O(1) time.
  pub fn take_exact(&mut self, n: usize) -> Option<&'a [u8]> {
    let t: &'a [u8] = self.t;

    if n > self.remaining() {
      None
    } else {
      let out = &t[self.cursor..self.cursor + n];
      self.cursor += n;
      Some(out)
    }
  }

  /// Consume and return every byte remaining in the buffer
  ///
  /// Runs in O(1) time.
  pub fn take_until_end(&mut self) -> &'a [u8] {
    let t: &'a [u8] = self.t;
    let out = &t[self.cursor..];
    self.cursor = t.len();
    out
  }

  /// Number of bytes that have not been consumed yet
  pub fn remaining(&self) -> usize {
    self.t.len() - self.cursor
  }

  /// Whether the cursor has reached the end
  /// of the buffer.
  ///
  /// Runs in O(1) time.
  pub fn is_exhausted(&self) -> bool {
    self.remaining() == 0
  }

  /// Get the position the cursor points to within
  /// the buffer
  pub fn position(&self) -> usize {
    self.cursor
  }
}
