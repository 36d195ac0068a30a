use tinyvec::ArrayVec;
use toad_macros::rfc_7252_doc;

#[doc = rfc_7252_doc!("5.3.1")]
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct Token(pub ArrayVec<[u8; 8]>);

impl Token {
  /// Copy up to 8 bytes into a token.
  ///
  /// Returns `None` if `bytes` is longer than 8 bytes,
  /// a token is never silently truncated.
  ///
  /// ```
  /// use perch_msg::Token;
  ///
  /// assert!(Token::try_from_slice(&[0xAB]).is_some());
  /// assert!(Token::try_from_slice(&[0; 9]).is_none());
  /// ```
  pub fn try_from_slice(bytes: &[u8]) -> Option<Token> {
    if bytes.len() > 8 {
      return None;
    }

    let mut token = ArrayVec::new();
    token.extend_from_slice(bytes);
    Some(Token(token))
  }

  /// The token bytes
  pub fn as_bytes(&self) -> &[u8] {
    self.0.as_slice()
  }
}
