use super::opt::parse_error::OptParseError;

/// Errors encounterable while parsing a message from bytes
///
/// Any of these means the datagram was malformed; servers
/// are expected to drop it without replying.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Eq, Ord)]
pub enum MessageParseError {
  /// The datagram was shorter than the fixed 4-byte header,
  /// or shorter than the header plus the token length it declared
  TruncatedHeader,

  /// Version was not 1
  VersionMismatch(u8),

  /// Token length was > 8
  TokenTooLong(u8),

  /// The message type is invalid (see [`Type`](super::Type) for information & valid values)
  InvalidType(u8),

  /// Error parsing option
  OptParseError(OptParseError),
}

impl MessageParseError {
  /// Shorthand for [`MessageParseError::TruncatedHeader`]
  pub fn eof() -> Self {
    Self::TruncatedHeader
  }
}

impl From<OptParseError> for MessageParseError {
  fn from(e: OptParseError) -> Self {
    Self::OptParseError(e)
  }
}
