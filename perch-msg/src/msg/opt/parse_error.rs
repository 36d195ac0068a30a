/// Errors encounterable while parsing an option from bytes
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Eq, Ord)]
pub enum OptParseError {
  /// An extended delta or length needed more bytes
  /// than were left in the datagram
  TruncatedOption,

  /// The option declared a value longer than the
  /// bytes left in the datagram
  #[allow(missing_docs)]
  TruncatedOptionValue { expected: usize, remaining: usize },

  /// Option Delta was set to 15, which is invalid.
  OptionDeltaReservedValue(u8),

  /// Value Length was set to 15, which is invalid.
  ValueLengthReservedValue(u8),

  /// Not a true failure case; only means we tried to read the payload marker byte (0xFF)
  /// or the end of the datagram as an option header.
  OptionsExhausted,
}

impl OptParseError {
  /// Shorthand for [`OptParseError::TruncatedOption`]
  pub fn eof() -> Self {
    Self::TruncatedOption
  }
}
