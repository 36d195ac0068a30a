use tinyvec::TinyVec;
use toad_macros::rfc_7252_doc;

use crate::from_bytes::TryConsumeBytes;
use crate::to_bytes::{opt_len_or_delta, MessageToBytesError};
use crate::Cursor;

/// Option parsing errors
pub mod parse_error;
pub use parse_error::*;

/// Option numbers & values known to this crate
pub mod known;
pub use known::*;

/// Byte separating the options from the payload
pub const PAYLOAD_MARKER: u8 = 0b1111_1111;

/// Number of options a [`Message`](crate::Message) stores inline
/// before spilling onto the heap
pub const INLINE_OPTS: usize = 16;

/// Collection of options in a message, in the order they appear on the wire
pub type Opts<'a> = TinyVec<[Opt<'a>; INLINE_OPTS]>;

/// Decode an extended option delta or value length.
///
/// `head` is the 4-bit nibble from the option header:
/// - `0..=12`: the value is the nibble itself
/// - `13`: the value is `13 +` the next byte
/// - `14`: the value is `269 +` the next 2 bytes (big-endian)
/// - `15`: reserved, yields `reserved_err`
pub(crate) fn parse_opt_len_or_delta(head: u8,
                                     bytes: &mut Cursor<'_>,
                                     reserved_err: OptParseError)
                                     -> Result<u32, OptParseError> {
  match head {
    | 13 => {
      let n = bytes.next().ok_or_else(OptParseError::eof)?;
      Ok((n as u32) + 13)
    },
    | 14 => match bytes.take_exact(2) {
      | Some(&[a, b]) => Ok((u16::from_be_bytes([a, b]) as u32) + 269),
      | _ => Err(OptParseError::eof()),
    },
    | 15 => Err(reserved_err),
    | _ => Ok(head as u32),
  }
}

#[doc = rfc_7252_doc!("5.4")]
/// <details><summary><b>RFC7252 Section 3.1 Option binary format</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("3.1"))]
/// </details>
///
/// # `Opt` struct
/// A parsed CoAP Option.
///
/// On the wire an option only carries the [`OptDelta`] from the previous
/// option's number; parsing reconstructs the absolute [`OptNumber`] by
/// running sum, and serializing recomputes the delta.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Opt<'a> {
  /// See [`OptNumber`]
  pub number: OptNumber,
  /// See [`OptValue`]
  pub value: OptValue<'a>,
}

impl<'a> Opt<'a> {
  /// Delta between this option and the previously emitted option number.
  ///
  /// Options must be emitted in non-decreasing number order, so this fails
  /// with [`MessageToBytesError::InvalidOptionOrder`] when `previous` is greater
  /// than this option's number.
  pub fn delta_from(&self, previous: OptNumber) -> Result<OptDelta, MessageToBytesError> {
    self.number
        .0
        .checked_sub(previous.0)
        .map(OptDelta)
        .ok_or(MessageToBytesError::InvalidOptionOrder { previous,
                                                         next: self.number })
  }

  /// Number of bytes this option occupies on the wire when emitted after `previous`
  pub fn size(&self, previous: OptNumber) -> Result<usize, MessageToBytesError> {
    let (_, del_bytes) = opt_len_or_delta(self.delta_from(previous)?.0 as usize)?;
    let (_, len_bytes) = opt_len_or_delta(self.value.0.len())?;

    Ok(1 + del_bytes.len() + len_bytes.len() + self.value.0.len())
  }

  /// Write this option into `buf`, emitted after an option numbered `previous`.
  ///
  /// The full size is checked before anything is written; on error `buf`
  /// is left untouched. Returns the number of bytes written.
  ///
  /// ```
  /// use perch_msg::{Opt, OptNumber, OptValue};
  ///
  /// let opt = Opt { number: OptNumber(11),
  ///                 value: OptValue(b"sensor") };
  ///
  /// let mut buf = [0u8; 16];
  /// let n = opt.try_write(OptNumber(0), &mut buf).unwrap();
  /// assert_eq!(&buf[..n], b"\xB6sensor");
  /// ```
  pub fn try_write(&self, previous: OptNumber, buf: &mut [u8]) -> Result<usize, MessageToBytesError> {
    let (del, del_bytes) = opt_len_or_delta(self.delta_from(previous)?.0 as usize)?;
    let (len, len_bytes) = opt_len_or_delta(self.value.0.len())?;

    let size = 1 + del_bytes.len() + len_bytes.len() + self.value.0.len();
    if buf.len() < size {
      return Err(MessageToBytesError::BufferTooSmall { capacity: buf.len(),
                                                       size });
    }

    buf[0] = (del << 4) | len;
    let mut pos = 1;

    for part in [del_bytes.as_slice(), len_bytes.as_slice(), self.value.0] {
      buf[pos..pos + part.len()].copy_from_slice(part);
      pos += part.len();
    }

    Ok(pos)
  }

  /// Parse the option at the cursor, given the number of the option before it.
  ///
  /// Yields [`OptParseError::OptionsExhausted`] (consuming the marker) when the
  /// next byte is the payload marker, or when there are no bytes left.
  pub(crate) fn try_consume_after(previous: OptNumber,
                                  bytes: &mut Cursor<'a>)
                                  -> Result<Self, OptParseError> {
    let byte1 = bytes.next()
                     .ok_or(OptParseError::OptionsExhausted)
                     .and_then(|b| {
                       if b == PAYLOAD_MARKER {
                         Err(OptParseError::OptionsExhausted)
                       } else {
                         Ok(b)
                       }
                     })?;

    // NOTE: Delta **MUST** be consumed before Length; the extension bytes appear in that order
    let delta = parse_opt_len_or_delta(byte1 >> 4,
                                       bytes,
                                       OptParseError::OptionDeltaReservedValue(15))?;

    let len = parse_opt_len_or_delta(byte1 & 0b00001111,
                                     bytes,
                                     OptParseError::ValueLengthReservedValue(15))?
              as usize;

    let remaining = bytes.remaining();
    let value = bytes.take_exact(len)
                     .ok_or(OptParseError::TruncatedOptionValue { expected: len,
                                                                  remaining })?;

    Ok(Opt { number: OptNumber(previous.0 + delta),
             value: OptValue(value) })
  }
}

impl<'a> TryConsumeBytes<'a> for Opts<'a> {
  type Error = OptParseError;

  fn try_consume_bytes(bytes: &mut Cursor<'a>) -> Result<Self, Self::Error> {
    let mut opts = Opts::default();
    let mut number = OptNumber(0);

    loop {
      match Opt::try_consume_after(number, bytes) {
        | Ok(opt) => {
          number = opt.number;
          opts.push(opt);
        },
        | Err(OptParseError::OptionsExhausted) => break Ok(opts),
        | Err(e) => break Err(e),
      }
    }
  }
}

/// The "Option Delta" is the difference between this Option's Number
/// and the previous Option's number.
///
/// It only exists on the wire; see [`Opt`].
///
/// # Related
/// - [RFC7252#section-3.1 Option Format](https://datatracker.ietf.org/doc/html/rfc7252#section-3.1)
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct OptDelta(pub u32);

#[doc = rfc_7252_doc!("5.4.6")]
/// <details><summary><b>RFC7252 Section 12.2 Core CoAP Option Numbers</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("12.2"))]
/// </details>
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct OptNumber(pub u32);

#[doc = rfc_7252_doc!("3.2")]
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct OptValue<'a>(pub &'a [u8]);
