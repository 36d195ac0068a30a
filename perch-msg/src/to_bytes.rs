use tinyvec::ArrayVec;

use crate::msg::Byte1;
use crate::*;

/// Trait allowing fallible serialization into a caller-provided buffer
pub trait TryIntoBytes {
  /// Error type yielded if serialization fails
  type Error;

  /// Try to write `self` into `buf`, returning the number of bytes written.
  ///
  /// The size of the output is computed and checked against `buf.len()`
  /// before any byte is written, so on error `buf` keeps its prior contents.
  ///
  /// ```
  /// use perch_msg::{Code, Id, Message, MessageToBytesError, TryIntoBytes, Type};
  ///
  /// let msg = Message { code: Code::new(2, 5),
  ///                     payload: perch_msg::Payload(b"23.5"),
  ///                     ..Message::new(Type::Ack, Id(7)) };
  ///
  /// let mut buf = [0u8; 64];
  /// let n = msg.try_into_bytes(&mut buf).unwrap();
  /// assert_eq!(&buf[..n], &[0b01_10_0000, 0x45, 0, 7, 0xFF, b'2', b'3', b'.', b'5']);
  ///
  /// let mut tiny = [0u8; 4];
  /// assert_eq!(msg.try_into_bytes(&mut tiny),
  ///            Err(MessageToBytesError::BufferTooSmall { capacity: 4, size: 9 }));
  /// ```
  fn try_into_bytes(&self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Errors encounterable serializing to bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MessageToBytesError {
  /// Reserved capacity was not enough for size of message
  #[allow(missing_docs)]
  BufferTooSmall { capacity: usize, size: usize },

  /// An option was numbered lower than the option emitted before it
  #[allow(missing_docs)]
  InvalidOptionOrder { previous: OptNumber, next: OptNumber },

  /// An option delta or value length was larger than the
  /// extended encoding can express (`269 + 0xFFFF`)
  FieldTooLarge(usize),
}

/// The largest delta or length expressible with a 2-byte extension
pub const MAX_EXTENDED_FIELD: usize = 269 + u16::MAX as usize;

/// Choose the 4-bit nibble & extension bytes for an option delta or value length.
///
/// - `< 13`: nibble is the value, no extension
/// - `< 269`: nibble 13, one extension byte (`value - 13`)
/// - otherwise: nibble 14, two big-endian extension bytes (`value - 269`)
pub(crate) fn opt_len_or_delta(val: usize)
                               -> Result<(u8, ArrayVec<[u8; 2]>), MessageToBytesError> {
  match val {
    | n if n > MAX_EXTENDED_FIELD => Err(MessageToBytesError::FieldTooLarge(n)),
    | n if n >= 269 => {
      let mut bytes = ArrayVec::new();
      bytes.extend(((n - 269) as u16).to_be_bytes());
      Ok((14, bytes))
    },
    | n if n >= 13 => {
      let mut bytes = ArrayVec::new();
      bytes.push((n - 13) as u8);
      Ok((13, bytes))
    },
    | n => Ok((n as u8, ArrayVec::new())),
  }
}

impl<'a> Message<'a> {
  /// Number of bytes this message occupies on the wire.
  ///
  /// Fails if the options are out of order or a field cannot be encoded.
  pub fn size(&self) -> Result<usize, MessageToBytesError> {
    let header_size = 4;
    let token_size = self.token.0.len();
    let payload_size = match self.payload.0.len() {
      | 0 => 0,
      | n => n + 1,
    };

    let (opts_size, _) =
      self.opts
          .iter()
          .try_fold((0usize, OptNumber(0)), |(size, prev), opt| {
            opt.size(prev).map(|opt_size| (size + opt_size, opt.number))
          })?;

    Ok(header_size + token_size + opts_size + payload_size)
  }
}

impl<'a> TryIntoBytes for Message<'a> {
  type Error = MessageToBytesError;

  fn try_into_bytes(&self, buf: &mut [u8]) -> Result<usize, Self::Error> {
    let size = self.size()?;

    if buf.len() < size {
      return Err(Self::Error::BufferTooSmall { capacity: buf.len(),
                                               size });
    }

    let byte1: u8 = Byte1 { tkl: self.token.0.len() as u8,
                            ver: self.ver,
                            ty: self.ty }.into();
    let code: u8 = self.code.into();
    let id: [u8; 2] = self.id.into();

    buf[0] = byte1;
    buf[1] = code;
    buf[2..4].copy_from_slice(&id);

    let mut pos = 4;
    buf[pos..pos + self.token.0.len()].copy_from_slice(self.token.as_bytes());
    pos += self.token.0.len();

    let mut prev = OptNumber(0);
    for opt in self.opts.iter() {
      pos += opt.try_write(prev, &mut buf[pos..])?;
      prev = opt.number;
    }

    if !self.payload.0.is_empty() {
      buf[pos] = PAYLOAD_MARKER;
      pos += 1;
      buf[pos..pos + self.payload.0.len()].copy_from_slice(self.payload.0);
      pos += self.payload.0.len();
    }

    Ok(pos)
  }
}

impl From<Byte1> for u8 {
  fn from(b: Byte1) -> u8 {
    let ver = b.ver.0 << 6;
    let ty = u8::from(b.ty) << 4;
    let tkl = b.tkl;

    ver | ty | tkl
  }
}
