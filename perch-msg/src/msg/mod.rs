use toad_macros::rfc_7252_doc;

/// Message Code
pub mod code;

/// Message parsing errors
pub mod parse_error;

/// Message ID
pub mod id;

/// Message Options
pub mod opt;

/// Message Type
pub mod ty;

/// Message Token
pub mod token;

/// Message Version
pub mod ver;

pub use code::*;
pub use id::*;
pub use opt::*;
pub use parse_error::*;
pub use token::*;
pub use ty::*;
pub use ver::*;

use crate::from_bytes::TryConsumeBytes;
use crate::{Cursor, TryFromBytes};

#[doc = rfc_7252_doc!("5.5")]
#[derive(Copy, Clone, Hash, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Payload<'a>(pub &'a [u8]);

/// Struct representing the first byte of a message.
///
/// ```text
/// CoAP version
/// |
/// |  Message type (request, response, empty)
/// |  |
/// |  |  Length of token, in bytes. (4-bit integer)
/// |  |  |
/// vv vv vvvv
/// 01 00 0000
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub(crate) struct Byte1 {
  pub(crate) ver: Version,
  pub(crate) ty: Type,
  pub(crate) tkl: u8,
}

impl TryFrom<u8> for Byte1 {
  type Error = MessageParseError;

  fn try_from(b: u8) -> Result<Self, Self::Error> {
    let ver = b >> 6; // bits 0 & 1
    let ty = b >> 4 & 0b11; // bits 2 & 3
    let tkl = b & 0b1111u8; // last 4 bits

    Ok(Byte1 { ver: Version(ver),
               ty: Type::try_from(ty)?,
               tkl })
  }
}

/// # `Message` struct
/// Low-level representation of a message that has been parsed from the raw binary format.
///
/// Option values and the payload borrow from the datagram the message was parsed from;
/// a `Message` lives exactly as long as the buffer it was received into.
///
/// Messages support both serializing to bytes and from bytes, by using the provided [`TryFromBytes`] and [`TryIntoBytes`](crate::TryIntoBytes) traits.
///
/// <details>
/// <summary><b>RFC7252 - CoAP Message Binary Format</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("3"))]
/// </details>
///
/// ```
/// use perch_msg::*;
/// # //                       version  token len  code (2.05 Content)
/// # //                       |        |          /
/// # //                       |  type  |         /  message ID
/// # //                       |  |     |        |   |
/// # //                       vv vv vvvv vvvvvvvv vvvvvvvvvvvvvvvv
/// # let header: [u8; 4] = 0b_01_00_0001_01000101_0000000000000001u32.to_be_bytes();
/// # let token: [u8; 1] = [254u8];
/// # let content_format: &[u8] = b"application/json";
/// # let options: [&[u8]; 2] = [&[0b_1100_1101u8, 0b00000011u8], content_format];
/// # let payload: [&[u8]; 2] = [&[0b_11111111u8], b"hello, world!"];
/// let packet: Vec<u8> = /* bytes! */
/// # [header.as_ref(), token.as_ref(), options.concat().as_ref(), payload.concat().as_ref()].concat();
///
/// let msg = Message::try_from_bytes(&packet).unwrap();
///
/// assert_eq!(msg.id, Id(1));
/// assert_eq!(msg.ty, Type::Con);
/// assert_eq!(msg.token.as_bytes(), &[254]);
/// assert_eq!(msg.code, Code::new(2, 5));
/// assert_eq!(msg.get(CONTENT_FORMAT), Some(&b"application/json"[..]));
/// assert_eq!(msg.payload, Payload(b"hello, world!"));
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Message<'a> {
  /// see [`Id`] for details
  pub id: Id,
  /// see [`Type`] for details
  pub ty: Type,
  /// see [`Version`] for details
  pub ver: Version,
  /// see [`Token`] for details
  pub token: Token,
  /// see [`Code`] for details
  pub code: Code,
  /// see [`opt::Opt`] for details
  pub opts: Opts<'a>,
  /// see [`Payload`]
  pub payload: Payload<'a>,
}

impl<'a> Message<'a> {
  /// Create an empty (code 0.00) message with no token, options or payload
  pub fn new(ty: Type, id: Id) -> Self {
    Self { id,
           ty,
           ver: Default::default(),
           token: Default::default(),
           code: Code::new(0, 0),
           opts: Default::default(),
           payload: Default::default() }
  }

  /// Get the value of the first option numbered `n`
  pub fn get(&self, n: OptNumber) -> Option<&'a [u8]> {
    self.opts.iter().find(|o| o.number == n).map(|o| o.value.0)
  }

  /// Iterate over the values of every Uri-Path option, in the order they
  /// appear in the message.
  ///
  /// Joining the segments into a path string is left to the caller.
  ///
  /// ```
  /// use perch_msg::*;
  ///
  /// let mut msg = Message::new(Type::Con, Id(0));
  /// msg.opts.push(Opt { number: PATH, value: OptValue(b"a") });
  /// msg.opts.push(Opt { number: PATH, value: OptValue(b"b") });
  /// msg.opts.push(Opt { number: CONTENT_FORMAT, value: OptValue(&[0]) });
  ///
  /// assert_eq!(msg.path_segments().collect::<Vec<_>>(), vec![&b"a"[..], &b"b"[..]]);
  /// ```
  pub fn path_segments(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
    self.opts
        .iter()
        .filter(|o| o.number == PATH)
        .map(|o| o.value.0)
  }

  /// Get the Content-Format of this message, if it has one
  pub fn content_format(&self) -> Option<ContentFormat> {
    self.get(CONTENT_FORMAT).and_then(ContentFormat::from_bytes)
  }
}

impl<'a> TryFromBytes<'a> for Message<'a> {
  type Error = MessageParseError;

  fn try_from_bytes(bytes: &'a [u8]) -> Result<Self, Self::Error> {
    if bytes.len() < 4 {
      return Err(Self::Error::TruncatedHeader);
    }

    let mut bytes = Cursor::new(bytes);

    let Byte1 { tkl, ty, ver } = bytes.next()
                                      .ok_or_else(MessageParseError::eof)?
                                      .try_into()?;

    if ver != Version(1) {
      return Err(Self::Error::VersionMismatch(ver.0));
    }

    if tkl > 8 {
      return Err(Self::Error::TokenTooLong(tkl));
    }

    let code: Code = bytes.next().ok_or_else(MessageParseError::eof)?.into();
    let id: Id = Id::try_consume_bytes(&mut bytes)?;

    let token = bytes.take_exact(tkl as usize)
                     .and_then(Token::try_from_slice)
                     .ok_or_else(MessageParseError::eof)?;

    let opts = Opts::try_consume_bytes(&mut bytes)?;
    let payload = Payload(bytes.take_until_end());

    Ok(Message { id,
                 ty,
                 ver,
                 code,
                 token,
                 opts,
                 payload })
  }
}
