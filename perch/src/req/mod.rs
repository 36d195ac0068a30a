use perch_msg::{Id, Message, Token, Type};

/// Request methods
pub mod method;

#[doc(inline)]
pub use method::Method;

/// Request builder
pub mod builder;

#[doc(inline)]
pub use builder::*;

/// An incoming CoAP request, borrowing from the datagram it was parsed from
///
/// ```
/// use perch::msg::{Message, TryFromBytes};
/// use perch::req::{Method, Req};
///
/// //            ver type tkl  POST  message id
/// let dgram = [0b01_00_0000, 0x02, 0x00, 0x07,
///              // Uri-Path "sensor"
///              0b1011_0110, b's', b'e', b'n', b's', b'o', b'r',
///              0xFF, b'2', b'3', b'.', b'5'];
///
/// let req = Req::from(Message::try_from_bytes(&dgram).unwrap());
/// assert_eq!(req.method(), Method::POST);
/// assert_eq!(req.path(), "sensor");
/// assert_eq!(req.payload(), b"23.5");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Req<'a>(Message<'a>);

impl<'a> Req<'a> {
  /// Obtain a reference to the inner message
  pub fn msg(&self) -> &Message<'a> {
    &self.0
  }

  /// Get the request method
  pub fn method(&self) -> Method {
    Method(self.0.code)
  }

  /// Get the message type
  pub fn msg_type(&self) -> Type {
    self.0.ty
  }

  /// Get the message id
  pub fn msg_id(&self) -> Id {
    self.0.id
  }

  /// Get the message token
  pub fn token(&self) -> Token {
    self.0.token
  }

  /// Get the request payload
  pub fn payload(&self) -> &'a [u8] {
    self.0.payload.0
  }

  /// Join the Uri-Path segments of this request with `/`.
  ///
  /// Empty segments are skipped, there is never a leading separator and
  /// segments that aren't valid UTF-8 are decoded lossily.
  ///
  /// ```
  /// use perch::msg::{Id, Message, Opt, OptValue, Type, PATH};
  /// use perch::req::Req;
  ///
  /// let mut msg = Message::new(Type::Con, Id(0));
  /// msg.opts.push(Opt { number: PATH, value: OptValue(b"api") });
  /// msg.opts.push(Opt { number: PATH, value: OptValue(b"") });
  /// msg.opts.push(Opt { number: PATH, value: OptValue(b"sensor") });
  ///
  /// assert_eq!(Req::from(msg).path(), "api/sensor");
  /// ```
  pub fn path(&self) -> String {
    self.0
        .path_segments()
        .filter(|seg| !seg.is_empty())
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join("/")
  }
}

impl<'a> From<Message<'a>> for Req<'a> {
  fn from(msg: Message<'a>) -> Self {
    Self(msg)
  }
}

impl<'a> From<Req<'a>> for Message<'a> {
  fn from(req: Req<'a>) -> Self {
    req.0
  }
}

#[cfg(test)]
mod tests {
  use perch_msg::{Code, Opt, OptValue, CONTENT_FORMAT, PATH};

  use super::*;

  #[test]
  fn path_without_segments_is_empty() {
    let req = Req::from(Message::new(Type::Con, Id(0)));
    assert_eq!(req.path(), "");
  }

  #[test]
  fn path_ignores_other_options() {
    let mut msg = Message::new(Type::Non, Id(1));
    msg.opts.push(Opt { number: PATH,
                        value: OptValue(b"sensor") });
    msg.opts.push(Opt { number: CONTENT_FORMAT,
                        value: OptValue(&[0]) });

    let req = Req::from(msg);
    assert_eq!(req.path(), "sensor");
    assert_eq!(req.msg_type(), Type::Non);
    assert_eq!(req.msg_id(), Id(1));
  }

  #[test]
  fn path_lossy() {
    let mut msg = Message::new(Type::Con, Id(0));
    msg.opts.push(Opt { number: PATH,
                        value: OptValue(&[b'a', 0xFF]) });

    assert_eq!(Req::from(msg).path(), "a\u{FFFD}");
  }

  #[test]
  fn method_from_code() {
    let msg = Message { code: Code::new(0, 2),
                        ..Message::new(Type::Con, Id(0)) };
    assert_eq!(Req::from(msg).method(), Method::POST);
  }
}
