use perch_msg::{Code,
                ContentFormat,
                Id,
                Message,
                MessageToBytesError,
                Opt,
                OptValue,
                Opts,
                Payload,
                Token,
                TryIntoBytes,
                Type,
                CONTENT_FORMAT};

/// Response codes
pub mod code;

/// What the dispatcher decided to answer: a status code and a body.
///
/// Carries nothing protocol-specific; it becomes a datagram
/// once it is combined with the request it answers (see [`build`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Respond {
  /// Response status
  pub code: Code,
  /// Response body
  pub payload: Vec<u8>,
}

impl Respond {
  /// Create a new response descriptor
  pub fn new(code: Code, payload: impl AsRef<[u8]>) -> Self {
    Self { code,
           payload: payload.as_ref().to_vec() }
  }
}

/// Truncate `bytes` to at most `max` bytes.
///
/// ```
/// use perch::resp::bounded;
///
/// assert_eq!(bounded(b"23.5", 2), b"23");
/// assert_eq!(bounded(b"23.5", 1024), b"23.5");
/// ```
pub fn bounded(bytes: &[u8], max: usize) -> &[u8] {
  if bytes.len() > max {
    log::debug!("truncating {} byte body to {} bytes", bytes.len(), max);
    &bytes[..max]
  } else {
    bytes
  }
}

/// A CoAP response to a specific request
///
/// The response echoes the request's message id & token, and carries
/// exactly one option: its Content-Format.
///
/// ```
/// use perch::msg::{Id, Message, Token, TryFromBytes, TryIntoBytes, Type};
/// use perch::resp::{code, Resp};
///
/// let mut req = Message::new(Type::Con, Id(7));
/// req.token = Token::try_from_slice(&[0xAB]).unwrap();
///
/// let mut resp = Resp::for_request(&req).unwrap();
/// resp.set_code(code::CONTENT);
/// resp.set_payload("23.5".bytes());
///
/// let mut buf = [0u8; 64];
/// let n = resp.try_into_bytes(&mut buf).unwrap();
///
/// assert_eq!(&buf[..n],
///            &[0b01_10_0001, 0x45, 0, 7, 0xAB, 0xC1, 0x00, 0xFF, b'2', b'3', b'.', b'5']);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resp {
  ty: Type,
  id: Id,
  token: Token,
  code: Code,
  content_format: ContentFormat,
  payload: Vec<u8>,
}

impl Resp {
  /// Create a new response for a given request.
  ///
  /// If the request is CONfirmable, this will return Some(ACK).
  ///
  /// If the request is NONconfirmable, this will return Some(NON).
  ///
  /// If the request is an ACK or RESET, this will return None.
  pub fn for_request(req: &Message<'_>) -> Option<Self> {
    match req.ty {
      | Type::Con => Some(Self::new(Type::Ack, req)),
      | Type::Non => Some(Self::new(Type::Non, req)),
      | Type::Ack | Type::Reset => None,
    }
  }

  fn new(ty: Type, req: &Message<'_>) -> Self {
    Self { ty,
           id: req.id,
           token: req.token,
           code: code::CONTENT,
           content_format: ContentFormat::Text,
           payload: Vec::new() }
  }

  /// Get the message type
  pub fn msg_type(&self) -> Type {
    self.ty
  }

  /// Get the message id
  pub fn msg_id(&self) -> Id {
    self.id
  }

  /// Get the message token
  pub fn token(&self) -> Token {
    self.token
  }

  /// Get the response code
  pub fn code(&self) -> Code {
    self.code
  }

  /// Change the response code
  pub fn set_code(&mut self, code: Code) {
    self.code = code;
  }

  /// Get the Content-Format (defaults to `text/plain`)
  pub fn content_format(&self) -> ContentFormat {
    self.content_format
  }

  /// Change the Content-Format
  pub fn set_content_format(&mut self, format: ContentFormat) {
    self.content_format = format;
  }

  /// Get the payload's raw bytes
  pub fn payload(&self) -> &[u8] {
    &self.payload
  }

  /// Replace the payload
  pub fn set_payload<Bytes: IntoIterator<Item = u8>>(&mut self, payload: Bytes) {
    self.payload = payload.into_iter().collect();
  }
}

impl TryIntoBytes for Resp {
  type Error = MessageToBytesError;

  fn try_into_bytes(&self, buf: &mut [u8]) -> Result<usize, Self::Error> {
    let format = self.content_format.bytes();

    let mut opts = Opts::default();
    opts.push(Opt { number: CONTENT_FORMAT,
                    value: OptValue(format.as_slice()) });

    let msg = Message { ty: self.ty,
                        ver: Default::default(),
                        id: self.id,
                        token: self.token,
                        code: self.code,
                        opts,
                        payload: Payload(&self.payload) };

    msg.try_into_bytes(buf)
  }
}

/// Serialize the response to `req` described by `rep` into `buf`,
/// yielding the number of bytes to send.
///
/// Yields `None` when nothing should be sent:
/// - `req` is an ACK or RESET
/// - `rep` could not be serialized and was already an error response
/// - `rep` could not be serialized, and neither could an empty
///   `5.00 Internal Server Error` sent in its place
///
/// `buf` may have been partially overwritten when this yields `None`,
/// but never holds a truncated datagram when it yields `Some`.
pub fn build(req: &Message<'_>, rep: Respond, buf: &mut [u8]) -> Option<usize> {
  let mut resp = Resp::for_request(req)?;
  resp.set_code(rep.code);
  resp.set_payload(rep.payload);

  match resp.try_into_bytes(buf) {
    | Ok(n) => Some(n),
    | Err(e) if rep.code.class >= 4 => {
      log::debug!("dropping {} response: {:?}",
                  String::from_iter(rep.code.to_human()),
                  e);
      None
    },
    | Err(e) => {
      log::debug!("{} response failed to serialize ({:?}), sending {} instead",
                  String::from_iter(rep.code.to_human()),
                  e,
                  String::from_iter(code::INTERNAL_SERVER_ERROR.to_human()));

      resp.set_code(code::INTERNAL_SERVER_ERROR);
      resp.set_payload(core::iter::empty());
      resp.try_into_bytes(buf)
          .map_err(|e| log::debug!("dropping 5.00 response: {:?}", e))
          .ok()
    },
  }
}

#[cfg(test)]
mod tests {
  use perch_msg::{TryFromBytes, PATH};

  use super::*;

  fn req(ty: Type) -> Message<'static> {
    let mut msg = Message::new(ty, Id(7));
    msg.token = Token::try_from_slice(&[0xAB]).unwrap();
    msg
  }

  #[test]
  fn con_gets_ack() {
    let resp = Resp::for_request(&req(Type::Con)).unwrap();
    assert_eq!(resp.msg_type(), Type::Ack);
    assert_eq!(resp.msg_id(), Id(7));
    assert_eq!(resp.token().as_bytes(), &[0xAB]);
  }

  #[test]
  fn non_gets_non() {
    let resp = Resp::for_request(&req(Type::Non)).unwrap();
    assert_eq!(resp.msg_type(), Type::Non);
    assert_eq!(resp.msg_id(), Id(7));
    assert_eq!(resp.token().as_bytes(), &[0xAB]);
  }

  #[test]
  fn ack_and_reset_get_nothing() {
    assert_eq!(Resp::for_request(&req(Type::Ack)), None);
    assert_eq!(Resp::for_request(&req(Type::Reset)), None);

    let mut buf = [0u8; 64];
    assert_eq!(build(&req(Type::Reset), Respond::new(code::CONTENT, "x"), &mut buf),
               None);
  }

  #[test]
  fn exactly_one_option() {
    let mut buf = [0u8; 64];
    let n = build(&req(Type::Con), Respond::new(code::CHANGED, "UPDATED"), &mut buf).unwrap();

    let msg = Message::try_from_bytes(&buf[..n]).unwrap();
    assert_eq!(msg.opts.len(), 1);
    assert_eq!(msg.get(CONTENT_FORMAT), Some(&[0u8][..]));
    assert_eq!(msg.get(PATH), None);
    assert_eq!(msg.content_format(), Some(ContentFormat::Text));
    assert_eq!(msg.code, code::CHANGED);
    assert_eq!(msg.payload, Payload(b"UPDATED"));
  }

  #[test]
  fn empty_body_has_no_marker() {
    let mut buf = [0u8; 64];
    let n = build(&req(Type::Non), Respond::new(code::CONTENT, ""), &mut buf).unwrap();

    assert_eq!(&buf[..n], &[0b01_01_0001, 0x45, 0, 7, 0xAB, 0xC1, 0x00]);
  }

  #[test]
  fn oversized_success_falls_back_to_internal_error() {
    let mut buf = [0u8; 16];
    let n = build(&req(Type::Con), Respond::new(code::CONTENT, [b'x'; 64]), &mut buf).unwrap();

    let msg = Message::try_from_bytes(&buf[..n]).unwrap();
    assert_eq!(msg.code, code::INTERNAL_SERVER_ERROR);
    assert_eq!(msg.payload, Payload(b""));
    assert_eq!(msg.id, Id(7));
  }

  #[test]
  fn oversized_error_is_dropped() {
    let mut buf = [0u8; 16];
    assert_eq!(build(&req(Type::Con), Respond::new(code::NOT_FOUND, [b'x'; 64]), &mut buf),
               None);
  }

  #[test]
  fn fallback_that_does_not_fit_is_dropped() {
    let mut buf = [0u8; 4];
    assert_eq!(build(&req(Type::Con), Respond::new(code::CONTENT, "23.5"), &mut buf),
               None);
  }
}
