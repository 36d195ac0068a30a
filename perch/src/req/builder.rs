use perch_msg::{Id, Message, Opt, OptValue, Opts, Payload, Token, Type, PATH};

use super::Method;

/// Build an outbound request
///
/// The builder owns the path and payload; [`ReqBuilder::build`] yields a
/// [`Message`] borrowing from it, with one Uri-Path option per non-empty
/// `/`-separated segment of the path.
///
/// ```
/// use perch::msg::{Id, Token, TryIntoBytes, Type};
/// use perch::req::ReqBuilder;
///
/// let req = ReqBuilder::get("/sensor").id(Id(7))
///                                     .token(Token::try_from_slice(&[0xAB]).unwrap());
///
/// let mut buf = [0u8; 64];
/// let n = req.build().try_into_bytes(&mut buf).unwrap();
///
/// assert_eq!(&buf[..n],
///            &[0b01_00_0001, 0x01, 0, 7, 0xAB,
///              0b1011_0110, b's', b'e', b'n', b's', b'o', b'r']);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReqBuilder {
  method: Method,
  ty: Type,
  id: Id,
  token: Token,
  path: String,
  payload: Vec<u8>,
}

impl ReqBuilder {
  fn new(method: Method, path: impl AsRef<str>) -> Self {
    Self { method,
           ty: Type::Con,
           id: Id(0),
           token: Token::default(),
           path: path.as_ref().to_string(),
           payload: Vec::new() }
  }

  /// Creates a GET request
  pub fn get(path: impl AsRef<str>) -> Self {
    Self::new(Method::GET, path)
  }

  /// Creates a POST request
  pub fn post(path: impl AsRef<str>) -> Self {
    Self::new(Method::POST, path)
  }

  /// Set the message type (defaults to [`Type::Con`])
  pub fn ty(mut self, ty: Type) -> Self {
    self.ty = ty;
    self
  }

  /// Set the message id
  pub fn id(mut self, id: Id) -> Self {
    self.id = id;
    self
  }

  /// Set the message token
  pub fn token(mut self, token: Token) -> Self {
    self.token = token;
    self
  }

  /// Set the request payload
  pub fn payload(mut self, payload: impl AsRef<[u8]>) -> Self {
    self.payload = payload.as_ref().to_vec();
    self
  }

  /// Build the request message
  pub fn build(&self) -> Message<'_> {
    let opts = self.path
                   .split('/')
                   .filter(|seg| !seg.is_empty())
                   .map(|seg| Opt { number: PATH,
                                    value: OptValue(seg.as_bytes()) })
                   .collect::<Opts>();

    Message { ty: self.ty,
              ver: Default::default(),
              id: self.id,
              code: self.method.code(),
              token: self.token,
              opts,
              payload: Payload(&self.payload) }
  }
}

#[cfg(test)]
mod tests {
  use perch_msg::{TryFromBytes, TryIntoBytes};

  use super::*;

  #[test]
  fn segments_become_path_options() {
    let req = ReqBuilder::post("a//b/").payload("23.5");
    let msg = req.build();

    assert_eq!(msg.code, Method::POST.code());
    assert_eq!(msg.path_segments().collect::<Vec<_>>(),
               vec![&b"a"[..], &b"b"[..]]);
    assert_eq!(msg.payload, Payload(b"23.5"));
  }

  #[test]
  fn long_paths() {
    let path = vec!["x"; 40].join("/");
    let req = ReqBuilder::get(path);

    assert_eq!(req.build().path_segments().count(), 40);
  }

  #[test]
  fn parses_back() {
    let req = ReqBuilder::get("sensor").ty(Type::Non)
                                       .id(Id(300))
                                       .token(Token::try_from_slice(&[1, 2, 3, 4]).unwrap());
    let msg = req.build();

    let mut buf = [0u8; 64];
    let n = msg.try_into_bytes(&mut buf).unwrap();
    assert_eq!(Message::try_from_bytes(&buf[..n]).unwrap(), msg);
  }
}
