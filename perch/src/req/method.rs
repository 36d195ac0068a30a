use core::fmt;

use perch_msg::Code;

use crate::code;

/// Request method
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Method(pub(crate) Code);

impl fmt::Display for Method {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      | Method::EMPTY => write!(f, "EMPTY"),
      | Method::GET => write!(f, "GET"),
      | Method::POST => write!(f, "POST"),
      | Method::PUT => write!(f, "PUT"),
      | Method::DELETE => write!(f, "DELETE"),
      | Method(c) => write!(f, "{}", String::from_iter(c.to_human())),
    }
  }
}

impl Method {
  code!(rfc7252("4.1")   EMPTY  = Method(0 . 00));
  code!(rfc7252("5.8.1") GET    = Method(0 . 01));
  code!(rfc7252("5.8.2") POST   = Method(0 . 02));
  code!(rfc7252("5.8.3") PUT    = Method(0 . 03));
  code!(rfc7252("5.8.4") DELETE = Method(0 . 04));

  /// Get the message code for this method
  pub fn code(&self) -> Code {
    self.0
  }
}

impl From<Code> for Method {
  fn from(code: Code) -> Self {
    Method(code)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn wire_values() {
    assert_eq!(u8::from(Method::GET.code()), 0x01);
    assert_eq!(u8::from(Method::POST.code()), 0x02);
    assert_eq!(u8::from(Method::PUT.code()), 0x03);
  }

  #[test]
  fn display() {
    assert_eq!(Method::GET.to_string(), "GET");
    assert_eq!(Method::POST.to_string(), "POST");
    assert_eq!(Method::from(Code::new(0, 7)).to_string(), "0.07");
  }
}
