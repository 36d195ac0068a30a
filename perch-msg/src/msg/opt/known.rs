macro_rules! opt {
  (rfc7252($section:literal) $name:ident = $n:literal) => {
    #[doc = ::toad_macros::rfc_7252_doc!($section)]
    pub const $name: crate::OptNumber = crate::OptNumber($n);
  };
  (#[doc = $doc:expr] $name:ident = $n:literal) => {
    #[doc = $doc]
    pub const $name: crate::OptNumber = crate::OptNumber($n);
  };
}

opt!(#[doc = "Uri-Path; one option per path segment, repeatable"]
     PATH = 11);
opt!(rfc7252("5.10.3") CONTENT_FORMAT = 12);

/// Content-Format
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContentFormat {
  /// `text/plain; charset=utf-8`
  Text,
  /// `application/link-format`
  LinkFormat,
  /// `application/xml`
  Xml,
  /// `application/octet-stream`
  OctetStream,
  /// `application/exi`
  Exi,
  /// `application/json`
  Json,
  /// Another content format
  Other(u16),
}

impl ContentFormat {
  /// Convert this content format to the option value bytes.
  ///
  /// Values that fit in a byte are one byte long, so `text/plain`
  /// is encoded as `[0]`.
  ///
  /// ```
  /// use perch_msg::ContentFormat;
  ///
  /// assert_eq!(ContentFormat::Text.bytes().as_slice(), &[0]);
  /// assert_eq!(ContentFormat::Other(1000).bytes().as_slice(), &[0x03, 0xE8]);
  /// ```
  pub fn bytes(&self) -> tinyvec::ArrayVec<[u8; 2]> {
    let n = u16::from(self);
    let mut bytes = tinyvec::ArrayVec::new();

    match u8::try_from(n) {
      | Ok(b) => bytes.push(b),
      | Err(_) => bytes.extend(n.to_be_bytes()),
    }

    bytes
  }

  /// Interpret an option value as a content format
  ///
  /// Empty values are `0`, values longer than 2 bytes are `None`.
  pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
    match bytes {
      | [] => Some(Self::from(0)),
      | [b] => Some(Self::from(*b as u16)),
      | [a, b] => Some(Self::from(u16::from_be_bytes([*a, *b]))),
      | _ => None,
    }
  }
}

impl<'a> From<&'a ContentFormat> for u16 {
  fn from(f: &'a ContentFormat) -> Self {
    use ContentFormat::*;
    match *f {
      | Text => 0,
      | LinkFormat => 40,
      | Xml => 41,
      | OctetStream => 42,
      | Exi => 47,
      | Json => 50,
      | Other(n) => n,
    }
  }
}

impl From<u16> for ContentFormat {
  fn from(n: u16) -> Self {
    use ContentFormat::*;
    match n {
      | 0 => Text,
      | 40 => LinkFormat,
      | 41 => Xml,
      | 42 => OctetStream,
      | 47 => Exi,
      | 50 => Json,
      | n => Other(n),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::OptNumber;

  #[test]
  fn content_format_bytes() {
    assert_eq!(ContentFormat::Json.bytes().as_slice(), &[50]);
    assert_eq!(ContentFormat::from_bytes(&[50]), Some(ContentFormat::Json));
    assert_eq!(ContentFormat::from_bytes(&[]), Some(ContentFormat::Text));
    assert_eq!(ContentFormat::from_bytes(&[0x03, 0xE8]),
               Some(ContentFormat::Other(1000)));
    assert_eq!(ContentFormat::from_bytes(&[1, 2, 3]), None);
  }

  #[test]
  fn known_numbers() {
    assert_eq!(PATH, OptNumber(11));
    assert_eq!(CONTENT_FORMAT, OptNumber(12));
  }
}
