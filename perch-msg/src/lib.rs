//! Low-level representation of CoAP messages.
//!
//! The most notable item in `perch_msg` is [`Message`];
//! a CoAP message very close to the actual byte layout.
//!
//! ## Borrowing
//! CoAP messages have some attributes whose size is dynamic:
//! - The message payload (in http terms: the request/response body)
//! - the number of options (in http terms: headers)
//! - the value of an option (in http terms: header value)
//!
//! `Message` never copies these out of the datagram it was parsed from.
//! Option values and the payload are slices of the input buffer, the token
//! is at most 8 bytes and lives on the stack, and options are collected into
//! [`Opts`], which holds the first 16 inline and only allocates past that.
//!
//! Every write into a destination buffer is bounds-checked up front:
//!
//! ```rust
//! use perch_msg::{Message, TryFromBytes, TryIntoBytes};
//!
//! //                    ver type tkl  code (0.01 GET)  message id
//! let dgram: [u8; 11] = [0b01_00_0000, 0x01, 0x00, 0x07,
//!                        // Uri-Path "sensor"
//!                        0b1011_0110, b's', b'e', b'n', b's', b'o', b'r'];
//!
//! let msg = Message::try_from_bytes(&dgram).unwrap();
//! assert_eq!(msg.path_segments().collect::<Vec<_>>(), vec![&b"sensor"[..]]);
//!
//! let mut out = [0u8; 64];
//! let n = msg.try_into_bytes(&mut out).unwrap();
//! assert_eq!(&out[..n], &dgram[..]);
//! ```

#![doc(html_root_url = "https://docs.rs/perch-msg/0.1.0")]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(not(test), forbid(missing_debug_implementations, unreachable_pub))]
#![cfg_attr(not(test), deny(unsafe_code, missing_copy_implementations))]
#![cfg_attr(any(docsrs, feature = "docs"), feature(doc_cfg))]
#![deny(missing_docs)]

/// Cursor over a borrowed byte buffer
pub mod cursor;

#[doc(hidden)]
pub mod from_bytes;

/// Message structs
pub mod msg;

#[doc(hidden)]
pub mod to_bytes;

#[doc(inline)]
pub use cursor::Cursor;
#[doc(inline)]
pub use from_bytes::TryFromBytes;
#[doc(inline)]
pub use msg::*;
#[doc(inline)]
pub use to_bytes::{MessageToBytesError, TryIntoBytes};

#[cfg(test)]
pub(crate) fn test_msg<'a>() -> (Message<'a>, Vec<u8>) {
  let header: [u8; 4] = 0b0100_0001_0100_0101_0000_0000_0000_0001_u32.to_be_bytes();
  let token: [u8; 1] = [254u8];
  let content_format: &'static [u8] = b"application/json";
  let options: [&[u8]; 2] = [&[0b_1100_1101u8, 0b00000011u8], content_format];
  let payload: [&[u8]; 2] = [&[0b1111_1111_u8], b"hello, world!"];
  let bytes = [header.as_ref(),
               token.as_ref(),
               options.concat().as_ref(),
               payload.concat().as_ref()].concat();

  let mut opts = Opts::default();
  opts.push(Opt { number: OptNumber(12),
                  value: OptValue(content_format) });

  let msg = Message { id: Id(1),
                      ty: Type::Con,
                      ver: Version(1),
                      token: Token(tinyvec::array_vec!([u8; 8] => 254)),
                      opts,
                      code: Code { class: 2,
                                   detail: 5 },
                      payload: Payload(b"hello, world!") };
  (msg, bytes)
}

#[cfg(test)]
pub(crate) mod tests {
  #[allow(missing_docs)]
  #[macro_export]
  macro_rules! assert_eqb {
    ($actual:expr, $expected:expr) => {
      if $actual != $expected {
        panic!("expected {:08b} to equal {:08b}", $actual, $expected)
      }
    };
  }

  #[allow(missing_docs)]
  #[macro_export]
  macro_rules! assert_eqb_iter {
    ($actual:expr, $expected:expr) => {
      if $actual.iter().ne($expected.iter()) {
        panic!("expected {:?} to equal {:?}",
               $actual.into_iter()
                      .map(|b| format!("{:08b}", b))
                      .collect::<Vec<_>>(),
               $expected.into_iter()
                        .map(|b| format!("{:08b}", b))
                        .collect::<Vec<_>>())
      }
    };
  }
}
