//! `perch` is a tiny CoAP server that exposes a single sensor resource
//! backed by a line-oriented data file, plus a matching command-line client.
//!
//! ## Resource
//! The server answers requests for exactly one path (by default `/sensor`):
//! - `POST /sensor` appends the request payload to the data file as one line,
//!   responding `2.04 Changed` with payload `UPDATED`
//! - `GET /sensor` responds `2.05 Content` with the most recent non-empty line,
//!   or `NO_DATA` when nothing has been stored yet
//! - anything else responds `4.04 Not Found`
//!
//! Every response carries a Content-Format option of `text/plain`.
//!
//! ## Processing
//! Datagrams are handled one at a time, in the order they arrive:
//!
//! ```text
//! bytes -> Message -> (path, method, body) -> dispatch -> Respond -> bytes
//! ```
//!
//! Malformed datagrams, as well as inbound ACK and RESET messages, are dropped
//! without a reply. There is no retransmission, no deduplication of message
//! IDs and no state shared between requests other than the data file.
//!
//! ```
//! use perch::server::dispatch;
//! use perch::req::Method;
//! use perch::resp::code;
//! # use perch::storage::Storage;
//! # #[derive(Default)]
//! # struct Mem(std::cell::RefCell<Vec<String>>);
//! # impl Storage for Mem {
//! #   fn append_line(&self, line: &str) -> std::io::Result<()> { self.0.borrow_mut().push(line.into()); Ok(()) }
//! #   fn read_last_nonempty_line(&self) -> Option<String> { self.0.borrow().iter().rev().find(|l| !l.is_empty()).cloned() }
//! # }
//! let storage = Mem::default();
//!
//! let rep = dispatch(&storage, "sensor", "sensor", Method::POST, b"23.5", 1024);
//! assert_eq!(rep.code, code::CHANGED);
//!
//! let rep = dispatch(&storage, "sensor", "sensor", Method::GET, b"", 1024);
//! assert_eq!(rep.code, code::CONTENT);
//! assert_eq!(rep.payload, b"23.5");
//! ```

#![doc(html_root_url = "https://docs.rs/perch/0.1.0")]
#![cfg_attr(any(docsrs, feature = "docs"), feature(doc_cfg))]
// -
// style
#![allow(clippy::unused_unit)]
// -
// deny
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![cfg_attr(not(test), deny(unsafe_code))]
// -
// warnings
#![cfg_attr(not(test), warn(unreachable_pub))]

#[cfg(test)]
pub(crate) mod test;

/// Logger setup & log formatting
pub mod logging;

/// Server configuration
pub mod config;

/// Network abstractions
pub mod net;

/// Requests
pub mod req;

/// Responses
pub mod resp;

/// The datagram loop, request dispatcher & stop signal
pub mod server;

/// Durable storage for the sensor resource
pub mod storage;

pub use perch_msg as msg;

macro_rules! code {
  (rfc7252($section:literal) $name:ident = $c:literal.$d:literal) => {
    #[doc = toad_macros::rfc_7252_doc!($section)]
    #[allow(clippy::zero_prefixed_literal)]
    pub const $name: perch_msg::Code = perch_msg::Code::new($c, $d);
  };
  (rfc7252($section:literal) $name:ident = $newtype:tt($c:literal.$d:literal)) => {
    #[doc = toad_macros::rfc_7252_doc!($section)]
    #[allow(clippy::zero_prefixed_literal)]
    pub const $name: $newtype = $newtype(perch_msg::Code::new($c, $d));
  };
}

pub(crate) use code;
