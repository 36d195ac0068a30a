use crate::req::Method;
use crate::resp::{bounded, code, Respond};
use crate::storage::Storage;

/// Decide how to answer a request for `path`.
///
/// Only `resource` exists:
/// - `POST` stores the body (at most `max_body` bytes, decoded lossily as UTF-8)
///   as one line, answering `2.04 UPDATED` or `5.00 WRITE_FAIL`
/// - `GET` answers `2.05` with the last non-empty stored line
///   (at most `max_body` bytes), or `NO_DATA`
/// - every other method, and every other path, answers `4.04 NOT_FOUND`
pub fn dispatch<S: Storage + ?Sized>(storage: &S,
                                     resource: &str,
                                     path: &str,
                                     method: Method,
                                     body: &[u8],
                                     max_body: usize)
                                     -> Respond {
  if path != resource {
    return Respond::new(code::NOT_FOUND, "NOT_FOUND");
  }

  match method {
    | Method::POST => {
      let line = String::from_utf8_lossy(bounded(body, max_body));
      match storage.append_line(&line) {
        | Ok(()) => Respond::new(code::CHANGED, "UPDATED"),
        | Err(e) => {
          log::warn!("failed to store {:?}: {}", line, e);
          Respond::new(code::INTERNAL_SERVER_ERROR, "WRITE_FAIL")
        },
      }
    },
    | Method::GET => match storage.read_last_nonempty_line() {
      | Some(line) => Respond::new(code::CONTENT, bounded(line.as_bytes(), max_body)),
      | None => Respond::new(code::CONTENT, "NO_DATA"),
    },
    | _ => Respond::new(code::NOT_FOUND, "NOT_FOUND"),
  }
}
