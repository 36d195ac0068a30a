use core::fmt::Write;
use core::str::FromStr;

use perch_msg::Message;
use tinyvec::ArrayVec;
use toad_writable::Writable;

/// Environment variable holding the log level (`error`, `warn`, `info`, `debug`, `trace` or `off`)
pub const ENV_LOG: &str = "PERCH_LOG";

/// Install [`simple_logger`] as the global logger, at the level named by
/// [`ENV_LOG`] (`info` when unset or unrecognized).
pub fn init() -> Result<(), log::SetLoggerError> {
  let level = std::env::var(ENV_LOG).ok()
                                    .and_then(|lvl| log::LevelFilter::from_str(&lvl).ok())
                                    .unwrap_or(log::LevelFilter::Info);

  simple_logger::SimpleLogger::new().with_level(level).init()
}

/// One-line summary of a message, dropping whatever does not fit
pub(crate) fn msg_summary(msg: &Message<'_>) -> Writable<ArrayVec<[u8; 96]>> {
  let mut buf: Writable<ArrayVec<[u8; 96]>> = Default::default();
  write!(buf,
         "{:?}: {:?} {} ",
         msg.code.kind(),
         msg.ty,
         String::from_iter(msg.code.to_human())).ok();

  msg.path_segments()
     .try_for_each(|seg| write!(buf, "/{}", String::from_utf8_lossy(seg)))
     .ok();

  write!(buf, " with {} byte payload", msg.payload.0.len()).ok();
  buf
}

#[cfg(test)]
mod tests {
  use perch_msg::{Code, Id, Opt, OptValue, Payload, Type, PATH};

  use super::*;

  #[test]
  fn summary() {
    let mut msg = Message { code: Code::new(0, 2),
                            payload: Payload(b"23.5"),
                            ..Message::new(Type::Con, Id(1)) };
    msg.opts.push(Opt { number: PATH,
                        value: OptValue(b"sensor") });

    assert_eq!(msg_summary(&msg).as_str(),
               "Request: Con 0.02 /sensor with 4 byte payload");
  }

  #[test]
  fn summary_of_long_path_is_cut_at_a_segment() {
    let long = "é".repeat(40);
    let mut msg = Message { code: Code::new(0, 1),
                            ..Message::new(Type::Non, Id(1)) };
    msg.opts.push(Opt { number: PATH,
                        value: OptValue(b"api") });
    msg.opts.push(Opt { number: PATH,
                        value: OptValue(long.as_bytes()) });

    assert_eq!(msg_summary(&msg).as_str(), "Request: Non 0.01 /api with 0 byte payload");
  }
}
