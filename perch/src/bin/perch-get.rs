use std::net::{SocketAddr, ToSocketAddrs};
use std::process;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;
use perch::msg::{Id, Message, Token, TryFromBytes, TryIntoBytes};
use perch::net::{Addrd, Socket};
use perch::req::ReqBuilder;
use rand::{Rng, SeedableRng};

/// Fetch the current value of a perch resource
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "perch-get")]
#[command(about = "GET a resource from a CoAP server", long_about = None)]
struct Args {
  /// Server host name or IP address
  #[arg(long)]
  host: String,

  /// Server port
  #[arg(long, default_value_t = perch::config::DEFAULT_PORT)]
  port: u16,

  /// Resource path
  #[arg(long, default_value = "sensor")]
  path: String,

  /// Seconds to wait for a response
  #[arg(long, default_value_t = 5.0, value_parser = parse_timeout)]
  timeout: f64,
}

/// A finite, positive number of seconds that fits in a [`Duration`]
fn parse_timeout(s: &str) -> Result<f64, String> {
  let secs: f64 = s.parse().map_err(|_| format!("`{}` is not a number", s))?;

  match Duration::try_from_secs_f64(secs) {
    | Ok(d) if !d.is_zero() => Ok(secs),
    | _ => Err(format!("`{}` is not a positive number of seconds", s)),
  }
}

fn fail(code: i32, msg: impl AsRef<str>) -> ! {
  eprintln!("{}", msg.as_ref());
  process::exit(code)
}

fn main() {
  perch::logging::init().ok();

  let args = Args::try_parse().unwrap_or_else(|e| match e.kind() {
                                | clap::error::ErrorKind::DisplayHelp
                                | clap::error::ErrorKind::DisplayVersion => e.exit(),
                                | _ => fail(2, e.to_string()),
                              });

  let seed = SystemTime::now().duration_since(UNIX_EPOCH)
                              .map(|d| d.as_nanos() as u64)
                              .unwrap_or_default();
  let mut rand = rand_chacha::ChaCha8Rng::seed_from_u64(seed);

  let token = Token::try_from_slice(&rand.gen::<u32>().to_be_bytes()).unwrap_or_default();
  let req = ReqBuilder::get(&args.path).id(Id(rand.gen()))
                                       .token(token);

  let mut buf = [0u8; 1500];
  let n = req.build()
             .try_into_bytes(&mut buf)
             .unwrap_or_else(|e| fail(2, format!("[ERROR] failed to build request: {:?}", e)));

  let addr: SocketAddr = (args.host.as_str(), args.port).to_socket_addrs()
                                                        .ok()
                                                        .and_then(|mut addrs| addrs.next())
                                                        .unwrap_or_else(|| {
                                                          fail(2, format!("[ERROR] unknown host {}", args.host))
                                                        });

  let timeout = Duration::try_from_secs_f64(args.timeout).unwrap_or_else(|e| {
                                                           fail(2, format!("[ERROR] invalid timeout: {}", e))
                                                         });

  let local = if addr.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
  let sock = perch::net::bind(local, timeout).unwrap_or_else(|e| {
                                               fail(2, format!("[ERROR] failed to open socket: {}", e))
                                             });

  if let Err(e) = nb::block!(Socket::send(&sock, Addrd(&buf[..n], addr))) {
    fail(2, format!("[ERROR] failed to send request: {}", e));
  }

  let mut dgram = [0u8; 1500];
  let n = match Socket::recv(&sock, &mut dgram) {
    | Ok(Addrd(n, _)) => n,
    | Err(nb::Error::WouldBlock) => fail(1,
                                         format!("[TIMEOUT] GET coap://{}/{} (>{:.1}s)",
                                                 args.host, args.path, args.timeout)),
    | Err(nb::Error::Other(e)) => fail(2, format!("[ERROR] failed to receive response: {}", e)),
  };

  let rep = Message::try_from_bytes(&dgram[..n]).unwrap_or_else(|e| {
                                                   log::debug!("{:?}", e);
                                                   fail(2, "[ERROR] invalid CoAP response")
                                                 });

  println!("coap://{}/{}", args.host, args.path);
  println!("[OK] GET -> {} | {}",
           String::from_iter(rep.code.to_human()),
           String::from_utf8_lossy(rep.payload.0));
}

#[cfg(test)]
mod tests {
  use super::*;

  fn args(s: &str) -> Result<Args, clap::Error> {
    Args::try_parse_from(std::iter::once("perch-get").chain(s.split_whitespace()))
  }

  #[test]
  fn defaults() {
    assert_eq!(args("--host 10.0.0.5").unwrap(),
               Args { host: "10.0.0.5".into(),
                      port: 5683,
                      path: "sensor".into(),
                      timeout: 5.0 });
  }

  #[test]
  fn overrides() {
    let parsed = args("--path api/temp --port 9999 --timeout 0.5 --host ::1").unwrap();
    assert_eq!(parsed.port, 9999);
    assert_eq!(parsed.path, "api/temp");
    assert_eq!(parsed.timeout, 0.5);
    assert_eq!(parsed.host, "::1");
  }

  #[test]
  fn errors() {
    assert!(args("").is_err());
    assert!(args("--host").is_err());
    assert!(args("--host a --port x").is_err());
    assert!(args("--host a --port 70000").is_err());
    assert!(args("--host a --timeout x").is_err());
    assert!(args("--host a --verbose").is_err());
  }

  #[test]
  fn timeout_bounds() {
    assert_eq!(parse_timeout("0.25"), Ok(0.25));
    assert!(parse_timeout("0").is_err());
    assert!(parse_timeout("-1").is_err());
    assert!(parse_timeout("NaN").is_err());
    assert!(parse_timeout("inf").is_err());
    assert!(parse_timeout("1e20").is_err());
    assert!(args("--host a --timeout 1e20").is_err());
  }
}
