use perch_msg::{Message, TryFromBytes, Type};

use crate::config::Config;
use crate::logging::msg_summary;
use crate::net::{Addrd, Socket};
use crate::req::Req;
use crate::resp;
use crate::storage::Storage;

/// Mapping requests to resource actions
pub mod dispatch;

/// Shutdown signal
pub mod stop;

#[doc(inline)]
pub use dispatch::dispatch;
#[doc(inline)]
pub use stop::Stop;

/// The datagram loop
///
/// Receives one datagram at a time and, if it is a well-formed CON or NON
/// request, sends exactly one response back to its sender before receiving
/// the next.
///
/// ```no_run
/// use perch::config::Config;
/// use perch::server::{Server, Stop};
/// use perch::storage::FileStorage;
///
/// let config = Config::default();
/// let socket = perch::net::bind(config.addr, config.poll_interval).unwrap();
/// let storage = FileStorage::new(&config.data_file);
///
/// Server::new(socket, storage, config).run(&Stop::new());
/// ```
#[derive(Debug)]
pub struct Server<Sock, Store> {
  socket: Sock,
  storage: Store,
  config: Config,
}

impl<Sock, Store> Server<Sock, Store>
  where Sock: Socket,
        Store: Storage
{
  /// Create a server
  pub fn new(socket: Sock, storage: Store, config: Config) -> Self {
    Self { socket,
           storage,
           config }
  }

  /// Get the server's configuration
  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Receive, handle & respond to datagrams until `stop` is requested.
  ///
  /// Errors are logged and never end the loop.
  pub fn run(&self, stop: &Stop) {
    log::info!("serving /{} on {}", self.config.resource, self.config.addr);

    let mut dgram = vec![0u8; self.config.dgram_capacity];
    let mut out = vec![0u8; self.config.dgram_capacity];

    while !stop.is_requested() {
      match self.socket.recv(&mut dgram) {
        | Ok(Addrd(n, addr)) => {
          let size = match self.handle(&dgram[..n], &mut out) {
            | Some(size) => size,
            | None => continue,
          };

          if let Err(e) = nb::block!(self.socket.send(Addrd(&out[..size], addr))) {
            log::error!("failed to send response to {}: {:?}", addr, e);
          }
        },
        | Err(nb::Error::WouldBlock) => continue,
        | Err(nb::Error::Other(e)) => log::error!("failed to receive datagram: {:?}", e),
      }
    }

    log::info!("stop requested, shutting down");
  }

  /// Handle a single datagram, serializing the response into `out`.
  ///
  /// Yields the length of the response, or `None` if the
  /// datagram should not be answered.
  pub fn handle(&self, dgram: &[u8], out: &mut [u8]) -> Option<usize> {
    let msg = match Message::try_from_bytes(dgram) {
      | Ok(msg) => msg,
      | Err(e) => {
        log::debug!("dropping malformed datagram: {:?}", e);
        return None;
      },
    };

    log::trace!("{}", msg_summary(&msg).as_str());

    if let Type::Ack | Type::Reset = msg.ty {
      log::debug!("dropping inbound {:?}", msg.ty);
      return None;
    }

    let req = Req::from(msg);
    let rep = dispatch(&self.storage,
                       &self.config.resource,
                       &req.path(),
                       req.method(),
                       req.payload(),
                       self.config.max_body);

    resp::build(req.msg(), rep, out)
  }
}
