use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

/// Data that came from (or is headed to) a network socket
#[derive(PartialEq, PartialOrd, Eq, Ord, Hash, Debug, Clone, Copy)]
pub struct Addrd<T>(pub T, pub SocketAddr);

impl<T> Addrd<T> {
  /// Borrow the contents of this Addressed
  pub fn as_ref(&self) -> Addrd<&T> {
    Addrd(self.data(), self.addr())
  }

  /// Discard the socket and get the data in this Addressed
  pub fn unwrap(self) -> T {
    self.0
  }

  /// Map the data contained in this Addressed
  pub fn map<R>(self, f: impl FnOnce(T) -> R) -> Addrd<R> {
    Addrd(f(self.0), self.1)
  }

  /// Borrow the contents of the addressed item
  pub fn data(&self) -> &T {
    &self.0
  }

  /// Copy the socket address for the data
  pub fn addr(&self) -> SocketAddr {
    self.1
  }
}

/// A datagram socket
///
/// Receiving is expected to give up after a bounded amount of time,
/// yielding [`nb::Error::WouldBlock`] so that callers get a chance to
/// do other things (like noticing that they have been asked to stop).
pub trait Socket {
  /// The error yielded by socket operations
  type Error: core::fmt::Debug;

  /// Send a datagram to a remote address
  fn send(&self, msg: Addrd<&[u8]>) -> nb::Result<(), Self::Error>;

  /// Pull a datagram from the socket, along with the address of the sender.
  ///
  /// It is expected that (like [`std::net::UdpSocket`]) if the datagram is larger
  /// than the buffer, the excess bytes are dropped and not considered an error condition.
  fn recv(&self, buffer: &mut [u8]) -> nb::Result<Addrd<usize>, Self::Error>;
}

impl Socket for UdpSocket {
  type Error = io::Error;

  fn send(&self, msg: Addrd<&[u8]>) -> nb::Result<(), Self::Error> {
    self.send_to(msg.data(), msg.addr())
        .map(|_| ())
        .map_err(io_to_nb)
  }

  fn recv(&self, buffer: &mut [u8]) -> nb::Result<Addrd<usize>, Self::Error> {
    self.recv_from(buffer)
        .map(|(n, addr)| Addrd(n, addr))
        .map_err(io_to_nb)
  }
}

/// Bind a UDP socket whose receives give up after `poll_interval`.
pub fn bind<A: ToSocketAddrs>(addr: A, poll_interval: Duration) -> io::Result<UdpSocket> {
  let sock = UdpSocket::bind(addr)?;
  sock.set_read_timeout(Some(poll_interval))?;
  Ok(sock)
}

/// Read timeouts surface as `WouldBlock` on unix and `TimedOut` on windows
pub(crate) fn io_to_nb(err: io::Error) -> nb::Error<io::Error> {
  match err.kind() {
    | io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => nb::Error::WouldBlock,
    | _ => nb::Error::Other(err),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn timeouts_would_block() {
    let would_block = |kind: io::ErrorKind| matches!(io_to_nb(kind.into()), nb::Error::WouldBlock);

    assert!(would_block(io::ErrorKind::WouldBlock));
    assert!(would_block(io::ErrorKind::TimedOut));
    assert!(!would_block(io::ErrorKind::ConnectionRefused));
  }

  #[test]
  fn addrd_map() {
    let addr: SocketAddr = "127.0.0.1:5683".parse().unwrap();
    let dgram = Addrd(vec![1u8, 2, 3], addr);

    assert_eq!(dgram.as_ref().map(|d| d.len()), Addrd(3, addr));
    assert_eq!(dgram.unwrap(), vec![1, 2, 3]);
  }

  #[test]
  fn udp_recv_times_out() {
    let sock = bind("127.0.0.1:0", Duration::from_millis(10)).unwrap();
    let mut buf = [0u8; 16];

    assert!(matches!(Socket::recv(&sock, &mut buf), Err(nb::Error::WouldBlock)));
  }

  #[test]
  fn udp_loopback() {
    let a = bind("127.0.0.1:0", Duration::from_secs(2)).unwrap();
    let b = bind("127.0.0.1:0", Duration::from_secs(2)).unwrap();
    let b_addr = b.local_addr().unwrap();

    nb::block!(Socket::send(&a, Addrd(&[1u8, 2, 3][..], b_addr))).unwrap();

    let mut buf = [0u8; 16];
    let Addrd(n, from) = nb::block!(Socket::recv(&b, &mut buf)).unwrap();
    assert_eq!(&buf[..n], &[1, 2, 3]);
    assert_eq!(from, a.local_addr().unwrap());
  }
}
