#![allow(dead_code)]

use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use crate::net::*;
use crate::storage::{self, Storage};

/// A mocked socket
#[derive(Debug, Default, Clone)]
pub struct SockMock {
  /// Inbound bytes from remote sockets. Address represents the sender
  pub rx: Arc<Mutex<Vec<Addrd<Vec<u8>>>>>,
  /// Outbound bytes to remote sockets. Address represents the destination
  pub tx: Arc<Mutex<Vec<Addrd<Vec<u8>>>>>,
}

impl SockMock {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push_rx(&self, dgram: impl AsRef<[u8]>, from: SocketAddr) {
    self.rx
        .lock()
        .unwrap()
        .push(Addrd(dgram.as_ref().to_vec(), from));
  }

  pub fn rx_len(&self) -> usize {
    self.rx.lock().unwrap().len()
  }

  pub fn sent(&self) -> Vec<Addrd<Vec<u8>>> {
    self.tx.lock().unwrap().clone()
  }
}

impl Socket for SockMock {
  type Error = Option<()>;

  fn recv(&self, buf: &mut [u8]) -> nb::Result<Addrd<usize>, Self::Error> {
    let mut rx = self.rx.lock().unwrap();

    if rx.is_empty() {
      return Err(nb::Error::WouldBlock);
    }

    let dgram = rx.remove(0);
    let n = dgram.data().len().min(buf.len());
    buf[..n].copy_from_slice(&dgram.data()[..n]);

    Ok(dgram.map(|_| n))
  }

  fn send(&self, msg: Addrd<&[u8]>) -> nb::Result<(), Self::Error> {
    self.tx.lock().unwrap().push(msg.map(|bytes| bytes.to_vec()));
    Ok(())
  }
}

/// In-memory storage
#[derive(Debug, Default)]
pub struct MemStorage {
  text: Mutex<String>,
  fail: bool,
}

impl MemStorage {
  /// Storage whose appends always fail
  pub fn failing() -> Self {
    Self { fail: true,
           ..Default::default() }
  }

  pub fn lines(&self) -> Vec<String> {
    self.text.lock().unwrap().lines().map(String::from).collect()
  }
}

impl Storage for MemStorage {
  fn append_line(&self, line: &str) -> io::Result<()> {
    if self.fail {
      return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
    }

    let mut text = self.text.lock().unwrap();
    text.push_str(line);
    text.push('\n');
    Ok(())
  }

  fn read_last_nonempty_line(&self) -> Option<String> {
    storage::last_nonempty_line(self.text.lock().unwrap().as_bytes()).unwrap()
  }
}
