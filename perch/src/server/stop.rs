use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Flag {
  Owned(Arc<AtomicBool>),
  Static(&'static AtomicBool),
}

/// Handle used to ask a running [`Server`](super::Server) to shut down.
///
/// Clones share the same flag. The server checks it once per receive,
/// so shutdown happens at most one poll interval after [`Stop::request`].
///
/// ```
/// use perch::server::Stop;
///
/// let stop = Stop::new();
/// let handle = stop.clone();
///
/// assert!(!stop.is_requested());
/// handle.request();
/// assert!(stop.is_requested());
/// ```
#[derive(Debug, Clone)]
pub struct Stop(Flag);

impl Default for Stop {
  fn default() -> Self {
    Self::new()
  }
}

impl Stop {
  /// Create a stop handle that has not been requested
  pub fn new() -> Self {
    Self(Flag::Owned(Arc::new(AtomicBool::new(false))))
  }

  /// Observe a flag with `'static` lifetime, such as one set from a signal handler.
  ///
  /// ```
  /// use std::sync::atomic::{AtomicBool, Ordering};
  ///
  /// use perch::server::Stop;
  ///
  /// static SIGNALED: AtomicBool = AtomicBool::new(false);
  ///
  /// let stop = Stop::from_static(&SIGNALED);
  /// SIGNALED.store(true, Ordering::SeqCst);
  /// assert!(stop.is_requested());
  /// ```
  pub fn from_static(flag: &'static AtomicBool) -> Self {
    Self(Flag::Static(flag))
  }

  /// Ask the server to stop
  pub fn request(&self) {
    self.flag().store(true, Ordering::SeqCst)
  }

  /// Has a stop been requested?
  pub fn is_requested(&self) -> bool {
    self.flag().load(Ordering::SeqCst)
  }

  fn flag(&self) -> &AtomicBool {
    match &self.0 {
      | Flag::Owned(flag) => flag,
      | Flag::Static(flag) => flag,
    }
  }
}
