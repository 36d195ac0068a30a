use std::process;
use std::sync::atomic::AtomicBool;

use perch::config::Config;
use perch::server::{Server, Stop};
use perch::storage::FileStorage;

static SIGNALED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
extern "C" fn on_signal(_: libc::c_int) {
  SIGNALED.store(true, std::sync::atomic::Ordering::SeqCst);
}

#[cfg(unix)]
fn handle_signals() {
  unsafe {
    libc::signal(libc::SIGINT, on_signal as libc::sighandler_t);
    libc::signal(libc::SIGTERM, on_signal as libc::sighandler_t);
  }
}

#[cfg(not(unix))]
fn handle_signals() {}

fn main() {
  perch::logging::init().ok();

  let config = Config::from_env().unwrap_or_else(|e| {
                                   log::error!("invalid configuration: {:?}", e);
                                   process::exit(1)
                                 });

  let socket = perch::net::bind(config.addr, config.poll_interval).unwrap_or_else(|e| {
                 log::error!("failed to bind {}: {}", config.addr, e);
                 process::exit(1)
               });

  log::info!("storing data in {}", config.data_file.display());
  let storage = FileStorage::new(&config.data_file);

  handle_signals();
  Server::new(socket, storage, config).run(&Stop::from_static(&SIGNALED));

  log::info!("bye");
}
