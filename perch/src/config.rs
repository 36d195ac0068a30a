use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;
use std::time::Duration;

/// Default CoAP port
pub const DEFAULT_PORT: u16 = 5683;

/// Environment variable overriding [`Config::data_file`]
pub const ENV_DATA_FILE: &str = "COAP_DATAFILE";

/// Environment variable overriding [`Config::addr`]
pub const ENV_ADDR: &str = "PERCH_ADDR";

/// Environment variable overriding [`Config::resource`]
pub const ENV_RESOURCE: &str = "PERCH_RESOURCE";

/// Errors encounterable reading configuration from the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// [`ENV_ADDR`] was set, but wasn't a socket address like `0.0.0.0:5683`
  InvalidAddr,
}

/// Runtime configuration for the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// Address to listen on
  ///
  /// Defaults to all interfaces on the CoAP port:
  /// ```
  /// use perch::config::Config;
  ///
  /// assert_eq!(Config::default().addr, "0.0.0.0:5683".parse().unwrap());
  /// ```
  pub addr: SocketAddr,
  /// File the sensor resource is stored in
  ///
  /// ```
  /// use perch::config::Config;
  ///
  /// assert_eq!(Config::default().data_file.to_str(), Some("/opt/coap/data.txt"));
  /// ```
  pub data_file: PathBuf,
  /// Name of the only resource served, without slashes
  ///
  /// ```
  /// use perch::config::Config;
  ///
  /// assert_eq!(Config::default().resource, "sensor");
  /// ```
  pub resource: String,
  /// Request bodies are truncated to this many bytes before being stored,
  /// and stored lines are truncated to this many bytes before being sent.
  ///
  /// Defaults to 1024 bytes.
  /// ```
  /// use perch::config::Config;
  ///
  /// assert_eq!(Config::default().max_body, 1024);
  /// ```
  pub max_body: usize,
  /// Size of the buffers datagrams are received into & serialized into.
  ///
  /// Datagrams larger than this are truncated by the socket, and responses
  /// that don't fit are replaced (see [`resp::build`](crate::resp::build)).
  ///
  /// Defaults to 1500 bytes, a typical ethernet MTU.
  /// ```
  /// use perch::config::Config;
  ///
  /// assert_eq!(Config::default().dgram_capacity, 1500);
  /// ```
  pub dgram_capacity: usize,
  /// Longest time the server blocks waiting for a datagram,
  /// which bounds how long it takes to notice a stop request.
  ///
  /// Defaults to 500 milliseconds.
  /// ```
  /// use std::time::Duration;
  ///
  /// use perch::config::Config;
  ///
  /// assert_eq!(Config::default().poll_interval, Duration::from_millis(500));
  /// ```
  pub poll_interval: Duration,
}

impl Default for Config {
  fn default() -> Self {
    Self { addr: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
           data_file: PathBuf::from("/opt/coap/data.txt"),
           resource: "sensor".into(),
           max_body: 1024,
           dgram_capacity: 1500,
           poll_interval: Duration::from_millis(500) }
  }
}

impl Config {
  /// Read configuration from the process environment,
  /// falling back to [`Config::default`] for unset (or empty) variables.
  pub fn from_env() -> Result<Self, Error> {
    Self::from_vars(|key| std::env::var(key).ok())
  }

  /// Read configuration from `var`, a lookup from environment
  /// variable names to values.
  ///
  /// ```
  /// use perch::config::{self, Config};
  ///
  /// let config = Config::from_vars(|key| match key {
  ///                | config::ENV_DATA_FILE => Some("/tmp/data.txt".into()),
  ///                | config::ENV_RESOURCE => Some("/temp/".into()),
  ///                | _ => None,
  ///              }).unwrap();
  ///
  /// assert_eq!(config.data_file.to_str(), Some("/tmp/data.txt"));
  /// assert_eq!(config.resource, "temp");
  /// assert_eq!(config.addr, Config::default().addr);
  /// ```
  pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
    let set = |key: &str| var(key).filter(|val| !val.is_empty());
    let mut config = Self::default();

    if let Some(path) = set(ENV_DATA_FILE) {
      config.data_file = PathBuf::from(path);
    }

    if let Some(addr) = set(ENV_ADDR) {
      config.addr = addr.trim().parse().map_err(|_| Error::InvalidAddr)?;
    }

    if let Some(resource) = set(ENV_RESOURCE).map(|r| r.trim_matches('/').to_string())
                                             .filter(|r| !r.is_empty())
    {
      config.resource = resource;
    }

    Ok(config)
  }
}
