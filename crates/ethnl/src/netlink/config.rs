//! Session configuration.

use std::time::{SystemTime, UNIX_EPOCH};

use super::genl::ethtool::ETHTOOL_GENL_NAME;

/// Default receive buffer size.
///
/// Large enough for any single reply datagram the ethtool family sends.
pub const DEFAULT_RECV_BUFFER_SIZE: usize = 32768;

/// Configuration for a [`Connection`](super::Connection) and the session
/// built on top of it.
///
/// # Example
///
/// ```
/// use ethnl::netlink::Config;
///
/// let config = Config::new().recv_buffer_size(8192).initial_seq(100);
/// assert_eq!(config.get_recv_buffer_size(), 8192);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    family_name: String,
    recv_buffer_size: usize,
    initial_seq: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            family_name: ETHTOOL_GENL_NAME.to_string(),
            recv_buffer_size: DEFAULT_RECV_BUFFER_SIZE,
            initial_seq: None,
        }
    }
}

impl Config {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generic netlink family to resolve at session start.
    pub fn family_name(mut self, name: impl Into<String>) -> Self {
        self.family_name = name.into();
        self
    }

    /// Size of the scratch buffer each datagram is received into.
    ///
    /// Clamped to at least one netlink header.
    pub fn recv_buffer_size(mut self, size: usize) -> Self {
        self.recv_buffer_size = size.max(super::message::NLMSG_HDRLEN);
        self
    }

    /// First sequence number to use. Defaults to the current Unix time.
    pub fn initial_seq(mut self, seq: u32) -> Self {
        self.initial_seq = Some(seq);
        self
    }

    /// Get the family name.
    pub fn get_family_name(&self) -> &str {
        &self.family_name
    }

    /// Get the receive buffer size.
    pub fn get_recv_buffer_size(&self) -> usize {
        self.recv_buffer_size
    }

    /// Resolve the first sequence number.
    pub(crate) fn seed_seq(&self) -> u32 {
        self.initial_seq.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}
