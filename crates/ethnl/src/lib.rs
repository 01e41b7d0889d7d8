//! Async ethtool client over Linux generic netlink.
//!
//! The crate resolves the `ethtool` generic netlink family, sends requests
//! with a fixed ethtool header and decodes the replies into typed values.
//! Replies are validated record by record; a length that does not fit in
//! the received bytes fails the exchange instead of being read.
//!
//! # Features
//!
//! - `output` - `serde::Serialize` for decoded replies
//!
//! # Example
//!
//! ```rust,no_run
//! use ethnl::netlink::Config;
//! use ethnl::netlink::genl::ethtool::EthtoolSession;
//!
//! #[tokio::main]
//! async fn main() -> ethnl::Result<()> {
//!     let mut session = EthtoolSession::open(&Config::default()).await?;
//!     let info = session.get_drvinfo("eth0").await?;
//!     println!("driver: {}", info.driver);
//!     Ok(())
//! }
//! ```

pub mod netlink;

pub use netlink::genl::ethtool::{DriverInfo, EthtoolSession, SettingsReply};
pub use netlink::{Config, Connection, Error, InterfaceRef, Protocol, Result};
