//! Async generic netlink client for the kernel ethtool family.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ethnl::netlink::Config;
//! use ethnl::netlink::genl::ethtool::EthtoolSession;
//!
//! # async fn example() -> ethnl::Result<()> {
//! let mut session = EthtoolSession::open(&Config::default()).await?;
//!
//! let info = session.get_drvinfo("eth0").await?;
//! println!("{}: {} {}", info.bus_info, info.driver, info.version);
//!
//! session.get_settings("eth0").await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Layers
//!
//! - [`message`], [`attr`] and [`MessageBuilder`]: wire format. Every
//!   length read from a datagram is checked against the bytes available.
//! - [`Connection`]: one request at a time, replies correlated by sequence
//!   number and port id.
//! - [`genl`]: family resolution and the ethtool commands.
//!
//! Anything that implements [`Transport`] can carry a connection. The
//! kernel socket is [`NetlinkSocket`].

pub mod attr;
mod builder;
mod config;
pub mod connection;
mod error;
#[cfg(test)]
mod fixtures;
pub mod genl;
mod interface_ref;
pub mod message;
mod socket;
mod transport;

pub use attr::{AttrIter, AttrSet, AttrTable, NlAttr};
pub use builder::MessageBuilder;
pub use config::{Config, DEFAULT_RECV_BUFFER_SIZE};
pub use connection::{Connection, ExchangeState, Frame, Progress, ReplyDecoder};
pub use error::{Error, Result};
pub use interface_ref::InterfaceRef;
pub use message::{MessageIter, NLMSG_HDRLEN, NlMsgHdr, NlMsgType};
pub use socket::{NetlinkSocket, Protocol};
pub use transport::Transport;
