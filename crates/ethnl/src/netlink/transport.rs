//! Datagram transport seam.
//!
//! The request/response engine only needs to send a datagram, receive one
//! into a caller-owned buffer, and know its own port id. Opening and binding
//! happen when a transport is constructed (see [`NetlinkSocket::new`]) and
//! closing happens on drop.
//!
//! [`NetlinkSocket::new`]: super::NetlinkSocket::new

use super::error::Result;

/// A bound datagram endpoint.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Port id assigned to this endpoint at bind time.
    fn port_id(&self) -> u32;

    /// Send one datagram, returning the number of bytes sent.
    async fn send(&self, msg: &[u8]) -> Result<usize>;

    /// Receive one datagram into `buf`, returning its length.
    ///
    /// A return of zero signals an orderly end of the exchange.
    async fn recv(&self, buf: &mut [u8]) -> Result<usize>;
}
