//! Low-level async netlink socket operations.

use std::os::unix::io::{AsRawFd, RawFd};

use netlink_sys::{Socket, SocketAddr, protocols};
use tokio::io::Interest;
use tokio::io::unix::AsyncFd;
use tracing::trace;

use super::error::{Error, Result};
use super::transport::Transport;

/// Netlink protocol families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// Generic netlink, home of the control and ethtool families.
    Generic,
}

impl Protocol {
    fn as_isize(self) -> isize {
        match self {
            Protocol::Generic => protocols::NETLINK_GENERIC,
        }
    }
}

/// Async netlink socket.
pub struct NetlinkSocket {
    /// The underlying async file descriptor.
    fd: AsyncFd<Socket>,
    /// Local port ID (assigned by kernel).
    pid: u32,
    /// Protocol this socket uses.
    protocol: Protocol,
}

impl NetlinkSocket {
    /// Open a netlink socket for the given protocol and bind it.
    ///
    /// The kernel picks the port id. Failure to open or bind is reported as
    /// [`Error::TransportUnavailable`].
    pub fn new(protocol: Protocol) -> Result<Self> {
        Self::create_socket(protocol).map_err(|source| Error::TransportUnavailable { source })
    }

    fn create_socket(protocol: Protocol) -> std::io::Result<Self> {
        let mut socket = Socket::new(protocol.as_isize())?;
        socket.set_non_blocking(true)?;

        // Bind to get a port ID
        let mut addr = SocketAddr::new(0, 0);
        socket.bind(&addr)?;
        socket.get_address(&mut addr)?;
        let pid = addr.port_number();

        // Error text from the kernel ends up in Error::Kernel
        socket.set_ext_ack(true).ok(); // Ignore if not supported

        let fd = AsyncFd::new(socket)?;

        Ok(Self { fd, pid, protocol })
    }

    /// Get the local port ID.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Get the protocol.
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }
}

impl Transport for NetlinkSocket {
    fn port_id(&self) -> u32 {
        self.pid
    }

    async fn send(&self, msg: &[u8]) -> Result<usize> {
        loop {
            let mut guard = self.fd.ready(Interest::WRITABLE).await?;

            match guard.try_io(|inner| inner.get_ref().send(msg, 0)) {
                Ok(result) => {
                    let n = result.map_err(|source| Error::SendFailure { source })?;
                    trace!(bytes = n, "sent netlink datagram");
                    return Ok(n);
                }
                Err(_would_block) => continue,
            }
        }
    }

    async fn recv(&self, buf: &mut [u8]) -> Result<usize> {
        loop {
            let mut guard = self.fd.ready(Interest::READABLE).await?;

            match guard.try_io(|inner| {
                let mut dst = &mut buf[..];
                inner.get_ref().recv(&mut dst, 0)
            }) {
                Ok(result) => {
                    let n = result?;
                    trace!(bytes = n, "received netlink datagram");
                    return Ok(n);
                }
                Err(_would_block) => continue,
            }
        }
    }
}

impl AsRawFd for NetlinkSocket {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.get_ref().as_raw_fd()
    }
}
