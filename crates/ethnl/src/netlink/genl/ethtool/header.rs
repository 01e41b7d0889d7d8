//! Ethtool request header (`struct ethtool_nl_msghdr`).

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::{ETHTOOL_GENL_VERSION, EthtoolCmd};
use crate::netlink::builder::MessageBuilder;
use crate::netlink::genl::genl_request;
use crate::netlink::interface_ref::InterfaceRef;

/// Capacity of the interface name field, terminator included.
pub const IFNAMSIZ: usize = 16;

/// Identifies the device a request is about.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
pub struct EthnlMsgHdr {
    /// Device ifindex, 0 when selecting by name.
    pub ifindex: u32,
    /// Request/response flags.
    pub flags: u16,
    /// Request/response info mask.
    pub info_mask: u16,
    /// NUL-terminated device name, empty when selecting by index.
    pub ifname: [u8; IFNAMSIZ],
}

/// Size of the ethtool header in bytes.
pub const ETHNL_HDRLEN: usize = std::mem::size_of::<EthnlMsgHdr>();

impl EthnlMsgHdr {
    /// Build a header for `target`.
    ///
    /// Names longer than `IFNAMSIZ - 1` bytes are truncated so that the
    /// field always ends in a NUL.
    pub fn new(target: Option<&InterfaceRef>, flags: u16, info_mask: u16) -> Self {
        let mut hdr = Self {
            flags,
            info_mask,
            ..Self::default()
        };
        match target {
            Some(InterfaceRef::Index(index)) => hdr.ifindex = *index,
            Some(InterfaceRef::Name(name)) => {
                let len = name.len().min(IFNAMSIZ - 1);
                hdr.ifname[..len].copy_from_slice(&name.as_bytes()[..len]);
            }
            None => {}
        }
        hdr
    }

    /// Read a header from the start of a byte slice.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        Self::read_from_prefix(data).ok().map(|(hdr, _)| hdr)
    }

    /// Get the header as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        <Self as IntoBytes>::as_bytes(self)
    }

    /// Device name up to the first NUL, if one is set.
    pub fn name(&self) -> Option<String> {
        let len = self
            .ifname
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(IFNAMSIZ);
        if len == 0 {
            return None;
        }
        Some(String::from_utf8_lossy(&self.ifname[..len]).into_owned())
    }

    /// Device the header selects, if any. The index wins if both are set.
    pub fn target(&self) -> Option<InterfaceRef> {
        if self.ifindex != 0 {
            return Some(InterfaceRef::Index(self.ifindex));
        }
        self.name().map(InterfaceRef::Name)
    }
}

/// Start an ethtool request: transport header, GENL header, ethtool header.
pub fn ethtool_request(
    family_id: u16,
    cmd: EthtoolCmd,
    flags: u16,
    header: &EthnlMsgHdr,
) -> MessageBuilder {
    let mut builder = genl_request(family_id, cmd as u8, ETHTOOL_GENL_VERSION, flags);
    builder.append(header);
    builder
}
