//! Ethtool queries over Generic Netlink.
//!
//! The `ethtool` family puts a fixed request header after the GENL header
//! instead of a nested header attribute:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ nlmsghdr (16 bytes)                     │
//! ├─────────────────────────────────────────┤
//! │ genlmsghdr (4 bytes)                    │
//! ├─────────────────────────────────────────┤
//! │ ethtool_nl_msghdr (24 bytes)            │
//! │   ifindex (u32), flags (u16),           │
//! │   info_mask (u16), ifname[16]           │
//! ├─────────────────────────────────────────┤
//! │ Attributes (ETHA_*)                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The device is selected by index or by name, never both. A header with
//! neither selects no particular device.
//!
//! # Example
//!
//! ```rust,no_run
//! use ethnl::netlink::Config;
//! use ethnl::netlink::genl::ethtool::EthtoolSession;
//!
//! # async fn example() -> ethnl::Result<()> {
//! let mut session = EthtoolSession::open(&Config::default()).await?;
//!
//! let info = session.get_drvinfo("eth0").await?;
//! println!("driver: {}", info.driver);
//! # Ok(())
//! # }
//! ```

mod drvinfo;
mod header;
mod session;
mod settings;

pub use drvinfo::{DriverInfo, DrvinfoDecoder};
pub use header::{ETHNL_HDRLEN, EthnlMsgHdr, IFNAMSIZ, ethtool_request};
pub use session::EthtoolSession;
pub use settings::{SettingsDecoder, SettingsReply};

use crate::netlink::attr::AttrSet;

/// Ethtool Generic Netlink family name.
pub const ETHTOOL_GENL_NAME: &str = "ethtool";

/// Ethtool Generic Netlink version.
pub const ETHTOOL_GENL_VERSION: u8 = 1;

macro_rules! attr_set {
    ($ty:ty, $max:expr) => {
        impl AttrSet for $ty {
            const MAX: u16 = $max as u16;

            fn id(self) -> u16 {
                self as u16
            }
        }
    };
}

/// Ethtool netlink commands.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EthtoolCmd {
    Noop = 0,
    /// Get driver information.
    GetDrvinfo = 1,
    /// Driver information reply (never sent by userspace).
    SetDrvinfo = 2,
    /// Get link settings.
    GetSettings = 3,
    /// Set link settings.
    SetSettings = 4,
}

/// Attributes of `GET_DRVINFO` replies.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrvinfoAttr {
    Unspec = 0,
    /// Driver name (string).
    Driver = 1,
    /// Driver version (string).
    Version = 2,
    /// Firmware version (string).
    FwVersion = 3,
    /// Bus address (string).
    BusInfo = 4,
    /// Expansion ROM version (string).
    EromVer = 5,
    /// Number of private flags (u32).
    NPrivFlags = 6,
    /// Number of statistics (u32).
    NStats = 7,
    /// Number of self-test results (u32).
    TestinfoLen = 8,
    /// EEPROM dump size (u32).
    EedumpLen = 9,
    /// Register dump size (u32).
    RegdumpLen = 10,
}

attr_set!(DrvinfoAttr, DrvinfoAttr::RegdumpLen);

/// Attributes of `GET_SETTINGS` / `SET_SETTINGS` messages.
///
/// Only the ids are defined here. The payload types noted below are the
/// ones declared by the kernel header; nothing in this crate interprets
/// them yet.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAttr {
    Unspec = 0,
    /// u32
    Speed = 1,
    /// s8
    Duplex = 2,
    /// u32
    Port = 3,
    /// u32
    Phyaddr = 4,
    /// u8
    Autoneg = 5,
    /// bitfield32
    MdioSupport = 6,
    /// u32
    TpMdix = 7,
    /// u32
    TpMdixCtrl = 8,
    /// bitfield32
    WolModes = 9,
    /// binary
    Sopass = 10,
    /// bitfield32
    Msglvl = 11,
    /// bitset
    LinkModes = 12,
    /// bitset
    PeerModes = 13,
}

attr_set!(SettingsAttr, SettingsAttr::PeerModes);

/// Attributes of one bit inside a bitset.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitAttr {
    Unspec = 0,
    /// u32
    Index = 1,
    /// string
    Name = 2,
    /// flag
    Value = 3,
}

attr_set!(BitAttr, BitAttr::Value);

/// Container of bit entries inside a bitset.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitsAttr {
    Unspec = 0,
    /// nest of [`BitAttr`]
    Bit = 1,
}

attr_set!(BitsAttr, BitsAttr::Bit);

/// Bitset attributes.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitsetAttr {
    Unspec = 0,
    /// u32
    Size = 1,
    /// nest of [`BitsAttr`]
    Bits = 2,
    /// binary
    Values = 3,
    /// binary
    Mask = 4,
}

attr_set!(BitsetAttr, BitsetAttr::Mask);

/// `GET_SETTINGS` request flag: ask for compact bitsets.
pub const ETH_SETTINGS_RF_COMPACT_BITSETS: u16 = 0x1;

/// `GET_SETTINGS` info mask bits.
pub const ETH_SETTINGS_IM_LINKINFO: u16 = 0x1;
pub const ETH_SETTINGS_IM_LINKMODES: u16 = 0x2;
pub const ETH_SETTINGS_IM_WOLINFO: u16 = 0x4;
pub const ETH_SETTINGS_IM_DEFAULT: u16 = 0x7;
