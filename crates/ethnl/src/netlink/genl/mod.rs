//! Generic Netlink (GENL) support.
//!
//! Generic Netlink extends the standard netlink protocol with dynamically
//! allocated family ids. A family is addressed by name through the fixed
//! control family (`nlctrl`), which answers with the id to put in the
//! `nlmsg_type` of every later request.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ EthtoolSession                          │
//! │ (family-specific requests + decoders)   │
//! └────────────────┬────────────────────────┘
//!                  │ resolve_family() once
//! ┌────────────────▼────────────────────────┐
//! │ Connection<T: Transport>                │
//! │ (seq/port correlation, receive loop)    │
//! └────────────────┬────────────────────────┘
//!                  │
//! ┌────────────────▼────────────────────────┐
//! │ NetlinkSocket (Protocol::Generic)       │
//! └─────────────────────────────────────────┘
//! ```

mod family;
mod header;

pub use family::{FamilyDecoder, FamilyInfo, resolve_family};
pub use header::{GENL_HDRLEN, GenlMsgHdr};

pub mod ethtool;

use super::attr::AttrSet;
use super::builder::MessageBuilder;

// Control family constants (fixed, not dynamically assigned)
pub const GENL_ID_CTRL: u16 = 0x10;

/// Version spoken to the control family.
pub const CTRL_VERSION: u8 = 1;

/// Control family commands
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtrlCmd {
    Unspec = 0,
    NewFamily = 1,
    DelFamily = 2,
    GetFamily = 3,
    NewOps = 4,
    DelOps = 5,
    GetOps = 6,
    NewMcastGrp = 7,
    DelMcastGrp = 8,
    GetMcastGrp = 9,
    GetPolicy = 10,
}

/// Control family attributes
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtrlAttr {
    Unspec = 0,
    FamilyId = 1,
    FamilyName = 2,
    Version = 3,
    HdrSize = 4,
    MaxAttr = 5,
    Ops = 6,
    McastGroups = 7,
    Policy = 8,
    OpPolicy = 9,
    Op = 10,
}

impl AttrSet for CtrlAttr {
    const MAX: u16 = CtrlAttr::Op as u16;

    fn id(self) -> u16 {
        self as u16
    }
}

/// Start a GENL request: transport header followed by the GENL header.
///
/// Family-specific headers and attributes are appended by the caller.
pub fn genl_request(family_id: u16, cmd: u8, version: u8, flags: u16) -> MessageBuilder {
    let mut builder = MessageBuilder::new(family_id, flags);
    builder.append(&GenlMsgHdr::new(cmd, version));
    builder
}
