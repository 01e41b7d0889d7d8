//! Family resolution through the control family.

use tracing::debug;

use super::header::GENL_HDRLEN;
use super::{CTRL_VERSION, CtrlAttr, CtrlCmd, GENL_ID_CTRL, genl_request};
use crate::netlink::attr::AttrTable;
use crate::netlink::connection::{Connection, Progress, ReplyDecoder};
use crate::netlink::error::{Error, Result};
use crate::netlink::message::{NLM_F_ACK, NLM_F_REQUEST};
use crate::netlink::transport::Transport;

/// Information about a Generic Netlink family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyInfo {
    /// Dynamically assigned family ID (used as nlmsg_type). Never zero.
    pub id: u16,
    /// Family name as reported by the kernel.
    pub name: Option<String>,
    /// Family version.
    pub version: Option<u32>,
    /// Header size (additional bytes after genlmsghdr).
    pub hdr_size: Option<u32>,
    /// Maximum attribute number.
    pub max_attr: Option<u32>,
}

/// Decoder for a `CTRL_CMD_GETFAMILY` reply.
///
/// The only required attribute is `CTRL_ATTR_FAMILY_ID`; a reply without a
/// nonzero id fails with [`Error::FamilyUnresolved`].
#[derive(Debug)]
pub struct FamilyDecoder {
    name: String,
    info: Option<FamilyInfo>,
}

impl FamilyDecoder {
    /// Create a decoder for the family requested by `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            info: None,
        }
    }

    fn unresolved(&self) -> Error {
        Error::FamilyUnresolved {
            name: self.name.clone(),
        }
    }
}

impl ReplyDecoder for FamilyDecoder {
    type Attr = CtrlAttr;
    type Output = FamilyInfo;
    const HEADER_LEN: usize = GENL_HDRLEN;

    fn decode(&mut self, _header: &[u8], attrs: &AttrTable<'_, CtrlAttr>) -> Result<Progress> {
        let id = match attrs.u16(CtrlAttr::FamilyId) {
            Ok(0) | Err(_) => return Err(self.unresolved()),
            Ok(id) => id,
        };

        self.info = Some(FamilyInfo {
            id,
            name: attrs.str(CtrlAttr::FamilyName).ok().map(str::to_string),
            version: attrs.u32(CtrlAttr::Version).ok(),
            hdr_size: attrs.u32(CtrlAttr::HdrSize).ok(),
            max_attr: attrs.u32(CtrlAttr::MaxAttr).ok(),
        });
        Ok(Progress::Done)
    }

    fn finish(self) -> Result<FamilyInfo> {
        match self.info {
            Some(info) => Ok(info),
            None => Err(self.unresolved()),
        }
    }
}

/// Resolve a Generic Netlink family by name.
///
/// A kernel `ENOENT` (no such family) is reported as
/// [`Error::FamilyUnresolved`] like a reply without an id.
pub async fn resolve_family<T: Transport>(
    conn: &mut Connection<T>,
    name: &str,
) -> Result<FamilyInfo> {
    let mut builder = genl_request(
        GENL_ID_CTRL,
        CtrlCmd::GetFamily as u8,
        CTRL_VERSION,
        NLM_F_REQUEST | NLM_F_ACK,
    );
    builder.append_attr_str(CtrlAttr::FamilyName as u16, name)?;

    let info = conn
        .request(builder, FamilyDecoder::new(name))
        .await
        .map_err(|err| match err.errno() {
            Some(libc::ENOENT) => Error::FamilyUnresolved {
                name: name.to_string(),
            },
            _ => err,
        })?;

    debug!(family = name, id = info.id, "resolved generic netlink family");
    Ok(info)
}
