//! `GET_SETTINGS` reply handling.
//!
//! Link settings replies are acknowledged and accounted for but not
//! interpreted. The attribute ids live in [`SettingsAttr`].

use tracing::debug;

use super::SettingsAttr;
use super::header::ETHNL_HDRLEN;
use crate::netlink::attr::AttrTable;
use crate::netlink::connection::{Progress, ReplyDecoder};
use crate::netlink::error::Result;
use crate::netlink::genl::GENL_HDRLEN;

/// Summary of a `GET_SETTINGS` reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "output", derive(serde::Serialize))]
pub struct SettingsReply {
    /// Data frames received.
    pub frames: usize,
    /// Known attributes present in the last data frame.
    pub attributes: usize,
}

/// Decoder for `GET_SETTINGS` replies.
#[derive(Debug, Default)]
pub struct SettingsDecoder {
    reply: SettingsReply,
}

impl SettingsDecoder {
    /// Decoder with zero frames counted.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReplyDecoder for SettingsDecoder {
    type Attr = SettingsAttr;
    type Output = SettingsReply;
    const HEADER_LEN: usize = GENL_HDRLEN + ETHNL_HDRLEN;

    fn decode(&mut self, _header: &[u8], attrs: &AttrTable<'_, SettingsAttr>) -> Result<Progress> {
        self.reply.frames += 1;
        self.reply.attributes = attrs.len();
        debug!(
            attributes = attrs.len(),
            unknown = attrs.unknown(),
            "settings reply not interpreted"
        );
        Ok(Progress::Done)
    }

    fn finish(self) -> Result<SettingsReply> {
        Ok(self.reply)
    }
}
