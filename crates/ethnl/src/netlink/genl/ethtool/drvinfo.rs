//! `GET_DRVINFO` reply decoding.

use tracing::debug;

use super::DrvinfoAttr;
use super::header::{ETHNL_HDRLEN, EthnlMsgHdr};
use crate::netlink::attr::AttrTable;
use crate::netlink::connection::{Progress, ReplyDecoder};
use crate::netlink::error::Result;
use crate::netlink::genl::GENL_HDRLEN;

/// Driver identification and capabilities of a device.
///
/// Every field degrades on its own: a string the reply did not carry is
/// empty and a capability it did not report is `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "output", derive(serde::Serialize))]
pub struct DriverInfo {
    /// Device index echoed in the reply header.
    #[cfg_attr(feature = "output", serde(skip_serializing_if = "Option::is_none"))]
    pub ifindex: Option<u32>,
    /// Device name echoed in the reply header.
    #[cfg_attr(feature = "output", serde(skip_serializing_if = "Option::is_none"))]
    pub ifname: Option<String>,
    /// Driver name.
    pub driver: String,
    /// Driver version.
    pub version: String,
    /// Firmware version.
    pub fw_version: String,
    /// Bus address, e.g. a PCI slot.
    pub bus_info: String,
    /// Expansion ROM version.
    pub erom_version: String,
    /// Driver exposes statistics (`N_STATS` non-zero).
    pub supports_stats: bool,
    /// Driver implements a self test (`TESTINFO_LEN` non-zero).
    pub supports_test: bool,
    /// EEPROM can be dumped (`EEDUMP_LEN` non-zero).
    pub supports_eeprom_access: bool,
    /// Registers can be dumped (`REGDUMP_LEN` non-zero).
    pub supports_register_dump: bool,
    /// Driver has private flags (`N_PRIV_FLAGS` non-zero).
    pub supports_priv_flags: bool,
}

/// Decoder for `GET_DRVINFO` replies.
#[derive(Debug, Default)]
pub struct DrvinfoDecoder {
    info: DriverInfo,
}

impl DrvinfoDecoder {
    /// Decoder that yields [`DriverInfo::default`] until a data frame arrives.
    pub fn new() -> Self {
        Self::default()
    }
}

fn text(attrs: &AttrTable<'_, DrvinfoAttr>, attr: DrvinfoAttr) -> String {
    match attrs.str(attr) {
        Ok(s) => s.to_string(),
        Err(err) => {
            debug!(?attr, %err, "drvinfo field unavailable");
            String::new()
        }
    }
}

fn capability(attrs: &AttrTable<'_, DrvinfoAttr>, attr: DrvinfoAttr) -> bool {
    match attrs.flag_u32(attr) {
        Ok(set) => set,
        Err(err) => {
            debug!(?attr, %err, "drvinfo capability unavailable");
            false
        }
    }
}

impl ReplyDecoder for DrvinfoDecoder {
    type Attr = DrvinfoAttr;
    type Output = DriverInfo;
    const HEADER_LEN: usize = GENL_HDRLEN + ETHNL_HDRLEN;

    fn decode(&mut self, header: &[u8], attrs: &AttrTable<'_, DrvinfoAttr>) -> Result<Progress> {
        if let Some(hdr) = EthnlMsgHdr::from_bytes(&header[GENL_HDRLEN..]) {
            self.info.ifindex = (hdr.ifindex != 0).then_some(hdr.ifindex);
            self.info.ifname = hdr.name();
        }

        self.info.driver = text(attrs, DrvinfoAttr::Driver);
        self.info.version = text(attrs, DrvinfoAttr::Version);
        self.info.fw_version = text(attrs, DrvinfoAttr::FwVersion);
        self.info.bus_info = text(attrs, DrvinfoAttr::BusInfo);
        self.info.erom_version = text(attrs, DrvinfoAttr::EromVer);

        self.info.supports_stats = capability(attrs, DrvinfoAttr::NStats);
        self.info.supports_test = capability(attrs, DrvinfoAttr::TestinfoLen);
        self.info.supports_eeprom_access = capability(attrs, DrvinfoAttr::EedumpLen);
        self.info.supports_register_dump = capability(attrs, DrvinfoAttr::RegdumpLen);
        self.info.supports_priv_flags = capability(attrs, DrvinfoAttr::NPrivFlags);

        Ok(Progress::Done)
    }

    fn finish(self) -> Result<DriverInfo> {
        Ok(self.info)
    }
}
