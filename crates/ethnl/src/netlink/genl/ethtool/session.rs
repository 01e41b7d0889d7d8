//! Ethtool session: one connection plus the resolved family id.

use tracing::{debug, instrument};

use super::EthtoolCmd;
use super::drvinfo::{DriverInfo, DrvinfoDecoder};
use super::header::{EthnlMsgHdr, ethtool_request};
use super::settings::{SettingsDecoder, SettingsReply};
use crate::netlink::config::Config;
use crate::netlink::connection::{Connection, ReplyDecoder};
use crate::netlink::error::Result;
use crate::netlink::genl::{FamilyInfo, resolve_family};
use crate::netlink::interface_ref::InterfaceRef;
use crate::netlink::message::{NLM_F_ACK, NLM_F_REQUEST};
use crate::netlink::socket::{NetlinkSocket, Protocol};
use crate::netlink::transport::Transport;

/// Session with the kernel `ethtool` family.
///
/// The family id is resolved once when the session is opened and reused
/// for every request. Requests run one at a time; each takes `&mut self`.
///
/// # Example
///
/// ```rust,no_run
/// use ethnl::netlink::Config;
/// use ethnl::netlink::genl::ethtool::EthtoolSession;
///
/// # async fn example() -> ethnl::Result<()> {
/// let mut session = EthtoolSession::open(&Config::default()).await?;
/// println!("family id {}", session.family_id());
///
/// let info = session.get_drvinfo("eth0").await?;
/// println!("{} {}", info.driver, info.bus_info);
/// # Ok(())
/// # }
/// ```
pub struct EthtoolSession<T = NetlinkSocket> {
    conn: Connection<T>,
    family: FamilyInfo,
}

impl EthtoolSession<NetlinkSocket> {
    /// Open a generic netlink socket and resolve the configured family.
    pub async fn open(config: &Config) -> Result<Self> {
        let socket = NetlinkSocket::new(Protocol::Generic)?;
        Self::with_transport(socket, config).await
    }
}

impl<T: Transport> EthtoolSession<T> {
    /// Resolve the configured family over an existing transport.
    pub async fn with_transport(transport: T, config: &Config) -> Result<Self> {
        let mut conn = Connection::new(transport, config);
        let family = resolve_family(&mut conn, config.get_family_name()).await?;
        Ok(Self { conn, family })
    }

    /// Resolved family id, used as the message type of every request.
    pub fn family_id(&self) -> u16 {
        self.family.id
    }

    /// Everything the control family reported about the family.
    pub fn family(&self) -> &FamilyInfo {
        &self.family
    }

    /// Underlying connection.
    pub fn connection(&self) -> &Connection<T> {
        &self.conn
    }

    /// Query driver name, versions, bus address and capabilities.
    #[instrument(skip(self, target), fields(family = self.family.id))]
    pub async fn get_drvinfo(&mut self, target: impl Into<InterfaceRef>) -> Result<DriverInfo> {
        let target = target.into();
        let header = EthnlMsgHdr::new(Some(&target), 0, 0);
        self.get(EthtoolCmd::GetDrvinfo, &header, DrvinfoDecoder::new())
            .await
    }

    /// Query link settings with an empty info mask and no request flags.
    pub async fn get_settings(&mut self, target: impl Into<InterfaceRef>) -> Result<SettingsReply> {
        self.get_settings_with(target, 0, 0).await
    }

    /// Query link settings with an explicit info mask and request flags.
    #[instrument(skip(self, target), fields(family = self.family.id))]
    pub async fn get_settings_with(
        &mut self,
        target: impl Into<InterfaceRef>,
        info_mask: u16,
        flags: u16,
    ) -> Result<SettingsReply> {
        let target = target.into();
        let header = EthnlMsgHdr::new(Some(&target), flags, info_mask);
        self.get(EthtoolCmd::GetSettings, &header, SettingsDecoder::new())
            .await
    }

    async fn get<D: ReplyDecoder>(
        &mut self,
        cmd: EthtoolCmd,
        header: &EthnlMsgHdr,
        decoder: D,
    ) -> Result<D::Output> {
        debug!(?cmd, target = ?header.target(), "ethtool request");
        let builder = ethtool_request(self.family.id, cmd, NLM_F_REQUEST | NLM_F_ACK, header);
        self.conn.request(builder, decoder).await
    }
}
