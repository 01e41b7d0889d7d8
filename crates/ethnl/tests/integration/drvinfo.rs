//! Driver information queries.

use ethnl::netlink::genl::ethtool::{DrvinfoAttr, EthtoolCmd};
use ethnl::netlink::ExchangeState;
use ethnl::EthtoolSession;

use crate::common::{QUERY_SEQ, ScriptedTransport, ack, config, error, ethtool_reply, resolved};

const FAMILY: u16 = 37;

async fn session_with(replies: Vec<Vec<u8>>) -> EthtoolSession<ScriptedTransport> {
    let mut script = resolved(FAMILY);
    script.extend(replies);
    EthtoolSession::with_transport(ScriptedTransport::new(script), &config())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_driver_and_version() {
    let mut session = session_with(vec![
        ethtool_reply(
            FAMILY,
            QUERY_SEQ,
            EthtoolCmd::SetDrvinfo,
            "eth0",
            &[
                (DrvinfoAttr::Driver as u16, b"e1000\0"),
                (DrvinfoAttr::Version as u16, b"5.10\0"),
            ],
        ),
        ack(QUERY_SEQ),
    ])
    .await;

    let info = session.get_drvinfo("eth0").await.unwrap();
    assert_eq!(info.driver, "e1000");
    assert_eq!(info.version, "5.10");
    assert_eq!(info.fw_version, "");
    assert_eq!(info.bus_info, "");
    assert_eq!(info.erom_version, "");
    assert!(!info.supports_stats);
    assert!(!info.supports_test);
    assert!(!info.supports_eeprom_access);
    assert!(!info.supports_register_dump);
    assert!(!info.supports_priv_flags);
    assert_eq!(info.ifname.as_deref(), Some("eth0"));
    assert_eq!(session.connection().state(), ExchangeState::Complete);
}

#[tokio::test]
async fn test_capabilities() {
    let mut session = session_with(vec![ethtool_reply(
        FAMILY,
        QUERY_SEQ,
        EthtoolCmd::SetDrvinfo,
        "eth1",
        &[
            (DrvinfoAttr::Driver as u16, b"ixgbe\0"),
            (DrvinfoAttr::BusInfo as u16, b"0000:01:00.1\0"),
            (DrvinfoAttr::NStats as u16, &96u32.to_ne_bytes()),
            (DrvinfoAttr::TestinfoLen as u16, &5u32.to_ne_bytes()),
            (DrvinfoAttr::EedumpLen as u16, &512u32.to_ne_bytes()),
            (DrvinfoAttr::RegdumpLen as u16, &0u32.to_ne_bytes()),
            (DrvinfoAttr::NPrivFlags as u16, &2u32.to_ne_bytes()),
        ],
    )])
    .await;

    let info = session.get_drvinfo("eth1").await.unwrap();
    assert_eq!(info.bus_info, "0000:01:00.1");
    assert!(info.supports_stats);
    assert!(info.supports_test);
    assert!(info.supports_eeprom_access);
    assert!(!info.supports_register_dump);
    assert!(info.supports_priv_flags);
}

#[tokio::test]
async fn test_trailing_ack_discarded_by_next_request() {
    let mut session = session_with(vec![
        ethtool_reply(
            FAMILY,
            QUERY_SEQ,
            EthtoolCmd::SetDrvinfo,
            "eth0",
            &[(DrvinfoAttr::Driver as u16, b"igb\0")],
        ),
        ack(QUERY_SEQ),
        ethtool_reply(
            FAMILY,
            QUERY_SEQ + 1,
            EthtoolCmd::SetDrvinfo,
            "eth0",
            &[(DrvinfoAttr::Driver as u16, b"igb\0")],
        ),
    ])
    .await;

    session.get_drvinfo("eth0").await.unwrap();
    let info = session.get_drvinfo("eth0").await.unwrap();
    assert_eq!(info.driver, "igb");
    assert_eq!(session.connection().seq(), QUERY_SEQ + 1);
    assert_eq!(session.connection().transport().remaining(), 0);
}

#[tokio::test]
async fn test_no_such_device() {
    let mut session = session_with(vec![error(QUERY_SEQ, -libc::ENODEV)]).await;

    let err = session.get_drvinfo("nosuch0").await.unwrap_err();
    assert_eq!(err.errno(), Some(libc::ENODEV));
    assert!(err.is_not_found());
    assert_eq!(session.connection().state(), ExchangeState::Failed);
}
