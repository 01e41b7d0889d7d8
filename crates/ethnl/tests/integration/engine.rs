//! Exchange engine behavior seen through a session.

use ethnl::netlink::genl::ethtool::{EthtoolCmd, SettingsAttr};
use ethnl::netlink::{ExchangeState, NLMSG_HDRLEN, NlMsgHdr};
use ethnl::{EthtoolSession, SettingsReply};

use crate::common::{
    PID, QUERY_SEQ, ScriptedTransport, ack, config, ethtool_reply, frame, resolved,
};

const FAMILY: u16 = 37;

async fn session_with(replies: Vec<Vec<u8>>) -> EthtoolSession<ScriptedTransport> {
    let mut script = resolved(FAMILY);
    script.extend(replies);
    EthtoolSession::with_transport(ScriptedTransport::new(script), &config())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_declared_length_below_header() {
    let mut bad = frame(FAMILY, QUERY_SEQ, &[0; 8]);
    bad[0..4].copy_from_slice(&8u32.to_ne_bytes());
    let mut session = session_with(vec![bad]).await;

    let err = session.get_drvinfo("eth0").await.unwrap_err();
    assert!(err.is_malformed());
    assert_eq!(session.connection().state(), ExchangeState::Failed);
}

#[tokio::test]
async fn test_declared_length_past_datagram() {
    let mut bad = frame(FAMILY, QUERY_SEQ, &[0; 8]);
    bad[0..4].copy_from_slice(&4096u32.to_ne_bytes());
    let mut session = session_with(vec![bad]).await;

    let err = session.get_drvinfo("eth0").await.unwrap_err();
    assert!(err.is_malformed());
}

#[tokio::test]
async fn test_attribute_overrunning_frame() {
    let mut reply = ethtool_reply(
        FAMILY,
        QUERY_SEQ,
        EthtoolCmd::SetDrvinfo,
        "eth0",
        &[(1, b"e1000\0")],
    );
    let attr_offset = reply.len() - 12;
    reply[attr_offset..attr_offset + 2].copy_from_slice(&200u16.to_ne_bytes());
    let mut session = session_with(vec![reply]).await;

    let err = session.get_drvinfo("eth0").await.unwrap_err();
    assert!(err.is_malformed());
}

#[tokio::test]
async fn test_foreign_frames_skipped() {
    let mut foreign_seq = frame(FAMILY, QUERY_SEQ + 50, b"nope");
    foreign_seq.extend(frame(FAMILY, QUERY_SEQ - 1, b"old!"));
    let mut foreign_pid = frame(FAMILY, QUERY_SEQ, b"pid!");
    foreign_pid[12..16].copy_from_slice(&(PID + 1).to_ne_bytes());

    let mut session = session_with(vec![
        foreign_seq,
        foreign_pid,
        ethtool_reply(
            FAMILY,
            QUERY_SEQ,
            EthtoolCmd::SetDrvinfo,
            "eth0",
            &[(1, b"r8169\0")],
        ),
    ])
    .await;

    let info = session.get_drvinfo("eth0").await.unwrap();
    assert_eq!(info.driver, "r8169");
}

#[tokio::test]
async fn test_end_of_stream_completes() {
    let mut session = session_with(Vec::new()).await;

    let info = session.get_drvinfo("eth0").await.unwrap();
    assert_eq!(info.driver, "");
    assert_eq!(session.connection().state(), ExchangeState::Complete);
}

#[tokio::test]
async fn test_settings_reply_counted() {
    let mut session = session_with(vec![
        ethtool_reply(
            FAMILY,
            QUERY_SEQ,
            EthtoolCmd::SetSettings,
            "eth0",
            &[
                (SettingsAttr::Speed as u16, &1000u32.to_ne_bytes()),
                (SettingsAttr::Autoneg as u16, &[1]),
            ],
        ),
        ack(QUERY_SEQ),
    ])
    .await;

    let reply = session.get_settings("eth0").await.unwrap();
    assert_eq!(
        reply,
        SettingsReply {
            frames: 1,
            attributes: 2,
        }
    );

    let sent = session.connection().transport().sent();
    let header = NlMsgHdr::from_bytes(&sent[1]).unwrap();
    assert_eq!(header.nlmsg_type, FAMILY);
    assert_eq!(sent[1][NLMSG_HDRLEN], EthtoolCmd::GetSettings as u8);
}
