//! Family resolution against a scripted control family.

use ethnl::netlink::genl::{CtrlAttr, GENL_HDRLEN, GENL_ID_CTRL};
use ethnl::netlink::{AttrIter, NLMSG_HDRLEN, NlMsgHdr};
use ethnl::{Error, EthtoolSession};

use crate::common::{RESOLVE_SEQ, ScriptedTransport, ack, config, error, family_reply, resolved};

#[tokio::test]
async fn test_resolves_family_id() {
    let transport = ScriptedTransport::new(resolved(37));

    let session = EthtoolSession::with_transport(transport, &config())
        .await
        .unwrap();

    assert_eq!(session.family_id(), 37);
    assert_eq!(session.family().name.as_deref(), Some("ethtool"));
}

#[tokio::test]
async fn test_resolution_request_layout() {
    let transport = ScriptedTransport::new(resolved(37));
    let session = EthtoolSession::with_transport(transport, &config())
        .await
        .unwrap();

    let sent = session.connection().transport().sent();
    assert_eq!(sent.len(), 1);
    let header = NlMsgHdr::from_bytes(&sent[0]).unwrap();
    assert_eq!(header.nlmsg_type, GENL_ID_CTRL);
    assert_eq!(header.nlmsg_seq, RESOLVE_SEQ);
    assert_eq!(header.nlmsg_len as usize, sent[0].len());

    let records: Vec<_> = AttrIter::new(&sent[0][NLMSG_HDRLEN + GENL_HDRLEN..]).collect();
    assert_eq!(records, vec![(CtrlAttr::FamilyName as u16, &b"ethtool\0"[..])]);
}

#[tokio::test]
async fn test_custom_family_name() {
    let transport = ScriptedTransport::new(resolved(40));
    let session = EthtoolSession::with_transport(transport, &config().family_name("ethtool-rfc"))
        .await
        .unwrap();

    let sent = session.connection().transport().sent();
    let records: Vec<_> = AttrIter::new(&sent[0][NLMSG_HDRLEN + GENL_HDRLEN..]).collect();
    assert_eq!(records[0].1, b"ethtool-rfc\0");
}

#[tokio::test]
async fn test_reply_without_id() {
    let transport = ScriptedTransport::new(vec![
        family_reply(RESOLVE_SEQ, &[(CtrlAttr::FamilyName as u16, b"ethtool\0")]),
        ack(RESOLVE_SEQ),
    ]);

    let result = EthtoolSession::with_transport(transport, &config()).await;
    assert!(matches!(result, Err(Error::FamilyUnresolved { .. })));
}

#[tokio::test]
async fn test_unknown_family() {
    let transport = ScriptedTransport::new(vec![error(RESOLVE_SEQ, -libc::ENOENT)]);

    let result = EthtoolSession::with_transport(transport, &config()).await;
    match result {
        Err(Error::FamilyUnresolved { name }) => assert_eq!(name, "ethtool"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("family should not resolve"),
    }
}
