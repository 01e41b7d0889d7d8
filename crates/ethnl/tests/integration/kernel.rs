//! Checks against the running kernel.
//!
//! Sandboxes often lack generic netlink or the ethtool family; the tests
//! skip in that case.

use ethnl::netlink::{ExchangeState, NetlinkSocket, Protocol, Transport};
use ethnl::{Config, Error, EthtoolSession};

#[test]
fn test_socket_binds_port() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let socket = skip_unless!(NetlinkSocket::new(Protocol::Generic), "generic netlink");
        assert_ne!(socket.port_id(), 0);
        assert_eq!(socket.protocol(), Protocol::Generic);
    });
}

#[tokio::test]
async fn test_missing_family_is_unresolved() {
    let socket = skip_unless!(NetlinkSocket::new(Protocol::Generic), "generic netlink");
    let config = Config::new().family_name("ethnl-no-such-family");

    match EthtoolSession::with_transport(socket, &config).await {
        Err(Error::FamilyUnresolved { name }) => assert_eq!(name, "ethnl-no-such-family"),
        Err(err) => eprintln!("Skipping test: control family unavailable: {err}"),
        Ok(_) => panic!("bogus family resolved"),
    }
}

#[tokio::test]
async fn test_loopback_drvinfo() {
    let config = Config::default();
    let mut session = skip_unless!(EthtoolSession::open(&config).await, "ethtool family");
    assert_ne!(session.family_id(), 0);

    // Kernels that expect a different request layout reject the query.
    match session.get_drvinfo("lo").await {
        Ok(info) => {
            assert_eq!(session.connection().state(), ExchangeState::Complete);
            assert_eq!(info.ifname.as_deref().unwrap_or("lo"), "lo");
        }
        Err(err) => {
            assert!(err.errno().is_some(), "unexpected failure: {err}");
            assert_eq!(session.connection().state(), ExchangeState::Failed);
        }
    }
}
