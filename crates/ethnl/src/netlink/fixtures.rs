//! Scripted transport and frame builders for unit tests.

use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

use super::attr::{NlAttr, nla_align};
use super::config::Config;
use super::error::{Error, Result};
use super::genl::GenlMsgHdr;
use super::message::{
    NLM_F_ACK_TLVS, NLM_F_CAPPED, NLMSG_HDRLEN, NLMSGERR_ATTR_MSG, NlMsgHdr, NlMsgType,
    nlmsg_align,
};
use super::transport::Transport;

/// Port id the scripted transport reports.
pub(crate) const PID: u32 = 4242;

/// Config whose first request uses sequence number 101.
pub(crate) fn test_config() -> Config {
    Config::new().initial_seq(100)
}

pub(crate) enum Reply {
    Datagram(Vec<u8>),
    RecvError(io::ErrorKind),
}

impl Reply {
    pub(crate) fn datagram(data: Vec<u8>) -> Self {
        Self::Datagram(data)
    }
}

/// Transport that records sent requests and replays canned datagrams.
///
/// Once the script is exhausted every receive returns zero bytes.
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    sent: Mutex<Vec<Vec<u8>>>,
    fail_send: bool,
}

impl ScriptedTransport {
    pub(crate) fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            sent: Mutex::new(Vec::new()),
            fail_send: false,
        }
    }

    pub(crate) fn failing_send(mut self) -> Self {
        self.fail_send = true;
        self
    }

    pub(crate) fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn send_attempts(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    fn port_id(&self) -> u32 {
        PID
    }

    async fn send(&self, msg: &[u8]) -> Result<usize> {
        self.sent.lock().unwrap().push(msg.to_vec());
        if self.fail_send {
            return Err(Error::Io(io::ErrorKind::BrokenPipe.into()));
        }
        Ok(msg.len())
    }

    async fn recv(&self, buf: &mut [u8]) -> Result<usize> {
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Datagram(data)) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                Ok(n)
            }
            Some(Reply::RecvError(kind)) => Err(Error::Io(kind.into())),
            None => Ok(0),
        }
    }
}

/// One netlink message with the given header fields and payload.
pub(crate) fn data_frame(msg_type: u16, flags: u16, seq: u32, pid: u32, payload: &[u8]) -> Vec<u8> {
    let mut header = NlMsgHdr::new(msg_type, flags);
    header.nlmsg_len = (NLMSG_HDRLEN + payload.len()) as u32;
    header.nlmsg_seq = seq;
    header.nlmsg_pid = pid;

    let mut buf = header.as_bytes().to_vec();
    buf.extend_from_slice(payload);
    buf.resize(nlmsg_align(buf.len()), 0);
    buf
}

/// Encoded attribute records.
pub(crate) fn attrs(records: &[(u16, &[u8])]) -> Vec<u8> {
    let mut buf = Vec::new();
    for (id, payload) in records {
        buf.extend_from_slice(NlAttr::new(*id, payload.len()).as_bytes());
        buf.extend_from_slice(payload);
        buf.resize(nla_align(buf.len()), 0);
    }
    buf
}

/// Generic netlink payload: genl header, extra fixed header, attributes.
pub(crate) fn genl_payload(cmd: u8, extra: &[u8], records: &[(u16, &[u8])]) -> Vec<u8> {
    let mut buf = GenlMsgHdr::new(cmd, 1).as_bytes().to_vec();
    buf.extend_from_slice(extra);
    buf.extend(attrs(records));
    buf
}

fn error_frame(seq: u32, pid: u32, errno: i32) -> Vec<u8> {
    let mut payload = errno.to_ne_bytes().to_vec();
    payload.extend_from_slice(NlMsgHdr::new(0, 0).as_bytes());
    data_frame(NlMsgType::ERROR, 0, seq, pid, &payload)
}

pub(crate) fn ack(seq: u32, pid: u32) -> Vec<u8> {
    error_frame(seq, pid, 0)
}

pub(crate) fn nl_error(seq: u32, pid: u32, errno: i32) -> Vec<u8> {
    error_frame(seq, pid, errno)
}

/// Error frame with a capped echo and an extended ACK message.
pub(crate) fn nl_error_ext(seq: u32, pid: u32, errno: i32, text: &str) -> Vec<u8> {
    let mut payload = errno.to_ne_bytes().to_vec();
    payload.extend_from_slice(NlMsgHdr::new(0, 0).as_bytes());
    let mut msg = text.as_bytes().to_vec();
    msg.push(0);
    payload.extend(attrs(&[(NLMSGERR_ATTR_MSG, &msg)]));
    data_frame(NlMsgType::ERROR, NLM_F_CAPPED | NLM_F_ACK_TLVS, seq, pid, &payload)
}

pub(crate) fn done(seq: u32, pid: u32) -> Vec<u8> {
    data_frame(NlMsgType::DONE, 0, seq, pid, &0i32.to_ne_bytes())
}
