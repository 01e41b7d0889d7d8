//! Request/response engine with sequence and port correlation.
//!
//! A [`Connection`] owns the correlation state of one session: the sequence
//! counter and the port id of its transport. Each call to
//! [`Connection::exchange`] is one logical exchange:
//!
//! ```text
//! Idle ──send──▶ Sent ──▶ Receiving ──┬──▶ Complete
//!                            ▲   │     └──▶ Failed
//!                            └───┘ (decoder says Continue / foreign frame)
//! ```
//!
//! Two signals drive the receive loop. At the transport level the kernel
//! ends an exchange with an ACK, an error or `NLMSG_DONE`. At the logical
//! level the frame callback returns [`Progress`]; `Done` ends the exchange
//! even if more frames are in flight. Those leftovers carry the old sequence
//! number and are discarded by whichever exchange receives them.

use tracing::{debug, trace};

use super::attr::{AttrSet, AttrTable};
use super::builder::MessageBuilder;
use super::config::Config;
use super::error::{Error, Result};
use super::message::{MessageIter, NlMsgError, NlMsgHdr};
use super::transport::Transport;

/// What the frame callback wants after handling one data frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// More frames belong to this reply.
    Continue,
    /// The reply is logically complete.
    Done,
}

/// State of the most recent exchange on a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeState {
    /// No exchange in progress.
    Idle,
    /// Request handed to the transport.
    Sent,
    /// Waiting for or processing reply frames.
    Receiving,
    /// Reply completed successfully.
    Complete,
    /// Exchange terminated with an error.
    Failed,
}

/// A correlated data frame handed to the frame callback.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Transport header.
    pub header: &'a NlMsgHdr,
    /// Everything after the transport header.
    pub payload: &'a [u8],
}

/// Decoder for the data frames of one command's reply.
///
/// The engine strips `HEADER_LEN` bytes of fixed sub-headers from each data
/// frame, indexes the remaining attributes into an [`AttrTable`] and hands
/// both to [`decode`](Self::decode). Once the exchange completes the
/// structured result is taken with [`finish`](Self::finish).
pub trait ReplyDecoder {
    /// Attribute set of the reply.
    type Attr: AttrSet;
    /// Structured result.
    type Output;
    /// Size of the fixed sub-headers between the transport header and the
    /// attributes.
    const HEADER_LEN: usize;

    /// Handle one data frame.
    fn decode(&mut self, header: &[u8], attrs: &AttrTable<'_, Self::Attr>) -> Result<Progress>;

    /// Produce the result after the exchange completed.
    fn finish(self) -> Result<Self::Output>;
}

/// Netlink connection bound to one transport.
pub struct Connection<T> {
    transport: T,
    seq: u32,
    pid: u32,
    buf: Vec<u8>,
    state: ExchangeState,
}

impl<T: Transport> Connection<T> {
    /// Create a connection over a bound transport.
    pub fn new(transport: T, config: &Config) -> Self {
        let pid = transport.port_id();
        Self {
            transport,
            seq: config.seed_seq(),
            pid,
            buf: vec![0u8; config.get_recv_buffer_size()],
            state: ExchangeState::Idle,
        }
    }

    /// Get the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Local port id used to filter replies.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Sequence number of the most recent request.
    pub fn seq(&self) -> u32 {
        self.seq
    }

    /// State of the most recent exchange.
    pub fn state(&self) -> ExchangeState {
        self.state
    }

    fn next_seq(&mut self) -> u32 {
        // Zero is the wildcard in correlation checks, never hand it out.
        self.seq = match self.seq.wrapping_add(1) {
            0 => 1,
            seq => seq,
        };
        self.seq
    }

    /// Send a request and feed every correlated data frame of the reply to
    /// `on_frame` until the exchange completes or fails.
    ///
    /// The request is sent exactly once. Frames with a foreign sequence
    /// number or port id are dropped without any state change.
    pub async fn exchange<F>(&mut self, mut builder: MessageBuilder, mut on_frame: F) -> Result<()>
    where
        F: FnMut(Frame<'_>) -> Result<Progress>,
    {
        let seq = self.next_seq();
        builder.set_seq(seq);
        builder.set_pid(self.pid);
        let msg = builder.finish();

        self.state = ExchangeState::Idle;
        if let Err(err) = self.transport.send(&msg).await {
            transition(&mut self.state, ExchangeState::Failed, seq);
            return Err(match err {
                Error::Io(source) => Error::SendFailure { source },
                other => other,
            });
        }
        transition(&mut self.state, ExchangeState::Sent, seq);

        loop {
            if self.state != ExchangeState::Receiving {
                transition(&mut self.state, ExchangeState::Receiving, seq);
            }

            let n = match self.transport.recv(&mut self.buf).await {
                Ok(n) => n,
                Err(err) => {
                    transition(&mut self.state, ExchangeState::Failed, seq);
                    return Err(err);
                }
            };

            // Errors end the exchange where they occur, so an orderly end
            // of stream here always follows a clean history.
            if n == 0 {
                transition(&mut self.state, ExchangeState::Complete, seq);
                return Ok(());
            }

            let data = &self.buf[..n.min(self.buf.len())];
            match process_datagram(data, seq, self.pid, &mut on_frame) {
                Ok(true) => {
                    transition(&mut self.state, ExchangeState::Complete, seq);
                    return Ok(());
                }
                Ok(false) => {}
                Err(err) => {
                    transition(&mut self.state, ExchangeState::Failed, seq);
                    return Err(err);
                }
            }
        }
    }

    /// Run an exchange whose data frames are handled by a [`ReplyDecoder`].
    pub async fn request<D: ReplyDecoder>(
        &mut self,
        builder: MessageBuilder,
        mut decoder: D,
    ) -> Result<D::Output> {
        self.exchange(builder, |frame| {
            if frame.payload.len() < D::HEADER_LEN {
                return Err(Error::MalformedFrame(format!(
                    "reply payload of {} bytes is shorter than its {} byte header",
                    frame.payload.len(),
                    D::HEADER_LEN
                )));
            }
            let (fixed, attrs) = frame.payload.split_at(D::HEADER_LEN);
            let table = AttrTable::<D::Attr>::parse(attrs)?;
            trace!(table = ?table, "decoded attribute table");
            decoder.decode(fixed, &table)
        })
        .await?;

        decoder.finish()
    }
}

fn transition(state: &mut ExchangeState, next: ExchangeState, seq: u32) {
    debug!(seq, from = ?*state, to = ?next, "exchange state");
    *state = next;
}

/// A zero on either side acts as a wildcard, as in libmnl.
fn is_correlated(header: &NlMsgHdr, seq: u32, pid: u32) -> bool {
    let seq_ok = header.nlmsg_seq == 0 || seq == 0 || header.nlmsg_seq == seq;
    let pid_ok = header.nlmsg_pid == 0 || pid == 0 || header.nlmsg_pid == pid;
    seq_ok && pid_ok
}

/// Returns `Ok(true)` once the exchange is complete.
fn process_datagram<F>(data: &[u8], seq: u32, pid: u32, on_frame: &mut F) -> Result<bool>
where
    F: FnMut(Frame<'_>) -> Result<Progress>,
{
    for result in MessageIter::new(data) {
        let (header, payload) = result?;

        if !is_correlated(header, seq, pid) {
            debug!(
                expected_seq = seq,
                seq = header.nlmsg_seq,
                expected_pid = pid,
                pid = header.nlmsg_pid,
                "discarding foreign frame"
            );
            continue;
        }

        if header.is_noop() {
            continue;
        }

        if header.is_error() {
            let err = NlMsgError::from_bytes(payload)?;
            if err.is_ack() {
                return Ok(true);
            }
            let ext = err.ext_ack_message(header.nlmsg_flags, payload);
            return Err(Error::from_errno(err.error).with_ext_ack(ext));
        }

        if header.is_done() {
            return Ok(true);
        }

        if header.is_overrun() {
            return Err(Error::MalformedFrame("receive overrun".into()));
        }

        if on_frame(Frame { header, payload })? == Progress::Done {
            return Ok(true);
        }
    }

    Ok(false)
}
