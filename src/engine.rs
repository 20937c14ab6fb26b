//! Single-threaded, blocking request-response engine.
//!
//! One request in flight at a time: send, then drain datagrams until
//! an ack, a kernel error, `NLMSG_DONE`, or — for a non-dump request —
//! the single non-multipart reply the kernel sends back. There is no
//! internal task runtime or background reader; the caller's thread
//! blocks in `recv` for up to the socket's configured timeout.

use log::debug;

use crate::{
    attr::Attribute,
    consts::nl::NlmF,
    err::NlError,
    msg::{Body, Request},
    socket::{RawTransport, SocketHandle},
};

/// One generic-netlink reply payload: the command the kernel used to
/// answer and its attribute stream.
pub struct GenlReply {
    pub cmd: u8,
    pub attrs: Vec<Attribute>,
}

/// Runs requests to completion against a [`SocketHandle`].
pub struct Engine<'a, T: RawTransport> {
    handle: &'a mut SocketHandle<T>,
}

impl<'a, T: RawTransport> Engine<'a, T> {
    pub fn new(handle: &'a mut SocketHandle<T>) -> Self {
        Engine { handle }
    }

    /// Send `request` and collect every reply belonging to it.
    ///
    /// A dump request (`NLM_F_DUMP` set) keeps collecting `Genl`
    /// replies until `NLMSG_DONE`. Any other request stops at the
    /// first terminal datagram: an ack, an error, or a single
    /// non-multipart `Genl` reply.
    pub fn execute(&mut self, request: Request) -> Result<Vec<GenlReply>, NlError> {
        let dump = request.flags.contains(NlmF::DUMP);
        let seq = self.handle.send_request(&request)?;
        let mut results = Vec::new();

        loop {
            let envelopes = self.handle.recv_envelopes()?;
            for envelope in envelopes {
                if envelope.seq != seq {
                    continue;
                }
                match envelope.body {
                    Body::Error(errno) => {
                        debug!("request seq {seq} failed with errno {errno}");
                        return Err(NlError::from_errno(errno));
                    }
                    Body::Ack => {
                        if !dump {
                            return Ok(results);
                        }
                    }
                    Body::Done => {
                        return Ok(results);
                    }
                    Body::Genl { cmd, attrs, .. } => {
                        let multi = envelope.flags.contains(NlmF::MULTI);
                        results.push(GenlReply { cmd, attrs });
                        if !dump && !multi {
                            return Ok(results);
                        }
                    }
                }
            }
        }
    }
}
