//! `nlmsghdr` + generic-netlink sub-header framing.
//!
//! A [`Request`] is what this crate sends: a netlink header wrapped
//! around a generic-netlink command and an attribute stream. What
//! comes back is decoded into an [`Envelope`], whose [`Body`] tells the
//! engine whether it is looking at an ack, a kernel error, end-of-dump,
//! or an actual nl80211 reply.

use byteorder::{ByteOrder, NativeEndian};

use crate::{
    attr::{decode_all, Attribute},
    consts::{
        genl::GENL_HEADER_LEN,
        nl::{align, NlmF, NlmsgType, NL_HEADER_LEN},
    },
    err::CodecError,
};

/// A generic-netlink request this crate sends to the kernel.
#[derive(Clone, Debug)]
pub struct Request {
    /// Resolved family id (`nlmsg_type`), e.g. nl80211's dynamic id.
    pub nlmsg_type: u16,
    pub flags: NlmF,
    pub cmd: u8,
    pub version: u8,
    pub attrs: Vec<Attribute>,
}

impl Request {
    /// Build a request. The generic-netlink sub-header's version field
    /// defaults to `0`; nl80211 does not version its commands, and the
    /// kernel ignores this field for the family.
    pub fn new(nlmsg_type: u16, flags: NlmF, cmd: u8) -> Self {
        Request {
            nlmsg_type,
            flags,
            cmd,
            version: 0,
            attrs: Vec::new(),
        }
    }

    pub fn with_attr(mut self, attr: Attribute) -> Self {
        self.attrs.push(attr);
        self
    }

    /// Serialize a complete datagram ready to `send` on the socket.
    pub fn encode(&self, seq: u32, port: u32) -> Vec<u8> {
        let mut attr_bytes = Vec::new();
        for attr in &self.attrs {
            attr.encode_into(&mut attr_bytes);
        }

        let total_len = NL_HEADER_LEN + GENL_HEADER_LEN + attr_bytes.len();
        let mut out = Vec::with_capacity(total_len);

        out.extend_from_slice(&(total_len as u32).to_ne_bytes());
        out.extend_from_slice(&self.nlmsg_type.to_ne_bytes());
        out.extend_from_slice(&self.flags.bits().to_ne_bytes());
        out.extend_from_slice(&seq.to_ne_bytes());
        out.extend_from_slice(&port.to_ne_bytes());

        out.push(self.cmd);
        out.push(self.version);
        out.extend_from_slice(&[0u8; 2]);

        out.extend_from_slice(&attr_bytes);
        out
    }
}

/// What a decoded datagram turned out to be.
#[derive(Clone, Debug)]
pub enum Body {
    /// `NLMSG_ERROR` with a zero error code.
    Ack,
    /// `NLMSG_ERROR` with a nonzero error code (positive errno).
    Error(i32),
    /// `NLMSG_DONE`, terminating a dump.
    Done,
    /// A generic-netlink payload: the replying command and its
    /// attribute stream.
    Genl {
        cmd: u8,
        version: u8,
        attrs: Vec<Attribute>,
    },
}

/// One decoded datagram, with its netlink header fields intact.
#[derive(Clone, Debug)]
pub struct Envelope {
    pub nlmsg_type: u16,
    pub flags: NlmF,
    pub seq: u32,
    pub port: u32,
    pub body: Body,
}

/// Decode every `nlmsghdr`-framed datagram packed back to back in
/// `buf`, as a single `recv` can return more than one when the kernel
/// coalesces them.
pub fn decode_all(buf: &[u8]) -> Result<Vec<Envelope>, CodecError> {
    let mut out = Vec::new();
    let mut rest = buf;
    while !rest.is_empty() {
        let (envelope, consumed) = decode_one(rest)?;
        out.push(envelope);
        if consumed == 0 || consumed > rest.len() {
            break;
        }
        rest = &rest[consumed..];
    }
    Ok(out)
}

fn decode_one(buf: &[u8]) -> Result<(Envelope, usize), CodecError> {
    if buf.len() < NL_HEADER_LEN {
        return Err(CodecError::Truncated);
    }
    let nlmsg_len = NativeEndian::read_u32(&buf[0..4]) as usize;
    let nlmsg_type = NativeEndian::read_u16(&buf[4..6]);
    let flags = NlmF::from_bits_truncate(NativeEndian::read_u16(&buf[6..8]));
    let seq = NativeEndian::read_u32(&buf[8..12]);
    let port = NativeEndian::read_u32(&buf[12..16]);

    if nlmsg_len < NL_HEADER_LEN || nlmsg_len > buf.len() {
        return Err(CodecError::Truncated);
    }
    let body_bytes = &buf[NL_HEADER_LEN..nlmsg_len];

    let body = if nlmsg_type == u16::from(NlmsgType::Error) {
        if body_bytes.len() < 4 {
            return Err(CodecError::Truncated);
        }
        let error = NativeEndian::read_i32(&body_bytes[0..4]);
        if error == 0 {
            Body::Ack
        } else {
            Body::Error(error.unsigned_abs() as i32)
        }
    } else if nlmsg_type == u16::from(NlmsgType::Done) {
        Body::Done
    } else {
        if body_bytes.len() < GENL_HEADER_LEN {
            return Err(CodecError::Truncated);
        }
        let cmd = body_bytes[0];
        let version = body_bytes[1];
        let attrs = decode_all(&body_bytes[GENL_HEADER_LEN..])?;
        Body::Genl {
            cmd,
            version,
            attrs,
        }
    };

    Ok((
        Envelope {
            nlmsg_type,
            flags,
            seq,
            port,
            body,
        },
        align(nlmsg_len),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_header_declares_its_own_length() {
        let req = Request::new(16, NlmF::REQUEST | NlmF::ACK, 3)
            .with_attr(Attribute::from_u32(1, 7));
        let encoded = req.encode(1, 0);
        let declared_len = NativeEndian::read_u32(&encoded[0..4]) as usize;
        assert_eq!(declared_len, encoded.len());
    }

    #[test]
    fn ack_decodes_from_zero_error() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&20u32.to_ne_bytes());
        buf.extend_from_slice(&2u16.to_ne_bytes()); // NLMSG_ERROR
        buf.extend_from_slice(&0u16.to_ne_bytes());
        buf.extend_from_slice(&5u32.to_ne_bytes());
        buf.extend_from_slice(&0u32.to_ne_bytes());
        buf.extend_from_slice(&0i32.to_ne_bytes());
        let envelopes = decode_all(&buf).unwrap();
        assert_eq!(envelopes.len(), 1);
        assert!(matches!(envelopes[0].body, Body::Ack));
    }

    #[test]
    fn nonzero_error_reports_positive_errno() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&20u32.to_ne_bytes());
        buf.extend_from_slice(&2u16.to_ne_bytes());
        buf.extend_from_slice(&0u16.to_ne_bytes());
        buf.extend_from_slice(&5u32.to_ne_bytes());
        buf.extend_from_slice(&0u32.to_ne_bytes());
        buf.extend_from_slice(&(-19i32).to_ne_bytes()); // -ENODEV
        let envelopes = decode_all(&buf).unwrap();
        assert!(matches!(envelopes[0].body, Body::Error(19)));
    }

    #[test]
    fn genl_body_decodes_cmd_version_and_attrs() {
        let mut attrs = Vec::new();
        Attribute::from_u32(3, 2).encode_into(&mut attrs);
        let total = NL_HEADER_LEN + GENL_HEADER_LEN + attrs.len();
        let mut buf = Vec::new();
        buf.extend_from_slice(&(total as u32).to_ne_bytes());
        buf.extend_from_slice(&16u16.to_ne_bytes());
        buf.extend_from_slice(&0u16.to_ne_bytes());
        buf.extend_from_slice(&7u32.to_ne_bytes());
        buf.extend_from_slice(&0u32.to_ne_bytes());
        buf.push(5); // cmd
        buf.push(1); // version
        buf.extend_from_slice(&[0, 0]);
        buf.extend_from_slice(&attrs);
        let envelopes = decode_all(&buf).unwrap();
        match &envelopes[0].body {
            Body::Genl { cmd, version, attrs } => {
                assert_eq!(*cmd, 5);
                assert_eq!(*version, 1);
                assert_eq!(attrs.len(), 1);
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn decode_all_splits_multiple_coalesced_datagrams() {
        let mut buf = Vec::new();
        for seq in [1u32, 2u32] {
            buf.extend_from_slice(&16u32.to_ne_bytes());
            buf.extend_from_slice(&3u16.to_ne_bytes()); // NLMSG_DONE
            buf.extend_from_slice(&0u16.to_ne_bytes());
            buf.extend_from_slice(&seq.to_ne_bytes());
            buf.extend_from_slice(&0u32.to_ne_bytes());
        }
        let envelopes = decode_all(&buf).unwrap();
        assert_eq!(envelopes.len(), 2);
        assert_eq!(envelopes[0].seq, 1);
        assert_eq!(envelopes[1].seq, 2);
    }
}
