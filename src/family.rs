//! Resolving the nl80211 generic-netlink family id by name.
//!
//! nl80211 has no fixed `nlmsg_type`; every caller must first ask the
//! generic-netlink controller family (always `GENL_ID_CTRL`) to
//! resolve `"nl80211"` to whatever id the running kernel assigned it.
//! The result cannot change for the lifetime of the process, so it is
//! cached process-wide behind a [`OnceLock`] rather than re-resolved
//! on every operation.

use std::sync::OnceLock;

use log::debug;

use crate::{
    attr::{AttrHandle, Attribute},
    consts::{
        genl::{CtrlAttr, CtrlCmd, GENL_ID_CTRL},
        nl::NlmF,
    },
    engine::Engine,
    err::NlError,
    msg::Request,
    socket::{RawTransport, SocketHandle},
};

static NL80211_FAMILY_ID: OnceLock<u16> = OnceLock::new();

/// Resolve and cache the nl80211 family id.
pub fn resolve_nl80211_family<T: RawTransport>(
    handle: &mut SocketHandle<T>,
) -> Result<u16, NlError> {
    if let Some(&id) = NL80211_FAMILY_ID.get() {
        return Ok(id);
    }
    let id = resolve_family_by_name(handle, "nl80211")?;
    debug!("resolved nl80211 family id {id}");
    Ok(*NL80211_FAMILY_ID.get_or_init(|| id))
}

/// Resolve an arbitrary generic-netlink family name to its id, without
/// caching. Exposed mainly so the nl80211 lookup above can be tested
/// without the process-wide cache leaking between test cases.
pub fn resolve_family_by_name<T: RawTransport>(
    handle: &mut SocketHandle<T>,
    name: &str,
) -> Result<u16, NlError> {
    let request = Request::new(GENL_ID_CTRL, NlmF::REQUEST | NlmF::ACK, CtrlCmd::Getfamily.into())
        .with_attr(Attribute::from_string(CtrlAttr::FamilyName.into(), name));

    let reply = Engine::new(handle)
        .execute(request)?
        .into_iter()
        .next()
        .ok_or_else(|| NlError::undef(format!("no reply resolving family {name}")))?;

    let attrs = AttrHandle::new(reply.attrs);
    let family_id_attr = attrs
        .find(CtrlAttr::FamilyId.into())
        .ok_or_else(|| NlError::undef(format!("reply for family {name} had no family id")))?;
    Ok(family_id_attr.as_u16()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::nl::NL_HEADER_LEN;
    use std::{cell::RefCell, collections::VecDeque};

    struct ScriptedTransport {
        replies: RefCell<VecDeque<Vec<u8>>>,
    }

    impl RawTransport for ScriptedTransport {
        fn send(&self, _buf: &[u8]) -> Result<usize, crate::err::SocketError> {
            Ok(0)
        }

        fn recv(&self, buf: &mut [u8]) -> Result<usize, crate::err::SocketError> {
            match self.replies.borrow_mut().pop_front() {
                Some(datagram) => {
                    buf[..datagram.len()].copy_from_slice(&datagram);
                    Ok(datagram.len())
                }
                None => Err(crate::err::SocketError::Timeout),
            }
        }

        fn port(&self) -> u32 {
            0
        }
    }

    fn getfamily_reply(seq: u32, family_id: u16) -> Vec<u8> {
        let mut attrs = Vec::new();
        Attribute::from_u16(CtrlAttr::FamilyId.into(), family_id).encode_into(&mut attrs);
        Attribute::from_string(CtrlAttr::FamilyName.into(), "nl80211").encode_into(&mut attrs);
        let total = NL_HEADER_LEN + 4 + attrs.len();
        let mut buf = Vec::new();
        buf.extend_from_slice(&(total as u32).to_ne_bytes());
        buf.extend_from_slice(&GENL_ID_CTRL.to_ne_bytes());
        buf.extend_from_slice(&0u16.to_ne_bytes());
        buf.extend_from_slice(&seq.to_ne_bytes());
        buf.extend_from_slice(&0u32.to_ne_bytes());
        buf.push(CtrlCmd::Newfamily.into());
        buf.push(1);
        buf.extend_from_slice(&[0, 0]);
        buf.extend_from_slice(&attrs);
        buf
    }

    #[test]
    fn resolves_family_id_from_ctrl_reply() {
        let transport = ScriptedTransport {
            replies: RefCell::new(VecDeque::from([getfamily_reply(1, 0x1234)])),
        };
        let mut handle = SocketHandle::from_transport(transport);
        let id = resolve_family_by_name(&mut handle, "nl80211").unwrap();
        assert_eq!(id, 0x1234);
    }
}
