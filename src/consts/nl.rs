//! `nlmsghdr` level constants (`libc`'s own netlink bindings).

use crate::macros::nl_enum;

bitflags::bitflags! {
    /// `nlmsg_flags` bits (`NLM_F_*`).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct NlmF: u16 {
        /// It's a request message.
        const REQUEST = libc::NLM_F_REQUEST as u16;
        /// Multipart message, terminated by [`crate::consts::nl::NlmsgType::Done`].
        const MULTI = libc::NLM_F_MULTI as u16;
        /// The kernel should ack this request.
        const ACK = libc::NLM_F_ACK as u16;
        /// Echo this request back.
        const ECHO = libc::NLM_F_ECHO as u16;
        const DUMP_INTR = libc::NLM_F_DUMP_INTR as u16;
        const DUMP_FILTERED = libc::NLM_F_DUMP_FILTERED as u16;
        /// Return the complete table, not just one entry.
        const ROOT = libc::NLM_F_ROOT as u16;
        /// Return all entries matching the criteria given.
        const MATCH = libc::NLM_F_MATCH as u16;
        const ATOMIC = libc::NLM_F_ATOMIC as u16;
        /// `ROOT | MATCH`, a dump request.
        const DUMP = libc::NLM_F_DUMP as u16;
    }
}

nl_enum!(
    /// `nlmsg_type` values reserved for the transport itself, as
    /// opposed to a particular protocol family's own message types.
    NlmsgType, u16,
    Noop => libc::NLMSG_NOOP as u16,
    Error => libc::NLMSG_ERROR as u16,
    Done => libc::NLMSG_DONE as u16,
    Overrun => libc::NLMSG_OVERRUN as u16,
);

/// Size, in bytes, of a `struct nlmsghdr`.
pub const NL_HEADER_LEN: usize = 16;

/// Alignment boundary netlink messages and attributes are padded to.
pub const NLA_ALIGNTO: usize = 4;

/// Round `len` up to the next multiple of [`NLA_ALIGNTO`].
pub const fn align(len: usize) -> usize {
    (len + NLA_ALIGNTO - 1) & !(NLA_ALIGNTO - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_rounds_up_to_four() {
        assert_eq!(align(0), 0);
        assert_eq!(align(1), 4);
        assert_eq!(align(4), 4);
        assert_eq!(align(5), 8);
    }
}
