//! Generic-netlink controller (`genl_ctrl`) constants, used while
//! resolving the nl80211 family id by name.

use crate::macros::nl_enum;

/// Size, in bytes, of a `struct genlmsghdr` (`cmd`, `version`, two
/// reserved bytes).
pub const GENL_HEADER_LEN: usize = 4;

/// `nlmsg_type` of the generic-netlink controller family itself.
pub const GENL_ID_CTRL: u16 = libc::GENL_ID_CTRL as u16;

nl_enum!(
    /// Commands understood by the generic-netlink controller family.
    CtrlCmd, u8,
    Unspec => libc::CTRL_CMD_UNSPEC as u8,
    Newfamily => libc::CTRL_CMD_NEWFAMILY as u8,
    Delfamily => libc::CTRL_CMD_DELFAMILY as u8,
    Getfamily => libc::CTRL_CMD_GETFAMILY as u8,
    Newops => libc::CTRL_CMD_NEWOPS as u8,
    Delops => libc::CTRL_CMD_DELOPS as u8,
    Getops => libc::CTRL_CMD_GETOPS as u8,
    NewmcastGrp => libc::CTRL_CMD_NEWMCAST_GRP as u8,
    DelmcastGrp => libc::CTRL_CMD_DELMCAST_GRP as u8,
    GetmcastGrp => libc::CTRL_CMD_GETMCAST_GRP as u8,
);

nl_enum!(
    /// Attributes carried by [`CtrlCmd`] requests and replies.
    CtrlAttr, u16,
    Unspec => libc::CTRL_ATTR_UNSPEC as u16,
    FamilyId => libc::CTRL_ATTR_FAMILY_ID as u16,
    FamilyName => libc::CTRL_ATTR_FAMILY_NAME as u16,
    Version => libc::CTRL_ATTR_VERSION as u16,
    Hdrsize => libc::CTRL_ATTR_HDRSIZE as u16,
    Maxattr => libc::CTRL_ATTR_MAXATTR as u16,
    Ops => libc::CTRL_ATTR_OPS as u16,
    McastGroups => libc::CTRL_ATTR_MCAST_GROUPS as u16,
);
