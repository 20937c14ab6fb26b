//! Wire-level constant tables.
//!
//! `nl` and `genl` wrap libc's own netlink/generic-netlink bindings;
//! `nl80211` hand-carries the nl80211 family's own command, attribute,
//! and enumeration tables, which libc does not expose.

pub mod genl;
pub mod nl;
pub mod nl80211;
