//! Userspace control of 802.11 wireless interfaces over
//! nl80211/generic-netlink.
//!
//! This crate talks directly to the kernel's generic-netlink socket —
//! there is no dependency on `iw` or any other external tool. A typical
//! caller opens a socket with [`nl80211::one_shot`], then calls one of
//! the functions in [`nl80211`] to enumerate or configure wireless
//! interfaces:
//!
//! ```no_run
//! use nl80211ctl::nl80211;
//!
//! # fn main() -> Result<(), nl80211ctl::err::NlError> {
//! let info = nl80211::one_shot(nl80211::DEFAULT_TIMEOUT, |handle| {
//!     nl80211::get_interface(handle, 3)
//! })?;
//! println!("{:?}", info.card());
//! # Ok(())
//! # }
//! ```
//!
//! # Layering
//!
//! - [`attr`] and [`msg`] encode and decode the netlink/generic-netlink
//!   wire format.
//! - [`socket`] owns the raw `AF_NETLINK` socket; [`engine`] drives a
//!   single request to completion against it.
//! - [`family`] resolves the nl80211 generic-netlink family id, which
//!   the kernel assigns dynamically at boot.
//! - [`card`] and [`types`] are the data model returned to callers.
//! - [`nl80211`] is the public operation layer: one function per
//!   logical command.
//!
//! # Errors
//!
//! Every fallible operation returns [`err::NlError`], which follows the
//! kernel's own errno convention rather than a crate-specific code.

pub mod attr;
pub mod card;
pub mod consts;
pub mod engine;
pub mod err;
pub mod family;
mod macros;
pub mod msg;
pub mod nl80211;
pub mod socket;
pub mod types;

pub use card::Card;
pub use err::NlError;
pub use types::{DeviceInfo, Threshold, WiphyInfo};
