//! Error types used throughout this crate.
//!
//! # Design decisions
//!
//! Every failure that crosses an operation boundary collapses into
//! [`NlError`], which carries the kernel's own errno convention
//! rather than a crate-specific error code. Codec
//! and socket layers have their own narrower error types that convert
//! into [`NlError`] via [`From`].

use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// Error produced while encoding or decoding netlink/generic-netlink
/// messages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodecError {
    /// The buffer ended before a complete header or attribute could be
    /// read.
    Truncated,
    /// An attribute's declared length did not match the width its
    /// schema kind requires.
    WrongWidth {
        /// Attribute identifier (nested bit already masked).
        attr: u16,
        /// Payload length actually present on the wire.
        found: usize,
    },
    /// A string attribute payload was not valid UTF-8.
    Utf8,
    /// Arbitrary message, used for conditions that don't fit the above.
    Msg(String),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CodecError::Truncated => write!(f, "buffer ended before a complete element"),
            CodecError::WrongWidth { attr, found } => write!(
                f,
                "attribute {attr:#06x} had a payload of {found} bytes, which does not match its declared kind"
            ),
            CodecError::Utf8 => write!(f, "string attribute payload was not valid UTF-8"),
            CodecError::Msg(s) => write!(f, "{s}"),
        }
    }
}

impl Error for CodecError {}

/// Error produced by the raw socket/transport layer.
#[derive(Debug)]
pub enum SocketError {
    /// The underlying system call failed.
    Io(io::Error),
    /// The receive deadline elapsed before a datagram arrived.
    Timeout,
}

impl Display for SocketError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SocketError::Io(e) => write!(f, "I/O error: {e}"),
            SocketError::Timeout => write!(f, "receive timed out"),
        }
    }
}

impl Error for SocketError {}

impl From<io::Error> for SocketError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::WouldBlock || e.kind() == io::ErrorKind::TimedOut {
            SocketError::Timeout
        } else {
            SocketError::Io(e)
        }
    }
}

/// Error surfaced at the nl80211 operation boundary.
///
/// `errno` follows the kernel's own convention: `EINVAL` for parameter
/// validation failures, `ENODEV` for a missing device, `EOPNOTSUPP` for
/// unsupported commands, and the locally defined [`NlError::UNDEF`] for
/// decode failures that never came from the kernel at all.
#[derive(Debug)]
pub struct NlError {
    /// Kernel errno, or [`NlError::UNDEF`] for a decode error.
    pub errno: i32,
    /// Human readable context.
    pub message: String,
}

impl NlError {
    /// Sentinel errno for internal decode errors; never returned by the
    /// kernel itself.
    pub const UNDEF: i32 = -1;

    /// Build a validation error (`EINVAL`).
    pub fn invalid<D: Display>(msg: D) -> Self {
        NlError {
            errno: libc::EINVAL,
            message: msg.to_string(),
        }
    }

    /// Build a decode error (`UNDEF`).
    pub fn undef<D: Display>(msg: D) -> Self {
        NlError {
            errno: Self::UNDEF,
            message: msg.to_string(),
        }
    }

    /// Build an error from a raw kernel errno returned in an ack/error
    /// control message.
    pub fn from_errno(errno: i32) -> Self {
        NlError {
            errno,
            message: io::Error::from_raw_os_error(errno).to_string(),
        }
    }

    /// Timeout waiting for a reply (`EAGAIN`-equivalent).
    pub fn timeout() -> Self {
        NlError {
            errno: libc::EAGAIN,
            message: "receive timed out".to_string(),
        }
    }
}

impl Display for NlError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (errno {})", self.message, self.errno)
    }
}

impl Error for NlError {}

impl From<CodecError> for NlError {
    fn from(e: CodecError) -> Self {
        NlError::undef(e)
    }
}

impl From<SocketError> for NlError {
    fn from(e: SocketError) -> Self {
        match e {
            SocketError::Timeout => NlError::timeout(),
            SocketError::Io(io) => match io.raw_os_error() {
                Some(errno) => NlError::from_errno(errno),
                None => NlError {
                    errno: Self::UNDEF,
                    message: io.to_string(),
                },
            },
        }
    }
}
