//! Raw netlink socket transport.
//!
//! [`NlSocket`] is a thin wrapper around the `socket(2)`/`bind(2)`/
//! `send(2)`/`recvfrom(2)` calls needed to talk `AF_NETLINK`,
//! `NETLINK_GENERIC`, the same way a production netlink library talks
//! to the kernel directly rather than through a portable abstraction.
//!
//! [`SocketHandle`] is generic over a [`RawTransport`] so tests can
//! swap in a fake that replays canned datagrams instead of opening a
//! real kernel socket; the default type parameter keeps the public API
//! concrete for ordinary callers.

use std::{
    io,
    mem::size_of,
    os::unix::io::{AsRawFd, RawFd},
    time::Duration,
};

use log::{debug, trace};

use crate::{
    err::{NlError, SocketError},
    msg::{decode_all as decode_msgs, Envelope, Request},
};

/// Minimal operations a netlink transport must provide.
///
/// Implemented by [`NlSocket`] for production use and by a
/// byte-sequence replay fake in this crate's integration tests.
pub trait RawTransport {
    fn send(&self, buf: &[u8]) -> Result<usize, SocketError>;
    fn recv(&self, buf: &mut [u8]) -> Result<usize, SocketError>;
    /// Port id this transport is bound to (used to populate
    /// `nlmsg_pid` on outgoing requests and to recognize unicast
    /// replies).
    fn port(&self) -> u32;
}

/// A raw `AF_NETLINK`/`NETLINK_GENERIC` socket.
pub struct NlSocket {
    fd: RawFd,
    port: u32,
}

const RECV_BUF_LEN: usize = 1 << 16;

impl NlSocket {
    /// Open and bind a netlink socket, setting the receive timeout
    /// (`SO_RCVTIMEO`) that the request-response engine relies on
    /// instead of a separate poll loop.
    pub fn connect(timeout: Duration) -> Result<Self, SocketError> {
        let fd = match unsafe {
            libc::socket(
                libc::AF_NETLINK,
                libc::SOCK_RAW | libc::SOCK_CLOEXEC,
                libc::NETLINK_GENERIC,
            )
        } {
            i if i >= 0 => i,
            _ => return Err(io::Error::last_os_error().into()),
        };

        let mut addr: libc::sockaddr_nl = unsafe { std::mem::zeroed() };
        addr.nl_family = libc::AF_NETLINK as u16;
        addr.nl_pid = 0; // let the kernel assign a port id
        let rc = unsafe {
            libc::bind(
                fd,
                &addr as *const _ as *const libc::sockaddr,
                size_of::<libc::sockaddr_nl>() as u32,
            )
        };
        if rc < 0 {
            let err = io::Error::last_os_error();
            unsafe { libc::close(fd) };
            return Err(err.into());
        }

        let port = Self::getsockname_port(fd)?;
        debug!("netlink socket bound, port {port}");

        let socket = NlSocket { fd, port };
        socket.set_recv_timeout(timeout)?;
        Ok(socket)
    }

    fn getsockname_port(fd: RawFd) -> Result<u32, SocketError> {
        let mut addr: libc::sockaddr_nl = unsafe { std::mem::zeroed() };
        let mut len = size_of::<libc::sockaddr_nl>() as u32;
        let rc = unsafe {
            libc::getsockname(fd, &mut addr as *mut _ as *mut libc::sockaddr, &mut len)
        };
        if rc < 0 {
            return Err(io::Error::last_os_error().into());
        }
        Ok(addr.nl_pid)
    }

    /// Set (or clear, with `Duration::ZERO`) the receive timeout via
    /// `SO_RCVTIMEO`.
    pub fn set_recv_timeout(&self, timeout: Duration) -> Result<(), SocketError> {
        let tv = libc::timeval {
            tv_sec: timeout.as_secs() as libc::time_t,
            tv_usec: timeout.subsec_micros() as libc::suseconds_t,
        };
        let rc = unsafe {
            libc::setsockopt(
                self.fd,
                libc::SOL_SOCKET,
                libc::SO_RCVTIMEO,
                &tv as *const _ as *const libc::c_void,
                size_of::<libc::timeval>() as libc::socklen_t,
            )
        };
        if rc < 0 {
            return Err(io::Error::last_os_error().into());
        }
        Ok(())
    }
}

impl RawTransport for NlSocket {
    fn send(&self, buf: &[u8]) -> Result<usize, SocketError> {
        let rc = unsafe {
            libc::send(
                self.fd,
                buf.as_ptr() as *const libc::c_void,
                buf.len(),
                0,
            )
        };
        if rc < 0 {
            return Err(io::Error::last_os_error().into());
        }
        trace!("sent {rc} bytes");
        Ok(rc as usize)
    }

    fn recv(&self, buf: &mut [u8]) -> Result<usize, SocketError> {
        let mut addr: libc::sockaddr_nl = unsafe { std::mem::zeroed() };
        let mut addrlen = size_of::<libc::sockaddr_nl>() as u32;
        let rc = unsafe {
            libc::recvfrom(
                self.fd,
                buf.as_mut_ptr() as *mut libc::c_void,
                buf.len(),
                0,
                &mut addr as *mut _ as *mut libc::sockaddr,
                &mut addrlen,
            )
        };
        if rc < 0 {
            return Err(io::Error::last_os_error().into());
        }
        trace!("received {rc} bytes");
        Ok(rc as usize)
    }

    fn port(&self) -> u32 {
        self.port
    }
}

impl AsRawFd for NlSocket {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl Drop for NlSocket {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.fd);
        }
    }
}

/// A connected socket plus the bookkeeping (sequence counter, bound
/// port) a request-response protocol needs.
///
/// One outstanding request at a time: a single blocking handle, not a
/// multiplexed router.
pub struct SocketHandle<T = NlSocket> {
    transport: T,
    seq: u32,
}

impl SocketHandle<NlSocket> {
    /// Open a real netlink socket with the given receive timeout.
    pub fn connect(timeout: Duration) -> Result<Self, NlError> {
        Ok(SocketHandle {
            transport: NlSocket::connect(timeout)?,
            seq: 0,
        })
    }
}

impl<T: RawTransport> SocketHandle<T> {
    /// Wrap an already-constructed transport (used by tests with a
    /// fake replay transport).
    pub fn from_transport(transport: T) -> Self {
        SocketHandle { transport, seq: 0 }
    }

    pub fn port(&self) -> u32 {
        self.transport.port()
    }

    /// Allocate and return the next request sequence number.
    fn next_seq(&mut self) -> u32 {
        self.seq = self.seq.wrapping_add(1);
        self.seq
    }

    /// Send a request, returning the sequence number the engine should
    /// match replies against.
    pub fn send_request(&mut self, request: &Request) -> Result<u32, NlError> {
        let seq = self.next_seq();
        let port = self.transport.port();
        let bytes = request.encode(seq, port);
        self.transport.send(&bytes)?;
        Ok(seq)
    }

    /// Block for the next batch of decoded datagrams (a single
    /// `recv` may coalesce several).
    pub fn recv_envelopes(&mut self) -> Result<Vec<Envelope>, NlError> {
        let mut buf = vec![0u8; RECV_BUF_LEN];
        let n = self.transport.recv(&mut buf)?;
        buf.truncate(n);
        Ok(decode_msgs(&buf)?)
    }
}
