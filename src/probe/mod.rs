use std::fmt;
use std::io;
use std::net::IpAddr;
use std::ops::Range;
use std::time::{Duration, Instant};
use log::debug;
use rand::Rng;
use crate::packet::{self, Icmp};
use socket::Raw;

mod socket;


pub const TIMEOUT:     Duration   = Duration::from_secs(4);
pub const MAX_REPLIES: usize      = 10;
const IDENTIFIERS:     Range<u16> = 5000..32000;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Reply {
    Echo,
    FragmentationRequired,
    Unexpected,
}

#[derive(Debug)]
pub enum Error {
    Timeout,
    MessageTooLong,
    Malformed,
    Socket(io::Error),
}

pub trait Prober {
    fn probe(&self, dst: IpAddr, size: usize, df: bool) -> Result<Reply, Error>;
}

/// Prober backed by a fresh raw ICMP socket per probe, created in the
/// network namespace of the calling thread.
#[derive(Copy, Clone, Debug, Default)]
pub struct Echo;

impl Prober for Echo {
    fn probe(&self, dst: IpAddr, size: usize, df: bool) -> Result<Reply, Error> {
        probe(dst, size, df)
    }
}

pub fn probe(dst: IpAddr, size: usize, df: bool) -> Result<Reply, Error> {
    let id   = rand::thread_rng().gen_range(IDENTIFIERS);
    let req  = packet::echo_request(dst, id, 1, size);
    let sock = Raw::open(dst)?;

    sock.dont_fragment(df)?;
    sock.send(&req, dst)?;

    debug!("sent echo request {} to {}, {} bytes", id, dst, req.len());

    let deadline = Instant::now() + TIMEOUT;
    let mut buf  = vec![0u8; 65536];

    for _ in 0..MAX_REPLIES {
        let n   = sock.recv(&mut buf, deadline)?;
        let pkt = match dst {
            IpAddr::V4(_) => packet::ipv4(&buf[..n]),
            IpAddr::V6(_) => packet::ipv6(&buf[..n]),
        }.ok_or(Error::Malformed)?;

        match pkt {
            Icmp::EchoReply { id: reply, tagged: true } if reply == id => {
                return Ok(Reply::Echo);
            },
            Icmp::TooBig { id: Some(reply), mtu } if reply == id => {
                debug!("{} requires fragmentation, next hop mtu {}", dst, mtu);
                return Ok(Reply::FragmentationRequired);
            },
            other => debug!("ignoring {:?}", other),
        }
    }

    Ok(Reply::Unexpected)
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::WouldBlock => Error::Timeout,
            io::ErrorKind::TimedOut   => Error::Timeout,
            _ if err.raw_os_error() == Some(libc::EMSGSIZE) => Error::MessageTooLong,
            _                         => Error::Socket(err),
        }
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Timeout        => write!(f, "ICMP timeout"),
            Error::MessageTooLong => write!(f, "message too long"),
            Error::Malformed      => write!(f, "malformed ICMP packet"),
            Error::Socket(e)      => write!(f, "ICMP socket error: {}", e),
        }
    }
}
