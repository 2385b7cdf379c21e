use std::io::{self, Read};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::os::unix::io::AsRawFd;
use std::time::Instant;
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use crate::os::set_dont_fragment;
use super::Error;

pub struct Raw {
    sock: Socket,
    v6:   bool,
}

impl Raw {
    pub fn open(dst: IpAddr) -> Result<Self, Error> {
        let (domain, protocol, any) = match dst {
            IpAddr::V4(_) => (Domain::IPV4, Protocol::ICMPV4, IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            IpAddr::V6(_) => (Domain::IPV6, Protocol::ICMPV6, IpAddr::V6(Ipv6Addr::UNSPECIFIED)),
        };

        let sock = Socket::new(domain, Type::RAW, Some(protocol))?;
        sock.bind(&SockAddr::from(SocketAddr::new(any, 0)))?;

        Ok(Self {
            sock: sock,
            v6:   dst.is_ipv6(),
        })
    }

    pub fn dont_fragment(&self, on: bool) -> Result<(), Error> {
        Ok(set_dont_fragment(self.sock.as_raw_fd(), self.v6, on)?)
    }

    pub fn send(&self, buf: &[u8], dst: IpAddr) -> Result<(), Error> {
        let addr = SockAddr::from(SocketAddr::new(dst, 0));
        self.sock.send_to(buf, &addr)?;
        Ok(())
    }

    pub fn recv(&self, buf: &mut [u8], deadline: Instant) -> Result<usize, Error> {
        loop {
            let now = Instant::now();
            if now >= deadline {
                return Err(Error::Timeout);
            }

            self.sock.set_read_timeout(Some(deadline - now))?;

            match (&self.sock).read(buf) {
                Ok(n)  => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
