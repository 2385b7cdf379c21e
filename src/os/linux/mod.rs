use std::fs::{self, File};
use std::io::{self, Error};
use std::mem;
use std::os::raw::c_int;
use std::os::unix::fs::MetadataExt;
use std::os::unix::io::{AsRawFd, RawFd};
use anyhow::Result;
use errno::errno;
use socket2::{Domain, Socket, Type};

pub fn getns(pid: u32) -> Result<File> {
    Ok(File::open(&format!("/proc/{}/ns/net", pid))?)
}

pub fn threadns() -> Result<File> {
    Ok(File::open("/proc/thread-self/ns/net")?)
}

pub fn setns(ns: &File) -> Result<()> {
    unsafe {
        match libc::setns(ns.as_raw_fd(), libc::CLONE_NEWNET) {
            0 => Ok(()),
            _ => Err(Error::last_os_error())?,
        }
    }
}

pub fn nsid(ns: &File) -> Result<(u64, u64)> {
    let meta = ns.metadata()?;
    Ok((meta.dev(), meta.ino()))
}

pub fn set_dont_fragment(fd: RawFd, v6: bool, on: bool) -> io::Result<()> {
    let (level, name, value) = match (v6, on) {
        (false, true)  => (libc::IPPROTO_IP,   libc::IP_MTU_DISCOVER,   libc::IP_PMTUDISC_DO),
        (false, false) => (libc::IPPROTO_IP,   libc::IP_MTU_DISCOVER,   libc::IP_PMTUDISC_DONT),
        (true,  _)     => (libc::IPPROTO_IPV6, libc::IPV6_MTU_DISCOVER, libc::IPV6_PMTUDISC_DO),
    };

    unsafe {
        let ptr = &value as *const c_int as *const libc::c_void;
        let len = mem::size_of::<c_int>() as libc::socklen_t;
        match libc::setsockopt(fd, level, name, ptr, len) {
            0 => Ok(()),
            _ => Err(io::Error::last_os_error()),
        }
    }
}

pub fn mtu(name: &str) -> Result<u32> {
    let sock = Socket::new(Domain::IPV4, Type::DGRAM, None)?;

    unsafe {
        let mut req: libc::ifreq = mem::zeroed();
        let len = name.len().min(libc::IFNAMSIZ - 1);
        for (dst, src) in req.ifr_name.iter_mut().zip(&name.as_bytes()[..len]) {
            *dst = *src as libc::c_char;
        }

        match libc::ioctl(sock.as_raw_fd(), libc::SIOCGIFMTU as _, &mut req) {
            -1 => Err(errno())?,
            _  => Ok(req.ifr_ifru.ifru_mtu as u32),
        }
    }
}

pub fn route() -> Result<String> {
    Ok(fs::read_to_string("/proc/thread-self/net/route")?)
}
