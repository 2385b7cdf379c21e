use std::net::UdpSocket;
use std::os::unix::io::AsRawFd;
use anyhow::Result;
use super::*;

#[test]
fn thread_and_process_namespace() -> Result<()> {
    let proc   = getns(getpid())?;
    let thread = threadns()?;
    assert_eq!(nsid(&proc)?, nsid(&thread)?);
    Ok(())
}

#[test]
fn loopback_mtu() -> Result<()> {
    assert!(mtu("lo")? >= 1500);
    assert!(mtu("no-such-link0").is_err());
    Ok(())
}

#[test]
fn dont_fragment_option() -> Result<()> {
    let sock = UdpSocket::bind("127.0.0.1:0")?;
    set_dont_fragment(sock.as_raw_fd(), false, true)?;
    set_dont_fragment(sock.as_raw_fd(), false, false)?;
    Ok(())
}

#[test]
fn route_table() -> Result<()> {
    assert!(route()?.starts_with("Iface"));
    Ok(())
}
