use std::net::{IpAddr, Ipv4Addr};
use anyhow::Result;
use crate::os;

const RTF_GATEWAY: u16 = 0x2;

/// Default gateway of the calling thread's network namespace.
pub fn default_gateway() -> Result<Option<IpAddr>> {
    Ok(gateway(&os::route()?).map(IpAddr::V4))
}

// /proc/net/route addresses are hex in host byte order
pub fn gateway(table: &str) -> Option<Ipv4Addr> {
    table.lines().skip(1).find_map(|line| {
        let mut fields = line.split_whitespace().skip(2);
        let gateway = u32::from_str_radix(fields.next()?, 16).ok()?;
        let flags   = u16::from_str_radix(fields.next()?, 16).ok()?;

        match flags & RTF_GATEWAY != 0 && gateway != 0 {
            true  => Some(Ipv4Addr::from(gateway.to_le_bytes())),
            false => None,
        }
    })
}
