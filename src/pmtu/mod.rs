use std::net::IpAddr;
use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use pnet::datalink;
use crate::os;
use crate::probe::{Error, Prober, Reply};

#[cfg(test)]
mod test;

pub const MAX_MTU:       usize = 9000;
pub const IPV4_OVERHEAD: usize = 20 + 8;
pub const IPV6_OVERHEAD: usize = 40;

/// Bytes a probe of `size` adds on the wire. ICMPv6 echo sizes already
/// count the echo header.
pub fn overhead(dst: IpAddr) -> usize {
    match dst {
        IpAddr::V4(_) => IPV4_OVERHEAD,
        IpAddr::V6(_) => IPV6_OVERHEAD,
    }
}

/// Smallest and largest probe size searched for `dst`.
pub fn bounds(dst: IpAddr) -> (usize, usize) {
    let overhead = overhead(dst);
    (overhead, MAX_MTU - overhead)
}

/// Binary search for the largest echo payload reaching `dst` unfragmented,
/// returned as a path MTU including IP and ICMP headers.
pub fn discover<P: Prober>(prober: &P, dst: IpAddr) -> Result<usize> {
    let (floor, ceiling) = bounds(dst);

    match prober.probe(dst, floor, true) {
        Ok(Reply::Echo) => (),
        Ok(reply)       => return Err(anyhow!("{} not reachable at {} bytes: {:?}", dst, floor, reply)),
        Err(e)          => return Err(e).context(format!("{} not reachable at {} bytes", dst, floor)),
    }

    let mut best = floor;
    let mut low  = floor;
    let mut high = ceiling;

    while low <= high {
        let mid = (low + high) / 2;
        debug!("probing {} with {} byte payload", dst, mid);

        match prober.probe(dst, mid, true) {
            Ok(Reply::Echo) => {
                best = mid;
                low  = mid + 1;
            },
            Ok(Reply::FragmentationRequired) => high = mid - 1,
            Ok(Reply::Unexpected)            => high = mid - 1,
            Err(Error::MessageTooLong)       => high = mid - 1,
            Err(e)                           => return Err(e.into()),
        }
    }

    Ok(best + overhead(dst))
}

/// Local non-loopback interfaces with an MTU above `pmtu`.
pub fn oversized(pmtu: usize) -> Vec<(String, usize)> {
    datalink::interfaces().into_iter().filter(|link| {
        !link.is_loopback()
    }).filter_map(|link| {
        match os::mtu(&link.name) {
            Ok(mtu) => Some((link.name, mtu as usize)),
            Err(e)  => {
                warn!("unable to read mtu of {}: {}", link.name, e);
                None
            }
        }
    }).filter(|(_, mtu)| *mtu > pmtu).collect()
}
