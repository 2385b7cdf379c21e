use std::convert::TryInto;
use pnet::packet::Packet;
use pnet::packet::icmp::{IcmpCode, IcmpPacket, IcmpTypes};
use pnet::packet::icmp::echo_reply::EchoReplyPacket;
use pnet::packet::icmp::echo_request::EchoRequestPacket;
use pnet::packet::icmpv6::{Icmpv6Packet, Icmpv6Types};
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::packet::ipv4::Ipv4Packet;
use pnet::packet::ipv6::Ipv6Packet;
use super::{Icmp, SIGNATURE, contains};

const FRAGMENTATION_NEEDED: IcmpCode = IcmpCode(4);
const IPV6_HEADER_SIZE:     usize    = 40;

// raw IPv4 sockets deliver the IP header in front of the ICMP message
pub fn ipv4(buf: &[u8]) -> Option<Icmp> {
    let ip  = Ipv4Packet::new(buf)?;
    let ihl = ip.get_header_length() as usize * 4;
    icmpv4(buf.get(ihl..)?)
}

pub fn ipv6(buf: &[u8]) -> Option<Icmp> {
    let pkt  = Icmpv6Packet::new(buf)?;
    let kind = pkt.get_icmpv6_type();
    let body = pkt.payload();

    match kind {
        Icmpv6Types::EchoReply => {
            let id     = u16::from_be_bytes(body.get(0..2)?.try_into().ok()?);
            let tagged = contains(body.get(4..)?, SIGNATURE);
            Some(Icmp::EchoReply { id, tagged })
        },
        Icmpv6Types::PacketTooBig => {
            let mtu = u32::from_be_bytes(body.get(0..4)?.try_into().ok()?);
            let id  = body.get(4..).and_then(quoted_v6);
            Some(Icmp::TooBig { id, mtu })
        },
        _ => Some(Icmp::Other {
            kind: kind.0,
            code: pkt.get_icmpv6_code().0,
        }),
    }
}

fn icmpv4(buf: &[u8]) -> Option<Icmp> {
    let pkt  = IcmpPacket::new(buf)?;
    let kind = pkt.get_icmp_type();
    let code = pkt.get_icmp_code();

    match kind {
        IcmpTypes::EchoReply => {
            let reply  = EchoReplyPacket::new(buf)?;
            let id     = reply.get_identifier();
            let tagged = contains(reply.payload(), SIGNATURE);
            Some(Icmp::EchoReply { id, tagged })
        },
        IcmpTypes::DestinationUnreachable if code == FRAGMENTATION_NEEDED => {
            let mtu = u16::from_be_bytes(buf.get(6..8)?.try_into().ok()?);
            let id  = buf.get(8..).and_then(quoted_v4);
            Some(Icmp::TooBig { id, mtu: mtu as u32 })
        },
        _ => Some(Icmp::Other {
            kind: kind.0,
            code: code.0,
        }),
    }
}

// identifier of the echo request quoted in an ICMP error
fn quoted_v4(quoted: &[u8]) -> Option<u16> {
    let ip  = Ipv4Packet::new(quoted)?;
    let ihl = ip.get_header_length() as usize * 4;
    let req = EchoRequestPacket::new(quoted.get(ihl..)?)?;
    match req.get_icmp_type() {
        IcmpTypes::EchoRequest => Some(req.get_identifier()),
        _                      => None,
    }
}

fn quoted_v6(quoted: &[u8]) -> Option<u16> {
    let ip = Ipv6Packet::new(quoted)?;
    if ip.get_next_header() != IpNextHeaderProtocols::Icmpv6 {
        return None;
    }

    let req = quoted.get(IPV6_HEADER_SIZE..)?;
    match req.get(0..6)? {
        [128, _, _, _, a, b] => Some(u16::from_be_bytes([*a, *b])),
        _                    => None,
    }
}
