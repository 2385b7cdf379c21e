use std::net::IpAddr;
use pnet::packet::icmp::{self, IcmpCode, IcmpPacket, IcmpTypes};
use pnet::packet::icmp::echo_request::MutableEchoRequestPacket;
use pnet::packet::icmpv6::{Icmpv6Code, Icmpv6Types, MutableIcmpv6Packet};
use super::{DEFAULT_PAYLOAD_SIZE, ECHO_HEADER_SIZE, SIGNATURE};

pub fn payload(size: usize, v6: bool) -> Vec<u8> {
    let size = size.max(DEFAULT_PAYLOAD_SIZE);
    let len  = match v6 {
        true  => size - ECHO_HEADER_SIZE,
        false => size,
    };

    let mut data = SIGNATURE.to_vec();
    data.resize(len.max(SIGNATURE.len()), 0);
    data
}

pub fn echo_request(dst: IpAddr, id: u16, seq: u16, size: usize) -> Vec<u8> {
    match dst {
        IpAddr::V4(_) => v4(id, seq, &payload(size, false)),
        IpAddr::V6(_) => v6(id, seq, &payload(size, true)),
    }
}

fn v4(id: u16, seq: u16, data: &[u8]) -> Vec<u8> {
    let mut buf = vec![0u8; ECHO_HEADER_SIZE + data.len()];

    if let Some(mut pkt) = MutableEchoRequestPacket::new(&mut buf) {
        pkt.set_icmp_type(IcmpTypes::EchoRequest);
        pkt.set_icmp_code(IcmpCode(0));
        pkt.set_identifier(id);
        pkt.set_sequence_number(seq);
        pkt.set_payload(data);
    }

    let sum = IcmpPacket::new(&buf).map(|p| icmp::checksum(&p)).unwrap_or(0);
    buf[2..4].copy_from_slice(&sum.to_be_bytes());

    buf
}

// the kernel fills in the ICMPv6 checksum on raw sockets
fn v6(id: u16, seq: u16, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(4 + data.len());
    body.extend_from_slice(&id.to_be_bytes());
    body.extend_from_slice(&seq.to_be_bytes());
    body.extend_from_slice(data);

    let mut buf = vec![0u8; MutableIcmpv6Packet::minimum_packet_size() + body.len()];

    if let Some(mut pkt) = MutableIcmpv6Packet::new(&mut buf) {
        pkt.set_icmpv6_type(Icmpv6Types::EchoRequest);
        pkt.set_icmpv6_code(Icmpv6Code(0));
        pkt.set_payload(&body);
    }

    buf
}
