pub use decode::{ipv4, ipv6};
pub use encode::{echo_request, payload};

mod decode;
mod encode;


/// Marker embedded in every echo request so replies to other pingers on
/// the host can be told apart.
pub const SIGNATURE: &[u8] = b"K8SNETLOOK-ICMP-TEST";

pub const DEFAULT_PAYLOAD_SIZE: usize = 64;
pub const ECHO_HEADER_SIZE:     usize = 8;

#[derive(Debug, Eq, PartialEq)]
pub enum Icmp {
    EchoReply { id: u16, tagged: bool },
    TooBig    { id: Option<u16>, mtu: u32 },
    Other     { kind: u8, code: u8 },
}

fn contains(data: &[u8], needle: &[u8]) -> bool {
    data.windows(needle.len()).any(|w| w == needle)
}
