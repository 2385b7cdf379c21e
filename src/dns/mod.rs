use std::io::ErrorKind;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::time::Duration;
use anyhow::{anyhow, bail, Context, Result};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{Name, RData, RecordType};
use log::debug;

#[cfg(test)]
mod test;

pub const PORT:    u16      = 53;
pub const TIMEOUT: Duration = Duration::from_secs(2);

pub fn resolve_a(server: SocketAddr, name: &str) -> Result<Vec<Ipv4Addr>> {
    let query = query(name)?;

    let any  = match server {
        SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
        SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
    };
    let sock = UdpSocket::bind(any)?;
    sock.set_read_timeout(Some(TIMEOUT))?;
    sock.connect(server)?;
    sock.send(&query.to_vec()?)?;

    debug!("sent DNS query {} for {} to {}", query.id(), name, server);

    let mut buf = [0u8; 4096];
    let n = sock.recv(&mut buf).map_err(|e| match e.kind() {
        ErrorKind::WouldBlock | ErrorKind::TimedOut => anyhow!("DNS timeout querying {}", server),
        _                                           => anyhow!(e),
    })?;

    let reply = Message::from_vec(&buf[..n]).context("invalid DNS response")?;

    answers(&query, &reply)
}

pub fn fqdn(name: &str) -> Result<Name> {
    let mut name = Name::from_ascii(name)?;
    name.set_fqdn(true);
    Ok(name)
}

pub fn query(name: &str) -> Result<Message> {
    let mut msg = Message::new();
    msg.set_id(rand::random());
    msg.set_message_type(MessageType::Query);
    msg.set_op_code(OpCode::Query);
    msg.set_recursion_desired(true);
    msg.add_query(Query::query(fqdn(name)?, RecordType::A));
    Ok(msg)
}

/// A record addresses in `reply`, in the order the resolver listed them.
pub fn answers(query: &Message, reply: &Message) -> Result<Vec<Ipv4Addr>> {
    if reply.id() != query.id() {
        bail!("DNS response id {} does not match query {}", reply.id(), query.id());
    }

    match reply.response_code() {
        ResponseCode::NoError => (),
        code                  => bail!("DNS resolver error: {}", code),
    }

    Ok(reply.answers().iter().filter_map(|record| {
        match record.data() {
            Some(RData::A(a)) => Some(a.0),
            _                 => None,
        }
    }).collect())
}
