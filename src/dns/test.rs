use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::thread;
use std::time::Instant;
use anyhow::Result;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use hickory_proto::rr::rdata::{A, AAAA};
use super::*;

fn reply(query: &Message, code: ResponseCode, data: Vec<RData>) -> Message {
    let name = query.queries()[0].name().clone();

    let mut msg = Message::new();
    msg.set_id(query.id());
    msg.set_message_type(MessageType::Response);
    msg.set_response_code(code);
    msg.add_query(query.queries()[0].clone());
    for rdata in data {
        msg.add_answer(Record::from_rdata(name.clone(), 30, rdata));
    }
    msg
}

#[test]
fn query_is_recursive_a() -> Result<()> {
    let msg = query("kubernetes.default.svc.cluster.local")?;
    let q   = &msg.queries()[0];

    assert!(msg.recursion_desired());
    assert_eq!(1, msg.queries().len());
    assert_eq!(RecordType::A, q.query_type());
    assert_eq!(fqdn("kubernetes.default.svc.cluster.local.")?, *q.name());
    assert!(q.name().is_fqdn());
    Ok(())
}

#[test]
fn fully_qualified() -> Result<()> {
    assert_eq!(Name::from_ascii("example.com.")?, fqdn("example.com")?);
    assert_eq!(fqdn("example.com.")?, fqdn("example.com")?);
    Ok(())
}

#[test]
fn a_answers_in_order() -> Result<()> {
    let q = query("svc.ns.svc.cluster.local.")?;
    let r = reply(&q, ResponseCode::NoError, vec![
        RData::A(A(Ipv4Addr::new(10, 0, 0, 2))),
        RData::AAAA(AAAA(Ipv6Addr::LOCALHOST)),
        RData::A(A(Ipv4Addr::new(10, 0, 0, 1))),
    ]);

    let ips = answers(&q, &r)?;
    assert_eq!(vec![Ipv4Addr::new(10, 0, 0, 2), Ipv4Addr::new(10, 0, 0, 1)], ips);
    Ok(())
}

#[test]
fn empty_answer() -> Result<()> {
    let q = query("svc.ns.svc.cluster.local.")?;
    let r = reply(&q, ResponseCode::NoError, Vec::new());
    assert!(answers(&q, &r)?.is_empty());
    Ok(())
}

#[test]
fn resolver_error() -> Result<()> {
    let q   = query("missing.ns.svc.cluster.local.")?;
    let r   = reply(&q, ResponseCode::NXDomain, Vec::new());
    let err = answers(&q, &r).unwrap_err().to_string();
    assert!(err.starts_with("DNS resolver error"));
    Ok(())
}

#[test]
fn mismatched_id() -> Result<()> {
    let q = query("svc.ns.svc.cluster.local.")?;
    let mut r = reply(&q, ResponseCode::NoError, vec![RData::A(A(Ipv4Addr::LOCALHOST))]);
    r.set_id(q.id().wrapping_add(1));
    assert!(answers(&q, &r).is_err());
    Ok(())
}

#[test]
fn local_resolver() -> Result<()> {
    let server = UdpSocket::bind("127.0.0.1:0")?;
    let addr   = server.local_addr()?;

    let handle = thread::spawn(move || -> Result<()> {
        let mut buf = [0u8; 512];
        let (n, peer) = server.recv_from(&mut buf)?;
        let query = Message::from_vec(&buf[..n])?;
        let ip    = A(Ipv4Addr::new(10, 96, 0, 1));
        let reply = reply(&query, ResponseCode::NoError, vec![RData::A(ip)]);
        server.send_to(&reply.to_vec()?, peer)?;
        Ok(())
    });

    let ips = resolve_a(addr, "kubernetes.default.svc.cluster.local")?;
    assert_eq!(vec![Ipv4Addr::new(10, 96, 0, 1)], ips);

    handle.join().expect("resolver thread")?;
    Ok(())
}

#[test]
fn silent_resolver() -> Result<()> {
    let server = UdpSocket::bind("127.0.0.1:0")?;
    let start  = Instant::now();

    let err = resolve_a(server.local_addr()?, "example.com.").unwrap_err();

    assert!(err.to_string().contains("DNS timeout"));
    assert!(start.elapsed() < TIMEOUT * 2);
    Ok(())
}

#[test]
#[ignore]
fn public_resolver() -> Result<()> {
    let server = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), PORT);
    assert!(!resolve_a(server, "www.google.com.")?.is_empty());
    Ok(())
}
