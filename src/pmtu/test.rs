use std::cell::{Cell, RefCell};
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, UdpSocket};
use anyhow::Result;
use crate::probe::{self, Echo, Error, Prober, Reply};
use super::*;

const DST:  IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
const DST6: IpAddr = IpAddr::V6(Ipv6Addr::new(0xfd00, 0, 0, 0, 0, 0, 0, 1));

#[derive(Default)]
struct Path {
    mtu:    usize,
    local:  Option<usize>,
    first:  Option<Reply>,
    fail:   Option<usize>,
    probes: Cell<usize>,
    sizes:  RefCell<Vec<usize>>,
}

impl Path {
    fn new(mtu: usize) -> Self {
        Self { mtu, ..Default::default() }
    }
}

impl Prober for Path {
    fn probe(&self, dst: IpAddr, size: usize, df: bool) -> Result<Reply, Error> {
        assert!(df);

        let wire = size + overhead(dst);

        self.probes.set(self.probes.get() + 1);
        self.sizes.borrow_mut().push(size);

        if let (1, Some(reply)) = (self.probes.get(), self.first) {
            return Ok(reply);
        }

        if self.fail == Some(size) {
            return Err(Error::Socket(io::Error::from_raw_os_error(libc::EHOSTUNREACH)));
        }

        match self.local {
            Some(local) if wire > local => return Err(Error::MessageTooLong),
            _                           => (),
        }

        match wire <= self.mtu {
            true  => Ok(Reply::Echo),
            false => Ok(Reply::FragmentationRequired),
        }
    }
}

#[test]
fn exact_path_mtu() -> Result<()> {
    for mtu in &[1500, 1450, 1280, 576, 9000] {
        assert_eq!(*mtu, discover(&Path::new(*mtu), DST)?);
    }
    Ok(())
}

#[test]
fn exact_path_mtu_v6() -> Result<()> {
    for mtu in &[1500, 1480, 1280, 9000] {
        assert_eq!(*mtu, discover(&Path::new(*mtu), DST6)?);
    }
    Ok(())
}

#[test]
fn family_bounds() -> Result<()> {
    assert_eq!((28, 8972), bounds(DST));
    assert_eq!((40, 8960), bounds(DST6));
    Ok(())
}

#[test]
fn local_interface_limit() -> Result<()> {
    let path = Path { local: Some(1500), ..Path::new(9000) };
    assert_eq!(1500, discover(&path, DST)?);

    let path = Path { local: Some(1500), ..Path::new(9000) };
    assert_eq!(1500, discover(&path, DST6)?);
    Ok(())
}

#[test]
fn unexpected_lowers_bound() -> Result<()> {
    struct Flaky;

    impl Prober for Flaky {
        fn probe(&self, _dst: IpAddr, size: usize, _df: bool) -> Result<Reply, Error> {
            match size {
                s if s <= 1000 => Ok(Reply::Echo),
                _              => Ok(Reply::Unexpected),
            }
        }
    }

    assert_eq!(1000 + IPV4_OVERHEAD, discover(&Flaky, DST)?);
    Ok(())
}

#[test]
fn floor_must_echo() -> Result<()> {
    for reply in &[Reply::FragmentationRequired, Reply::Unexpected] {
        let path = Path { first: Some(*reply), ..Path::new(1500) };
        assert!(discover(&path, DST).is_err());
        assert_eq!(1, path.probes.get());
    }

    struct Dead;

    impl Prober for Dead {
        fn probe(&self, _dst: IpAddr, _size: usize, _df: bool) -> Result<Reply, Error> {
            Err(Error::Timeout)
        }
    }

    let err = discover(&Dead, DST).unwrap_err();
    assert!(format!("{:#}", err).contains("ICMP timeout"));
    Ok(())
}

#[test]
fn other_error_aborts() -> Result<()> {
    let (floor, ceiling) = bounds(DST);
    let path = Path { fail: Some((floor + ceiling) / 2), ..Path::new(1500) };
    assert!(discover(&path, DST).is_err());
    assert_eq!(2, path.probes.get());
    Ok(())
}

#[test]
fn probes_stay_in_bounds() -> Result<()> {
    for dst in &[DST, DST6] {
        let path = Path::new(1500);
        discover(&path, *dst)?;

        let (floor, ceiling) = bounds(*dst);
        let sizes = path.sizes.borrow();
        assert_eq!(floor, sizes[0]);
        assert!(sizes.iter().all(|s| (floor..=ceiling).contains(s)));
        assert!(sizes.len() <= 16);
    }
    Ok(())
}

#[test]
fn idempotent() -> Result<()> {
    let path = Path::new(1400);
    assert_eq!(discover(&path, DST)?, discover(&path, DST)?);
    Ok(())
}

#[test]
fn loopback_path() -> Result<()> {
    if unsafe { libc::geteuid() } != 0 {
        return Ok(());
    }

    let mut targets = vec![IpAddr::V4(Ipv4Addr::LOCALHOST)];
    if UdpSocket::bind("[::1]:0").is_ok() {
        targets.push(IpAddr::V6(Ipv6Addr::LOCALHOST));
    }

    let mtu = os::mtu("lo")? as usize;

    for lo in targets {
        let (floor, ceiling) = bounds(lo);
        let pmtu = discover(&Echo, lo)?;

        assert_eq!(mtu.min(MAX_MTU), pmtu);
        assert!(pmtu > floor && pmtu <= ceiling + overhead(lo));
        assert_eq!(Reply::Echo, probe::probe(lo, pmtu - overhead(lo), true)?);
    }
    Ok(())
}
