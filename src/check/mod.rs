use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use anyhow::Result;
use log::{error, info};
use crate::config::Config;
use crate::probe::{self, Reply};
use crate::{cluster, dns, http, netns, packet, pmtu};

pub use render::{json, Summary};
pub use report::{CheckResult, Report, Section};

pub mod checks;

mod host;
mod pod;
mod render;
mod report;


/// `Ok(false)` is a clean negative, `Err` a check that could not complete.
pub type Outcome = Result<bool>;

/// Probes used by the checks. Every call creates its sockets on the
/// calling thread.
pub trait Network: Sync {
    fn ping(&self, dst: IpAddr) -> Result<Reply>;

    fn pmtu(&self, dst: IpAddr) -> Result<usize>;

    fn oversized(&self, pmtu: usize) -> Vec<(String, usize)>;

    fn get(&self, url: &str, token: Option<&str>) -> Result<http::Response>;

    fn resolve(&self, server: SocketAddr, name: &str) -> Result<Vec<Ipv4Addr>>;

    fn gateway(&self) -> Result<Option<IpAddr>>;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Live;

impl Network for Live {
    fn ping(&self, dst: IpAddr) -> Result<Reply> {
        Ok(probe::probe(dst, packet::DEFAULT_PAYLOAD_SIZE, true)?)
    }

    fn pmtu(&self, dst: IpAddr) -> Result<usize> {
        pmtu::discover(&probe::Echo, dst)
    }

    fn oversized(&self, pmtu: usize) -> Vec<(String, usize)> {
        pmtu::oversized(pmtu)
    }

    fn get(&self, url: &str, token: Option<&str>) -> Result<http::Response> {
        http::get(url, token)
    }

    fn resolve(&self, server: SocketAddr, name: &str) -> Result<Vec<Ipv4Addr>> {
        dns::resolve_a(server, name)
    }

    fn gateway(&self) -> Result<Option<IpAddr>> {
        cluster::default_gateway()
    }
}

pub fn run<N: Network>(net: &N, cfg: &Config) -> Report {
    let mut report = Report::default();

    host::run(net, cfg, &mut report.host);

    if let Some(src) = &cfg.src_pod {
        info!("running checks from pod {}/{}", src.namespace, src.name);

        let checks = netns::run_in(&src.netns, || {
            let mut section = Section::default();
            pod::run(net, cfg, &mut section);
            section
        });

        match checks {
            Ok(section) => report.pod = section,
            Err(e)      => error!("unable to run pod checks: {:#}", e),
        }
    }

    report
}
