use std::net::{IpAddr, SocketAddr};
use anyhow::{anyhow, bail};
use log::{debug, info, warn};
use reqwest::StatusCode;
use crate::config::Endpoint;
use crate::dns;
use crate::probe::Reply;
use super::{Network, Outcome};

pub fn gateway<N: Network>(net: &N, gateway: Option<IpAddr>) -> Outcome {
    let gateway = gateway.ok_or_else(|| anyhow!("no default gateway"))?;
    reachable(net, gateway)
}

pub fn reachable<N: Network>(net: &N, dst: IpAddr) -> Outcome {
    match net.ping(dst)? {
        Reply::Echo => Ok(true),
        reply       => {
            debug!("{} answered with {:?}", dst, reply);
            Ok(false)
        }
    }
}

// any HTTP response proves connectivity, 401 is the expected one
pub fn api_service<N: Network>(net: &N, api: &Endpoint) -> Outcome {
    let response = net.get(&url(api, ""), None)?;
    match response.status {
        StatusCode::UNAUTHORIZED => debug!("{} answered 401", api),
        status                   => debug!("{} answered {}", api, status),
    }
    Ok(true)
}

pub fn api_endpoints<N: Network>(net: &N, backends: &[Endpoint]) -> Outcome {
    if backends.is_empty() {
        bail!("no endpoints found for the API service");
    }

    let passed = backends.iter().filter(|backend| {
        match net.get(&url(backend, ""), None) {
            Ok(r)  => {
                debug!("{} answered {}", backend, r.status);
                true
            },
            Err(e) => {
                debug!("{} failed: {:#}", backend, e);
                false
            }
        }
    }).count();

    Ok(passed == backends.len())
}

pub fn api_health<N: Network>(net: &N, api: &Endpoint, token: Option<&str>) -> Outcome {
    let token    = token.ok_or_else(|| anyhow!("no service account token"))?;
    let response = net.get(&url(api, "/livez?verbose"), Some(token))?;

    match response.status {
        StatusCode::OK => {
            debug!("{}", response.body);
            Ok(true)
        },
        status => {
            debug!("health check answered {}", status);
            Ok(false)
        }
    }
}

pub fn dns_lookup<N: Network>(net: &N, server: Option<&Endpoint>, name: &str, expected: IpAddr) -> Outcome {
    let server = server.ok_or_else(|| anyhow!("cluster DNS service not found"))?;
    let server = SocketAddr::new(server.ip, dns::PORT);
    let ips    = net.resolve(server, name)?;

    debug!("{} resolved to {:?}, expected {}", name, ips, expected);

    Ok(ips.into_iter().any(|ip| IpAddr::V4(ip) == expected))
}

pub fn path_mtu<N: Network>(net: &N, dst: IpAddr) -> Outcome {
    let pmtu = net.pmtu(dst)?;

    for (link, mtu) in net.oversized(pmtu) {
        warn!("{} mtu {} is larger than path mtu {} to {}", link, mtu, pmtu, dst);
    }

    info!("path mtu to {} is {}", dst, pmtu);

    Ok(true)
}

pub fn backends<N: Network>(net: &N, backends: &[Endpoint]) -> Outcome {
    if backends.is_empty() {
        bail!("no endpoints found for the service");
    }

    let passed = backends.iter().filter(|backend| {
        match reachable(net, backend.ip) {
            Ok(pass) => pass,
            Err(e)   => {
                debug!("{} failed: {:#}", backend.ip, e);
                false
            }
        }
    }).count();

    Ok(passed == backends.len())
}

fn url(endpoint: &Endpoint, path: &str) -> String {
    format!("https://{}{}", endpoint, path)
}
