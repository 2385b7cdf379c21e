use std::fmt;
use std::net::{IpAddr, SocketAddr};
use k8s_openapi::api::core::v1::{Endpoints, Service};
use kube::Api;
use log::debug;
use crate::{Client, Error};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Endpoint {
    pub ip:   IpAddr,
    pub port: u16,
}

impl Endpoint {
    pub fn new(ip: IpAddr, port: u16) -> Self {
        Self { ip, port }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", SocketAddr::new(self.ip, self.port))
    }
}

impl Client {
    pub async fn get_service_endpoint(&self, ns: &str, name: &str) -> Result<Endpoint, Error> {
        let api = Api::<Service>::namespaced(self.client.clone(), ns);
        let svc = api.get(name).await?;
        endpoint(&svc)
    }

    pub async fn get_service_backends(&self, ns: &str, name: &str) -> Result<Vec<Endpoint>, Error> {
        let api = Api::<Endpoints>::namespaced(self.client.clone(), ns);
        let eps = api.get(name).await?;
        let backends = backends(&eps);
        debug!("service {}/{} has {} backends", ns, name, backends.len());
        Ok(backends)
    }
}

pub fn endpoint(svc: &Service) -> Result<Endpoint, Error> {
    let name = svc.metadata.name.as_deref().unwrap_or("");
    let spec = svc.spec.as_ref().ok_or_else(|| {
        Error::Empty(format!("service {} has no spec", name))
    })?;

    let ip = match spec.cluster_ip.as_deref() {
        Some("None") | Some("") | None => {
            return Err(Error::Empty(format!("service {} has no cluster ip", name)))
        },
        Some(ip) => ip.parse()?,
    };

    let port = spec.ports.iter().flatten().next().map(|p| p.port).ok_or_else(|| {
        Error::Empty(format!("service {} has no ports", name))
    })?;

    Ok(Endpoint::new(ip, port as u16))
}

pub fn backends(eps: &Endpoints) -> Vec<Endpoint> {
    let mut backends = Vec::new();
    for subset in eps.subsets.iter().flatten() {
        for addr in subset.addresses.iter().flatten() {
            let ip = match addr.ip.parse() {
                Ok(ip) => ip,
                Err(_) => continue,
            };
            for port in subset.ports.iter().flatten() {
                backends.push(Endpoint::new(ip, port.port as u16));
            }
        }
    }
    backends
}
