use std::net::IpAddr;
use crate::netns::Netns;

pub use kube_api::Endpoint;

pub const DEFAULT_DOMAIN: &str = "cluster.local";

#[derive(Debug, Default)]
pub struct Pod {
    pub name:      String,
    pub namespace: String,
    pub ip:        Option<IpAddr>,
    pub netns:     Netns,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Service {
    pub name:      String,
    pub namespace: String,
    pub endpoint:  Endpoint,
    pub backends:  Vec<Endpoint>,
}

/// Everything the checks need, resolved once before any check runs.
#[derive(Debug)]
pub struct Config {
    pub src_pod:     Option<Pod>,
    pub dst_pod:     Option<Pod>,
    pub dst_svc:     Option<Service>,
    pub external_ip: Option<IpAddr>,
    pub api:         Service,
    pub dns:         Option<Endpoint>,
    pub gateway:     Option<IpAddr>,
    pub domain:      String,
    pub token:       Option<String>,
}

impl Service {
    pub fn new(namespace: &str, name: &str, endpoint: Endpoint, backends: Vec<Endpoint>) -> Self {
        Self {
            name:      name.to_owned(),
            namespace: namespace.to_owned(),
            endpoint:  endpoint,
            backends:  backends,
        }
    }

    pub fn fqdn(&self, domain: &str) -> String {
        format!("{}.{}.svc.{}.", self.name, self.namespace, domain)
    }
}
