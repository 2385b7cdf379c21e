use std::net::IpAddr;
use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use kube_api::{Client, Error};
use crate::config::{Config, Pod, Service};
use crate::netns::Netns;

pub use route::{default_gateway, gateway};

mod procs;
mod route;


#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Name {
    pub namespace: String,
    pub name:      String,
}

#[derive(Clone, Debug, Default)]
pub struct Options {
    pub kubeconfig:  Option<String>,
    pub domain:      String,
    pub src_pod:     Option<Name>,
    pub dst_pod:     Option<Name>,
    pub dst_svc:     Option<Name>,
    pub external_ip: Option<IpAddr>,
}

/// Resolve the run configuration from the cluster, the host routing table
/// and /proc.
pub async fn setup(opts: &Options) -> Result<Config> {
    let kubeconfig = opts.kubeconfig.as_deref();
    let client     = Client::new(kubeconfig).await.context("unable to establish cluster connection")?;

    let api = service(&client, "default", "kubernetes").await.map_err(api_failure)?;

    let dns = match client.get_service_endpoint("kube-system", "kube-dns").await {
        Ok(endpoint) => Some(endpoint),
        Err(e)       => {
            warn!("cluster DNS service unavailable: {}", e);
            None
        }
    };

    let gateway = match default_gateway() {
        Ok(Some(gateway)) => Some(gateway),
        Ok(None)          => {
            warn!("no default gateway in host routing table");
            None
        },
        Err(e)            => {
            warn!("unable to read host routing table: {:#}", e);
            None
        }
    };

    let token = match client.get_service_account_token("default", "default").await {
        Ok(token) => Some(token),
        Err(e)    => {
            warn!("unable to fetch service account token: {}", e);
            None
        }
    };

    let src_pod = match &opts.src_pod {
        Some(name) => Some(source(&client, name).await?),
        None       => None,
    };

    let dst_pod = match &opts.dst_pod {
        Some(name) => Some(destination(&client, name).await),
        None       => None,
    };

    let dst_svc = match &opts.dst_svc {
        Some(name) => match service(&client, &name.namespace, &name.name).await {
            Ok(svc) => Some(svc),
            Err(e)  => {
                warn!("skipping destination service {}: {}", name, e);
                None
            }
        },
        None => None,
    };

    info!("API service {}, {} endpoints", api.endpoint, api.backends.len());

    Ok(Config {
        src_pod:     src_pod,
        dst_pod:     dst_pod,
        dst_svc:     dst_svc,
        external_ip: opts.external_ip,
        api:         api,
        dns:         dns,
        gateway:     gateway,
        domain:      opts.domain.clone(),
        token:       token,
    })
}

async fn service(client: &Client, ns: &str, name: &str) -> Result<Service, Error> {
    let endpoint = client.get_service_endpoint(ns, name).await?;
    let backends = match client.get_service_backends(ns, name).await {
        Ok(backends)            => backends,
        Err(Error::NotFound(_)) => Vec::new(),
        Err(e)                  => return Err(e),
    };
    Ok(Service::new(ns, name, endpoint, backends))
}

// the client connects lazily, so the first request is the first contact
fn api_failure(err: Error) -> anyhow::Error {
    let context = match err {
        Error::Connect(_) => "unable to establish cluster connection",
        _                 => "unable to resolve API service",
    };
    anyhow::Error::new(err).context(context)
}

async fn source(client: &Client, name: &Name) -> Result<Pod> {
    let pod = client.get_pod(&name.namespace, &name.name).await.with_context(|| {
        format!("unable to fetch source pod {}", name)
    })?;

    let container = pod.container_id().ok_or_else(|| {
        anyhow!("source pod {} has no running container", name)
    })?;

    let pid = procs::find(container)?.ok_or_else(|| {
        anyhow!("no process found for container {}", container)
    })?;

    debug!("source pod {} container {} pid {}", name, container, pid);

    Ok(Pod {
        name:      name.name.clone(),
        namespace: name.namespace.clone(),
        ip:        pod.ip,
        netns:     Netns::open(pid)?,
    })
}

async fn destination(client: &Client, name: &Name) -> Pod {
    let ip = match client.get_pod(&name.namespace, &name.name).await {
        Ok(pod) => pod.ip,
        Err(e)  => {
            warn!("unable to fetch destination pod {}: {}", name, e);
            None
        }
    };

    Pod {
        name:      name.name.clone(),
        namespace: name.namespace.clone(),
        ip:        ip,
        netns:     Netns::none(),
    }
}

impl Name {
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            namespace: namespace.to_owned(),
            name:      name.to_owned(),
        }
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}
