use std::net::IpAddr;
use k8s_openapi::api::core::v1;
use kube::Api;
use crate::{Client, Error};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Pod {
    pub ip:        Option<IpAddr>,
    pub container: Option<String>,
}

impl From<&v1::Pod> for Pod {
    fn from(pod: &v1::Pod) -> Self {
        let status = pod.status.as_ref();

        let ip = status.and_then(|s| s.pod_ip.as_ref()).and_then(|ip| {
            ip.parse().ok()
        });

        let container = status.and_then(|s| {
            s.container_statuses.iter().flatten().find_map(|c| c.container_id.clone())
        });

        Self { ip, container }
    }
}

impl Pod {
    /// Container ID without the runtime scheme (`docker://`, `containerd://`).
    pub fn container_id(&self) -> Option<&str> {
        let id = self.container.as_deref()?;
        Some(id.rsplit("://").next().unwrap_or(id))
    }
}

impl Client {
    pub async fn get_pod(&self, ns: &str, name: &str) -> Result<Pod, Error> {
        let api = Api::<v1::Pod>::namespaced(self.client.clone(), ns);
        Ok(Pod::from(&api.get(name).await?))
    }
}
