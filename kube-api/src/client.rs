use std::convert::TryFrom;
use std::time::Duration;
use kube::config::{Config, KubeConfigOptions, Kubeconfig};
use log::debug;
use crate::Error;

const TIMEOUT: Duration = Duration::from_secs(4);

#[derive(Clone)]
pub struct Client {
    pub(crate) client: kube::Client,
}

impl Client {
    /// Connects using the kubeconfig at `path`, or the inferred
    /// configuration (`KUBECONFIG`, `~/.kube/config`, in-cluster) when
    /// no path is given.
    pub async fn new(path: Option<&str>) -> Result<Self, Error> {
        let mut config = match path {
            Some(path) => {
                debug!("loading kubeconfig from {}", path);
                let kubeconfig = Kubeconfig::read_from(path)?;
                let options    = KubeConfigOptions::default();
                Config::from_custom_kubeconfig(kubeconfig, &options).await?
            },
            None => Config::infer().await?,
        };

        config.connect_timeout = Some(TIMEOUT);
        config.read_timeout    = Some(TIMEOUT);

        debug!("cluster url {}", config.cluster_url);

        Ok(Self {
            client: kube::Client::try_from(config)?,
        })
    }
}
