use std::fs;
use k8s_openapi::api::core::v1::{Secret, ServiceAccount};
use kube::Api;
use log::debug;
use crate::{Client, Error};

pub const TOKEN_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";

impl Client {
    /// Bearer token of the service account `ns/name`, read from its token
    /// secret. Clusters that no longer create token secrets fall back to
    /// the token mounted into this pod.
    pub async fn get_service_account_token(&self, ns: &str, name: &str) -> Result<String, Error> {
        let api = Api::<ServiceAccount>::namespaced(self.client.clone(), ns);
        let sa  = api.get(name).await?;

        let secret = sa.secrets.iter().flatten().find_map(|s| s.name.clone());

        match secret {
            Some(secret) => self.get_secret_token(ns, &secret).await,
            None         => mounted(ns, name),
        }
    }

    async fn get_secret_token(&self, ns: &str, name: &str) -> Result<String, Error> {
        let api    = Api::<Secret>::namespaced(self.client.clone(), ns);
        let secret = api.get(name).await?;

        let token = secret.data.as_ref().and_then(|data| data.get("token")).ok_or_else(|| {
            Error::Empty(format!("secret {}/{} has no token", ns, name))
        })?;

        Ok(String::from_utf8_lossy(&token.0).trim().to_owned())
    }
}

fn mounted(ns: &str, name: &str) -> Result<String, Error> {
    debug!("service account {}/{} has no token secret, using {}", ns, name, TOKEN_PATH);
    match fs::read_to_string(TOKEN_PATH) {
        Ok(token) => Ok(token.trim().to_owned()),
        Err(_)    => Err(Error::Empty(format!("service account {}/{} has no token", ns, name))),
    }
}
