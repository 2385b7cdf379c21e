use log::info;
use crate::config::Config;
use super::{checks, Network, Section};

pub fn run<N: Network>(net: &N, cfg: &Config, section: &mut Section) {
    let api   = &cfg.api.endpoint;
    let token = cfg.token.as_deref();

    info!("running gateway connectivity check");
    section.record("Default gateway connectivity", checks::gateway(net, cfg.gateway));

    info!("running API service connectivity check");
    section.record("Kube API service IP connectivity", checks::api_service(net, api));

    info!("running API endpoint connectivity check");
    section.record("Kube API endpoint IP connectivity", checks::api_endpoints(net, &cfg.api.backends));

    info!("running API server health check");
    section.record("Kube API server health", checks::api_health(net, api, token));
}
