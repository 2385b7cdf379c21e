use log::{debug, info};
use crate::config::Config;
use super::{checks, Network, Section};

pub fn run<N: Network>(net: &N, cfg: &Config, section: &mut Section) {
    let api = &cfg.api.endpoint;
    let dns = cfg.dns.as_ref();

    info!("[pod] running API service connectivity check");
    section.record("Kube API service IP connectivity", checks::api_service(net, api));

    info!("[pod] running API endpoint connectivity check");
    section.record("Kube API endpoint IP connectivity", checks::api_endpoints(net, &cfg.api.backends));

    let gateway = match net.gateway() {
        Ok(Some(gateway)) => Some(gateway),
        Ok(None)          => cfg.gateway,
        Err(e)            => {
            debug!("unable to read pod routes: {:#}", e);
            cfg.gateway
        }
    };

    info!("[pod] running gateway connectivity check");
    section.record("Default gateway connectivity", checks::gateway(net, gateway));

    info!("[pod] running DNS lookup check");
    let name = cfg.api.fqdn(&cfg.domain);
    section.record("Kube DNS lookup (kubernetes.default)", checks::dns_lookup(net, dns, &name, api.ip));

    if let Some(ip) = cfg.dst_pod.as_ref().and_then(|pod| pod.ip) {
        info!("[pod] running destination pod connectivity check");
        section.record("Destination pod connectivity", checks::reachable(net, ip));

        info!("[pod] running destination pod path MTU check");
        section.record("Destination pod path MTU", checks::path_mtu(net, ip));
    }

    if let Some(ip) = cfg.external_ip {
        info!("[pod] running external IP connectivity check");
        section.record("External IP connectivity", checks::reachable(net, ip));

        info!("[pod] running external IP path MTU check");
        section.record("External IP path MTU", checks::path_mtu(net, ip));
    }

    if let Some(svc) = &cfg.dst_svc {
        let name = svc.fqdn(&cfg.domain);

        info!("[pod] running destination service DNS lookup check");
        section.record("Destination service DNS lookup", checks::dns_lookup(net, dns, &name, svc.endpoint.ip));

        if !svc.backends.is_empty() {
            info!("[pod] running destination service endpoint connectivity check");
            section.record("Destination service endpoint connectivity", checks::backends(net, &svc.backends));
        }
    }
}
