use anyhow::{anyhow, Result};
use clap::{App, load_yaml};
use env_logger::Builder;
use log::info;
use log::LevelFilter::*;
use tokio::runtime::Runtime;
use netlook::args::{name, opt};
use netlook::check::{self, Live, Summary};
use netlook::cluster::{self, Options};
use netlook::config::DEFAULT_DOMAIN;

fn main() -> Result<()> {
    let yaml = load_yaml!("args.yml");
    let ver  = env!("CARGO_PKG_VERSION");
    let args = App::from_yaml(&yaml).version(ver).get_matches();

    let (mode, args) = match args.subcommand() {
        (mode, Some(args)) => (mode, args),
        _                  => return Err(anyhow!("'host' or 'pod' subcommand expected")),
    };

    let silent = args.is_present("silent");

    let (module, level) = match args.occurrences_of("verbose") {
        _ if silent => (Some(module_path!()), Error),
        0           => (Some(module_path!()), Info),
        1           => (Some(module_path!()), Debug),
        2           => (Some(module_path!()), Trace),
        _           => (None,                 Trace),
    };
    Builder::from_default_env().filter(module, level).init();

    info!("initializing netlook {}", ver);

    let opts = Options {
        kubeconfig:  args.value_of("config").map(str::to_owned),
        domain:      args.value_of("domain").unwrap_or(DEFAULT_DOMAIN).to_owned(),
        src_pod:     name(args, "srcpodns", "srcpodname"),
        dst_pod:     name(args, "dstpodns", "dstpodname"),
        dst_svc:     name(args, "dstsvcns", "dstsvcname"),
        external_ip: opt(args.value_of("externalip"))?,
    };

    if mode == "pod" && opts.src_pod.is_none() {
        return Err(anyhow!("source pod name and namespace are required"));
    }

    let config = Runtime::new()?.block_on(cluster::setup(&opts))?;
    let report = check::run(&Live, &config);

    match silent {
        true  => println!("{}", check::json(&report)?),
        false => print!("{}", Summary(&report)),
    }

    Ok(())
}
