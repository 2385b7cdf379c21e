use std::str::FromStr;
use anyhow::Result;
use clap::ArgMatches;
use log::warn;
use crate::cluster::Name;

pub fn opt<T: FromStr>(arg: Option<&str>) -> Result<Option<T>> {
    Ok(arg.map(|s| T::from_str(s).map_err(|_| {
        let msg  = format!("invalid argument value '{}'", s);
        let kind = clap::ErrorKind::InvalidValue;
        clap::Error::with_description(&msg, kind)
    })).transpose()?)
}

pub fn name(args: &ArgMatches, ns: &str, name: &str) -> Option<Name> {
    match (args.value_of(ns), args.value_of(name)) {
        (Some(ns), Some(name)) => Some(Name::new(ns, name)),
        (None,     None)       => None,
        _                      => {
            warn!("ignoring --{} and --{}, both are required", ns, name);
            None
        }
    }
}
