use std::fs;
use std::io::ErrorKind;
use anyhow::Result;
use log::trace;
use regex::Regex;

/// Lowest pid whose cgroup belongs to `container`.
pub fn find(container: &str) -> Result<Option<u32>> {
    let regex = Regex::new("[0-9a-f]{64}")?;

    let mut pids = fs::read_dir("/proc")?.filter_map(|entry| {
        entry.ok()?.file_name().to_str()?.parse::<u32>().ok()
    }).collect::<Vec<_>>();
    pids.sort_unstable();

    for pid in pids {
        let cgroup = or_default(fs::read_to_string(format!("/proc/{}/cgroup", pid)))?;
        if containers(&regex, &cgroup).any(|id| id == container) {
            trace!("container {} has pid {}", container, pid);
            return Ok(Some(pid));
        }
    }

    Ok(None)
}

pub fn containers<'a>(regex: &'a Regex, cgroup: &'a str) -> impl Iterator<Item = &'a str> {
    cgroup.lines().filter_map(move |line| {
        let path = line.splitn(3, ':').nth(2)?;
        regex.find_iter(path).last().map(|m| m.as_str())
    })
}

// processes may exit while /proc is scanned
fn or_default<T: Default>(r: std::io::Result<T>) -> Result<T> {
    match r {
        Ok(v)                                    => Ok(v),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
        Err(e) if e.raw_os_error() == Some(libc::ESRCH) => Ok(T::default()),
        Err(e)                                   => Err(e.into()),
    }
}
