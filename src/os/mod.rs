pub fn getpid() -> u32 {
    unsafe {
        libc::getpid() as u32
    }
}

pub use os::{getns, setns, threadns, nsid, set_dont_fragment, mtu, route};

#[cfg(target_os = "linux")]
#[path = "linux/mod.rs"]
pub mod os;

#[cfg(not(target_os = "linux"))]
pub mod os {
    use std::fs::File;
    use std::os::unix::io::RawFd;
    use anyhow::Result;

    pub fn getns(_pid: u32) -> Result<File> {
        unimplemented!();
    }

    pub fn threadns() -> Result<File> {
        unimplemented!();
    }

    pub fn setns(_ns: &File) -> Result<()> {
        unimplemented!();
    }

    pub fn nsid(_ns: &File) -> Result<(u64, u64)> {
        unimplemented!();
    }

    pub fn set_dont_fragment(_fd: RawFd, _v6: bool, _on: bool) -> std::io::Result<()> {
        unimplemented!();
    }

    pub fn mtu(_name: &str) -> Result<u32> {
        unimplemented!();
    }

    pub fn route() -> Result<String> {
        unimplemented!();
    }
}

#[cfg(test)]
mod test;
