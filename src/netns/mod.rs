use std::fs::File;
use std::thread;
use anyhow::{anyhow, Context, Result};
use log::{debug, error};
use crate::os;


/// Owned handle to a network namespace, released on `close` or drop.
#[derive(Debug, Default)]
pub struct Netns {
    file: Option<File>,
}

impl Netns {
    pub fn none() -> Self {
        Self { file: None }
    }

    pub fn open(pid: u32) -> Result<Self> {
        let file = os::getns(pid).with_context(|| {
            format!("unable to open network namespace of pid {}", pid)
        })?;
        Ok(Self { file: Some(file) })
    }

    pub fn current() -> Result<Self> {
        Ok(Self { file: Some(os::threadns()?) })
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    pub fn close(&mut self) {
        self.file.take();
    }

    /// Device and inode identifying the namespace.
    pub fn id(&self) -> Result<(u64, u64)> {
        match &self.file {
            Some(file) => os::nsid(file),
            None       => Err(anyhow!("network namespace handle is closed")),
        }
    }
}

struct Entered {
    origin: File,
}

impl Entered {
    fn enter(target: &File) -> Result<Self> {
        let origin = os::threadns()?;
        os::setns(target)?;
        Ok(Self { origin })
    }
}

impl Drop for Entered {
    fn drop(&mut self) {
        match os::setns(&self.origin) {
            Ok(()) => debug!("restored network namespace"),
            Err(e) => error!("unable to restore network namespace: {}", e),
        }
    }
}

/// Run `body` on a dedicated thread switched into `target`. The thread
/// returns to its original namespace before it is joined, and `target`
/// stays open.
pub fn run_in<T, F>(target: &Netns, body: F) -> Result<T>
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    let ns = target.file.as_ref().ok_or_else(|| {
        anyhow!("network namespace handle is closed")
    })?;

    thread::scope(|scope| {
        let worker = scope.spawn(move || -> Result<T> {
            let _entered = Entered::enter(ns).context("unable to switch network namespace")?;
            Ok(body())
        });

        match worker.join() {
            Ok(result) => result,
            Err(_)     => Err(anyhow!("network namespace thread panicked")),
        }
    })
}
