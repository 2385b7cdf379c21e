use log::{debug, warn};
use serde::Serialize;
use super::Outcome;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CheckResult {
    pub name:      String,
    pub success:   bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Section {
    checks: Vec<CheckResult>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct Report {
    #[serde(rename = "host_checks")]
    pub host: Section,
    #[serde(rename = "pod_checks", skip_serializing_if = "Section::is_empty")]
    pub pod:  Section,
}

impl Section {
    pub fn record(&mut self, name: &str, outcome: Outcome) {
        let (success, error_msg) = match outcome {
            Ok(success) => (success, None),
            Err(e)      => (false, Some(format!("{:#}", e))),
        };

        match &error_msg {
            Some(e)           => warn!("{} failed: {}", name, e),
            None if !success  => warn!("{} failed", name),
            None              => debug!("{} passed", name),
        }

        self.checks.push(CheckResult {
            name:      name.to_owned(),
            success:   success,
            error_msg: error_msg,
        });
    }

    pub fn checks(&self) -> &[CheckResult] {
        &self.checks
    }

    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.success).count()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Report {
    pub fn passed(&self) -> usize {
        self.host.passed() + self.pod.passed()
    }

    pub fn len(&self) -> usize {
        self.host.len() + self.pod.len()
    }
}
