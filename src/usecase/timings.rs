//! Delays that pace the department use case

use crate::messaging::DEFAULT_DISPATCH_DELAY;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineTimings {
    /// Delay between a dispatched call returning and its publish
    #[serde(default = "default_dispatch_delay", with = "humantime_serde")]
    pub dispatch_delay: Duration,

    /// Delay before the security announcement once a malicious address is seen
    #[serde(default, with = "humantime_serde")]
    pub alert_delay: Duration,

    /// Delay between the security announcement and deleting the address
    #[serde(default = "default_deletion_delay", with = "humantime_serde")]
    pub deletion_delay: Duration,

    /// Demo: when the organization-wide announcement goes out
    #[serde(default = "default_announcement_delay", with = "humantime_serde")]
    pub announcement_delay: Duration,

    /// Demo: when the malicious user signs up
    #[serde(default = "default_malicious_signup_delay", with = "humantime_serde")]
    pub malicious_signup_delay: Duration,
}

impl Default for PipelineTimings {
    fn default() -> Self {
        Self {
            dispatch_delay: default_dispatch_delay(),
            alert_delay: Duration::ZERO,
            deletion_delay: default_deletion_delay(),
            announcement_delay: default_announcement_delay(),
            malicious_signup_delay: default_malicious_signup_delay(),
        }
    }
}

fn default_dispatch_delay() -> Duration {
    DEFAULT_DISPATCH_DELAY
}

fn default_deletion_delay() -> Duration {
    Duration::from_secs(10)
}

fn default_announcement_delay() -> Duration {
    Duration::from_secs(5)
}

fn default_malicious_signup_delay() -> Duration {
    Duration::from_secs(15)
}
