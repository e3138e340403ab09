//! The department use case, paced by the scheduler

use crate::messaging::{EventBus, Scheduler};
use crate::usecase::{Organization, PipelineTimings};
use crate::Result;
use std::io::Write;
use tracing::info;

pub const ANNOUNCEMENT: &str = "Announcement: Business will remain closed tomorrow";

/// Create an account now, broadcast an announcement later, then let a
/// malicious account sign up and watch the security cascade
pub async fn run<W: Write + Send>(timings: &PipelineTimings, out: &mut W) -> Result<()> {
    let scheduler = Scheduler::current()?;
    let organization = Organization::new(EventBus::new(scheduler.clone()), timings.clone())?;

    let address = organization.start_create_email_transaction("sandeep", "mohanty");
    writeln!(out, "Create email transaction returned: {address}")?;

    let announcer = organization.clone();
    scheduler.schedule(timings.announcement_delay, move || {
        announcer.start_announcement(ANNOUNCEMENT);
    });

    let signup = organization.clone();
    scheduler.schedule(timings.malicious_signup_delay, move || {
        signup.start_create_email_transaction("malicious", "user");
    });

    scheduler.idle().await;
    info!(tasks = scheduler.submitted(), "all transactions settled");
    writeln!(out, "All department notifications delivered")?;
    Ok(())
}
