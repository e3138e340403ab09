//! Cross-department transaction pipelines
//!
//! Four department services listen on their own channel. Business operations
//! run inside dispatcher pipelines, so every transaction notifies the
//! departments that care about it:
//!
//! | Pipeline | Stages (outermost first) | Terminal |
//! |---|---|---|
//! | create email | HR, FINANCE, IT | [`create_email`] |
//! | announcement | HR, IT, FINANCE, RESEARCH | [`announcement`] |
//! | delete email | IT, HR | [`delete_email`] |
//!
//! When IT sees [`MALICIOUS_ADDRESS`] it raises a security alert: the
//! announcement pipeline runs first, and the deletion pipeline is scheduled
//! from inside that task so it always follows the alert.

pub mod departments;
pub mod operations;
pub mod timings;

pub use departments::Department;
pub use operations::{announcement, create_email, delete_email};
pub use timings::PipelineTimings;

use crate::functional::func;
use crate::messaging::{DispatcherFactory, EventBus, Pipeline};
use crate::Result;
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};

/// Address the IT service treats as hostile
pub const MALICIOUS_ADDRESS: &str = "malicious.user@lexmark.com";

/// Wired-up departments plus the pipelines that drive them
///
/// Clones share one set of pipelines. The department listeners stay on the
/// bus after the last clone is dropped, but IT no longer raises alerts.
#[derive(Clone)]
pub struct Organization {
    inner: Arc<Inner>,
}

struct Inner {
    bus: EventBus<String>,
    timings: PipelineTimings,
    create_email: Pipeline<(String, String), String>,
    announcement: Pipeline<String, String>,
    delete_email: Pipeline<String, String>,
}

impl Organization {
    /// Build the pipelines on `bus` and register every department listener
    pub fn new(bus: EventBus<String>, timings: PipelineTimings) -> Result<Self> {
        let factory = DispatcherFactory::new(bus.clone(), timings.dispatch_delay);
        let hr = factory.for_channel(Department::Hr.channel());
        let finance = factory.for_channel(Department::Finance.channel());
        let it = factory.for_channel(Department::It.channel());
        let research = factory.for_channel(Department::Research.channel());

        let inner = Inner {
            create_email: Pipeline::from_dispatchers(
                "create-email",
                &[&hr, &finance, &it],
                func(create_email),
            )?,
            announcement: Pipeline::from_dispatchers(
                "announcement",
                &[&hr, &it, &finance, &research],
                func(announcement),
            )?,
            delete_email: Pipeline::from_dispatchers(
                "delete-email",
                &[&it, &hr],
                func(delete_email),
            )?,
            bus,
            timings,
        };

        let organization = Self {
            inner: Arc::new(inner),
        };
        organization.register_listeners();
        Ok(organization)
    }

    fn register_listeners(&self) {
        for department in [Department::Hr, Department::Finance, Department::Research] {
            self.inner
                .bus
                .subscribe(department.channel(), move |message: &String| {
                    info!("{department} received message: {message}");
                    Ok(())
                });
        }

        // The bus owns this listener, so it must not keep the organization alive
        let organization: Weak<Inner> = Arc::downgrade(&self.inner);
        self.inner
            .bus
            .subscribe(Department::It.channel(), move |message: &String| {
                info!("{} received message: {message}", Department::It);
                if message == MALICIOUS_ADDRESS {
                    match organization.upgrade() {
                        Some(inner) => Organization { inner }.raise_security_alert(message),
                        None => debug!("organization dropped, security alert skipped"),
                    }
                }
                Ok(())
            });
    }

    /// Announce that `address` is blocked, then delete it
    pub fn raise_security_alert(&self, address: &str) {
        warn!(address, "security alert raised");

        let organization = self.clone();
        let address = address.to_string();
        self.inner
            .bus
            .scheduler()
            .schedule(self.inner.timings.alert_delay, move || {
                organization.start_announcement(format!(
                    "SECURITY ALERT: The email address {address} has been blocked due to security reasons"
                ));

                let deleter = organization.clone();
                organization
                    .bus()
                    .scheduler()
                    .schedule(organization.timings().deletion_delay, move || {
                        deleter.start_delete_email_transaction(address);
                    });
            });
    }

    pub fn start_create_email_transaction(
        &self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> String {
        self.inner.create_email.run((first_name.into(), last_name.into()))
    }

    pub fn start_announcement(&self, message: impl Into<String>) -> String {
        self.inner.announcement.run(message.into())
    }

    pub fn start_delete_email_transaction(&self, address: impl Into<String>) -> String {
        self.inner.delete_email.run(address.into())
    }

    pub fn bus(&self) -> &EventBus<String> {
        &self.inner.bus
    }

    pub fn timings(&self) -> &PipelineTimings {
        &self.inner.timings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::Scheduler;

    #[tokio::test(start_paused = true)]
    async fn test_organization_registers_one_listener_per_department() {
        let bus = EventBus::new(Scheduler::current().unwrap());
        let organization = Organization::new(bus, PipelineTimings::default()).unwrap();

        for department in Department::ALL {
            assert_eq!(organization.bus().listener_count(&department.channel()), 1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_transactions_return_synchronously() {
        let bus = EventBus::new(Scheduler::current().unwrap());
        let organization = Organization::new(bus, PipelineTimings::default()).unwrap();

        assert_eq!(
            organization.start_create_email_transaction("sandeep", "mohanty"),
            "sandeep.mohanty@lexmark.com"
        );
        assert_eq!(organization.start_announcement("Hello"), "Hello!");
        assert_eq!(
            organization.start_delete_email_transaction("a@lexmark.com"),
            "Email a@lexmark.com deleted."
        );

        // 3 + 4 + 2 dispatcher stages
        assert_eq!(organization.bus().scheduler().pending(), 9);
        organization.bus().scheduler().idle().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_the_organization_releases_it() {
        let bus = EventBus::new(Scheduler::current().unwrap());
        let organization = Organization::new(bus.clone(), PipelineTimings::default()).unwrap();
        let weak = Arc::downgrade(&organization.inner);

        organization.start_create_email_transaction("sandeep", "mohanty");
        bus.scheduler().idle().await;
        drop(organization);

        assert!(weak.upgrade().is_none());
        assert_eq!(bus.listener_count(&Department::It.channel()), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_alert_is_skipped_once_the_organization_is_gone() {
        let bus = EventBus::new(Scheduler::current().unwrap());
        let organization = Organization::new(bus.clone(), PipelineTimings::default()).unwrap();
        drop(organization);

        bus.publish(Department::It.channel(), MALICIOUS_ADDRESS.to_string());
        bus.scheduler().idle().await;

        // Only the direct publish was delivered; nothing was scheduled after it
        assert_eq!(bus.scheduler().submitted(), 1);
    }
}
