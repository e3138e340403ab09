//! In-process publish/subscribe bus
//!
//! Channels are plain names matched exactly and need no declaration. Each
//! channel keeps its listeners in registration order. Publishing never calls a
//! listener directly: delivery is a scheduled task, so the publisher neither
//! blocks on listeners nor sees their results.

use super::scheduler::Scheduler;
use crate::Result;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// Name of a publish/subscribe topic
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel(String);

impl Channel {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Channel {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Channel {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&Channel> for Channel {
    fn from(channel: &Channel) -> Self {
        channel.clone()
    }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Callback invoked with each value published on its channel
pub type Listener<T> = Arc<dyn Fn(&T) -> Result<()> + Send + Sync>;

struct Registration<T> {
    id: ListenerId,
    listener: Listener<T>,
}

impl<T> Clone for Registration<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            listener: self.listener.clone(),
        }
    }
}

type ChannelMap<T> = HashMap<Channel, Vec<Registration<T>>>;

pub struct EventBus<T> {
    scheduler: Scheduler,
    channels: Arc<RwLock<ChannelMap<T>>>,
}

impl<T> Clone for EventBus<T> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            channels: self.channels.clone(),
        }
    }
}

impl<T> EventBus<T>
where
    T: Send + Sync + 'static,
{
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler,
            channels: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Scheduler that deliveries are queued on
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Register `listener` on `channel`, after any listeners already there
    pub fn subscribe<F>(&self, channel: impl Into<Channel>, listener: F) -> ListenerId
    where
        F: Fn(&T) -> Result<()> + Send + Sync + 'static,
    {
        let channel = channel.into();
        let id = ListenerId::new();
        debug!(%channel, listener = %id, "listener registered");

        self.channels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(channel)
            .or_default()
            .push(Registration {
                id,
                listener: Arc::new(listener),
            });
        id
    }

    /// Remove a listener; returns false if it was not registered on `channel`
    pub fn unsubscribe(&self, channel: &Channel, id: ListenerId) -> bool {
        let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);
        let Some(registrations) = channels.get_mut(channel) else {
            return false;
        };

        let before = registrations.len();
        registrations.retain(|r| r.id != id);
        let removed = registrations.len() != before;
        if registrations.is_empty() {
            channels.remove(channel);
        }

        if removed {
            debug!(%channel, listener = %id, "listener removed");
        }
        removed
    }

    /// Queue delivery of `value` to every listener of `channel`
    pub fn publish(&self, channel: impl Into<Channel>, value: T) {
        self.publish_after(Duration::ZERO, channel, value);
    }

    /// Queue delivery of `value` to every listener of `channel` after `delay`
    pub fn publish_after(&self, delay: Duration, channel: impl Into<Channel>, value: T) {
        let channel = channel.into();
        debug!(%channel, delay_ms = delay.as_millis() as u64, "publish scheduled");

        let bus = self.clone();
        self.scheduler.schedule(delay, move || {
            bus.deliver(&channel, &value);
        });
    }

    /// Invoke the listeners registered on `channel` right now, in order
    ///
    /// Listener failures are logged and do not stop later listeners. Returns
    /// the number of listeners invoked.
    fn deliver(&self, channel: &Channel, value: &T) -> usize {
        // Snapshot so listeners can subscribe or publish without deadlocking
        let registrations: Vec<Registration<T>> = self
            .channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(channel)
            .cloned()
            .unwrap_or_default();

        if registrations.is_empty() {
            trace!(%channel, "no listeners, dropping message");
            return 0;
        }

        for registration in &registrations {
            if let Err(e) = (registration.listener)(value) {
                warn!(%channel, listener = %registration.id, "listener failed: {e}");
            }
        }
        registrations.len()
    }

    pub fn listener_count(&self, channel: &Channel) -> usize {
        self.channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(channel)
            .map_or(0, Vec::len)
    }

    /// Channels with at least one listener, sorted by name
    pub fn channels(&self) -> Vec<Channel> {
        let mut channels: Vec<Channel> = self
            .channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        channels.sort();
        channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::Mutex;

    fn new_bus() -> EventBus<String> {
        EventBus::new(Scheduler::current().unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_publish_without_listeners_is_noop() {
        let bus = new_bus();
        bus.publish("NOBODY_LISTENS", "hello".to_string());
        bus.scheduler().idle().await;

        assert_eq!(bus.deliver(&Channel::from("NOBODY_LISTENS"), &"x".to_string()), 0);
        assert!(bus.channels().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_listeners_fire_in_registration_order() {
        let bus = new_bus();
        let calls = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second"] {
            let calls = calls.clone();
            bus.subscribe("TOPIC", move |value: &String| {
                calls.lock().unwrap().push(format!("{name}:{value}"));
                Ok(())
            });
        }

        bus.publish("TOPIC", "payload".to_string());
        assert!(calls.lock().unwrap().is_empty(), "delivery must be deferred");

        bus.scheduler().idle().await;
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["first:payload".to_string(), "second:payload".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_channels_match_exactly() {
        let bus = new_bus();
        let hits = Arc::new(Mutex::new(0));
        let counter = hits.clone();
        bus.subscribe("HR_SERVICE: EMAIL_CREATED", move |_: &String| {
            *counter.lock().unwrap() += 1;
            Ok(())
        });

        bus.publish("HR_SERVICE: EMAIL_CREATED ", "a".to_string());
        bus.publish("hr_service: email_created", "b".to_string());
        bus.publish("HR_SERVICE: EMAIL_CREATED", "c".to_string());
        bus.scheduler().idle().await;

        assert_eq!(*hits.lock().unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unsubscribe_stops_delivery() {
        let bus = new_bus();
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        let channel = Channel::new("TOPIC");
        let id = bus.subscribe(&channel, move |_: &String| {
            *counter.lock().unwrap() += 1;
            Ok(())
        });
        assert_eq!(bus.listener_count(&channel), 1);

        assert!(bus.unsubscribe(&channel, id));
        assert!(!bus.unsubscribe(&channel, id));
        assert_eq!(bus.listener_count(&channel), 0);

        bus.publish(&channel, "ignored".to_string());
        bus.scheduler().idle().await;
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_listener_does_not_stop_others() {
        let bus = new_bus();
        let reached = Arc::new(Mutex::new(false));
        let flag = reached.clone();

        bus.subscribe("TOPIC", |_: &String| Err(Error::listener("TOPIC", "rejected")));
        bus.subscribe("TOPIC", move |_: &String| {
            *flag.lock().unwrap() = true;
            Ok(())
        });

        bus.publish("TOPIC", "value".to_string());
        bus.scheduler().idle().await;
        assert!(*reached.lock().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_publish_after_waits_for_delay() {
        let bus = new_bus();
        let received = Arc::new(Mutex::new(None));
        let slot = received.clone();
        bus.subscribe("TOPIC", move |_: &String| {
            *slot.lock().unwrap() = Some(tokio::time::Instant::now());
            Ok(())
        });

        let start = tokio::time::Instant::now();
        bus.publish_after(Duration::from_secs(1), "TOPIC", "late".to_string());
        bus.scheduler().idle().await;

        let delivered_at = received.lock().unwrap().expect("delivered");
        assert!(delivered_at - start >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_listener_may_subscribe_during_delivery() {
        let bus = new_bus();
        let inner_bus = bus.clone();
        bus.subscribe("TOPIC", move |_: &String| {
            inner_bus.subscribe("OTHER", |_: &String| Ok(()));
            Ok(())
        });

        bus.publish("TOPIC", "value".to_string());
        bus.scheduler().idle().await;
        assert_eq!(
            bus.channels(),
            vec![Channel::from("OTHER"), Channel::from("TOPIC")]
        );
    }
}
