//! Decorators that announce a function's result on a channel
//!
//! A dispatched function returns its result to the caller immediately and,
//! separately, publishes a copy of that result after a short delay. The
//! synchronous return plays the part of the committed write; the delayed
//! publish is the notification other departments react to.

use super::bus::{Channel, EventBus};
use crate::functional::{Decorator, Func};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Delay between a dispatched call returning and its result being published
pub const DEFAULT_DISPATCH_DELAY: Duration = Duration::from_secs(1);

/// Produces [`Dispatcher`]s that share one bus and one publish delay
pub struct DispatcherFactory<T> {
    bus: EventBus<T>,
    delay: Duration,
}

impl<T> DispatcherFactory<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(bus: EventBus<T>, delay: Duration) -> Self {
        Self { bus, delay }
    }

    pub fn with_default_delay(bus: EventBus<T>) -> Self {
        Self::new(bus, DEFAULT_DISPATCH_DELAY)
    }

    /// Bind a dispatcher to `channel`
    pub fn for_channel(&self, channel: impl Into<Channel>) -> Dispatcher<T> {
        Dispatcher {
            bus: self.bus.clone(),
            channel: channel.into(),
            delay: self.delay,
        }
    }
}

/// A decorator bound to one channel
pub struct Dispatcher<T> {
    bus: EventBus<T>,
    channel: Channel,
    delay: Duration,
}

impl<T> Clone for Dispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            bus: self.bus.clone(),
            channel: self.channel.clone(),
            delay: self.delay,
        }
    }
}

impl<T> Dispatcher<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wrap `f` so its result is returned now and published after the delay
    pub fn decorate<A>(&self, f: Func<A, T>) -> Func<A, T>
    where
        A: 'static,
    {
        let dispatcher = self.clone();
        Arc::new(move |args: A| {
            let result = f(args);
            debug!(channel = %dispatcher.channel, "dispatching result");
            dispatcher
                .bus
                .publish_after(dispatcher.delay, dispatcher.channel.clone(), result.clone());
            result
        })
    }

    /// This dispatcher as a composable decorator value
    pub fn decorator<A>(&self) -> Decorator<A, T>
    where
        A: 'static,
    {
        let dispatcher = self.clone();
        Arc::new(move |f: Func<A, T>| dispatcher.decorate(f))
    }
}
