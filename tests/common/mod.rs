//! Common test utilities and helpers

use fnpipe::messaging::{Channel, EventBus};
use fnpipe::usecase::Department;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// A message seen by a recorder, with the logical time it arrived
#[derive(Debug, Clone)]
pub struct Received {
    pub message: String,
    pub at: Duration,
}

/// Records every message published on a set of channels
pub struct ChannelRecorder {
    start: Instant,
    received: Arc<Mutex<HashMap<Channel, Vec<Received>>>>,
}

impl ChannelRecorder {
    /// Subscribe a recording listener on every department channel
    pub fn departments(bus: &EventBus<String>) -> Self {
        let channels: Vec<Channel> = Department::ALL.iter().map(|d| d.channel()).collect();
        Self::on(bus, &channels)
    }

    pub fn on(bus: &EventBus<String>, channels: &[Channel]) -> Self {
        let recorder = Self {
            start: Instant::now(),
            received: Arc::new(Mutex::new(HashMap::new())),
        };

        for channel in channels {
            let received = recorder.received.clone();
            let start = recorder.start;
            let key = channel.clone();
            bus.subscribe(channel, move |message: &String| {
                received
                    .lock()
                    .unwrap()
                    .entry(key.clone())
                    .or_default()
                    .push(Received {
                        message: message.clone(),
                        at: start.elapsed(),
                    });
                Ok(())
            });
        }
        recorder
    }

    pub fn received(&self, department: Department) -> Vec<Received> {
        self.received
            .lock()
            .unwrap()
            .get(&department.channel())
            .cloned()
            .unwrap_or_default()
    }

    pub fn messages(&self, department: Department) -> Vec<String> {
        self.received(department)
            .into_iter()
            .map(|r| r.message)
            .collect()
    }
}
