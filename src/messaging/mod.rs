//! Messaging layer
//!
//! - `scheduler` - cooperative task queue with logical delays
//! - `bus` - named channels with ordered listeners
//! - `dispatcher` - decorators that publish a function's result
//! - `pipeline` - dispatcher stages composed around a business operation

pub mod bus;
pub mod dispatcher;
pub mod pipeline;
pub mod scheduler;

pub use bus::{Channel, EventBus, Listener, ListenerId};
pub use dispatcher::{Dispatcher, DispatcherFactory, DEFAULT_DISPATCH_DELAY};
pub use pipeline::Pipeline;
pub use scheduler::Scheduler;
