//! Transaction pipelines
//!
//! A pipeline is a terminal business operation wrapped by one or more stage
//! decorators, composed right-to-left: `Pipeline::new(name, [hr, it], op)`
//! behaves like `hr(it(op))`. Running it executes `op` synchronously; each
//! dispatcher stage then publishes the result on its own channel.

use super::dispatcher::Dispatcher;
use crate::functional::{compose_all, Decorator, Func};
use crate::Result;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info_span};

pub struct Pipeline<A, T> {
    name: Arc<str>,
    run: Func<A, T>,
}

impl<A, T> Clone for Pipeline<A, T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            run: self.run.clone(),
        }
    }
}

impl<A, T> fmt::Debug for Pipeline<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline").field("name", &self.name).finish()
    }
}

impl<A, T> Pipeline<A, T>
where
    A: fmt::Debug + 'static,
    T: 'static,
{
    /// Compose `stages` around `terminal`; at least one stage is required
    pub fn new(
        name: impl Into<String>,
        stages: Vec<Decorator<A, T>>,
        terminal: Func<A, T>,
    ) -> Result<Self> {
        let wrap = compose_all(stages)?;
        Ok(Self {
            name: Arc::from(name.into()),
            run: wrap(terminal),
        })
    }

    /// Run the pipeline: the terminal result is returned, publishes are queued
    pub fn run(&self, args: A) -> T {
        let _span = info_span!("pipeline", name = %self.name).entered();
        debug!(?args, "transaction started");
        (self.run)(args)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<A, T> Pipeline<A, T>
where
    A: fmt::Debug + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Build a pipeline whose stages are all dispatchers, outermost first
    pub fn from_dispatchers(
        name: impl Into<String>,
        dispatchers: &[&Dispatcher<T>],
        terminal: Func<A, T>,
    ) -> Result<Self> {
        let stages = dispatchers.iter().map(|d| d.decorator()).collect();
        Self::new(name, stages, terminal)
    }
}
