//! # fnpipe
//!
//! Function composition, memoization and trampolines, put to work driving
//! publish/subscribe transaction pipelines between simulated departments.
//!
//! ## Usage
//!
//! ```bash
//! fnpipe demo <1-5>
//! fnpipe sum 10000 [--recursive]
//! ```
//!
//! ## Modules
//!
//! - `functional` - `compose!`, `log`, `memoize` and `trampoline` over shared function values
//! - `messaging` - scheduler, event bus, dispatcher decorators and pipelines
//! - `usecase` - department services wired together with transaction pipelines
//! - `demos` - the numbered demos behind `fnpipe demo`
//! - `app` - configuration, logging and fatal error handling
//! - `cli` - argument parsing and command routing
pub mod app;
pub mod cli;
pub mod demos;
pub mod error;
pub mod functional;
pub mod messaging;
pub mod usecase;


pub use error::{Error, Result};
