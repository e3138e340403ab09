use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Cannot compose an empty function sequence")]
    EmptyComposition,

    #[error("Invalid demo option: {0}")]
    InvalidDemo(u32),

    #[error("No tokio runtime available to schedule tasks on")]
    NoRuntime,

    #[error("Trampoline exceeded {steps} steps without producing a value")]
    TrampolineLimit { steps: usize },

    #[error("Sum overflows u64 with {term} still to add")]
    SumOverflow { term: u64 },

    #[error("Listener on channel '{channel}' failed: {message}")]
    Listener { channel: String, message: String },

    #[error("Scheduled task did not finish within {0:?}")]
    Timeout(Duration),
}

impl Error {
    pub fn listener(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Listener {
            channel: channel.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
