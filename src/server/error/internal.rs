use std::num::ParseIntError;
use thiserror::Error;

/// Unexpected internal state, answered with a generic 500.
#[derive(Error, Debug)]
pub enum InternalError {
    /// A session value written by this server no longer parses.
    #[error("Session key '{key}' holds unparsable value '{value}': {source}")]
    CorruptSessionValue {
        key: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}
