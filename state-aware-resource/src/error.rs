use std::time::Duration;
use thiserror::Error;

/// Returned when a [`ResourceState`](crate::ResourceState) is built with an
/// inconsistent set of fields.
///
/// A loading resource carries neither data nor an error, so asking for one is a
/// programming mistake rather than a recoverable condition.
#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum ConstructionError {
    /// `loading` was set while a payload was supplied.
    #[error("A loading resource cannot have data!")]
    LoadingWithData,

    /// `loading` was set while an error was supplied.
    #[error("A loading resource cannot have an error!")]
    LoadingWithError,
}

/// The deadline given to [`with_timeout`](crate::with_timeout) elapsed before the
/// operation settled.
#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
#[error("deadline of {0:?} has elapsed!")]
pub struct TimeoutError(pub Duration);

impl TimeoutError {
    /// The deadline that was exceeded.
    pub fn deadline(&self) -> Duration {
        self.0
    }
}
