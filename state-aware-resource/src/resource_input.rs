use crate::{wrap_as_operation_stream, wrap_cancellable, with_timeout, ResourceState, TimeoutError};
use futures::StreamExt;
use futures_core::stream::Stream;
use futures_signals::signal::{Mutable, MutableSignalCloned, SignalExt, SignalStream};
use std::future::Future;
use std::pin::pin;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// A shared cell holding the latest resource, or nothing.
///
/// Operations executed through the input publish their states into it, and any
/// number of consumers can follow it as a signal or a stream, typically a
/// [`ViewSelector`](crate::ViewSelector). Concurrent operations are not
/// arbitrated: the last published state wins.
///
/// Followers are only guaranteed to see the latest state. A fast operation can
/// settle before a follower wakes up, in which case its loading state is never
/// observed. To see every state of one operation, drive its
/// [`ResourceStream`](crate::ResourceStream) directly, for example with
/// [`ViewSelector::drive`](crate::ViewSelector::drive).
pub struct ResourceInput<T, E> {
    state: Mutable<Option<ResourceState<T, E>>>,
}

impl<T, E> Clone for ResourceInput<T, E> {
    fn clone(&self) -> Self {
        ResourceInput {
            state: self.state.clone(),
        }
    }
}

impl<T, E> Default for ResourceInput<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> ResourceInput<T, E> {
    pub fn new() -> Self {
        ResourceInput {
            state: Mutable::new(None),
        }
    }

    pub fn with_state(state: ResourceState<T, E>) -> Self {
        ResourceInput {
            state: Mutable::new(Some(state)),
        }
    }

    pub fn set(&self, state: ResourceState<T, E>) {
        self.state.set(Some(state));
    }

    /// Removes the resource; followers see `None`.
    pub fn clear(&self) {
        self.state.set(None);
    }

    async fn publish<S>(state: Mutable<Option<ResourceState<T, E>>>, stream: S)
    where
        S: Stream<Item = ResourceState<T, E>>,
    {
        let mut stream = pin!(stream);
        while let Some(resource) = stream.next().await {
            state.set(Some(resource));
        }
    }
}

impl<T: Clone, E: Clone> ResourceInput<T, E> {
    pub fn get(&self) -> Option<ResourceState<T, E>> {
        self.state.get_cloned()
    }

    pub fn to_signal(&self) -> MutableSignalCloned<Option<ResourceState<T, E>>> {
        self.state.signal_cloned()
    }

    pub fn to_stream(&self) -> SignalStream<MutableSignalCloned<Option<ResourceState<T, E>>>> {
        self.state.signal_cloned().to_stream()
    }
}

impl<T, E> ResourceInput<T, E>
where
    T: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Runs `operation` on the tokio runtime, publishing the loading state and then
    /// its outcome.
    pub fn execute<F>(&self, operation: F) -> JoinHandle<()>
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let state = self.state.clone();
        tokio::spawn(async move {
            Self::publish(state, wrap_as_operation_stream(operation)).await;
        })
    }

    /// Like [`execute`](Self::execute), but cancelling `token` first drops the
    /// operation and leaves the loading state in place.
    pub fn execute_cancellable<F>(&self, token: CancellationToken, operation: F) -> JoinHandle<()>
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let state = self.state.clone();
        tokio::spawn(async move {
            Self::publish(state, wrap_cancellable(operation, token)).await;
            debug!("cancellable operation finished publishing");
        })
    }

    /// Like [`execute`](Self::execute), but an operation running past `timeout`
    /// publishes a failure built from [`TimeoutError`].
    pub fn execute_with_timeout<F>(&self, operation: F, timeout: Duration) -> JoinHandle<()>
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: From<TimeoutError>,
    {
        let state = self.state.clone();
        tokio::spawn(async move {
            Self::publish(state, wrap_as_operation_stream(with_timeout(operation, timeout))).await;
        })
    }
}
