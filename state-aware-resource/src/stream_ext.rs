use crate::{to_failure, to_resource, Emptiness, ResourceKind, ResourceState, TimeoutError};
use futures_core::stream::{FusedStream, Stream, TryStream};
use pin_project::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Stage {
    Start,
    Pending,
    Done,
}

/// Wraps an operation into a stream that yields [`ResourceState::LOADING`] and then
/// exactly one terminal state.
///
/// A failed operation becomes a failure resource; the stream itself never fails.
///
/// ## Examples
///
/// ```
/// use futures::StreamExt;
/// use state_aware_resource::{to_resource, wrap_as_operation_stream, ResourceState};
///
/// # futures::executor::block_on(async {
/// let states: Vec<ResourceState<&str, String>> =
///     wrap_as_operation_stream(async { Ok("test") }).collect().await;
/// assert_eq!(states, vec![ResourceState::LOADING, to_resource("test")]);
/// # });
/// ```
pub fn wrap_as_operation_stream<F, T, E>(operation: F) -> ResourceStream<F>
where
    F: Future<Output = Result<T, E>>,
{
    ResourceStream {
        operation: Some(operation),
        cancellation: None,
        stage: Stage::Start,
    }
}

/// Same as [`wrap_as_operation_stream`], but cancelling `token` before the operation
/// settles drops the operation and ends the stream without a terminal state.
pub fn wrap_cancellable<F, T, E>(operation: F, token: CancellationToken) -> ResourceStream<F>
where
    F: Future<Output = Result<T, E>>,
{
    ResourceStream {
        operation: Some(operation),
        cancellation: Some(Box::pin(token.cancelled_owned())),
        stage: Stage::Start,
    }
}

/// Bounds `operation` by `deadline`. When the deadline passes first, the operation
/// is dropped and fails with `E::from(TimeoutError)`.
pub async fn with_timeout<F, T, E>(operation: F, deadline: Duration) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<TimeoutError>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => {
            debug!("operation exceeded its deadline of {deadline:?}");
            Err(TimeoutError(deadline).into())
        }
    }
}

/// Wraps a multi-value upstream: [`ResourceState::LOADING`] first, then one resource
/// per item. The first error becomes a failure resource and ends the stream.
pub fn wrap_try_stream<S>(stream: S) -> ResourceTryStream<S>
where
    S: TryStream,
{
    ResourceTryStream {
        stream,
        stage: Stage::Start,
    }
}

/// The stream returned by [`wrap_as_operation_stream`] and [`wrap_cancellable`].
#[pin_project(project = ResourceStreamProj)]
#[must_use = "Streams do nothing unless polled"]
pub struct ResourceStream<F> {
    #[pin]
    operation: Option<F>,
    cancellation: Option<Pin<Box<WaitForCancellationFutureOwned>>>,
    stage: Stage,
}

impl<F, T, E> Stream for ResourceStream<F>
where
    F: Future<Output = Result<T, E>>,
{
    type Item = ResourceState<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let ResourceStreamProj {
            mut operation,
            cancellation,
            stage,
        } = self.project();

        match *stage {
            Stage::Start => {
                *stage = Stage::Pending;
                Poll::Ready(Some(ResourceState::LOADING))
            }
            Stage::Done => Poll::Ready(None),
            Stage::Pending => {
                if let Some(cancelled) = cancellation.as_mut() {
                    if cancelled.as_mut().poll(cx).is_ready() {
                        debug!("operation cancelled before it settled");
                        operation.set(None);
                        *stage = Stage::Done;
                        return Poll::Ready(None);
                    }
                }

                let Some(pending) = operation.as_mut().as_pin_mut() else {
                    *stage = Stage::Done;
                    return Poll::Ready(None);
                };

                match pending.poll(cx) {
                    Poll::Ready(result) => {
                        operation.set(None);
                        *stage = Stage::Done;
                        let resource = match result {
                            Ok(data) => {
                                trace!("operation succeeded");
                                to_resource(data)
                            }
                            Err(error) => {
                                trace!("operation failed, emitting a failure resource");
                                to_failure(error)
                            }
                        };
                        Poll::Ready(Some(resource))
                    }
                    Poll::Pending => Poll::Pending,
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.stage {
            Stage::Start => (1, Some(2)),
            Stage::Pending => (0, Some(1)),
            Stage::Done => (0, Some(0)),
        }
    }
}

impl<F, T, E> FusedStream for ResourceStream<F>
where
    F: Future<Output = Result<T, E>>,
{
    fn is_terminated(&self) -> bool {
        self.stage == Stage::Done
    }
}

/// The stream returned by [`wrap_try_stream`].
#[pin_project(project = ResourceTryStreamProj)]
#[must_use = "Streams do nothing unless polled"]
pub struct ResourceTryStream<S> {
    #[pin]
    stream: S,
    stage: Stage,
}

impl<S> Stream for ResourceTryStream<S>
where
    S: TryStream,
{
    type Item = ResourceState<S::Ok, S::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let ResourceTryStreamProj { stream, stage } = self.project();

        match *stage {
            Stage::Start => {
                *stage = Stage::Pending;
                Poll::Ready(Some(ResourceState::LOADING))
            }
            Stage::Done => Poll::Ready(None),
            Stage::Pending => match stream.try_poll_next(cx) {
                Poll::Ready(Some(Ok(data))) => Poll::Ready(Some(to_resource(data))),
                Poll::Ready(Some(Err(error))) => {
                    trace!("upstream failed, emitting a failure resource");
                    *stage = Stage::Done;
                    Poll::Ready(Some(to_failure(error)))
                }
                Poll::Ready(None) => {
                    *stage = Stage::Done;
                    Poll::Ready(None)
                }
                Poll::Pending => Poll::Pending,
            },
        }
    }
}

impl<S> FusedStream for ResourceTryStream<S>
where
    S: TryStream,
{
    fn is_terminated(&self) -> bool {
        self.stage == Stage::Done
    }
}

/// Extension methods turning an operation into a stream of resource states.
pub trait ResourceFutureExt<T, E>: Future<Output = Result<T, E>> + Sized {
    /// See [`wrap_as_operation_stream`].
    fn into_resource_stream(self) -> ResourceStream<Self> {
        wrap_as_operation_stream(self)
    }

    /// See [`wrap_cancellable`].
    fn into_cancellable_resource_stream(self, token: CancellationToken) -> ResourceStream<Self> {
        wrap_cancellable(self, token)
    }
}

impl<F, T, E> ResourceFutureExt<T, E> for F where F: Future<Output = Result<T, E>> {}

/// Extension methods for fallible multi-value upstreams.
pub trait ResourceTryStreamExt: TryStream + Sized {
    /// See [`wrap_try_stream`].
    fn into_resource_states(self) -> ResourceTryStream<Self> {
        wrap_try_stream(self)
    }
}

impl<S> ResourceTryStreamExt for S where S: TryStream {}

/// Extension methods for streams of resource states.
pub trait ResourceStreamExt<T, E>: Stream<Item = ResourceState<T, E>> + Sized {
    /// Ends the stream right after its first terminal resource state.
    ///
    /// Loading states before it pass through; anything after it is never polled.
    fn until_terminal(self) -> UntilTerminal<Self> {
        UntilTerminal {
            stream: self,
            settled: None,
        }
    }
}

impl<S, T, E> ResourceStreamExt<T, E> for S where S: Stream<Item = ResourceState<T, E>> {}

/// The stream returned by [`ResourceStreamExt::until_terminal`].
#[pin_project(project = UntilTerminalProj)]
#[derive(Debug)]
#[must_use = "Streams do nothing unless polled"]
pub struct UntilTerminal<S> {
    #[pin]
    stream: S,
    settled: Option<ResourceKind>,
}

impl<S> UntilTerminal<S> {
    /// The bucket of the terminal state that ended the stream, once it has been seen.
    pub fn settled_kind(&self) -> Option<ResourceKind> {
        self.settled
    }
}

impl<S, T, E> Stream for UntilTerminal<S>
where
    S: Stream<Item = ResourceState<T, E>>,
    T: Emptiness,
{
    type Item = ResourceState<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let UntilTerminalProj { stream, settled } = self.project();

        if settled.is_some() {
            return Poll::Ready(None);
        }

        match stream.poll_next(cx) {
            Poll::Ready(Some(resource)) => {
                if resource.is_terminal() {
                    let kind = resource.kind();
                    trace!("stream settled as {kind}");
                    *settled = Some(kind);
                }
                Poll::Ready(Some(resource))
            }
            other => other,
        }
    }
}

impl<S, T, E> FusedStream for UntilTerminal<S>
where
    S: FusedStream<Item = ResourceState<T, E>>,
    T: Emptiness,
{
    fn is_terminated(&self) -> bool {
        self.settled.is_some() || self.stream.is_terminated()
    }
}
