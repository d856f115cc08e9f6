use crate::mock::ViewLog;
use crate::unit_tests::{recording_selector, TestResource};
use crate::{
    to_failure, to_resource, ResourceFutureExt, ResourceInput, ResourceKind, ResourceState, TimeoutError,
};
use futures::StreamExt;
use futures_signals::signal::SignalExt;
use std::pin::pin;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq)]
enum LoadError {
    Timeout(TimeoutError),
}

impl From<TimeoutError> for LoadError {
    fn from(value: TimeoutError) -> Self {
        LoadError::Timeout(value)
    }
}

fn is_settled(state: &Option<TestResource>) -> bool {
    state.as_ref().is_some_and(ResourceState::is_terminal)
}

#[tokio::test]
async fn test_set_get_clear() {
    let input: ResourceInput<String, String> = ResourceInput::new();
    assert_eq!(input.get(), None);

    input.set(to_resource("value".to_string()));
    assert_eq!(input.get(), Some(to_resource("value".to_string())));

    let follower = input.clone();
    follower.clear();
    assert_eq!(input.get(), None);

    let seeded = ResourceInput::<String, String>::with_state(ResourceState::LOADING);
    assert_eq!(seeded.get(), Some(ResourceState::LOADING));
}

#[tokio::test]
async fn test_execute_publishes_loading_then_outcome() {
    let input: ResourceInput<String, String> = ResourceInput::new();
    let (release, gate) = oneshot::channel::<()>();
    let handle = input.execute(async move {
        let _ = gate.await;
        Ok("Async Result".to_string())
    });

    input
        .to_signal()
        .stop_if(|state| state.as_ref().is_some_and(ResourceState::is_loading))
        .for_each(|_| async {})
        .await;
    assert_eq!(input.get(), Some(ResourceState::LOADING));

    assert!(release.send(()).is_ok());
    assert!(handle.await.is_ok());
    assert_eq!(input.get(), Some(to_resource("Async Result".to_string())));
}

#[tokio::test]
async fn test_execute_publishes_failure() {
    let input: ResourceInput<String, String> = ResourceInput::new();
    input.execute(async {
        tokio::time::sleep(Duration::from_millis(1)).await;
        Err("Operation failed".to_string())
    });

    let settled = input
        .to_stream()
        .skip_while(|state| futures::future::ready(!is_settled(state)));
    let last = pin!(settled).next().await;

    assert_eq!(last, Some(Some(to_failure("Operation failed".to_string()))));
}

#[tokio::test]
async fn test_execute_cancellable_leaves_loading_in_place() {
    let input: ResourceInput<String, String> = ResourceInput::new();
    let token = CancellationToken::new();
    let handle = input.execute_cancellable(token.clone(), futures::future::pending());

    input
        .to_signal()
        .stop_if(|state| state.as_ref().is_some_and(ResourceState::is_loading))
        .for_each(|_| async {})
        .await;

    token.cancel();
    assert!(handle.await.is_ok());
    assert_eq!(input.get(), Some(ResourceState::LOADING));
}

#[tokio::test(start_paused = true)]
async fn test_execute_with_timeout_publishes_failure() {
    let input: ResourceInput<&'static str, LoadError> = ResourceInput::new();
    let handle = input.execute_with_timeout(
        async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok("late")
        },
        Duration::from_millis(50),
    );

    assert!(handle.await.is_ok());
    assert_eq!(
        input.get(),
        Some(to_failure(LoadError::Timeout(TimeoutError(Duration::from_millis(50)))))
    );
}

#[tokio::test]
async fn test_selector_follows_input_signal() {
    let log = ViewLog::new();
    let mut selector = recording_selector(&log);
    let input: ResourceInput<String, String> = ResourceInput::new();
    let signal = input.to_signal();

    let handle = input.execute(async { Ok("A".to_string()) });
    assert!(handle.await.is_ok());
    drop(input);

    selector.drive_signal(signal).await;
    assert_eq!(selector.active_kind(), Some(ResourceKind::Success));
    assert_eq!(log.last_payload(ResourceKind::Success).as_deref(), Some("\"A\""));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_signal_follower_settles_on_latest_state() {
    for _ in 0..50 {
        let log = ViewLog::new();
        let mut selector = recording_selector(&log);
        let input: ResourceInput<String, String> = ResourceInput::new();
        let signal = input.to_signal();

        let (executed, ()) = tokio::join!(
            async move { input.execute(async { Ok("A".to_string()) }).await },
            selector.drive_signal(signal)
        );

        assert!(executed.is_ok());
        assert_eq!(selector.active_kind(), Some(ResourceKind::Success));
        assert_eq!(log.last_payload(ResourceKind::Success).as_deref(), Some("\"A\""));
        assert!(log.instantiated(ResourceKind::Loading) <= 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_driving_the_operation_stream_renders_every_state() {
    for _ in 0..50 {
        let log = ViewLog::new();
        let mut selector = recording_selector(&log);

        let operation = tokio::spawn(async { Ok::<_, String>("A".to_string()) });
        let states = async move {
            match operation.await {
                Ok(result) => result,
                Err(error) => Err(error.to_string()),
            }
        }
        .into_resource_stream();
        selector.drive(states).await;

        assert_eq!(log.instantiated(ResourceKind::Loading), 1);
        assert_eq!(log.disposed(ResourceKind::Loading), 1);
        assert_eq!(log.instantiated(ResourceKind::Success), 1);
        assert_eq!(selector.active_kind(), Some(ResourceKind::Success));
    }
}
