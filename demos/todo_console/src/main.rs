use crate::todo::todo_service::TodoService;
use crate::todo::todo_state::{Todo, TodoError};
use crate::todo::todo_view::todo_list_selector;
use crate::tracing_setup::tracing_init;
use futures::StreamExt;
use state_aware_resource::{handlers, on_resource, ResourceFutureExt, ResourceInput};
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

mod todo;
mod tracing_setup;

type TodoInput = ResourceInput<Vec<Todo>, TodoError>;

/// Saves or updates one todo, reporting progress through callbacks instead of a view.
async fn mutate<F>(label: &str, operation: F)
where
    F: std::future::Future<Output = Result<Todo, TodoError>>,
{
    let mut report = on_resource(handlers! {
        loading: || debug!("  Worker | {label}..."),
        success: |todo: &Todo| info!("  Worker | {label} done: {todo}"),
        failure: |error: &TodoError| warn!("  Worker | {label} failed: {error}"),
    });
    operation
        .into_resource_stream()
        .for_each(|state| {
            report(&state);
            async {}
        })
        .await;
}

async fn script(service: TodoService, input: TodoInput) -> Result<(), Box<dyn Error>> {
    sleep(Duration::from_millis(200)).await;
    input.execute(service.clone().get_todos()).await?;

    for text in ["Build a Todo App", "Contribute to Open Source", "Read Rust Book"] {
        mutate("add", service.clone().add_todo(text.to_string())).await;
    }
    mutate("add", service.clone().add_todo("   ".to_string())).await;
    input.execute(service.clone().get_todos()).await?;

    mutate("complete", service.clone().complete_todo(1)).await;
    mutate("complete", service.clone().complete_todo(99)).await;
    input.execute(service.clone().get_todos()).await?;

    let removed = service.clone().delete_completed().await?;
    info!("  Worker | removed {removed} completed todo(s)");
    input.execute(service.clone().get_todos()).await?;

    warn!("A. A request that exceeds its deadline");
    input
        .execute_with_timeout(service.clone().stalled(), Duration::from_secs(1))
        .await?;

    warn!("B. A request cancelled while loading");
    let token = CancellationToken::new();
    let handle = input.execute_cancellable(token.clone(), service.clone().get_todos());
    sleep(Duration::from_millis(100)).await;
    token.cancel();
    handle.await?;

    input.execute(service.get_todos()).await?;
    sleep(Duration::from_millis(200)).await;

    warn!("C. Resource removed");
    input.clear();
    sleep(Duration::from_millis(200)).await;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_init()?;

    let service = TodoService::new();
    let input = TodoInput::new();
    let signal = input.to_signal();
    let mut selector = todo_list_selector();

    // The signal ends once the script drops the last handle on the input
    let (result, ()) = tokio::join!(script(service, input), selector.drive_signal(signal));
    result?;

    info!("=================================");
    info!("  Main thread | Finish");
    Ok(())
}
