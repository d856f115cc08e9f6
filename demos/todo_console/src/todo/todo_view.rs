use crate::todo::todo_state::{Todo, TodoError};
use state_aware_resource::{ResourceKind, View, ViewContext, ViewSelector};
use tracing::{debug, info, warn};

type TodoContext<'a> = ViewContext<'a, Vec<Todo>, TodoError>;

fn show_todos(todos: &[Todo]) {
    info!("=================================");
    for todo in todos {
        debug!("| {todo}");
    }
}

struct ListView;

impl View<Vec<Todo>, TodoError> for ListView {
    fn rebind(&mut self, context: TodoContext<'_>) {
        debug!("| list refreshed in place");
        show_todos(context.data().map(Vec::as_slice).unwrap_or_default());
    }

    fn dispose(self: Box<Self>) {
        debug!("| list view disposed");
    }
}

struct MessageView {
    label: &'static str,
}

impl View<Vec<Todo>, TodoError> for MessageView {
    fn rebind(&mut self, context: TodoContext<'_>) {
        if let Some(error) = context.error() {
            warn!("| {}: {error}", self.label);
        }
    }

    fn dispose(self: Box<Self>) {
        debug!("| {} view disposed", self.label);
    }
}

fn list_template(context: TodoContext<'_>) -> Box<dyn View<Vec<Todo>, TodoError>> {
    show_todos(context.data().map(Vec::as_slice).unwrap_or_default());
    Box::new(ListView)
}

fn loading_template(_: TodoContext<'_>) -> Box<dyn View<Vec<Todo>, TodoError>> {
    info!("| Loading todos...");
    Box::new(MessageView { label: "loading" })
}

fn empty_template(_: TodoContext<'_>) -> Box<dyn View<Vec<Todo>, TodoError>> {
    info!("| No todos available.");
    Box::new(MessageView { label: "empty" })
}

fn failure_template(context: TodoContext<'_>) -> Box<dyn View<Vec<Todo>, TodoError>> {
    if let Some(error) = context.error() {
        warn!("| Could not load todos: {error}");
    }
    Box::new(MessageView { label: "failure" })
}

/// A console rendering for each bucket of the todo list resource.
pub fn todo_list_selector() -> ViewSelector<Vec<Todo>, TodoError> {
    ViewSelector::with_primary(list_template)
        .with_template(ResourceKind::Loading, loading_template)
        .with_template(ResourceKind::Empty, empty_template)
        .with_template(ResourceKind::Failure, failure_template)
}
