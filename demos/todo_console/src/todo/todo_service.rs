use crate::todo::todo_state::{Todo, TodoError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

const LATENCY: Duration = Duration::from_millis(400);

/// In-memory todo backend with network-like latency.
#[derive(Clone, Default)]
pub struct TodoService {
    todos: Arc<Mutex<Vec<Todo>>>,
}

impl TodoService {
    pub fn new() -> Self {
        Self::default()
    }

    fn todos(&self) -> MutexGuard<'_, Vec<Todo>> {
        self.todos.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn get_todos(self) -> Result<Vec<Todo>, TodoError> {
        sleep(LATENCY).await;
        Ok(self.todos().clone())
    }

    pub async fn add_todo(self, text: String) -> Result<Todo, TodoError> {
        sleep(LATENCY).await;
        if text.trim().is_empty() {
            return Err(TodoError::BlankText);
        }
        let mut todos = self.todos();
        let id = todos.iter().map(|todo| todo.id).max().unwrap_or(0) + 1;
        let todo = Todo::new(id, &text);
        todos.push(todo.clone());
        Ok(todo)
    }

    pub async fn complete_todo(self, id: u32) -> Result<Todo, TodoError> {
        sleep(LATENCY).await;
        let mut todos = self.todos();
        let todo = todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(TodoError::NotFound(id))?;
        todo.completed = true;
        Ok(todo.clone())
    }

    /// Deletes every completed todo, returning how many were removed.
    pub async fn delete_completed(self) -> Result<usize, TodoError> {
        sleep(LATENCY).await;
        let mut todos = self.todos();
        let before = todos.len();
        todos.retain(|todo| !todo.completed);
        Ok(before - todos.len())
    }

    /// A request that never answers in time.
    pub async fn stalled(self) -> Result<Vec<Todo>, TodoError> {
        sleep(Duration::from_secs(60)).await;
        Ok(self.todos().clone())
    }
}
