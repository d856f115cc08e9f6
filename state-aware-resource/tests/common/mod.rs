use state_aware_resource::Emptiness;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: u32,
    pub text: String,
}

impl Emptiness for Todo {}

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    NotFound(u32),
}

/// In-memory stand-in for a remote todo API.
#[derive(Clone, Default)]
pub struct TodoService {
    todos: Arc<Mutex<Vec<Todo>>>,
}

impl TodoService {
    pub async fn list(&self) -> Result<Vec<Todo>, ServiceError> {
        sleep(Duration::from_millis(5)).await;
        Ok(self.todos.lock().unwrap().clone())
    }

    pub async fn add(&self, text: &str) -> Result<Todo, ServiceError> {
        sleep(Duration::from_millis(5)).await;
        let mut todos = self.todos.lock().unwrap();
        let todo = Todo {
            id: todos.len() as u32 + 1,
            text: text.to_string(),
        };
        todos.push(todo.clone());
        Ok(todo)
    }

    pub async fn get(&self, id: u32) -> Result<Todo, ServiceError> {
        sleep(Duration::from_millis(5)).await;
        self.todos
            .lock()
            .unwrap()
            .iter()
            .find(|todo| todo.id == id)
            .cloned()
            .ok_or(ServiceError::NotFound(id))
    }
}
