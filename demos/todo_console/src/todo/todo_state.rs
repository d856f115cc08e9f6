use state_aware_resource::{Emptiness, TimeoutError};
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Debug, Clone, Default)]
pub struct Todo {
    pub id: u32,
    pub text: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(id: u32, text: &str) -> Self {
        Self {
            id,
            text: text.to_string(),
            completed: false,
        }
    }
}

impl Emptiness for Todo {}

impl Display for Todo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let status = if self.completed { "✓" } else { " " };
        write!(f, "[{}] {} {}", self.id, status, self.text)
    }
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum TodoError {
    #[error("todo {0} not found")]
    NotFound(u32),
    #[error("todo text cannot be blank")]
    BlankText,
    #[error(transparent)]
    Timeout(#[from] TimeoutError),
}
