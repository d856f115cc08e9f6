pub mod todo_service;
pub mod todo_state;
pub mod todo_view;
