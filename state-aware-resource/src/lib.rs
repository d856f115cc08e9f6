mod dispatch;
mod emptiness;
mod error;
mod resource_input;
mod resource_state;
mod stream_ext;
mod view_selector;
pub mod macros;
pub mod mock;

pub use dispatch::*;
pub use emptiness::*;
pub use error::*;
pub use resource_input::*;
pub use resource_state::*;
pub use stream_ext::*;
pub use view_selector::*;

#[cfg(test)]
mod unit_tests;
