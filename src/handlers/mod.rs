pub mod health;
pub mod inspection_calls;

pub use crate::AppState;
