pub mod config;
pub mod core;
pub mod error;
pub mod headless;
pub mod log;

// Decoupled game loop architecture
pub mod app;
pub mod render;
pub mod tea;
pub mod ui;

pub use crate::core::{Importance, Task, TaskEntry, TaskId, TaskPool};
pub use error::{Error, Result};
