//! Core domain model: tasks and the weighted pick pool.
//!
//! Nothing in here knows about terminals or key events. The UI layer owns a
//! single `TaskPool` and drives it through method calls.

pub mod pool;
pub mod task;

pub use pool::{TaskEntry, TaskPool};
pub use task::{Importance, Task, TaskId};
