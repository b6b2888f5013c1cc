use crate::core::{Importance, TaskId};
use crate::tea::{Mode, Notification};
use std::sync::atomic::{AtomicU64, Ordering};

/// One row of the task list as the render thread sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: TaskId,
    /// 1-based position in the list.
    pub number: usize,
    pub text: String,
    pub importance: Importance,
    pub completed: bool,
    /// Whether this is the current pick.
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditView {
    pub id: TaskId,
    pub buffer: String,
}

static VERSION_COUNTER: AtomicU64 = AtomicU64::new(1);

pub fn next_version() -> u64 {
    VERSION_COUNTER.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone)]
pub struct RenderState {
    pub version: u64,
    pub mode: Mode,
    pub tasks: Vec<TaskView>,
    pub cursor: usize,
    /// Uncommitted new-task text (Collecting mode).
    pub draft: String,
    /// Number printed in front of the draft line.
    pub next_number: usize,
    pub editing: Option<EditView>,
    pub selection: Option<TaskView>,
    /// Count of completed tasks.
    pub completed: usize,
    pub notification: Option<Notification>,
    /// Whether the keymap legend is expanded (toggled by '?')
    pub show_keymap: bool,
    pub star: String,
}

impl RenderState {
    pub fn all_done(&self) -> bool {
        !self.tasks.is_empty() && self.completed == self.tasks.len()
    }

    /// Edit buffer for a row, if that row is being edited.
    pub fn edit_buffer_for(&self, id: TaskId) -> Option<&str> {
        self.editing
            .as_ref()
            .filter(|e| e.id == id)
            .map(|e| e.buffer.as_str())
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            version: 0,
            mode: Mode::Collecting,
            tasks: Vec::new(),
            cursor: 0,
            draft: String::new(),
            next_number: 1,
            editing: None,
            selection: None,
            completed: 0,
            notification: None,
            show_keymap: false,
            star: "★".to_string(),
        }
    }
}
