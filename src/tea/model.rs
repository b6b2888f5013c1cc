//! Model for the TEA (The Elm Architecture) pattern.
//!
//! The Model is pure application state - no channels, no handles, no runtime
//! infrastructure. It owns the session's only `TaskPool`.

use crate::config::Config;
use crate::core::{TaskId, TaskPool};
use crate::render::{next_version, EditView, RenderState, TaskView};

/// Level of a notification message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Error notification - displayed in red with "Error:" prefix
    Error,
    /// Informational notification - displayed in green
    Info,
}

/// A notification message to display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Which operations the UI currently offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Entering tasks through the draft line.
    #[default]
    Collecting,
    /// Rating, completing and picking tasks.
    Rating,
}

impl Mode {
    pub fn title(&self) -> &'static str {
        match self {
            Mode::Collecting => "Work space",
            Mode::Rating => "Rate your tasks",
        }
    }
}

/// An inline text edit that has not been committed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub id: TaskId,
    pub buffer: String,
}

/// Pure application state - the single source of truth.
pub struct Model {
    pub pool: TaskPool,
    pub mode: Mode,
    /// Highlighted row. In Collecting mode `pool.len()` is the draft line.
    pub cursor: usize,

    // Input state
    pub draft: String,
    pub editing: Option<EditState>,
    pub notification: Option<Notification>,

    /// Whether the keymap legend is expanded (toggled by '?')
    pub show_keymap: bool,

    // Dirty flag - set when state changes and render is needed
    pub dirty: bool,

    // Config (immutable after init)
    pub config: Config,
}

impl Model {
    /// Create a model with an empty pool, seeded from config when set.
    pub fn new(config: Config) -> Self {
        let pool = match config.seed {
            Some(seed) => TaskPool::with_seed(seed),
            None => TaskPool::new(),
        };
        Self::with_pool(pool, config)
    }

    pub fn with_pool(pool: TaskPool, config: Config) -> Self {
        let cursor = pool.len();
        Self {
            pool,
            mode: Mode::default(),
            cursor,
            draft: String::new(),
            editing: None,
            notification: None,
            show_keymap: config.show_keymap,
            dirty: true,
            config,
        }
    }

    /// True when the Collecting cursor sits on the draft line.
    pub fn on_draft_line(&self) -> bool {
        self.mode == Mode::Collecting && self.cursor >= self.pool.len()
    }

    /// Task under the cursor, if any.
    pub fn cursor_task_id(&self) -> Option<TaskId> {
        self.pool.get_index(self.cursor).map(|t| t.id)
    }

    /// Number shown in front of the draft line.
    pub fn next_number(&self) -> usize {
        self.pool.len() + 1
    }

    /// Create an immutable snapshot for the render thread.
    ///
    /// Each snapshot gets a monotonically increasing version number so the
    /// render thread can skip redundant draws.
    pub fn snapshot(&self) -> RenderState {
        let selected_id = self.pool.current_selection().map(|t| t.id);

        let tasks: Vec<TaskView> = self
            .pool
            .list_tasks()
            .enumerate()
            .map(|(idx, entry)| TaskView {
                id: entry.task.id,
                number: idx + 1,
                text: entry.task.text.clone(),
                importance: entry.task.importance,
                completed: entry.completed,
                selected: Some(entry.task.id) == selected_id,
            })
            .collect();

        let selection = self
            .pool
            .current_selection()
            .and_then(|sel| tasks.iter().find(|t| t.id == sel.id))
            .cloned();

        let editing = self.editing.as_ref().map(|e| EditView {
            id: e.id,
            buffer: e.buffer.clone(),
        });

        RenderState {
            version: next_version(),
            mode: self.mode,
            tasks,
            cursor: self.cursor,
            draft: self.draft.clone(),
            next_number: self.next_number(),
            editing,
            selection,
            completed: self.pool.completed_count(),
            notification: self.notification.clone(),
            show_keymap: self.show_keymap,
            star: self.config.effective_star().to_string(),
        }
    }
}
