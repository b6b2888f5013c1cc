//! Task data model for the pick pool.
//!
//! A task is a label plus an importance weight. Completion is tracked by the
//! owning [`TaskPool`](super::pool::TaskPool), not by the task itself.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a task within a pool.
///
/// Uses UUID v4 for generation and provides a short form display
/// for human-readable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub Uuid);

impl TaskId {
    /// Create a new unique task identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Return first 8 characters of the UUID for display.
    pub fn short(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Importance rating of a task, one to three stars.
///
/// The value doubles as the task's weight in a pick: a three-star task is
/// three times as likely to be drawn as a one-star task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Importance(u8);

impl Importance {
    pub const MIN: Importance = Importance(1);
    pub const MAX: Importance = Importance(3);

    /// Returns `None` for levels outside 1..=3.
    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&level)
            .then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Number of entries this task contributes to the weighted pool.
    pub fn weight(self) -> usize {
        self.0 as usize
    }

    /// All valid levels in ascending order.
    pub fn all() -> [Importance; 3] {
        [Importance(1), Importance(2), Importance(3)]
    }

    /// The level as repeated glyphs, e.g. "★★".
    pub fn stars(self, glyph: &str) -> String {
        glyph.repeat(self.weight())
    }
}

impl Default for Importance {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for Importance {
    type Error = String;

    fn try_from(level: u8) -> std::result::Result<Self, Self::Error> {
        Self::new(level).ok_or_else(|| format!("importance must be 1-3, got {}", level))
    }
}

impl From<Importance> for u8 {
    fn from(importance: Importance) -> Self {
        importance.0
    }
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single task in the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, fixed at creation.
    pub id: TaskId,
    /// Committed label. Never empty once the task exists.
    pub text: String,
    /// Pick weight.
    pub importance: Importance,
}

impl Task {
    /// Create a task with default importance.
    ///
    /// Callers are expected to have trimmed and validated `text`.
    pub fn new(text: &str) -> Self {
        Self {
            id: TaskId::new(),
            text: text.to_string(),
            importance: Importance::default(),
        }
    }
}
