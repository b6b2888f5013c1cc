//! Task pool with importance-weighted random selection.
//!
//! The `TaskPool` owns every task of a session, the set of completed task
//! ids, and the current pick. Tasks are never removed, so ids handed out to
//! the UI stay valid for the life of the pool.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::task::{Importance, Task, TaskId};
use crate::error::{Error, Result};
use crate::{splog_debug, splog_trace};

/// A task as listed by the pool, annotated with its completion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskEntry<'a> {
    pub task: &'a Task,
    pub completed: bool,
}

/// Ordered collection of tasks plus completion and selection state.
#[derive(Debug, Clone)]
pub struct TaskPool {
    tasks: Vec<Task>,
    completed: HashSet<TaskId>,
    selected: Option<TaskId>,
    rng: StdRng,
}

impl Default for TaskPool {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskPool {
    /// Create an empty pool drawing from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create an empty pool whose picks are reproducible for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            tasks: Vec::new(),
            completed: HashSet::new(),
            selected: None,
            rng,
        }
    }

    /// Append a task with default importance.
    ///
    /// Text is trimmed first; blank input is ignored and yields `None`.
    pub fn add_task(&mut self, text: &str) -> Option<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let task = Task::new(text);
        splog_debug!("TaskPool::add_task id={} text={:?}", task.id.short(), text);
        self.tasks.push(task);
        self.tasks.last()
    }

    /// Replace the importance of one task.
    ///
    /// Levels outside 1..=3 and completed tasks are ignored without error.
    pub fn set_importance(&mut self, id: TaskId, level: u8) -> Result<()> {
        let completed = self.completed.contains(&id);
        let task = self.task_mut(id)?;
        let Some(importance) = Importance::new(level) else {
            splog_debug!("TaskPool::set_importance ignored level={}", level);
            return Ok(());
        };
        if completed {
            splog_debug!("TaskPool::set_importance ignored completed id={}", id.short());
            return Ok(());
        }
        task.importance = importance;
        splog_debug!("TaskPool::set_importance id={} level={}", id.short(), level);
        Ok(())
    }

    /// Commit edited text for one task.
    ///
    /// Text is trimmed. A blank commit keeps the previous text. Completed
    /// tasks are left untouched.
    pub fn set_text(&mut self, id: TaskId, text: &str) -> Result<()> {
        let completed = self.completed.contains(&id);
        let task = self.task_mut(id)?;
        let text = text.trim();
        if text.is_empty() {
            splog_debug!("TaskPool::set_text blank commit reverted id={}", id.short());
            return Ok(());
        }
        if completed {
            splog_debug!("TaskPool::set_text ignored completed id={}", id.short());
            return Ok(());
        }
        task.text = text.to_string();
        splog_debug!("TaskPool::set_text id={} text={:?}", id.short(), text);
        Ok(())
    }

    /// Draw one incomplete task, weighted by importance, using the pool's RNG.
    pub fn pick_task(&mut self) -> Option<&Task> {
        let index = weighted_draw(&self.tasks, &self.completed, &mut self.rng);
        self.apply_pick(index)
    }

    /// Same as [`pick_task`](Self::pick_task) with a caller supplied RNG.
    pub fn pick_task_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&Task> {
        let index = weighted_draw(&self.tasks, &self.completed, rng);
        self.apply_pick(index)
    }

    fn apply_pick(&mut self, index: Option<usize>) -> Option<&Task> {
        self.selected = index.map(|i| self.tasks[i].id);
        match self.selected {
            Some(id) => splog_debug!("TaskPool::pick_task selected id={}", id.short()),
            None => splog_debug!("TaskPool::pick_task nothing eligible"),
        }
        index.map(|i| &self.tasks[i])
    }

    /// Mark a task done. Repeat calls are no-ops apart from clearing the
    /// selection, which every completion does regardless of which task was
    /// picked.
    pub fn complete_task(&mut self, id: TaskId) -> Result<()> {
        if self.get(id).is_none() {
            return Err(Error::TaskNotFound(id));
        }
        let newly = self.completed.insert(id);
        self.selected = None;
        splog_debug!(
            "TaskPool::complete_task id={} newly_completed={}",
            id.short(),
            newly
        );
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// All tasks in insertion order with their completion flag.
    pub fn list_tasks(&self) -> impl Iterator<Item = TaskEntry<'_>> + '_ {
        self.tasks.iter().map(|task| TaskEntry {
            task,
            completed: self.completed.contains(&task.id),
        })
    }

    pub fn current_selection(&self) -> Option<&Task> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Task at a list position.
    pub fn get_index(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn is_completed(&self, id: TaskId) -> bool {
        self.completed.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn eligible_count(&self) -> usize {
        self.tasks.len() - self.completed.len()
    }

    /// True when no task is left to pick, including the empty pool.
    pub fn all_completed(&self) -> bool {
        self.eligible_count() == 0
    }

    /// Sum of importance over eligible tasks.
    pub fn total_weight(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| !self.completed.contains(&t.id))
            .map(|t| t.importance.weight())
            .sum()
    }

    fn task_mut(&mut self, id: TaskId) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Error::TaskNotFound(id))
    }
}

/// Uniform draw from the expanded pool in which every eligible task appears
/// `importance` times. Returns the index into `tasks`.
fn weighted_draw<R: Rng + ?Sized>(
    tasks: &[Task],
    completed: &HashSet<TaskId>,
    rng: &mut R,
) -> Option<usize> {
    let weighted: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| !completed.contains(&t.id))
        .flat_map(|(i, t)| std::iter::repeat(i).take(t.importance.weight()))
        .collect();

    splog_trace!("weighted_draw pool_size={}", weighted.len());
    if weighted.is_empty() {
        return None;
    }
    Some(weighted[rng.gen_range(0..weighted.len())])
}
