//! Update function for the TEA (The Elm Architecture) pattern.
//!
//! The update function takes a model and a message, mutates the model,
//! and returns a list of commands to execute.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{splog, splog_debug, splog_trace, splog_warn, Error};

use super::command::Command;
use super::message::Message;
use super::model::{EditState, Mode, Model, Notification, NotificationLevel};

/// Helper to set an error notification and mark model as dirty.
fn set_error(model: &mut Model, message: String) {
    splog_warn!("UI Error: {}", message);
    model.notification = Some(Notification {
        level: NotificationLevel::Error,
        message,
    });
    model.dirty = true;
}

fn set_info(model: &mut Model, message: &str) {
    model.notification = Some(Notification {
        level: NotificationLevel::Info,
        message: message.to_string(),
    });
    model.dirty = true;
}

/// Report a pool error. Only reachable if the UI acts on an id it never
/// rendered.
fn report(model: &mut Model, result: crate::Result<()>) {
    if let Err(e) = result {
        let message = match &e {
            Error::TaskNotFound(id) => format!("Task {} no longer exists", id.short()),
            other => other.to_string(),
        };
        set_error(model, message);
    }
}

/// Update function: Model + Message → Commands
///
/// 1. Takes the current model and an input message
/// 2. Mutates the model state (and sets dirty flag)
/// 3. Returns a list of commands (side effects) to execute
pub fn update(model: &mut Model, msg: Message) -> Vec<Command> {
    let mut cmds = Vec::new();

    match msg {
        Message::Key(key) => {
            splog_trace!("Message::Key {:?} mode={:?}", key.code, model.mode);
            model.notification = None; // Clear notification on any key press
            model.dirty = true;

            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                cmds.push(Command::Quit);
                return cmds;
            }

            if model.editing.is_some() {
                update_edit(model, key);
            } else {
                match model.mode {
                    Mode::Collecting => update_collecting_mode(model, key),
                    Mode::Rating => update_rating_mode(model, key, &mut cmds),
                }
            }
        }

        Message::Resize(_, _) => {
            model.dirty = true;
        }
    }

    cmds
}

fn update_collecting_mode(model: &mut Model, key: KeyEvent) {
    let len = model.pool.len();
    match key.code {
        KeyCode::Up => {
            model.cursor = model.cursor.saturating_sub(1);
        }

        KeyCode::Down => {
            model.cursor = (model.cursor + 1).min(len);
        }

        KeyCode::Enter => {
            if model.on_draft_line() {
                submit_draft(model);
            } else if let Some(id) = model.cursor_task_id() {
                if model.pool.is_completed(id) {
                    set_info(model, "Completed tasks can't be edited");
                } else {
                    begin_edit(model, id);
                }
            }
        }

        KeyCode::Tab => finish_collecting(model),

        KeyCode::Esc => {
            model.draft.clear();
            model.cursor = len;
        }

        KeyCode::Backspace => {
            if model.on_draft_line() {
                model.draft.pop();
            }
        }

        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            // Typing always lands on the draft line.
            model.cursor = len;
            model.draft.push(c);
        }

        _ => {}
    }
}

/// Turn the draft into a task if it has any non-blank text.
fn submit_draft(model: &mut Model) {
    if let Some(task) = model.pool.add_task(&model.draft) {
        splog_debug!("Draft submitted as task {}", task.id.short());
        model.draft.clear();
    }
    model.cursor = model.pool.len();
}

/// "Done": commit a pending draft, then move on to rating if there is
/// anything to rate.
fn finish_collecting(model: &mut Model) {
    submit_draft(model);
    if model.pool.is_empty() {
        set_error(model, "Add at least one task first".to_string());
        return;
    }
    splog!("Mode Collecting -> Rating ({} tasks)", model.pool.len());
    model.draft.clear();
    model.mode = Mode::Rating;
    model.cursor = 0;
}

/// "Edit tasks": back to collecting. Tasks, ratings and completion survive;
/// the draft and the current pick do not.
fn back_to_collecting(model: &mut Model) {
    splog!("Mode Rating -> Collecting");
    model.mode = Mode::Collecting;
    model.pool.clear_selection();
    model.draft.clear();
    model.editing = None;
    model.cursor = model.pool.len();
}

fn update_rating_mode(model: &mut Model, key: KeyEvent, cmds: &mut Vec<Command>) {
    let len = model.pool.len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if len > 0 {
                model.cursor = (model.cursor + 1) % len;
            }
        }

        KeyCode::Char('k') | KeyCode::Up => {
            if len > 0 {
                model.cursor = model.cursor.checked_sub(1).unwrap_or(len - 1);
            }
        }

        KeyCode::Char(c @ '1'..='3') => {
            if let Some(id) = model.cursor_task_id() {
                let level = c as u8 - b'0';
                let result = model.pool.set_importance(id, level);
                report(model, result);
            }
        }

        KeyCode::Char(' ') | KeyCode::Char('x') => {
            // The checkbox is disabled once a task is done.
            if let Some(id) = model.cursor_task_id() {
                if !model.pool.is_completed(id) {
                    let result = model.pool.complete_task(id);
                    report(model, result);
                }
            }
        }

        KeyCode::Char('p') | KeyCode::Enter => {
            if model.pool.pick_task().is_none() {
                set_info(model, "All tasks are done");
            }
        }

        KeyCode::Char('d') => {
            if let Some(id) = model.pool.current_selection().map(|t| t.id) {
                let result = model.pool.complete_task(id);
                report(model, result);
            }
        }

        KeyCode::Char('e') => {
            if let Some(id) = model.cursor_task_id() {
                if !model.pool.is_completed(id) {
                    begin_edit(model, id);
                }
            }
        }

        KeyCode::Tab => back_to_collecting(model),

        KeyCode::Char('?') => {
            model.show_keymap = !model.show_keymap;
        }

        KeyCode::Char('q') | KeyCode::Esc => {
            cmds.push(Command::Quit);
        }

        _ => {}
    }
}

fn begin_edit(model: &mut Model, id: crate::core::TaskId) {
    if let Some(task) = model.pool.get(id) {
        splog_debug!("Editing task {}", id.short());
        model.editing = Some(EditState {
            id,
            buffer: task.text.clone(),
        });
    }
}

fn update_edit(model: &mut Model, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            if let Some(EditState { id, buffer }) = model.editing.take() {
                if buffer.trim().is_empty() {
                    set_info(model, "Empty text ignored");
                }
                let result = model.pool.set_text(id, &buffer);
                report(model, result);
            }
        }

        KeyCode::Esc => {
            model.editing = None;
        }

        KeyCode::Backspace => {
            if let Some(edit) = model.editing.as_mut() {
                edit.buffer.pop();
            }
        }

        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(edit) = model.editing.as_mut() {
                edit.buffer.push(c);
            }
        }

        _ => {}
    }
}
