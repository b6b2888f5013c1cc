//! Key-driven sessions through `update`, checked via render snapshots.

use crossterm::event::KeyCode;

use starpick::tea::{update, Command, Message, Mode, NotificationLevel};

use crate::fixtures::{ctrl, key, seeded_model, send_all, type_line};

#[test]
fn test_collect_rate_pick_complete_session() {
    let mut model = seeded_model();
    type_line(&mut model, "Write report");
    type_line(&mut model, "Call client");
    assert_eq!(model.pool.len(), 2);
    assert_eq!(model.mode, Mode::Collecting);

    send_all(&mut model, [key(KeyCode::Tab)]);
    assert_eq!(model.mode, Mode::Rating);
    assert_eq!(model.cursor, 0);

    // Rate "Call client" three stars.
    send_all(&mut model, [key(KeyCode::Char('j')), key(KeyCode::Char('3'))]);
    let state = model.snapshot();
    assert_eq!(state.tasks[0].importance.get(), 1);
    assert_eq!(state.tasks[1].importance.get(), 3);

    send_all(&mut model, [key(KeyCode::Char('p'))]);
    let picked = model.snapshot().selection.expect("a task is picked");
    assert!(picked.text == "Write report" || picked.text == "Call client");

    send_all(&mut model, [key(KeyCode::Char('d'))]);
    let state = model.snapshot();
    assert!(state.selection.is_none());
    assert_eq!(state.completed, 1);
    assert!(state.tasks.iter().any(|t| t.id == picked.id && t.completed));
}

#[test]
fn test_done_without_tasks_shows_error() {
    let mut model = seeded_model();
    send_all(&mut model, [key(KeyCode::Tab)]);

    assert_eq!(model.mode, Mode::Collecting);
    let note = model.notification.as_ref().expect("error shown");
    assert_eq!(note.level, NotificationLevel::Error);
}

#[test]
fn test_picking_after_everything_is_done() {
    let mut model = seeded_model();
    type_line(&mut model, "Only task");
    send_all(
        &mut model,
        [
            key(KeyCode::Tab),
            key(KeyCode::Char(' ')),
            key(KeyCode::Char('p')),
        ],
    );

    let state = model.snapshot();
    assert!(state.all_done());
    assert!(state.selection.is_none());
    let note = state.notification.expect("info shown");
    assert_eq!(note.level, NotificationLevel::Info);
}

#[test]
fn test_back_to_collecting_keeps_tasks_and_ratings() {
    let mut model = seeded_model();
    type_line(&mut model, "a");
    type_line(&mut model, "b");
    send_all(
        &mut model,
        [
            key(KeyCode::Tab),
            key(KeyCode::Char('2')),
            key(KeyCode::Char('j')),
            key(KeyCode::Char('x')),
            key(KeyCode::Char('p')),
            key(KeyCode::Tab),
        ],
    );

    assert_eq!(model.mode, Mode::Collecting);
    assert!(model.pool.current_selection().is_none());
    let state = model.snapshot();
    assert_eq!(state.tasks.len(), 2);
    assert_eq!(state.tasks[0].importance.get(), 2);
    assert!(state.tasks[1].completed);
    assert!(state.draft.is_empty());

    // New tasks can still be added and are picked like the rest.
    type_line(&mut model, "c");
    assert_eq!(model.pool.len(), 3);
}

#[test]
fn test_inline_edit_commit_and_cancel() {
    let mut model = seeded_model();
    type_line(&mut model, "Write reprot");
    send_all(&mut model, [key(KeyCode::Tab), key(KeyCode::Char('e'))]);
    assert!(model.editing.is_some());

    // Replace the last three characters.
    send_all(
        &mut model,
        [
            key(KeyCode::Backspace),
            key(KeyCode::Backspace),
            key(KeyCode::Backspace),
            key(KeyCode::Char('o')),
            key(KeyCode::Char('r')),
            key(KeyCode::Char('t')),
            key(KeyCode::Enter),
        ],
    );
    assert!(model.editing.is_none());
    assert_eq!(model.snapshot().tasks[0].text, "Write report");

    send_all(
        &mut model,
        [
            key(KeyCode::Char('e')),
            key(KeyCode::Char('!')),
            key(KeyCode::Esc),
        ],
    );
    assert!(model.editing.is_none());
    assert_eq!(model.snapshot().tasks[0].text, "Write report");
    assert_eq!(model.mode, Mode::Rating);
}

#[test]
fn test_blank_edit_keeps_old_text() {
    let mut model = seeded_model();
    type_line(&mut model, "abc");
    send_all(&mut model, [key(KeyCode::Tab), key(KeyCode::Char('e'))]);
    send_all(
        &mut model,
        [
            key(KeyCode::Backspace),
            key(KeyCode::Backspace),
            key(KeyCode::Backspace),
            key(KeyCode::Enter),
        ],
    );

    assert_eq!(model.snapshot().tasks[0].text, "abc");
}

#[test]
fn test_completed_task_cannot_be_edited_after_going_back() {
    let mut model = seeded_model();
    type_line(&mut model, "abc");
    send_all(
        &mut model,
        [
            key(KeyCode::Tab),
            key(KeyCode::Char(' ')),
            key(KeyCode::Tab),
            key(KeyCode::Up),
            key(KeyCode::Enter),
        ],
    );
    assert_eq!(model.mode, Mode::Collecting);
    assert!(model.editing.is_none());
    let note = model.notification.as_ref().expect("info shown");
    assert_eq!(note.level, NotificationLevel::Info);

    // Typing goes to the draft, not into the finished task.
    type_line(&mut model, "X");
    let state = model.snapshot();
    assert_eq!(state.tasks[0].text, "abc");
    assert!(state.tasks[0].completed);
    assert_eq!(state.tasks[1].text, "X");
}

#[test]
fn test_quit_keys() {
    let mut model = seeded_model();
    type_line(&mut model, "q");
    // In collecting mode 'q' is text, not quit.
    assert_eq!(model.pool.len(), 1);

    let cmds = update(&mut model, ctrl('c'));
    assert_eq!(cmds, vec![Command::Quit]);

    send_all(&mut model, [key(KeyCode::Tab)]);
    let cmds = update(&mut model, key(KeyCode::Char('q')));
    assert_eq!(cmds, vec![Command::Quit]);
}

#[test]
fn test_resize_marks_dirty_only() {
    let mut model = seeded_model();
    model.dirty = false;
    let before = model.snapshot();

    let cmds = update(&mut model, Message::Resize(120, 40));
    assert!(cmds.is_empty());
    assert!(model.dirty);
    assert_eq!(model.snapshot().tasks, before.tasks);
}

#[test]
fn test_snapshot_versions_increase() {
    let mut model = seeded_model();
    let first = model.snapshot().version;
    type_line(&mut model, "a");
    let second = model.snapshot().version;
    assert!(second > first);
}
