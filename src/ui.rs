//! Terminal UI rendering for the starpick TUI.
//!
//! Design:
//! - Minimal chrome: no box drawing, whitespace and position create hierarchy
//! - Grayscale plus yellow for stars; selection uses REVERSED so it adapts to
//!   the terminal theme
//! - Scrolloff navigation: the cursor row stays centered in long lists
//!
//! This module renders from RenderState (immutable snapshot) - it never
//! mutates application state.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::core::Importance;
use crate::render::{RenderState, TaskView};
use crate::tea::{Mode, Notification, NotificationLevel};

const COLOR_TEXT_DIMMED: Color = Color::Gray;
const COLOR_TEXT_MUTED: Color = Color::DarkGray;
const COLOR_STAR_ON: Color = Color::Yellow;
const COLOR_STAR_OFF: Color = Color::DarkGray;
const COLOR_PICK: Color = Color::Cyan;

const SELECTION_HEIGHT: u16 = 3;
const CHECKBOX_WIDTH: usize = 4;
const PLACEHOLDER: &str = "Type a task and press Enter";

// -----------------------------------------------------------------------------
// Context-sensitive keymap system
// -----------------------------------------------------------------------------

/// Context for determining which keybindings to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapContext {
    Collecting { on_draft: bool },
    Rating {
        cursor_completed: bool,
        has_selection: bool,
        all_done: bool,
    },
    Editing,
}

impl KeymapContext {
    pub fn from_render_state(state: &RenderState) -> Self {
        if state.editing.is_some() {
            return KeymapContext::Editing;
        }
        match state.mode {
            Mode::Collecting => KeymapContext::Collecting {
                on_draft: state.cursor >= state.tasks.len(),
            },
            Mode::Rating => KeymapContext::Rating {
                cursor_completed: state
                    .tasks
                    .get(state.cursor)
                    .is_some_and(|t| t.completed),
                has_selection: state.selection.is_some(),
                all_done: state.all_done(),
            },
        }
    }
}

/// A single keybinding entry for display.
struct Keybinding(&'static str, &'static str);

/// A group of related keybindings (separated by │).
struct KeybindingGroup(Vec<Keybinding>);

fn keybindings_for_context(ctx: KeymapContext) -> Vec<KeybindingGroup> {
    match ctx {
        KeymapContext::Collecting { on_draft } => {
            let enter = if on_draft {
                Keybinding("Enter", "add")
            } else {
                Keybinding("Enter", "edit")
            };
            vec![
                KeybindingGroup(vec![enter, Keybinding("↑↓", "move")]),
                KeybindingGroup(vec![Keybinding("Tab", "done")]),
                KeybindingGroup(vec![Keybinding("^C", "quit")]),
            ]
        }
        KeymapContext::Rating {
            cursor_completed,
            has_selection,
            all_done,
        } => {
            let row_actions = if cursor_completed {
                vec![]
            } else {
                vec![
                    Keybinding("1-3", "stars"),
                    Keybinding("space", "done"),
                    Keybinding("e", "edit"),
                ]
            };
            let mut pick_actions = Vec::new();
            if !all_done {
                pick_actions.push(Keybinding("p", "pick"));
            }
            if has_selection {
                pick_actions.push(Keybinding("d", "mark picked done"));
            }
            vec![
                KeybindingGroup(row_actions),
                KeybindingGroup(pick_actions),
                KeybindingGroup(vec![Keybinding("Tab", "edit tasks")]),
                KeybindingGroup(vec![Keybinding("q", "quit")]),
            ]
        }
        KeymapContext::Editing => vec![KeybindingGroup(vec![
            Keybinding("Enter", "save"),
            Keybinding("Esc", "cancel"),
        ])],
    }
}

/// Main render function - entry point for all UI drawing.
pub fn draw(frame: &mut Frame, state: &RenderState) {
    render_main_layout(frame, state);

    if let Some(ref notification) = state.notification {
        render_notification(frame, notification, frame.area());
    }
}

/// Header + task list + optional pick panel + status bar.
fn render_main_layout(frame: &mut Frame, state: &RenderState) {
    let area = frame.area();

    if area.height < 4 {
        render_task_list(frame, state, area);
        return;
    }

    let selection_height = if state.selection.is_some() && area.height > SELECTION_HEIGHT + 3 {
        SELECTION_HEIGHT
    } else {
        0
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(selection_height),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(frame, state, chunks[0]);
    render_task_list(frame, state, chunks[1]);
    if selection_height > 0 {
        render_selection(frame, state, chunks[2]);
    }
    render_statusbar(frame, state, chunks[3]);
}

fn render_header(frame: &mut Frame, state: &RenderState, area: Rect) {
    let title_style = Style::default()
        .fg(COLOR_TEXT_DIMMED)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![Span::styled(state.mode.title(), title_style)];
    if state.mode == Mode::Rating && !state.tasks.is_empty() {
        spans.push(Span::styled(
            format!("  {}/{} done", state.completed, state.tasks.len()),
            Style::default().fg(COLOR_TEXT_MUTED),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Task list with scrolloff navigation.
fn render_task_list(frame: &mut Frame, state: &RenderState, area: Rect) {
    let mut rows: Vec<Line> = state
        .tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let is_cursor = idx == state.cursor && state.editing.is_none();
            match state.mode {
                Mode::Collecting => render_collect_row(state, task, is_cursor, area.width),
                Mode::Rating => render_rating_row(state, task, is_cursor, area.width),
            }
        })
        .collect();

    if state.mode == Mode::Collecting {
        rows.push(render_draft_row(state, area.width));
    }

    if rows.is_empty() {
        return;
    }

    let visible = area.height as usize;
    let center = visible / 2;
    let start = state.cursor.saturating_sub(center);
    let end = (start + visible).min(rows.len());
    let start = end.saturating_sub(visible);

    let lines: Vec<Line> = rows.into_iter().skip(start).take(visible).collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn number_prefix(number: usize) -> Span<'static> {
    Span::styled(
        format!("{:>2}. ", number),
        Style::default().add_modifier(Modifier::BOLD),
    )
}

fn editing_spans(buffer: &str, width: usize) -> Vec<Span<'static>> {
    vec![
        Span::styled(truncate_tail(buffer, width), Style::default().fg(Color::White)),
        Span::styled(
            "_",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::SLOW_BLINK),
        ),
    ]
}

fn render_collect_row(
    state: &RenderState,
    task: &TaskView,
    is_cursor: bool,
    width: u16,
) -> Line<'static> {
    let text_width = (width as usize).saturating_sub(5);
    let mut spans = vec![number_prefix(task.number)];

    if let Some(buffer) = state.edit_buffer_for(task.id) {
        spans.extend(editing_spans(buffer, text_width));
    } else {
        let style = if is_cursor {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        spans.push(Span::styled(truncate(&task.text, text_width), style));
    }
    Line::from(spans)
}

fn render_draft_row(state: &RenderState, width: u16) -> Line<'static> {
    let text_width = (width as usize).saturating_sub(6);
    let mut spans = vec![number_prefix(state.next_number)];
    let on_draft = state.cursor >= state.tasks.len() && state.editing.is_none();

    if state.draft.is_empty() {
        if on_draft {
            spans.push(Span::styled(
                "_",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        spans.push(Span::styled(
            PLACEHOLDER,
            Style::default().fg(COLOR_TEXT_MUTED),
        ));
    } else if on_draft {
        spans.extend(editing_spans(&state.draft, text_width));
    } else {
        spans.push(Span::styled(
            truncate(&state.draft, text_width),
            Style::default().fg(COLOR_TEXT_DIMMED),
        ));
    }
    Line::from(spans)
}

/// Rating row: checkbox, text, three stars.
fn render_rating_row(
    state: &RenderState,
    task: &TaskView,
    is_cursor: bool,
    width: u16,
) -> Line<'static> {
    let star_width = state.star.chars().count() * Importance::MAX.weight();
    let text_width = (width as usize)
        .saturating_sub(CHECKBOX_WIDTH)
        .saturating_sub(star_width + 2);

    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    let marker_style = if task.selected {
        Style::default().fg(COLOR_PICK).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_TEXT_DIMMED)
    };

    let mut text_style = if task.completed {
        Style::default()
            .fg(COLOR_TEXT_MUTED)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if task.selected {
        Style::default().fg(COLOR_PICK)
    } else {
        Style::default()
    };
    if is_cursor {
        text_style = text_style.add_modifier(Modifier::REVERSED);
    }

    let mut spans = vec![Span::styled(checkbox, marker_style)];
    match state.edit_buffer_for(task.id) {
        Some(buffer) => {
            let mut edit = editing_spans(buffer, text_width);
            let used: usize = edit.iter().map(|s| s.width()).sum();
            edit.push(Span::raw(" ".repeat(text_width.saturating_sub(used) + 1)));
            spans.extend(edit);
        }
        None => spans.push(Span::styled(
            format!("{}  ", pad_to_width(&task.text, text_width)),
            text_style,
        )),
    }
    spans.extend(star_spans(&state.star, task.importance, task.completed));
    Line::from(spans)
}

/// One span per star slot; filled up to `importance`.
fn star_spans(glyph: &str, importance: Importance, muted: bool) -> Vec<Span<'static>> {
    Importance::all()
        .iter()
        .map(|level| {
            let color = if muted {
                COLOR_TEXT_MUTED
            } else if importance >= *level {
                COLOR_STAR_ON
            } else {
                COLOR_STAR_OFF
            };
            Span::styled(glyph.to_string(), Style::default().fg(color))
        })
        .collect()
}

/// Panel showing the current pick.
fn render_selection(frame: &mut Frame, state: &RenderState, area: Rect) {
    let Some(task) = state.selection.as_ref() else {
        return;
    };
    let width = area.width as usize;
    let lines = vec![
        Line::from(Span::styled(
            "Your selected task:",
            Style::default().fg(COLOR_TEXT_DIMMED).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            truncate(&task.text, width),
            Style::default().fg(COLOR_PICK).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            task.importance.stars(&state.star),
            Style::default().fg(COLOR_STAR_ON),
        )),
    ];
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines), area);
}

/// Bottom line: "?" toggle, or the full keymap when expanded. Editing and
/// collecting always show their hints since '?' is text there.
fn render_statusbar(frame: &mut Frame, state: &RenderState, area: Rect) {
    frame.render_widget(Paragraph::new(render_keymap_line(state)), area);
}

fn render_keymap_line(state: &RenderState) -> Line<'static> {
    let ctx = KeymapContext::from_render_state(state);
    let groups = keybindings_for_context(ctx);

    let key_style = Style::default().fg(COLOR_TEXT_DIMMED);
    let desc_style = Style::default().fg(COLOR_TEXT_MUTED);
    let sep_style = Style::default().fg(COLOR_TEXT_MUTED);

    let expanded = match ctx {
        KeymapContext::Rating { .. } => state.show_keymap,
        _ => true,
    };

    let mut spans: Vec<Span> = Vec::new();
    if matches!(ctx, KeymapContext::Rating { .. }) {
        let help_style = if state.show_keymap {
            Style::default()
        } else {
            Style::default().fg(COLOR_TEXT_MUTED)
        };
        spans.push(Span::styled("?", help_style));
    }

    if expanded {
        for group in groups.iter() {
            if group.0.is_empty() {
                continue;
            }
            if !spans.is_empty() {
                spans.push(Span::styled(" │ ", sep_style));
            }
            for (key_idx, keybinding) in group.0.iter().enumerate() {
                if key_idx > 0 {
                    spans.push(Span::styled(" • ", sep_style));
                }
                spans.push(Span::styled(keybinding.0, key_style));
                spans.push(Span::styled(format!(" {}", keybinding.1), desc_style));
            }
        }
    }

    Line::from(spans)
}

/// Single-line notification on the bottom line of the screen.
///
/// - Error: Red text with "Error:" prefix and bold styling
/// - Info: Green text without prefix
fn render_notification(frame: &mut Frame, notification: &Notification, area: Rect) {
    let notification_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    frame.render_widget(Clear, notification_area);

    let line = match notification.level {
        NotificationLevel::Error => Line::from(vec![
            Span::styled(
                "Error: ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                notification.message.clone(),
                Style::default().fg(Color::Red),
            ),
        ]),
        NotificationLevel::Info => Line::from(Span::styled(
            notification.message.clone(),
            Style::default().fg(Color::Green),
        )),
    };

    frame.render_widget(Paragraph::new(line), notification_area);
}

// Helper functions

/// Terminal columns taken by `s`; wide glyphs such as CJK count as two.
fn display_width(s: &str) -> usize {
    Span::raw(s).width()
}

/// Cut `s` to at most `max_width` columns, marking the cut with `~`.
fn truncate(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let budget = if max_width <= 3 { max_width } else { max_width - 1 };
    let mut out = String::new();
    let mut used = 0;
    let mut buf = [0u8; 4];
    for c in s.chars() {
        let w = display_width(c.encode_utf8(&mut buf));
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    if max_width > 3 {
        out.push('~');
    }
    out
}

/// `s` truncated and right-padded with spaces to exactly `width` columns.
fn pad_to_width(s: &str, width: usize) -> String {
    let text = truncate(s, width);
    let pad = width.saturating_sub(display_width(&text));
    format!("{}{}", text, " ".repeat(pad))
}

/// Keep the end of the text visible while typing.
fn truncate_tail(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        s.to_string()
    } else {
        s.chars().skip(count - max_len).collect()
    }
}
