//! Messages for the TEA (The Elm Architecture) pattern.
//!
//! Messages are inputs to the update function. Everything here comes from
//! the terminal.

use crossterm::event::KeyEvent;

/// Input messages to the update function.
#[derive(Debug)]
pub enum Message {
    Key(KeyEvent),
    Resize(u16, u16),
}
