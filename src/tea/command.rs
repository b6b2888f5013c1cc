//! Commands for the TEA (The Elm Architecture) pattern.
//!
//! Commands are outputs from the update function - they represent side effects
//! to be executed by the runtime. Pool mutations are plain state changes and
//! happen inside `update`; only leaving the event loop needs the runtime.

/// Output commands from the update function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
}
