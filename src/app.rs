use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEventKind};

use crate::config::Config;
use crate::render::RenderState;
use crate::tea::{update, Command, Message, Model};
use crate::{splog, splog_debug, Result};

const IDLE_POLL: Duration = Duration::from_millis(50);

/// Owns the `Model` and is the only thread that mutates it.
pub struct LogicThread;

impl LogicThread {
    pub fn run(
        config: Config,
        state_tx: Sender<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        splog_debug!(
            "LogicThread::run show_keymap={} seed={:?}",
            config.show_keymap,
            config.seed
        );
        let mut model = Model::new(config);
        send_state(&state_tx, &model);

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            if !event::poll(IDLE_POLL)? {
                continue;
            }

            let msg = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => Message::Key(key),
                Event::Resize(w, h) => Message::Resize(w, h),
                _ => continue,
            };

            for cmd in update(&mut model, msg) {
                if execute_command(cmd) {
                    splog!(
                        "Quit: {} tasks, {} completed",
                        model.pool.len(),
                        model.pool.completed_count()
                    );
                    shutdown.store(true, Ordering::Relaxed);
                    return Ok(());
                }
            }

            if model.dirty {
                send_state(&state_tx, &model);
                model.dirty = false;
            }
        }

        Ok(())
    }
}

/// Returns true when the loop should exit.
fn execute_command(cmd: Command) -> bool {
    match cmd {
        Command::Quit => {
            splog_debug!("Command::Quit");
            true
        }
    }
}

/// Latest-wins: a full channel means the render thread has not caught up,
/// and the next dirty update will carry newer state anyway.
fn send_state(state_tx: &Sender<RenderState>, model: &Model) {
    let _ = state_tx.try_send(model.snapshot());
}
