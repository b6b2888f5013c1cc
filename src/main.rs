use std::io::{self, stdout, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use crossbeam_channel::{Receiver, TryRecvError};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};

use starpick::app::LogicThread;
use starpick::config::Config;
use starpick::headless::{self, TaskSpec};
use starpick::render::RenderState;
use starpick::{splog, splog_error, ui, Error, Result};

const FRAME_DURATION: Duration = Duration::from_micros(16_666); // 60fps
const DEFAULT_DRAWS: u64 = 100_000;

/// Starpick - rate your tasks, then let weighted chance pick the next one
#[derive(Parser, Debug)]
#[command(name = "starpick")]
#[command(version, about, long_about = None)]
#[command(
    after_help = "ENVIRONMENT:\n    STARPICK_DEBUG=1     Enable debug logging (alternative to --debug)"
)]
pub struct Cli {
    /// Enable debug logging (writes to ~/.starpick/starpick.log)
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Seed the random picker for reproducible results
    #[arg(short = 's', long, global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Pick one task from the command line and print it
    Pick {
        /// Tasks as "text" or "text:stars" (stars 1-3)
        #[arg(required = true)]
        tasks: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Run many picks and report how often each task came up
    Simulate {
        /// Tasks as "text" or "text:stars" (stars 1-3)
        #[arg(required = true)]
        tasks: Vec<String>,

        /// Number of picks to run
        #[arg(short = 'n', long, default_value_t = DEFAULT_DRAWS)]
        draws: u64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    starpick::log::init_with_debug(cli.debug);

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(Error::NoHomeDir) => Config::default(),
        Err(e) => {
            splog_error!("Config load failed: {}", e);
            return Err(e);
        }
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    match cli.command {
        Some(Command::Pick { tasks, json }) => run_pick(&tasks, json, &config),
        Some(Command::Simulate { tasks, draws, json }) => {
            run_simulate(&tasks, draws, json, &config)
        }
        None => run_tui(config, cli.debug),
    }
}

fn parse_specs(tasks: &[String]) -> Result<Vec<TaskSpec>> {
    tasks.iter().map(|t| t.parse()).collect()
}

fn run_pick(tasks: &[String], json: bool, config: &Config) -> Result<()> {
    let specs = parse_specs(tasks)?;
    splog!("Pick command: {} tasks, seed={:?}", specs.len(), config.seed);
    let picked = headless::pick(&specs, config.seed)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&picked)?);
        return Ok(());
    }
    match picked {
        Some(task) => println!(
            "{}  {}",
            task.text,
            task.importance.stars(config.effective_star())
        ),
        None => println!("Nothing to pick."),
    }
    Ok(())
}

fn run_simulate(tasks: &[String], draws: u64, json: bool, config: &Config) -> Result<()> {
    let specs = parse_specs(tasks)?;
    splog!(
        "Simulate command: {} tasks, draws={}, seed={:?}",
        specs.len(),
        draws,
        config.seed
    );
    let report = headless::simulate(&specs, draws, config.seed)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", headless::format_report(&report));
    }
    Ok(())
}

fn run_tui(config: Config, debug: bool) -> Result<()> {
    if debug {
        splog!("Starpick starting (debug mode enabled)");
    } else {
        splog!("Starpick starting");
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let (state_tx, state_rx) = crossbeam_channel::bounded::<RenderState>(1);

    let shutdown_clone = shutdown.clone();
    let logic_handle =
        thread::spawn(move || LogicThread::run(config, state_tx, shutdown_clone));

    let mut terminal = setup_terminal()?;
    let result = render_loop(&mut terminal, state_rx, &shutdown);

    shutdown.store(true, Ordering::SeqCst);
    let logic_result = logic_handle.join();
    restore_terminal(&mut terminal)?;

    match logic_result {
        Ok(Err(e)) => {
            splog_error!("Logic thread failed: {}", e);
            return Err(e);
        }
        Err(_) => splog_error!("Logic thread panicked"),
        Ok(Ok(())) => {}
    }
    splog!("Starpick exiting");
    result
}

fn render_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state_rx: Receiver<RenderState>,
    shutdown: &AtomicBool,
) -> Result<()> {
    let mut state = RenderState::default();
    let mut last_version: u64 = 0;
    let mut last_frame = Instant::now();
    let mut dirty = true;

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match state_rx.try_recv() {
            Ok(s) => {
                dirty = dirty || s.version != last_version;
                state = s;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => break,
        }

        if last_frame.elapsed() < FRAME_DURATION {
            thread::sleep(Duration::from_micros(500));
            continue;
        }
        last_frame = Instant::now();

        if dirty {
            terminal.draw(|f| ui::draw(f, &state))?;
            last_version = state.version;
            dirty = false;
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    terminal.show_cursor()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(disable_raw_mode()?)
}
