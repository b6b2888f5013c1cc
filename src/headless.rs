//! Non-interactive operations for the `pick` and `simulate` subcommands.
//!
//! Tasks are given on the command line as `text` or `text:stars`. Both
//! operations build a fresh `TaskPool` and drive it exactly as the TUI would.

use serde::Serialize;

use crate::core::{Importance, TaskId, TaskPool};
use crate::{splog_debug, Error, Result};

/// A task parsed from a command-line argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    pub text: String,
    pub importance: Importance,
}

impl std::str::FromStr for TaskSpec {
    type Err = Error;

    /// `"Call client:3"` → text "Call client", three stars. A suffix that
    /// is not a number is part of the text, so `"Standup: 10am"` stays whole.
    fn from_str(arg: &str) -> Result<Self> {
        let (text, importance) = match arg.rsplit_once(':') {
            Some((text, suffix)) if is_star_suffix(suffix) => {
                let level: u8 = suffix.trim().parse().map_err(|_| {
                    Error::Validation(format!("invalid star count in {:?}", arg))
                })?;
                let importance = Importance::new(level).ok_or_else(|| {
                    Error::Validation(format!("stars must be 1-3 in {:?}", arg))
                })?;
                (text, importance)
            }
            _ => (arg, Importance::default()),
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Validation(format!("empty task text in {:?}", arg)));
        }
        Ok(Self {
            text: text.to_string(),
            importance,
        })
    }
}

fn is_star_suffix(suffix: &str) -> bool {
    let suffix = suffix.trim();
    !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit())
}

/// Fill a pool from specs, returning the ids in argument order.
pub fn build_pool(specs: &[TaskSpec], seed: Option<u64>) -> Result<(TaskPool, Vec<TaskId>)> {
    if specs.is_empty() {
        return Err(Error::Validation("at least one task is required".to_string()));
    }
    let mut pool = match seed {
        Some(seed) => TaskPool::with_seed(seed),
        None => TaskPool::new(),
    };
    let mut ids = Vec::with_capacity(specs.len());
    for spec in specs {
        let Some(id) = pool.add_task(&spec.text).map(|t| t.id) else {
            continue;
        };
        pool.set_importance(id, spec.importance.get())?;
        ids.push(id);
    }
    Ok((pool, ids))
}

/// The task chosen by a single pick.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PickOutput {
    pub id: TaskId,
    pub text: String,
    pub importance: Importance,
}

pub fn pick(specs: &[TaskSpec], seed: Option<u64>) -> Result<Option<PickOutput>> {
    let (mut pool, _) = build_pool(specs, seed)?;
    Ok(pool.pick_task().map(|task| PickOutput {
        id: task.id,
        text: task.text.clone(),
        importance: task.importance,
    }))
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SimulationRow {
    pub text: String,
    pub importance: u8,
    pub count: u64,
    pub observed_share: f64,
    pub expected_share: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SimulationReport {
    pub draws: u64,
    pub rows: Vec<SimulationRow>,
}

/// Run `draws` picks without completing anything and tally the results.
pub fn simulate(specs: &[TaskSpec], draws: u64, seed: Option<u64>) -> Result<SimulationReport> {
    if draws == 0 {
        return Err(Error::Validation("draws must be at least 1".to_string()));
    }
    let (mut pool, ids) = build_pool(specs, seed)?;
    let total_weight = pool.total_weight() as f64;
    let mut counts = vec![0u64; ids.len()];

    for _ in 0..draws {
        let Some(picked) = pool.pick_task().map(|t| t.id) else {
            break;
        };
        if let Some(pos) = ids.iter().position(|id| *id == picked) {
            counts[pos] += 1;
        }
    }
    splog_debug!("simulate draws={} counts={:?}", draws, counts);

    let rows = ids
        .iter()
        .zip(counts)
        .filter_map(|(id, count)| {
            let task = pool.get(*id)?;
            Some(SimulationRow {
                text: task.text.clone(),
                importance: task.importance.get(),
                count,
                observed_share: count as f64 / draws as f64,
                expected_share: task.importance.weight() as f64 / total_weight,
            })
        })
        .collect();

    Ok(SimulationReport { draws, rows })
}

/// Plain-text table for terminal output.
pub fn format_report(report: &SimulationReport) -> String {
    let text_width = report
        .rows
        .iter()
        .map(|r| r.text.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut out = format!(
        "{:<width$}  {:>5}  {:>8}  {:>8}  {:>8}\n",
        "TASK",
        "STARS",
        "COUNT",
        "OBSERVED",
        "EXPECTED",
        width = text_width
    );
    for row in &report.rows {
        out.push_str(&format!(
            "{:<width$}  {:>5}  {:>8}  {:>7.1}%  {:>7.1}%\n",
            row.text,
            row.importance,
            row.count,
            row.observed_share * 100.0,
            row.expected_share * 100.0,
            width = text_width
        ));
    }
    out.push_str(&format!("{} draws\n", report.draws));
    out
}
