//! Statistical checks on weighted picking.
//!
//! All runs are seeded; tolerances are wide enough that any correct
//! weighting passes for any seed with overwhelming probability.

use rand::rngs::StdRng;
use rand::SeedableRng;

use starpick::headless::{self, TaskSpec};

use crate::fixtures::{rated_pool, SEED};

fn tally(tasks: &[(&str, u8)], draws: usize) -> Vec<usize> {
    let (mut pool, ids) = rated_pool(tasks);
    let mut counts = vec![0usize; ids.len()];
    for _ in 0..draws {
        let picked = pool.pick_task().map(|t| t.id).unwrap();
        let pos = ids.iter().position(|id| *id == picked).unwrap();
        counts[pos] += 1;
    }
    counts
}

#[test]
fn test_three_stars_picked_three_times_as_often() {
    let counts = tally(&[("A", 1), ("B", 3)], 100_000);
    let ratio = counts[1] as f64 / counts[0] as f64;
    assert!(
        (ratio - 3.0).abs() < 0.3,
        "expected B:A close to 3, got {:.3} ({:?})",
        ratio,
        counts
    );
}

#[test]
fn test_write_report_call_client_shares() {
    let counts = tally(&[("Write report", 1), ("Call client", 3)], 1000);
    let call_share = counts[1] as f64 / 1000.0;
    assert!(
        (0.65..=0.85).contains(&call_share),
        "Call client share {} outside 0.65..=0.85",
        call_share
    );
}

#[test]
fn test_equal_ratings_are_uniform() {
    let counts = tally(&[("a", 2), ("b", 2), ("c", 2), ("d", 2)], 40_000);
    for count in counts {
        let share = count as f64 / 40_000.0;
        assert!((share - 0.25).abs() < 0.02, "share {} far from 0.25", share);
    }
}

#[test]
fn test_shares_follow_total_weight() {
    // Weights 1 + 2 + 3 = 6.
    let counts = tally(&[("one", 1), ("two", 2), ("three", 3)], 60_000);
    let expected = [1.0 / 6.0, 2.0 / 6.0, 3.0 / 6.0];
    for (count, want) in counts.iter().zip(expected) {
        let share = *count as f64 / 60_000.0;
        assert!((share - want).abs() < 0.02, "share {} far from {}", share, want);
    }
}

#[test]
fn test_completed_weight_is_removed_from_the_draw() {
    let (mut pool, ids) = rated_pool(&[("heavy", 3), ("light", 1), ("gone", 3)]);
    pool.complete_task(ids[2]).unwrap();
    assert_eq!(pool.total_weight(), 4);

    let mut heavy = 0;
    for _ in 0..20_000 {
        let picked = pool.pick_task().map(|t| t.id).unwrap();
        assert_ne!(picked, ids[2]);
        if picked == ids[0] {
            heavy += 1;
        }
    }
    let share = heavy as f64 / 20_000.0;
    assert!((share - 0.75).abs() < 0.02, "heavy share {}", share);
}

#[test]
fn test_caller_supplied_rng_is_used() {
    let (mut pool_a, _) = rated_pool(&[("a", 1), ("b", 3), ("c", 2)]);
    let (mut pool_b, _) = rated_pool(&[("a", 1), ("b", 3), ("c", 2)]);
    let mut rng_a = StdRng::seed_from_u64(7);
    let mut rng_b = StdRng::seed_from_u64(7);

    for _ in 0..100 {
        let a = pool_a.pick_task_with(&mut rng_a).map(|t| t.text.clone());
        let b = pool_b.pick_task_with(&mut rng_b).map(|t| t.text.clone());
        assert_eq!(a, b);
    }
}

#[test]
fn test_simulate_report_matches_weights() {
    let specs: Vec<TaskSpec> = ["Write report", "Call client:3"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let report = headless::simulate(&specs, 50_000, Some(SEED)).unwrap();

    assert_eq!(report.draws, 50_000);
    for row in &report.rows {
        assert!(
            (row.observed_share - row.expected_share).abs() < 0.02,
            "{}: observed {} expected {}",
            row.text,
            row.observed_share,
            row.expected_share
        );
    }
}
