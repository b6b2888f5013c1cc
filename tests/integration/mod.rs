//! Integration test suite for Starpick.
//!
//! These tests drive the public API the way the TUI and the headless
//! subcommands do, without a terminal.
//!
//! # Test Categories
//!
//! - `pool_scenarios`: task lifecycle through `TaskPool`
//! - `distribution`: statistical checks on weighted picking
//! - `tea_flow`: key-driven sessions through `update`
//! - `performance`: render and snapshot timing thresholds


mod distribution;
mod performance;
mod tea_flow;
