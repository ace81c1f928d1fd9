//! # ML Hex
//!
//! Hex on a parallelogram board with incremental win detection, plus the
//! episode and replay plumbing needed to generate self-play training data.
//! Features a terminal UI built with Ratatui for playing against an agent.
//!
//! ## Modules
//!
//! - [`game`]: Board geometry, union-find connectivity, players, match bookkeeping
//! - [`ai`]: Agent trait, random agent, tensor encoding of observations
//! - [`training`]: Episode state machine, replay buffer, self-play trainer, metrics
//! - [`ui`]: Terminal UI for human play
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod training;
pub mod ui;
