//! # Arcade Connect Four
//!
//! The Connect Four game of the arcade portal: rules, a three-tier computer
//! opponent, and the session that plays a human against it and reports the
//! final score.
//!
//! ## Modules
//!
//! - [`game`]: Board model, win/draw detection, immutable game state
//! - [`ai`]: Agent trait, Easy/Medium/Hard tiers, minimax with alpha-beta
//! - [`session`]: Turn orchestration, scoring, final-score handoff
//! - [`arena`]: Agent-vs-agent matches and statistics
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
pub mod session;
