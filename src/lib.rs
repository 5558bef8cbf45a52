//! # YuruGP Progress
//!
//! Leaderboard and point-progress tracker for the Yuru-chara Grand Prix.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (characters, snapshot records, kinds)
//! - **calculate**: Leaderboards, derived metrics, palettes and chart series
//! - **storage**: Filesystem dataset loading (JSONL)
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
