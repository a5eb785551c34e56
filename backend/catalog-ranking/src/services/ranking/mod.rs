//! Ranking Module
//!
//! Turns per-concept scores into ordinal ranks.
//!
//! # Workflow
//! 1. Score every concept on jobs, users and measurements (measure registry)
//! 2. Rank each score with descending competition ranking ([`rank_sort`])
//! 3. Fuse the per-score ranks into a total rank ([`FusionPolicy`])
//! 4. Order by total rank and assign dense 1-based indexes ([`RankTables`])
//!
//! [`RankingEngine`] runs the workflow for the whole catalog and again for
//! the language subset.

pub mod engine;
pub mod fusion;
pub mod sorter;
pub mod tables;

pub use engine::{EngineSettings, RankingEngine};
pub use fusion::FusionPolicy;
pub use sorter::{rank_sort, RankKey};
pub use tables::RankTables;
