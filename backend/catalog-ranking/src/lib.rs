pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use crate::config::Config;
pub use error::{RankingError, Result};
pub use models::{Concept, ConceptSummary, Node, RankRecord, Value};
pub use services::{EngineSettings, FusionPolicy, Measure, RankTables, RankingEngine, SignalTable};
