pub mod accessor;
pub mod measures;
pub mod ranking;

pub use measures::{Measure, SignalRule, SignalTable};
pub use ranking::{EngineSettings, FusionPolicy, RankTables, RankingEngine};
