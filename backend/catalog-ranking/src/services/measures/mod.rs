//! Derived-Measure Registry
//!
//! Every derived field is a pure function of `(concept, engine)`. The set of
//! measures is closed: a measure name either parses into [`Measure`] or is
//! rejected, so typos surface where the name is read.
//!
//! # Measures
//! - **Popularity**: users and jobs estimates from weighted signals
//! - **Structure**: measure-block count, language classification, catalog
//!   listing counts, last activity year, external ids
//! - **Position**: `rank` / `languageRank`, resolved by the engine's tables
//!
//! Values are memoized per concept by [`RankingEngine::get`].

pub mod popularity;
pub mod structure;

pub use popularity::{SignalRule, SignalTable, DEFAULT_JOB_SKILL_DISCOUNT};
pub use structure::{is_language_type, NON_LANGUAGE_TYPES};

use std::fmt;
use std::str::FromStr;

use crate::error::RankingError;
use crate::models::{Concept, Value};
use crate::services::ranking::RankingEngine;

pub(crate) type MeasureFn = fn(&Concept, &RankingEngine) -> Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    NumberOfUsersEstimate,
    NumberOfJobsEstimate,
    Measurements,
    IsLanguage,
    Rank,
    LanguageRank,
    BookCount,
    PaperCount,
    LastActivity,
    HoplId,
    ExampleCount,
}

impl Measure {
    pub const ALL: [Measure; 11] = [
        Measure::NumberOfUsersEstimate,
        Measure::NumberOfJobsEstimate,
        Measure::Measurements,
        Measure::IsLanguage,
        Measure::Rank,
        Measure::LanguageRank,
        Measure::BookCount,
        Measure::PaperCount,
        Measure::LastActivity,
        Measure::HoplId,
        Measure::ExampleCount,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Measure::NumberOfUsersEstimate => "numberOfUsersEstimate",
            Measure::NumberOfJobsEstimate => "numberOfJobsEstimate",
            Measure::Measurements => "measurements",
            Measure::IsLanguage => "isLanguage",
            Measure::Rank => "rank",
            Measure::LanguageRank => "languageRank",
            Measure::BookCount => "bookCount",
            Measure::PaperCount => "paperCount",
            Measure::LastActivity => "lastActivity",
            Measure::HoplId => "hoplId",
            Measure::ExampleCount => "exampleCount",
        }
    }

    pub(crate) fn evaluator(self) -> MeasureFn {
        match self {
            Measure::NumberOfUsersEstimate => popularity::number_of_users_estimate,
            Measure::NumberOfJobsEstimate => popularity::number_of_jobs_estimate,
            Measure::Measurements => structure::measurements,
            Measure::IsLanguage => structure::is_language,
            Measure::Rank => rank,
            Measure::LanguageRank => language_rank,
            Measure::BookCount => structure::book_count,
            Measure::PaperCount => structure::paper_count,
            Measure::LastActivity => structure::last_activity,
            Measure::HoplId => structure::hopl_id,
            Measure::ExampleCount => structure::example_count,
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Measure {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Measure::ALL
            .into_iter()
            .find(|measure| measure.name() == s)
            .ok_or_else(|| RankingError::UnknownMeasure(s.to_string()))
    }
}

fn rank(concept: &Concept, engine: &RankingEngine) -> Value {
    let index = concept
        .id()
        .and_then(|id| engine.ranks().by_id(id))
        .map(|record| record.index as i64);
    Value::from(index)
}

fn language_rank(concept: &Concept, engine: &RankingEngine) -> Value {
    if engine.get(Measure::IsLanguage, concept).int_or_zero() == 0 {
        return Value::Empty;
    }
    let index = concept
        .id()
        .and_then(|id| engine.language_ranks().by_id(id))
        .map(|record| record.index as i64);
    Value::from(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_from_str() {
        for measure in Measure::ALL {
            assert_eq!(measure.name().parse::<Measure>().unwrap(), measure);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = "numberOfUserEstimate".parse::<Measure>().unwrap_err();
        assert!(matches!(err, RankingError::UnknownMeasure(name) if name == "numberOfUserEstimate"));
    }
}
