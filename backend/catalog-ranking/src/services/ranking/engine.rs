use std::cell::RefCell;
use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{RankingError, Result};
use crate::models::{Concept, ConceptSummary, RankRecord, Value};
use crate::services::accessor;
use crate::services::measures::{Measure, SignalTable, DEFAULT_JOB_SKILL_DISCOUNT};
use crate::services::ranking::fusion::FusionPolicy;
use crate::services::ranking::sorter::{rank_sort, RankKey};
use crate::services::ranking::tables::RankTables;

/// Tunables for one engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub signals: SignalTable,
    pub fusion: FusionPolicy,
    pub job_skill_discount: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            signals: SignalTable::default(),
            fusion: FusionPolicy::default(),
            job_skill_discount: DEFAULT_JOB_SKILL_DISCOUNT,
        }
    }
}

/// Ranking Engine - derived measures and composite ranks over a catalog
/// snapshot.
///
/// Construction runs the whole pass: every concept is scored on jobs, users
/// and measurements, ranked per score, fused, and given a dense 1-based
/// index. The pass runs twice, once over all concepts and once over the
/// language subset.
///
/// Measure values are memoized in a side map keyed by concept id and never
/// invalidated. The cache uses `RefCell`, so an engine is single-threaded.
pub struct RankingEngine {
    concepts: Vec<Concept>,
    positions: HashMap<String, usize>,
    settings: EngineSettings,
    cache: RefCell<HashMap<String, HashMap<Measure, Value>>>,
    ranks: RankTables,
    language_ranks: RankTables,
}

impl RankingEngine {
    /// Fails when a concept has no id or two concepts share one.
    pub fn new(concepts: Vec<Concept>, settings: EngineSettings) -> Result<Self> {
        let positions = index_ids(&concepts)?;

        let mut engine = Self {
            concepts,
            positions,
            settings,
            cache: RefCell::new(HashMap::new()),
            ranks: RankTables::default(),
            language_ranks: RankTables::default(),
        };

        let everyone: Vec<usize> = (0..engine.concepts.len()).collect();
        engine.ranks = engine.calc_ranks(&everyone);

        let languages: Vec<usize> = everyone
            .into_iter()
            .filter(|&position| engine.is_language(&engine.concepts[position]))
            .collect();
        engine.language_ranks = engine.calc_ranks(&languages);

        info!(
            concepts = engine.ranks.len(),
            languages = engine.language_ranks.len(),
            fusion_keep = engine.settings.fusion.keep(),
            "Ranking pass completed"
        );

        Ok(engine)
    }

    /// Value of `measure` for `concept`, computed on first access.
    ///
    /// Only concepts owned by this engine are memoized. Any other concept,
    /// even one sharing an id with a catalog entry, is evaluated from its own
    /// attributes on every call. Its `rank` and `languageRank` still come from
    /// this engine's tables.
    pub fn get(&self, measure: Measure, concept: &Concept) -> Value {
        let Some(id) = concept.id().filter(|id| self.owns(id, concept)) else {
            return (measure.evaluator())(concept, self);
        };

        if let Some(value) = self
            .cache
            .borrow()
            .get(id)
            .and_then(|values| values.get(&measure))
        {
            return value.clone();
        }

        // The cache borrow is released before evaluating: measures may read
        // other measures through the engine.
        let value = (measure.evaluator())(concept, self);
        self.cache
            .borrow_mut()
            .entry(id.to_string())
            .or_default()
            .insert(measure, value.clone());
        value
    }

    /// Lookup by measure name. Unregistered names fall back to the raw
    /// `appeared` attribute.
    pub fn get_by_name(&self, name: &str, concept: &Concept) -> Value {
        match name.parse::<Measure>() {
            Ok(measure) => self.get(measure, concept),
            Err(_) => {
                debug!(measure = name, "Unregistered measure, reading appeared");
                accessor::get(concept, "appeared")
                    .map(|raw| Value::Text(raw.to_string()))
                    .unwrap_or_default()
            }
        }
    }

    pub fn is_language(&self, concept: &Concept) -> bool {
        self.get(Measure::IsLanguage, concept).int_or_zero() == 1
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    pub fn concept(&self, id: &str) -> Option<&Concept> {
        self.positions.get(id).map(|&position| &self.concepts[position])
    }

    fn owns(&self, id: &str, concept: &Concept) -> bool {
        self.concept(id).is_some_and(|owned| std::ptr::eq(owned, concept))
    }

    /// Ranks over the full catalog.
    pub fn ranks(&self) -> &RankTables {
        &self.ranks
    }

    /// Ranks over the language subset.
    pub fn language_ranks(&self) -> &RankTables {
        &self.language_ranks
    }

    pub fn summary(&self, concept: &Concept) -> ConceptSummary {
        ConceptSummary {
            id: concept.id().unwrap_or_default().to_string(),
            rank: self.get(Measure::Rank, concept).int_or_zero() as usize,
            language_rank: self.get(Measure::LanguageRank, concept),
            number_of_users_estimate: self
                .get(Measure::NumberOfUsersEstimate, concept)
                .int_or_zero(),
            number_of_jobs_estimate: self
                .get(Measure::NumberOfJobsEstimate, concept)
                .int_or_zero(),
            measurements_count: self.get(Measure::Measurements, concept).int_or_zero(),
            is_language: self.get(Measure::IsLanguage, concept).int_or_zero(),
            book_count: self.get(Measure::BookCount, concept).int_or_zero(),
            paper_count: self.get(Measure::PaperCount, concept).int_or_zero(),
            last_activity: self.get(Measure::LastActivity, concept),
        }
    }

    /// One summary per concept, best rank first.
    pub fn summaries(&self) -> Vec<ConceptSummary> {
        self.ranks
            .iter()
            .filter_map(|record| self.concept(&record.id))
            .map(|concept| self.summary(concept))
            .collect()
    }

    fn calc_ranks(&self, members: &[usize]) -> RankTables {
        let mut records: Vec<RankRecord> = members
            .iter()
            .map(|&position| {
                let concept = &self.concepts[position];
                RankRecord::new(
                    concept.id().unwrap_or_default(),
                    self.get(Measure::NumberOfJobsEstimate, concept).int_or_zero(),
                    self.get(Measure::NumberOfUsersEstimate, concept).int_or_zero(),
                    self.get(Measure::Measurements, concept).int_or_zero(),
                )
            })
            .collect();

        for key in RankKey::ORDER {
            rank_sort(&mut records, key);
        }

        let fusion = self.settings.fusion;
        for record in &mut records {
            record.total_rank = fusion.total_rank(record);
        }

        // Stable: equal totals keep the order left by the last rank pass.
        records.sort_by_key(|record| record.total_rank);

        RankTables::from_ordered(records)
    }
}

fn index_ids(concepts: &[Concept]) -> Result<HashMap<String, usize>> {
    let mut positions = HashMap::with_capacity(concepts.len());
    for (position, concept) in concepts.iter().enumerate() {
        let id = concept.id().ok_or(RankingError::MissingId { position })?;
        if positions.insert(id.to_string(), position).is_some() {
            return Err(RankingError::DuplicateId(id.to_string()));
        }
    }
    Ok(positions)
}
