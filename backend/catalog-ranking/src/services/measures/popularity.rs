// ============================================
// Popularity estimates (users / jobs)
// ============================================
//
// Sources report popularity at very different scales. The weights below are
// hand-tuned credibility discounts, not fitted values: treat them as
// configuration.

use crate::models::{Concept, Value};
use crate::services::accessor;
use crate::services::ranking::RankingEngine;
use crate::utils::int_or_zero;

/// Dated sources whose latest observation counts as users.
pub const MOST_RECENT_USER_SIGNALS: [&str; 3] =
    ["linkedInSkill", "subreddit memberCount", "projectEuler members"];

/// Raw counts taken as users directly.
pub const DIRECT_USER_SIGNALS: [&str; 2] = ["meetup members", "githubRepo stars"];

/// Skill listings are discounted into a job-count order of magnitude.
pub const DEFAULT_JOB_SKILL_DISCOUNT: f64 = 0.01;

/// How a custom-weighted source turns its raw value into users.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalRule {
    /// Fixed credit for having the attribute at all.
    Flat(f64),
    /// Raw count times a factor.
    PerUnit(f64),
    /// Daily page views with bot traffic removed, scaled to an audience.
    PageViews { bot_divisor: f64, audience: f64 },
}

impl SignalRule {
    pub fn apply(&self, raw: &str) -> f64 {
        match self {
            SignalRule::Flat(credit) => *credit,
            SignalRule::PerUnit(factor) => int_or_zero(Some(raw)) as f64 * factor,
            SignalRule::PageViews { bot_divisor, audience } => {
                audience * (int_or_zero(Some(raw)) as f64 / bot_divisor)
            }
        }
    }
}

/// Custom-weighted user signals, keyed by attribute path.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalTable {
    entries: Vec<(String, SignalRule)>,
}

impl SignalTable {
    pub fn new(entries: Vec<(String, SignalRule)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, SignalRule)] {
        &self.entries
    }

    /// Replace the rule for `path`, or append it.
    pub fn with_rule(mut self, path: impl Into<String>, rule: SignalRule) -> Self {
        let path = path.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == path) {
            Some(entry) => entry.1 = rule,
            None => self.entries.push((path, rule)),
        }
        self
    }

    /// Sum of every rule whose attribute has a non-empty value.
    pub fn score(&self, concept: &Concept) -> f64 {
        self.entries
            .iter()
            .filter_map(|(path, rule)| accessor::get(concept, path).map(|raw| rule.apply(raw)))
            .sum()
    }
}

impl Default for SignalTable {
    fn default() -> Self {
        let entries = vec![
            ("wikipedia", SignalRule::Flat(20.0)),
            ("packageRepository", SignalRule::Flat(1000.0)),
            // ~95% bot traffic, ~1% of users visit the page daily
            (
                "wikipedia dailyPageViews",
                SignalRule::PageViews {
                    bot_divisor: 20.0,
                    audience: 100.0,
                },
            ),
            // linguist requires a grammar to have at least 200 users
            ("linguistGrammarRepo", SignalRule::Flat(200.0)),
            ("codeMirror", SignalRule::Flat(50.0)),
            ("website", SignalRule::Flat(1.0)),
            ("githubRepo", SignalRule::Flat(1.0)),
            ("githubRepo forks", SignalRule::PerUnit(3.0)),
            ("annualReport", SignalRule::Flat(1000.0)),
        ];

        Self::new(
            entries
                .into_iter()
                .map(|(path, rule)| (path.to_string(), rule))
                .collect(),
        )
    }
}

pub(crate) fn number_of_users_estimate(concept: &Concept, engine: &RankingEngine) -> Value {
    // Summed in f64; the cast back saturates at i64::MAX.
    let most_recent: f64 = MOST_RECENT_USER_SIGNALS
        .iter()
        .map(|path| accessor::most_recent_int(concept, path) as f64)
        .sum();
    let direct: f64 = DIRECT_USER_SIGNALS
        .iter()
        .map(|path| accessor::int(concept, path) as f64)
        .sum();
    let custom = engine.settings().signals.score(concept);

    Value::Int((most_recent + direct + custom).round() as i64)
}

pub(crate) fn number_of_jobs_estimate(concept: &Concept, engine: &RankingEngine) -> Value {
    let skill = accessor::most_recent_int(concept, "linkedInSkill") as f64;
    let discounted = (skill * engine.settings().job_skill_discount).round() as i64;

    Value::Int(discounted.saturating_add(accessor::most_recent_int(concept, "indeedJobs")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;
    use crate::services::ranking::EngineSettings;

    fn engine() -> RankingEngine {
        RankingEngine::new(Vec::new(), EngineSettings::default()).unwrap()
    }

    #[test]
    fn test_signal_rules() {
        assert_eq!(SignalRule::Flat(20.0).apply("anything"), 20.0);
        assert_eq!(SignalRule::PerUnit(3.0).apply("12"), 36.0);
        assert_eq!(SignalRule::PerUnit(3.0).apply("lots"), 0.0);
        let views = SignalRule::PageViews {
            bot_divisor: 20.0,
            audience: 100.0,
        };
        assert_eq!(views.apply("400"), 2000.0);
    }

    #[test]
    fn test_users_sums_all_signal_families() {
        let concept = Concept::new(vec![
            Node::leaf("id", "go"),
            Node::block("linkedInSkill", vec![Node::leaf("2019", "40"), Node::leaf("2021", "55")]),
            Node::block("meetup", vec![Node::leaf("members", "100")]),
            Node::leaf("githubRepo", "https://github.com/golang/go")
                .with_children(vec![Node::leaf("stars", "1000"), Node::leaf("forks", "10")]),
            Node::leaf("wikipedia", "https://en.wikipedia.org/wiki/Go")
                .with_children(vec![Node::leaf("dailyPageViews", "400")]),
        ]);

        // 55 + 100 + 1000 + (1 + 30) + (20 + 2000)
        assert_eq!(number_of_users_estimate(&concept, &engine()), Value::Int(3206));
    }

    #[test]
    fn test_library_without_signals_counts_presence_only() {
        let concept = Concept::new(vec![
            Node::leaf("id", "leftpad"),
            Node::leaf("type", "library"),
            Node::leaf("website", "https://leftpad.io"),
            Node::leaf("githubRepo", "https://github.com/left/pad"),
        ]);

        assert_eq!(number_of_users_estimate(&concept, &engine()), Value::Int(2));
        assert_eq!(number_of_jobs_estimate(&concept, &engine()), Value::Int(0));
    }

    #[test]
    fn test_users_rounds_fractional_custom_credit() {
        let concept = Concept::new(vec![Node::leaf("wikipedia", "")
            .with_children(vec![Node::leaf("dailyPageViews", "3")])]);

        // 100 * 3 / 20 = 15, and an empty wikipedia value earns no flat credit
        assert_eq!(number_of_users_estimate(&concept, &engine()), Value::Int(15));
    }

    #[test]
    fn test_jobs_discounts_skill_listings() {
        let concept = Concept::new(vec![
            Node::block("linkedInSkill", vec![Node::leaf("2018", "999999"), Node::leaf("2020", "12340")]),
            Node::block("indeedJobs", vec![Node::leaf("2017", "300"), Node::leaf("2022", "200")]),
        ]);

        // round(123.4) + 200
        assert_eq!(number_of_jobs_estimate(&concept, &engine()), Value::Int(323));
    }

    #[test]
    fn test_huge_counts_saturate() {
        let huge = i64::MAX.to_string();
        let concept = Concept::new(vec![
            Node::leaf("id", "everywhere"),
            Node::block("linkedInSkill", vec![Node::leaf("2020", huge.as_str())]),
            Node::block(
                "subreddit",
                vec![Node::block("memberCount", vec![Node::leaf("2020", huge.as_str())])],
            ),
            Node::leaf("githubRepo", "https://github.com/every/where")
                .with_children(vec![Node::leaf("stars", "99999999999999999999")]),
            Node::block("indeedJobs", vec![Node::leaf("2020", huge.as_str())]),
        ]);

        assert_eq!(number_of_users_estimate(&concept, &engine()), Value::Int(i64::MAX));
        assert_eq!(number_of_jobs_estimate(&concept, &engine()), Value::Int(i64::MAX));

        let engine = RankingEngine::new(vec![concept], EngineSettings::default()).unwrap();
        let record = engine.ranks().by_id("everywhere").unwrap();
        assert_eq!((record.jobs, record.users), (i64::MAX, i64::MAX));
        assert_eq!(record.index, 1);
    }

    #[test]
    fn test_signal_table_override() {
        let table = SignalTable::default().with_rule("website", SignalRule::Flat(5.0));
        let concept = Concept::new(vec![Node::leaf("website", "https://example.org")]);

        assert_eq!(table.score(&concept), 5.0);
        assert_eq!(table.entries().len(), SignalTable::default().entries().len());
    }
}
