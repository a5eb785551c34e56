//! Measures read off the shape of a concept tree rather than its numbers.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::models::{Concept, Value};
use crate::services::accessor;
use crate::services::ranking::RankingEngine;
use crate::utils::{parse_leading_int, parse_year};

/// Concept types that are not programming languages. Anything else,
/// including an unknown or missing type, counts as a language.
pub static NON_LANGUAGE_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "vm",
        "linter",
        "library",
        "webApi",
        "characterEncoding",
        "cloud",
        "editor",
        "filesystem",
        "feature",
        "packageManager",
        "os",
        "application",
        "framework",
        "standard",
        "hashFunction",
        "compiler",
        "decompiler",
        "binaryExecutable",
        "binaryDataFormat",
        "equation",
        "interpreter",
        "computingMachine",
        "dataStructure",
    ]
    .into_iter()
    .collect()
});

const BOOK_CATALOGS: [&str; 2] = ["goodreads", "isbndb"];
const PAPER_CATALOGS: [&str; 1] = ["semanticScholar"];
const HOPL_PREFIX: &str = "https://hopl.info/showlanguage.prx?exp=";

pub fn is_language_type(concept_type: Option<&str>) -> bool {
    concept_type.map_or(true, |t| !NON_LANGUAGE_TYPES.contains(t))
}

/// Listing blocks carry one header row, which is not an entry.
fn catalog_entries(concept: &Concept, catalogs: &[&str]) -> i64 {
    catalogs
        .iter()
        .filter_map(|path| accessor::child_count(concept, path))
        .map(|count| count.saturating_sub(1) as i64)
        .sum()
}

pub(crate) fn measurements(concept: &Concept, _engine: &RankingEngine) -> Value {
    let count = concept
        .nodes()
        .iter()
        .filter(|node| node.is_measure_block())
        .count();
    Value::Int(count as i64)
}

pub(crate) fn is_language(concept: &Concept, _engine: &RankingEngine) -> Value {
    Value::Int(i64::from(is_language_type(concept.concept_type())))
}

pub(crate) fn book_count(concept: &Concept, _engine: &RankingEngine) -> Value {
    Value::Int(catalog_entries(concept, &BOOK_CATALOGS))
}

pub(crate) fn paper_count(concept: &Concept, _engine: &RankingEngine) -> Value {
    Value::Int(catalog_entries(concept, &PAPER_CATALOGS))
}

/// Latest year mentioned anywhere: four-digit keys (dated observations)
/// and the `appeared` value.
pub(crate) fn last_activity(concept: &Concept, _engine: &RankingEngine) -> Value {
    let mut latest: Option<i64> = None;
    concept.walk(&mut |node| {
        let year = parse_year(&node.key).or_else(|| match (node.key.as_str(), &node.value) {
            ("appeared", Some(value)) => parse_year(value.trim()),
            _ => None,
        });
        if let Some(year) = year {
            latest = latest.max(Some(year));
        }
    });
    Value::from(latest)
}

pub(crate) fn hopl_id(concept: &Concept, _engine: &RankingEngine) -> Value {
    let id = accessor::get(concept, "hopl").and_then(|url| {
        let raw = url.strip_prefix(HOPL_PREFIX).unwrap_or(url);
        parse_leading_int(raw)
    });
    Value::from(id)
}

pub(crate) fn example_count(concept: &Concept, _engine: &RankingEngine) -> Value {
    let mut count = 0;
    concept.walk(&mut |node| {
        if node.key == "example" || node.key.ends_with("Example") {
            count += 1;
        }
    });
    Value::Int(count)
}
