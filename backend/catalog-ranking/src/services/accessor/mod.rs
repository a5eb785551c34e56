//! Attribute Accessor
//!
//! Reads attributes off a concept tree. A path is a space-separated list of
//! keys, e.g. `"githubRepo stars"`. Each step takes the first child with a
//! matching key. A missing step is not an error: lookups return `None` and
//! the numeric helpers return 0.

use crate::models::{Concept, Node};
use crate::utils::{int_or_zero, parse_leading_int};

/// Node at `path`, if every step exists.
pub fn node<'a>(concept: &'a Concept, path: &str) -> Option<&'a Node> {
    let mut keys = path.split_whitespace();
    let first = keys.next()?;
    let mut current = concept.nodes().iter().find(|node| node.key == first)?;

    for key in keys {
        current = current.child(key)?;
    }

    Some(current)
}

/// Value at `path`. A node without a value reads as absent.
pub fn get<'a>(concept: &'a Concept, path: &str) -> Option<&'a str> {
    node(concept, path)
        .and_then(|node| node.value.as_deref())
        .filter(|value| !value.is_empty())
}

/// Number of children under `path`, `None` when the node is absent.
pub fn child_count(concept: &Concept, path: &str) -> Option<usize> {
    node(concept, path).map(|node| node.children.len())
}

/// Leading integer at `path`, 0 when absent or non-numeric.
pub fn int(concept: &Concept, path: &str) -> i64 {
    int_or_zero(get(concept, path))
}

/// Value recorded under the largest integer child key of `path`.
///
/// `linkedInSkill { 2019: 40, 2021: 55 }` -> 55. Returns 0 when the block is
/// absent, has no integer keys, or the latest value is non-numeric. When a
/// key repeats, the last occurrence wins.
pub fn most_recent_int(concept: &Concept, path: &str) -> i64 {
    let Some(block) = node(concept, path) else {
        return 0;
    };

    block
        .children
        .iter()
        .filter_map(|child| parse_leading_int(&child.key).map(|key| (key, child)))
        .max_by_key(|(key, _)| *key)
        .map(|(_, child)| int_or_zero(child.value.as_deref()))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Concept {
        Concept::new(vec![
            Node::leaf("id", "python"),
            Node::leaf("type", "pl"),
            Node::leaf("githubRepo", "https://github.com/python/cpython")
                .with_children(vec![Node::leaf("stars", "50000"), Node::leaf("forks", "n/a")]),
            Node::block(
                "subreddit",
                vec![Node::block(
                    "memberCount",
                    vec![Node::leaf("2022", "900"), Node::leaf("2017", "1200")],
                )],
            ),
            Node::block(
                "linkedInSkill",
                vec![Node::leaf("2019", "40"), Node::leaf("2021", "55")],
            ),
            Node::block("goodreads", vec![]),
        ])
    }

    #[test]
    fn test_get_flat_and_nested() {
        let concept = sample();

        assert_eq!(get(&concept, "id"), Some("python"));
        assert_eq!(get(&concept, "githubRepo stars"), Some("50000"));
        assert_eq!(get(&concept, "githubRepo watchers"), None);
        assert_eq!(get(&concept, "missing stars"), None);
        assert_eq!(get(&concept, ""), None);
    }

    #[test]
    fn test_block_without_value_reads_as_absent() {
        let concept = sample();

        assert_eq!(get(&concept, "goodreads"), None);
        assert!(node(&concept, "goodreads").is_some());
        assert_eq!(child_count(&concept, "goodreads"), Some(0));
        assert_eq!(child_count(&concept, "isbndb"), None);
    }

    #[test]
    fn test_int_defaults_to_zero() {
        let concept = sample();

        assert_eq!(int(&concept, "githubRepo stars"), 50000);
        assert_eq!(int(&concept, "githubRepo forks"), 0);
        assert_eq!(int(&concept, "meetup members"), 0);
    }

    #[test]
    fn test_most_recent_uses_latest_year_not_largest_value() {
        let concept = sample();

        assert_eq!(most_recent_int(&concept, "linkedInSkill"), 55);
        assert_eq!(most_recent_int(&concept, "subreddit memberCount"), 900);
        assert_eq!(most_recent_int(&concept, "indeedJobs"), 0);
    }

    #[test]
    fn test_most_recent_ignores_non_year_keys() {
        let concept = Concept::new(vec![Node::block(
            "indeedJobs",
            vec![Node::leaf("note", "999"), Node::leaf("2020", "12")],
        )]);

        assert_eq!(most_recent_int(&concept, "indeedJobs"), 12);
    }
}
