use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// One line of a concept tree: the first word is the key, the rest of the
/// line is the value, indented lines below it are children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    /// Overrides measure-block classification when the exporter knows better.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure: Option<bool>,
}

impl Node {
    pub fn leaf(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn block(key: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            key: key.into(),
            children,
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn with_measure(mut self, measure: bool) -> Self {
        self.measure = Some(measure);
        self
    }

    pub fn child(&self, key: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.key == key)
    }

    /// Comments and blank lines are never measures.
    pub fn is_measure_block(&self) -> bool {
        self.measure
            .unwrap_or_else(|| !self.key.is_empty() && !self.key.starts_with("//"))
    }

    /// Visit this node and every descendant, depth first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// A catalog entry: an ordered list of top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Concept {
    nodes: Vec<Node>,
}

impl Concept {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn id(&self) -> Option<&str> {
        crate::services::accessor::get(self, "id")
    }

    pub fn concept_type(&self) -> Option<&str> {
        crate::services::accessor::get(self, "type")
    }

    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        for node in &self.nodes {
            node.walk(visit);
        }
    }
}

/// Result of evaluating a measure. `Empty` means "not applicable" and renders
/// as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Text(String),
    #[default]
    Empty,
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn int_or_zero(&self) -> i64 {
        self.as_int().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }
}

impl From<Option<i64>> for Value {
    fn from(value: Option<i64>) -> Self {
        value.map(Value::Int).unwrap_or(Value::Empty)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Text(s) => f.write_str(s),
            Value::Empty => Ok(()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Empty => serializer.serialize_str(""),
        }
    }
}

/// Per-concept scores and ranks for one ranking pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankRecord {
    pub id: String,
    pub jobs: i64,
    pub users: i64,
    pub measurements: i64,
    pub jobs_rank: usize,
    pub users_rank: usize,
    pub measurements_rank: usize,
    pub total_rank: usize,
    /// Dense 1-based position after fusion.
    pub index: usize,
}

impl RankRecord {
    pub fn new(id: impl Into<String>, jobs: i64, users: i64, measurements: i64) -> Self {
        Self {
            id: id.into(),
            jobs,
            users,
            measurements,
            ..Default::default()
        }
    }
}

/// Fields handed to report rendering for one concept.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptSummary {
    pub id: String,
    pub rank: usize,
    pub language_rank: Value,
    pub number_of_users_estimate: i64,
    pub number_of_jobs_estimate: i64,
    pub measurements_count: i64,
    pub is_language: i64,
    pub book_count: i64,
    pub paper_count: i64,
    pub last_activity: Value,
}
