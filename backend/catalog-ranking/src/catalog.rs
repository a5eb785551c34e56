// Catalog snapshot loading
//
// The exporter writes the catalog as a JSON array of concepts, each concept
// an array of `{key, value, children}` nodes.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::models::Concept;

pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Concept>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let concepts = parse_catalog(&raw)?;

    info!(path = %path.display(), concepts = concepts.len(), "Catalog loaded");
    Ok(concepts)
}

pub fn parse_catalog(raw: &str) -> Result<Vec<Concept>> {
    Ok(serde_json::from_str(raw)?)
}
