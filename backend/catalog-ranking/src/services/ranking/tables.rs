use std::collections::HashMap;

use crate::models::RankRecord;

/// Forward (id -> record) and inverse (rank -> record) views of one ranking
/// pass. Built once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct RankTables {
    /// Records in final order; `records[i].index == i + 1`.
    records: Vec<RankRecord>,
    positions: HashMap<String, usize>,
}

impl RankTables {
    /// Assign dense 1-based indexes in the given order and index by id.
    pub fn from_ordered(mut records: Vec<RankRecord>) -> Self {
        let mut positions = HashMap::with_capacity(records.len());
        for (position, record) in records.iter_mut().enumerate() {
            record.index = position + 1;
            positions.insert(record.id.clone(), position);
        }
        Self { records, positions }
    }

    pub fn by_id(&self, id: &str) -> Option<&RankRecord> {
        self.positions.get(id).map(|&position| &self.records[position])
    }

    /// Inverse lookup; ranks start at 1.
    pub fn by_rank(&self, rank: usize) -> Option<&RankRecord> {
        rank.checked_sub(1).and_then(|position| self.records.get(position))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
