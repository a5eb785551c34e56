use crate::models::RankRecord;
use crate::services::ranking::sorter::RankKey;

/// Combines per-measure ranks into one total rank by summing the `keep`
/// best (smallest) ranks and dropping the rest.
///
/// With `keep` equal to the number of measures this is a plain sum. A lower
/// `keep` drops each concept's worst measures, which absorbs a single bad
/// data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FusionPolicy {
    keep: usize,
}

impl FusionPolicy {
    pub fn keep_best(keep: usize) -> Self {
        Self { keep }
    }

    pub fn keep(&self) -> usize {
        self.keep
    }

    pub fn fuse(&self, ranks: &[usize]) -> usize {
        let mut sorted = ranks.to_vec();
        sorted.sort_unstable();
        sorted.into_iter().take(self.keep).sum()
    }

    pub fn total_rank(&self, record: &RankRecord) -> usize {
        let ranks = RankKey::ORDER.map(|key| key.rank(record));
        self.fuse(&ranks)
    }
}

impl Default for FusionPolicy {
    fn default() -> Self {
        Self::keep_best(RankKey::ORDER.len())
    }
}
