use crate::models::RankRecord;

/// Score a rank pass sorts on, and the field the resulting rank lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankKey {
    Jobs,
    Users,
    Measurements,
}

impl RankKey {
    /// Order in which passes run. Each pass reorders the records, so the
    /// order is part of the tie-break behaviour.
    pub const ORDER: [RankKey; 3] = [RankKey::Jobs, RankKey::Users, RankKey::Measurements];

    pub fn value(self, record: &RankRecord) -> i64 {
        match self {
            RankKey::Jobs => record.jobs,
            RankKey::Users => record.users,
            RankKey::Measurements => record.measurements,
        }
    }

    pub fn rank(self, record: &RankRecord) -> usize {
        match self {
            RankKey::Jobs => record.jobs_rank,
            RankKey::Users => record.users_rank,
            RankKey::Measurements => record.measurements_rank,
        }
    }

    fn set_rank(self, record: &mut RankRecord, rank: usize) {
        match self {
            RankKey::Jobs => record.jobs_rank = rank,
            RankKey::Users => record.users_rank = rank,
            RankKey::Measurements => record.measurements_rank = rank,
        }
    }
}

/// Descending competition ranking on `key`.
///
/// Records are stably sorted ascending and then reversed, so tied records
/// end up in reverse input order. The first record gets rank 0. A record
/// whose value equals the previous distinct value shares its rank; any other
/// record gets its position. `[100, 100, 50]` ranks as `[0, 0, 2]`.
pub fn rank_sort(records: &mut [RankRecord], key: RankKey) {
    records.sort_by_key(|record| key.value(record));
    records.reverse();

    let Some(first) = records.first() else {
        return;
    };
    let mut last_value = key.value(first);
    let mut last_rank = 0;

    for (position, record) in records.iter_mut().enumerate() {
        let value = key.value(record);
        if value == last_value {
            key.set_rank(record, last_rank);
        } else {
            key.set_rank(record, position);
            last_rank = position;
            last_value = value;
        }
    }
}
