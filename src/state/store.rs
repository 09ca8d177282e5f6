// src/state/store.rs
use crate::net::response::ClaimRecord;

/// Counters shown in the dashboard stat boxes.
///
/// `claims_processed` and `anomalies_flagged` accumulate over the session;
/// `forest_percent` always reflects the most recent claim, stored exactly
/// as received and rounded only at display time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashboardStats {
    pub claims_processed: u32,
    pub anomalies_flagged: u32,
    pub forest_percent: f64,
}

/// Single-writer slot for the most recent successful analysis plus the
/// derived stats. Failed uploads never reach this type, so whatever was
/// displayed before an error stays untouched. There is no unset operation;
/// only a newer successful upload replaces the record.
#[derive(Debug, Default)]
pub struct DashboardStore {
    record: Option<ClaimRecord>,
    stats: DashboardStats,
}

impl DashboardStore {
    /// Borrow the current snapshot.
    pub fn current(&self) -> (Option<&ClaimRecord>, DashboardStats) {
        (self.record.as_ref(), self.stats)
    }

    /// The only mutator. Swaps in a fresh successful analysis and
    /// recomputes the stats in the same step.
    pub fn replace(&mut self, record: ClaimRecord) -> DashboardStats {
        self.stats.claims_processed += 1;
        if record
            .analysis
            .as_ref()
            .is_some_and(|analysis| analysis.flagged_as_anomaly)
        {
            self.stats.anomalies_flagged += 1;
        }
        self.stats.forest_percent = record
            .analysis
            .as_ref()
            .map(|analysis| analysis.forest_cover_percent)
            .unwrap_or(0.0);
        self.record = Some(record);
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::response::ClaimAnalysis;

    fn record(name: &str, flagged: bool, percent: f64) -> ClaimRecord {
        ClaimRecord {
            name: name.to_string(),
            village: "X".to_string(),
            area: "2ha".to_string(),
            analysis: Some(ClaimAnalysis {
                flagged_as_anomaly: flagged,
                forest_cover_percent: percent,
                change_map_url: Some("http://127.0.0.1:8000/a.png".to_string()),
            }),
        }
    }

    #[test]
    fn starts_empty_with_zeroed_stats() {
        let store = DashboardStore::default();
        let (record, stats) = store.current();
        assert!(record.is_none());
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn replace_stores_record_and_recomputes_stats() {
        let mut store = DashboardStore::default();
        let stats = store.replace(record("Ram Lal", true, 70.0));

        assert_eq!(stats.claims_processed, 1);
        assert_eq!(stats.anomalies_flagged, 1);
        assert_eq!(stats.forest_percent, 70.0);

        let (stored, _) = store.current();
        let stored = stored.unwrap();
        assert_eq!(stored.name, "Ram Lal");
        assert_eq!(stored.village, "X");
        assert_eq!(stored.area, "2ha");
    }

    #[test]
    fn forest_percent_is_stored_without_transformation() {
        let mut store = DashboardStore::default();
        let stats = store.replace(record("A", false, 63.2));
        assert_eq!(stats.forest_percent, 63.2);
    }

    #[test]
    fn counters_accumulate_over_the_session() {
        let mut store = DashboardStore::default();
        store.replace(record("A", true, 70.0));
        let stats = store.replace(record("B", false, 41.5));

        assert_eq!(stats.claims_processed, 2);
        assert_eq!(stats.anomalies_flagged, 1);
        assert_eq!(stats.forest_percent, 41.5);

        let (stored, _) = store.current();
        assert_eq!(stored.unwrap().name, "B");
    }

    #[test]
    fn missing_analysis_counts_the_claim_but_nothing_else() {
        let mut store = DashboardStore::default();
        let stats = store.replace(ClaimRecord {
            name: "A".to_string(),
            village: "B".to_string(),
            area: "C".to_string(),
            analysis: None,
        });

        assert_eq!(stats.claims_processed, 1);
        assert_eq!(stats.anomalies_flagged, 0);
        assert_eq!(stats.forest_percent, 0.0);
    }
}
