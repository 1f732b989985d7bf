use crate::dedup::DedupRun;
use crate::error::DedupError;
use serde::Serialize;

/// Counters and stage timings for one invocation, printed as JSON on request.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub records: usize,
    pub clusters: usize,
    pub pairs_compared: usize,
    pub high: usize,
    pub low: usize,
    pub cache_entries: usize,
    pub read_secs: f64,
    pub dedup_secs: f64,
    pub write_secs: f64,
    pub total_secs: f64,
}

impl RunSummary {
    pub fn from_run(run: &DedupRun) -> Self {
        let high = run.high_count();
        RunSummary {
            records: run.stats.records,
            clusters: run.stats.clusters,
            pairs_compared: run.stats.pairs_compared,
            high,
            low: run.stats.pairs_compared - high,
            cache_entries: run.stats.cache_entries,
            ..Default::default()
        }
    }

    pub fn to_json(&self) -> Result<String, DedupError> {
        serde_json::to_string_pretty(self).map_err(DedupError::io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::Record;

    #[test]
    fn summary_counts_match_run() {
        let records: Vec<Record> = [(1, "a@x"), (2, "a@x"), (3, "zzz@q")]
            .iter()
            .map(|&(id, email)| Record {
                id,
                given_name: "Ann".into(),
                family_name: "Lee".into(),
                email: email.into(),
                address: None,
            })
            .collect();
        let run = DedupRun::sequential(&records);
        let summary = RunSummary::from_run(&run);
        assert_eq!(summary.records, 3);
        assert_eq!(summary.clusters, 1);
        assert_eq!(summary.pairs_compared, 3);
        assert_eq!(summary.high + summary.low, 3);
        let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        assert_eq!(json["pairsCompared"], 3);
    }
}
