use crate::dto::Record;
use log::{debug, warn};
use std::collections::BTreeMap;

/// Lower-cased first character of the given name. An empty given name maps to
/// the empty key, so those records form their own cluster.
pub fn blocking_key(record: &Record) -> String {
    record
        .given_name
        .chars()
        .next()
        .map(|ch| ch.to_lowercase().collect())
        .unwrap_or_default()
}

///
/// Groups records by blocking key so that only records in the same group are
/// ever compared.
///
/// Groups iterate in key order and keep the input order of their members. The
/// caller's slice is left untouched.
///
pub fn cluster(records: &[Record]) -> BTreeMap<String, Vec<&Record>> {
    let mut clusters: BTreeMap<String, Vec<&Record>> = BTreeMap::new();
    for record in records {
        clusters.entry(blocking_key(record)).or_default().push(record);
    }
    if let Some(unnamed) = clusters.get("") {
        warn!(
            "{} record(s) have an empty given name and are only compared with each other",
            unnamed.len()
        );
    }
    debug!(
        "Built {} clusters from {} records",
        clusters.len(),
        records.len()
    );
    clusters
}
