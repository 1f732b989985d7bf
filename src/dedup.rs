use crate::cluster::cluster;
use crate::dto::{Accuracy, MatchResult, Record};
use crate::scoring::match_score;
use crate::similarity::SimilarityCache;
use log::{debug, info};
use rayon::prelude::*;

/// Scores at or above this are reported as `High`.
pub const HIGH_ACCURACY_THRESHOLD: f64 = 0.75;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DedupStats {
    pub records: usize,
    pub clusters: usize,
    pub pairs_compared: usize,
    /// Similarity entries computed, summed over every cache used by the run
    pub cache_entries: usize,
}

///
/// Matches found by one duplicate-detection run together with its counters.
///
pub struct DedupRun {
    pub matches: Vec<MatchResult>,
    pub stats: DedupStats,
}

impl DedupRun {
    ///
    /// Compares every pair of records sharing a cluster, one cluster after
    /// another, with a single similarity cache for the whole run.
    ///
    pub fn sequential(records: &[Record]) -> Self {
        let clusters = cluster(records);
        let mut cache = SimilarityCache::new();
        let mut matches = Vec::new();
        for (key, group) in clusters.iter() {
            debug!("Comparing cluster '{key}' of {} records", group.len());
            compare_cluster(group, &mut cache, &mut matches);
        }
        let stats = DedupStats {
            records: records.len(),
            clusters: clusters.len(),
            pairs_compared: matches.len(),
            cache_entries: cache.len(),
        };
        Self::finish(matches, stats)
    }

    ///
    /// Same comparisons as [`DedupRun::sequential`], with clusters scored on the
    /// rayon pool. Each cluster owns its cache; results keep cluster order.
    ///
    /// Pairs and their order match the sequential run. A score can differ only
    /// when an order-sensitive string pair recurs in two clusters in opposite
    /// orders, since no cache is shared between clusters here.
    ///
    pub fn parallel(records: &[Record]) -> Self {
        let clusters = cluster(records);
        let groups: Vec<&Vec<&Record>> = clusters.values().collect();
        let per_cluster: Vec<(Vec<MatchResult>, usize)> = groups
            .par_iter()
            .map(|group| {
                let mut cache = SimilarityCache::new();
                let mut matches = Vec::new();
                compare_cluster(group, &mut cache, &mut matches);
                (matches, cache.len())
            })
            .collect();
        let cache_entries = per_cluster.iter().map(|(_, entries)| entries).sum();
        let matches: Vec<MatchResult> = per_cluster
            .into_iter()
            .flat_map(|(matches, _)| matches)
            .collect();
        let stats = DedupStats {
            records: records.len(),
            clusters: clusters.len(),
            pairs_compared: matches.len(),
            cache_entries,
        };
        Self::finish(matches, stats)
    }

    pub fn high_count(&self) -> usize {
        self.matches
            .iter()
            .filter(|m| m.accuracy == Accuracy::High)
            .count()
    }

    fn finish(matches: Vec<MatchResult>, stats: DedupStats) -> Self {
        let run = DedupRun { matches, stats };
        info!(
            "Compared {} pairs across {} clusters: {} high, {} low",
            run.stats.pairs_compared,
            run.stats.clusters,
            run.high_count(),
            run.stats.pairs_compared - run.high_count()
        );
        run
    }
}

/// Classifies every pair of records that share a blocking key.
pub fn find_potential_duplicates(records: &[Record]) -> Vec<MatchResult> {
    DedupRun::sequential(records).matches
}

pub fn find_potential_duplicates_parallel(records: &[Record]) -> Vec<MatchResult> {
    DedupRun::parallel(records).matches
}

fn compare_cluster(group: &[&Record], cache: &mut SimilarityCache, matches: &mut Vec<MatchResult>) {
    for (idx, a) in group.iter().enumerate() {
        for b in &group[idx + 1..] {
            let score = match_score(a, b, cache);
            matches.push(MatchResult {
                source_id: a.id,
                match_id: b.id,
                accuracy: Accuracy::classify(score),
                score,
            });
        }
    }
}
