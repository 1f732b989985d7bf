//! Ratcliff/Obershelp string similarity with a per-run memo table.

use rustc_hash::FxHashMap;

/// Strings at least this long have their most frequent characters excluded
/// from seeding matches.
const POPULAR_MIN_LEN: usize = 200;

///
/// Memoized similarity scores keyed by unordered string pair.
///
/// A pair is stored under the order in which it was first seen, and a lookup
/// in either order is satisfied by that single entry.
///
#[derive(Debug, Default)]
pub struct SimilarityCache {
    scores: FxHashMap<String, FxHashMap<String, f64>>,
    len: usize,
}

impl SimilarityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.lookup(a, b).or_else(|| self.lookup(b, a))
    }

    pub fn insert(&mut self, a: &str, b: &str, score: f64) {
        if self.get(a, b).is_some() {
            return;
        }
        self.scores
            .entry(a.to_owned())
            .or_default()
            .insert(b.to_owned(), score);
        self.len += 1;
    }

    /// Number of unordered pairs held.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn lookup(&self, a: &str, b: &str) -> Option<f64> {
        self.scores.get(a).and_then(|inner| inner.get(b)).copied()
    }
}

///
/// Similarity of `a` and `b` in [0, 1], served from `cache` when the pair was
/// already scored in either order.
///
pub fn similarity(a: &str, b: &str, cache: &mut SimilarityCache) -> f64 {
    if let Some(score) = cache.get(a, b) {
        return score;
    }
    let score = sequence_ratio(a, b);
    cache.insert(a, b, score);
    score
}

///
/// Twice the number of characters covered by matching blocks, divided by the
/// combined length of both strings. Two empty strings score 1.0.
///
/// The result depends on argument order for some inputs, so callers that need
/// symmetry should go through [`similarity`].
///
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches = SequenceMatcher::new(&a, &b).matching_chars();
    2.0 * matches as f64 / total as f64
}

struct SequenceMatcher<'s> {
    a: &'s [char],
    b: &'s [char],
    /// Positions of each character of `b`, ascending
    b2j: FxHashMap<char, Vec<usize>>,
}

impl<'s> SequenceMatcher<'s> {
    fn new(a: &'s [char], b: &'s [char]) -> Self {
        let mut b2j: FxHashMap<char, Vec<usize>> = FxHashMap::default();
        for (j, &ch) in b.iter().enumerate() {
            b2j.entry(ch).or_default().push(j);
        }
        if b.len() >= POPULAR_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= ntest);
        }
        SequenceMatcher { a, b, b2j }
    }

    /// Total length of the matching blocks found by recursive longest-match splitting.
    fn matching_chars(&self) -> usize {
        let mut total = 0;
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.find_longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                pending.push((i + k, ahi, j + k, bhi));
            }
        }
        total
    }

    /// Longest block with `a[i..i+k] == b[j..j+k]` inside the given window.
    /// Ties go to the smallest `i`, then the smallest `j`.
    fn find_longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);
        let mut j2len: FxHashMap<usize, usize> = FxHashMap::default();
        for i in alo..ahi {
            let mut next_j2len = FxHashMap::default();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_j2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = next_j2len;
        }
        // popular characters never seed a block but may still extend one
        while besti > alo && bestj > blo && self.a[besti - 1] == self.b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && self.a[besti + bestsize] == self.b[bestj + bestsize]
        {
            bestsize += 1;
        }
        (besti, bestj, bestsize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn boundary_cases() {
        assert!(approx(sequence_ratio("abc", "abc"), 1.0));
        assert!(approx(sequence_ratio("", ""), 1.0));
        assert!(approx(sequence_ratio("", "abc"), 0.0));
        assert!(approx(sequence_ratio("abc", ""), 0.0));
        assert!(approx(sequence_ratio("abc", "xyz"), 0.0));
    }

    #[test]
    fn partial_matches() {
        assert!(approx(sequence_ratio("abc", "ab"), 0.8));
        assert!(approx(sequence_ratio("abcd", "bcde"), 0.75));
        assert!(approx(sequence_ratio("Gar", "Garfield"), 6.0 / 11.0));
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert!(approx(sequence_ratio("café", "cafe"), 0.75));
    }

    #[test]
    fn blocks_are_not_subsequences() {
        // "tide" vs "diet": only one block fits once "t" is chosen first
        assert!(approx(sequence_ratio("tide", "diet"), 0.25));
        assert!(approx(sequence_ratio("diet", "tide"), 0.5));
    }

    #[test]
    fn popular_characters_still_extend_blocks() {
        let long = "a".repeat(250);
        assert!(approx(sequence_ratio(&long, &long), 1.0));
    }

    #[test]
    fn cache_serves_either_order_from_one_entry() {
        let mut cache = SimilarityCache::new();
        let first = similarity("tide", "diet", &mut cache);
        let second = similarity("diet", "tide", &mut cache);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
        assert_eq!(similarity("tide", "diet", &mut cache), first);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cache_keeps_first_presented_order() {
        let mut cache = SimilarityCache::new();
        cache.insert("a", "b", 0.5);
        cache.insert("b", "a", 0.9);
        assert_eq!(cache.get("b", "a"), Some(0.5));
        assert_eq!(cache.len(), 1);
        assert!(cache.get("a", "c").is_none());
    }
}
