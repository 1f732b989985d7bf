use crate::dto::Record;
use crate::similarity::{similarity, SimilarityCache};

pub const EMAIL_WEIGHT: f64 = 0.5;
pub const NAME_WEIGHT: f64 = 0.3;
pub const ADDRESS_WEIGHT: f64 = 0.2;

/// The part of an email address before the first '@', or the whole string
/// when there is none.
pub fn extract_username(email: &str) -> &str {
    email.split('@').next().unwrap_or("")
}

///
/// Weighted likelihood in [0, 1] that two records describe the same contact.
///
/// Identical email strings short-circuit to 1.0. Otherwise the score blends
/// email local part, the mean of given and family name, and address, with
/// every comparison going through `cache`.
///
pub fn match_score(a: &Record, b: &Record, cache: &mut SimilarityCache) -> f64 {
    if a.email == b.email {
        return 1.0;
    }

    let email_sim = similarity(
        extract_username(&a.email),
        extract_username(&b.email),
        cache,
    );
    let given_sim = similarity(&a.given_name, &b.given_name, cache);
    let family_sim = similarity(&a.family_name, &b.family_name, cache);
    let name_sim = (given_sim + family_sim) / 2.0;
    let address_sim = similarity(a.address(), b.address(), cache);

    let score = EMAIL_WEIGHT * email_sim + NAME_WEIGHT * name_sim + ADDRESS_WEIGHT * address_sim;
    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, given: &str, family: &str, email: &str, address: &str) -> Record {
        Record {
            id,
            given_name: given.to_string(),
            family_name: family.to_string(),
            email: email.to_string(),
            address: Some(address.to_string()),
        }
    }

    #[test]
    fn username_extraction() {
        assert_eq!(extract_username("user@domain.com"), "user");
        assert_eq!(extract_username("test@example.com"), "test");
        assert_eq!(extract_username(""), "");
        assert_eq!(extract_username("no-at-sign"), "no-at-sign");
        assert_eq!(extract_username("a@b@c"), "a");
    }

    #[test]
    fn identical_email_scores_one_without_touching_cache() {
        let a = record(1, "Ciara", "French", "same@x.com", "123 Main St");
        let b = record(2, "Zed", "Other", "same@x.com", "Elsewhere");
        let mut cache = SimilarityCache::new();
        assert_eq!(match_score(&a, &b, &mut cache), 1.0);
        assert!(cache.is_empty());
    }

    #[test]
    fn similar_names_and_address_score_high() {
        let a = record(12, "Gar", "Lonpucci", "glonpucci@gmail.com", "123 Main St");
        let b = record(13, "Garfield", "Lonpucci", "glonpucci@outlook.com", "123 Main St");
        let score = match_score(&a, &b, &mut SimilarityCache::new());
        assert!(score >= 0.75);
        assert!(score < 1.0);
    }

    #[test]
    fn weak_coincidence_scores_low() {
        let a = record(5, "C", "French", "mollis.lectus.pede@yahoo.net", "449-6990 Tellus. Rd.");
        let b = record(8, "C", "F", "sociosqu.ad@yahoo.edu", "Ap #963-2867 Nulla St.");
        let score = match_score(&a, &b, &mut SimilarityCache::new());
        assert!(score < 0.7);
    }

    #[test]
    fn absent_fields_stay_in_range() {
        let mut a = record(1, "", "", "", "");
        a.address = None;
        let b = record(2, "", "", "x@y", "");
        let score = match_score(&a, &b, &mut SimilarityCache::new());
        assert!((0.0..=1.0).contains(&score));
        // empty usernames vs "x": 0, names and addresses all empty: 1
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn populates_shared_cache() {
        let a = record(1, "Ann", "Lee", "ann@a.com", "1 Road");
        let b = record(2, "Anne", "Lee", "anne@a.com", "1 Road");
        let mut cache = SimilarityCache::new();
        let first = match_score(&a, &b, &mut cache);
        let entries = cache.len();
        assert_eq!(match_score(&b, &a, &mut cache), first);
        assert_eq!(cache.len(), entries);
    }
}
