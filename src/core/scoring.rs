use crate::models::ScoringWeights;

/// Distance at which the distance term reaches zero
const MAX_SCORED_DISTANCE_KM: f64 = 100.0;
/// Number of shared tags that saturates the tag term
const MAX_SCORED_COMMON_TAGS: f64 = 5.0;
/// Top of the fame rating scale
const MAX_FAME_RATING: f64 = 100.0;

/// Calculate the compatibility score of a candidate for a viewer
///
/// Scoring formula, each term normalised to [0, 1] before weighting:
/// score = (
///     distance_score * 0.5 +     # 1 at 0km, 0 from 100km on
///     tag_score * 0.3 +          # saturates at 5 shared tags
///     fame_score * 0.2           # fame rating / 100
/// )
///
/// The sum itself is not clamped, so a fame rating above 100 can push the
/// score slightly past 1.
pub fn calculate_compatibility(
    distance_km: f64,
    common_tags: usize,
    fame_rating: i32,
    weights: &ScoringWeights,
) -> f64 {
    distance_score(distance_km) * weights.distance
        + tag_score(common_tags) * weights.tags
        + fame_score(fame_rating) * weights.fame
}

#[inline]
fn distance_score(distance_km: f64) -> f64 {
    (1.0 - distance_km / MAX_SCORED_DISTANCE_KM).max(0.0)
}

#[inline]
fn tag_score(common_tags: usize) -> f64 {
    (common_tags as f64 / MAX_SCORED_COMMON_TAGS).min(1.0)
}

#[inline]
fn fame_score(fame_rating: i32) -> f64 {
    fame_rating as f64 / MAX_FAME_RATING
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_candidate_scores_one() {
        let score = calculate_compatibility(0.0, 5, 100, &ScoringWeights::default());
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance_score() {
        assert_eq!(distance_score(0.0), 1.0);
        assert!((distance_score(50.0) - 0.5).abs() < 1e-9);
        assert_eq!(distance_score(100.0), 0.0);
        assert_eq!(distance_score(344.0), 0.0);
    }

    #[test]
    fn test_tag_score_saturates() {
        assert_eq!(tag_score(0), 0.0);
        assert!((tag_score(3) - 0.6).abs() < 1e-9);
        assert_eq!(tag_score(5), 1.0);
        assert_eq!(tag_score(12), 1.0);
    }

    #[test]
    fn test_fame_above_scale_is_not_clamped() {
        let weights = ScoringWeights::default();
        let score = calculate_compatibility(0.0, 5, 150, &weights);
        assert!(score > 1.0);
    }

    #[test]
    fn test_monotonicity() {
        let weights = ScoringWeights::default();

        let mut previous = f64::INFINITY;
        for km in [0.0, 1.0, 10.0, 50.0, 99.0, 100.0, 500.0] {
            let score = calculate_compatibility(km, 2, 40, &weights);
            assert!(score <= previous);
            previous = score;
        }

        let mut previous = f64::NEG_INFINITY;
        for tags in 0..8 {
            let score = calculate_compatibility(20.0, tags, 40, &weights);
            assert!(score >= previous);
            previous = score;
        }

        let mut previous = f64::NEG_INFINITY;
        for fame in [0, 10, 50, 99, 100] {
            let score = calculate_compatibility(20.0, 2, fame, &weights);
            assert!(score >= previous);
            previous = score;
        }
    }
}
