use std::cmp::Ordering;
use crate::models::Candidate;

/// Distance band used to order suggestions nearest-first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GeoZone {
    /// < 180km
    VeryClose,
    /// 180-250km
    Close,
    /// 250-350km
    Medium,
    /// 350-500km
    Far,
    /// >= 500km
    VeryFar,
}

impl GeoZone {
    pub const ALL: [GeoZone; 5] = [
        GeoZone::VeryClose,
        GeoZone::Close,
        GeoZone::Medium,
        GeoZone::Far,
        GeoZone::VeryFar,
    ];

    /// Each band's lower bound is inclusive
    pub fn from_distance(distance_km: f64) -> Self {
        if distance_km < 180.0 {
            GeoZone::VeryClose
        } else if distance_km < 250.0 {
            GeoZone::Close
        } else if distance_km < 350.0 {
            GeoZone::Medium
        } else if distance_km < 500.0 {
            GeoZone::Far
        } else {
            GeoZone::VeryFar
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GeoZone::VeryClose => "<180km",
            GeoZone::Close => "180-250km",
            GeoZone::Medium => "250-350km",
            GeoZone::Far => "350-500km",
            GeoZone::VeryFar => ">=500km",
        }
    }
}

/// Order candidates by distance band first, then by descending compatibility
///
/// Geography strictly dominates score: a far candidate never ranks above a
/// nearer one, whatever their scores.
pub fn partition_by_zone(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    if tracing::enabled!(tracing::Level::DEBUG) {
        let mut counts = [0usize; 5];
        for candidate in &candidates {
            counts[GeoZone::from_distance(candidate.distance_km) as usize] += 1;
        }
        let summary: Vec<String> = GeoZone::ALL
            .iter()
            .zip(counts.iter())
            .map(|(zone, count)| format!("{}={}", zone.label(), count))
            .collect();
        tracing::debug!("Geographic zones: {}", summary.join(", "));
    }

    candidates.sort_by(|a, b| {
        GeoZone::from_distance(a.distance_km)
            .cmp(&GeoZone::from_distance(b.distance_km))
            .then_with(|| {
                b.compatibility_score
                    .partial_cmp(&a.compatibility_score)
                    .unwrap_or(Ordering::Equal)
            })
    });

    candidates
}
