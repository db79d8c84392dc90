// Unit tests for Matcha Discovery

use chrono::NaiveDate;
use matcha_discovery::core::{
    calculate_age, calculate_compatibility, canonical_tag_name, count_common_tags,
    distance::haversine_distance, has_all_tags, is_compatible_orientation, is_profile_complete,
    matches_search_filters, paginate, partition_by_zone, sort_candidates, GeoZone,
};
use matcha_discovery::models::{
    Candidate, Gender, Photo, Profile, ScoringWeights, SearchFilters, SexualPreference, SortKey,
    SortOrder, Tag, UserIdentity,
};

fn complete_profile(id: i64, gender: Gender, pref: SexualPreference) -> Profile {
    Profile {
        user_id: id,
        gender,
        sexual_preference: pref,
        biography: "Loves hiking".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1996, 4, 12),
        latitude: 45.76,
        longitude: 4.84,
        location_name: Some("Lyon".to_string()),
        fame_rating: 30,
        tags: vec![Tag::new(1, "#hiking")],
        photos: vec![Photo {
            id: 1,
            file_path: "/uploads/1.jpg".to_string(),
            is_profile: true,
        }],
    }
}

fn candidate(id: i64, distance_km: f64, score: f64) -> Candidate {
    Candidate {
        profile: complete_profile(id, Gender::Female, SexualPreference::Bisexual),
        user: UserIdentity {
            id,
            username: format!("user{}", id),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
        },
        distance_km,
        common_tags: 1,
        age: 28,
        compatibility_score: score,
    }
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(45.76, 4.84, 45.76, 4.84);
    assert!(distance < 0.01);
}

#[test]
fn test_haversine_distance_lyon_to_marseille() {
    // Lyon to Marseille is approximately 280 km as the crow flies
    let distance = haversine_distance(45.7640, 4.8357, 43.2965, 5.3698);
    assert!(distance > 270.0 && distance < 290.0, "got {}", distance);
    assert_eq!(GeoZone::from_distance(distance), GeoZone::Medium);
}

#[test]
fn test_zone_boundaries() {
    assert_eq!(GeoZone::from_distance(179.9), GeoZone::VeryClose);
    assert_eq!(GeoZone::from_distance(180.0), GeoZone::Close);
    assert_eq!(GeoZone::from_distance(250.0), GeoZone::Medium);
    assert_eq!(GeoZone::from_distance(350.0), GeoZone::Far);
    assert_eq!(GeoZone::from_distance(500.0), GeoZone::VeryFar);
}

#[test]
fn test_profile_completeness() {
    let profile = complete_profile(1, Gender::Male, SexualPreference::Heterosexual);
    assert!(is_profile_complete(&profile));

    let mut missing_pref = profile.clone();
    missing_pref.sexual_preference = SexualPreference::Unspecified;
    assert!(!is_profile_complete(&missing_pref));

    assert!(!is_profile_complete(&Profile::empty(2)));
}

#[test]
fn test_orientation_matrix() {
    let straight_man = complete_profile(1, Gender::Male, SexualPreference::Heterosexual);
    let straight_woman = complete_profile(2, Gender::Female, SexualPreference::Heterosexual);
    let gay_man = complete_profile(3, Gender::Male, SexualPreference::Homosexual);
    let bi_woman = complete_profile(4, Gender::Female, SexualPreference::Bisexual);
    let bi_man = complete_profile(5, Gender::Male, SexualPreference::Bisexual);

    assert!(is_compatible_orientation(&straight_man, &straight_woman));
    assert!(is_compatible_orientation(&straight_man, &bi_woman));
    assert!(!is_compatible_orientation(&straight_man, &gay_man));

    assert!(is_compatible_orientation(&gay_man, &bi_man));
    assert!(!is_compatible_orientation(&gay_man, &straight_man));
    assert!(!is_compatible_orientation(&gay_man, &bi_woman));

    // A bisexual viewer still needs the candidate to accept them
    assert!(is_compatible_orientation(&bi_woman, &straight_man));
    assert!(!is_compatible_orientation(&bi_woman, &straight_woman));
    assert!(is_compatible_orientation(&bi_man, &gay_man));
}

#[test]
fn test_unspecified_preference_counts_as_bisexual() {
    let straight_man = complete_profile(1, Gender::Male, SexualPreference::Heterosexual);
    let open_woman = complete_profile(2, Gender::Female, SexualPreference::Unspecified);

    assert!(is_compatible_orientation(&straight_man, &open_woman));
    assert!(is_compatible_orientation(&open_woman, &straight_man));
}

#[test]
fn test_tag_helpers() {
    let mine = vec![Tag::new(1, "#vegan"), Tag::new(2, "#geek"), Tag::new(3, "#piercing")];
    let theirs = vec![Tag::new(2, "#geek"), Tag::new(4, "#travel"), Tag::new(1, "#vegan")];

    assert_eq!(count_common_tags(&mine, &theirs), 2);
    assert_eq!(canonical_tag_name(" Travel "), "#travel");
    assert!(has_all_tags(&theirs, &["travel".to_string(), "#geek".to_string()]));
    assert!(!has_all_tags(&theirs, &["#piercing".to_string()]));
}

#[test]
fn test_compatibility_components() {
    let weights = ScoringWeights::default();

    // 0.5 * 0.5 + 0.3 * 0.4 + 0.2 * 0.5
    let score = calculate_compatibility(50.0, 2, 50, &weights);
    assert!((score - 0.47).abs() < 1e-9, "got {}", score);

    // Beyond 100km the distance term contributes nothing
    let far = calculate_compatibility(400.0, 0, 0, &weights);
    assert_eq!(far, 0.0);

    // Tag term saturates at five shared tags
    let five = calculate_compatibility(400.0, 5, 0, &weights);
    let nine = calculate_compatibility(400.0, 9, 0, &weights);
    assert!((five - nine).abs() < 1e-9);
}

#[test]
fn test_age_calculation() {
    let birth = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
    assert_eq!(calculate_age(birth, NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()), 33);
    assert_eq!(calculate_age(birth, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()), 34);
}

#[test]
fn test_partition_orders_zones_before_scores() {
    let candidates = vec![
        candidate(1, 600.0, 0.9),
        candidate(2, 10.0, 0.2),
        candidate(3, 200.0, 0.8),
        candidate(4, 20.0, 0.6),
    ];

    let ordered: Vec<i64> = partition_by_zone(candidates)
        .iter()
        .map(|c| c.profile.user_id)
        .collect();
    assert_eq!(ordered, vec![4, 2, 3, 1]);
}

#[test]
fn test_search_filters_and_sort() {
    let mut candidates = vec![candidate(1, 10.0, 0.5), candidate(2, 30.0, 0.7), candidate(3, 90.0, 0.1)];
    candidates[0].age = 40;
    candidates[2].profile.fame_rating = 90;

    let filters = SearchFilters {
        max_age: Some(35),
        max_distance_km: Some(50.0),
        ..SearchFilters::default()
    };
    let kept: Vec<i64> = candidates
        .iter()
        .filter(|c| matches_search_filters(c, &filters))
        .map(|c| c.profile.user_id)
        .collect();
    assert_eq!(kept, vec![2]);

    sort_candidates(&mut candidates, SortKey::Fame, SortOrder::Desc);
    assert_eq!(candidates[0].profile.user_id, 3);

    sort_candidates(&mut candidates, SortKey::Compatibility, SortOrder::Asc);
    let ordered: Vec<i64> = candidates.iter().map(|c| c.profile.user_id).collect();
    assert_eq!(ordered, vec![3, 1, 2]);
}

#[test]
fn test_paginate_past_end_is_empty() {
    let items = vec!["a", "b", "c"];
    assert_eq!(paginate(items.clone(), 2, 2), vec!["c"]);
    assert!(paginate(items, 2, 3).is_empty());
}
