use crate::models::{Profile, SexualPreference};

/// Decide whether `candidate` may appear in `viewer`'s results
///
/// Evaluated from the viewer's side only: the result is not guaranteed to be
/// the same with the arguments swapped. An unspecified preference counts as
/// bisexual.
#[inline]
pub fn is_compatible_orientation(viewer: &Profile, candidate: &Profile) -> bool {
    let viewer_pref = effective_preference(viewer.sexual_preference);
    let candidate_pref = effective_preference(candidate.sexual_preference);
    let same_gender = viewer.gender == candidate.gender;

    match viewer_pref {
        SexualPreference::Heterosexual => {
            !same_gender
                && matches!(
                    candidate_pref,
                    SexualPreference::Bisexual | SexualPreference::Heterosexual
                )
        }
        SexualPreference::Homosexual => {
            same_gender
                && matches!(
                    candidate_pref,
                    SexualPreference::Bisexual | SexualPreference::Homosexual
                )
        }
        // Bisexual viewers see whoever would accept them back
        _ => match candidate_pref {
            SexualPreference::Heterosexual => !same_gender,
            SexualPreference::Homosexual => same_gender,
            _ => true,
        },
    }
}

#[inline]
fn effective_preference(pref: SexualPreference) -> SexualPreference {
    match pref {
        SexualPreference::Unspecified => SexualPreference::Bisexual,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn profile(gender: Gender, pref: SexualPreference) -> Profile {
        Profile {
            gender,
            sexual_preference: pref,
            ..Profile::empty(1)
        }
    }

    use Gender::{Female, Male};
    use SexualPreference::{Bisexual, Heterosexual, Homosexual, Unspecified};

    #[test]
    fn test_heterosexual_viewer() {
        let viewer = profile(Male, Heterosexual);
        assert!(is_compatible_orientation(&viewer, &profile(Female, Heterosexual)));
        assert!(is_compatible_orientation(&viewer, &profile(Female, Bisexual)));
        assert!(!is_compatible_orientation(&viewer, &profile(Female, Homosexual)));
        assert!(!is_compatible_orientation(&viewer, &profile(Male, Heterosexual)));
        assert!(!is_compatible_orientation(&viewer, &profile(Male, Bisexual)));
    }

    #[test]
    fn test_homosexual_viewer() {
        let viewer = profile(Female, Homosexual);
        assert!(is_compatible_orientation(&viewer, &profile(Female, Homosexual)));
        assert!(is_compatible_orientation(&viewer, &profile(Female, Bisexual)));
        assert!(!is_compatible_orientation(&viewer, &profile(Female, Heterosexual)));
        assert!(!is_compatible_orientation(&viewer, &profile(Male, Homosexual)));
    }

    #[test]
    fn test_bisexual_viewer() {
        let viewer = profile(Male, Bisexual);
        assert!(is_compatible_orientation(&viewer, &profile(Female, Bisexual)));
        assert!(is_compatible_orientation(&viewer, &profile(Male, Bisexual)));
        assert!(is_compatible_orientation(&viewer, &profile(Female, Heterosexual)));
        assert!(!is_compatible_orientation(&viewer, &profile(Male, Heterosexual)));
        assert!(is_compatible_orientation(&viewer, &profile(Male, Homosexual)));
        assert!(!is_compatible_orientation(&viewer, &profile(Female, Homosexual)));
    }

    #[test]
    fn test_unspecified_preference_counts_as_bisexual() {
        let viewer = profile(Female, Unspecified);
        assert!(is_compatible_orientation(&viewer, &profile(Female, Unspecified)));
        assert!(is_compatible_orientation(&viewer, &profile(Male, Heterosexual)));

        let hetero = profile(Male, Heterosexual);
        assert!(is_compatible_orientation(&hetero, &profile(Female, Unspecified)));
    }

    // Evaluated from the viewer's side; with binary genders every pair is
    // currently mutually visible. A failure here means discoverability has
    // become one-sided.
    #[test]
    fn test_viewer_side_evaluation_is_mutual_for_binary_genders() {
        let a = profile(Male, Bisexual);
        let b = profile(Female, Heterosexual);
        assert_eq!(
            is_compatible_orientation(&a, &b),
            is_compatible_orientation(&b, &a),
            "bisexual/heterosexual pair across genders is mutually visible"
        );

        for viewer_gender in [Male, Female] {
            for candidate_gender in [Male, Female] {
                for vp in [Bisexual, Heterosexual, Homosexual] {
                    for cp in [Bisexual, Heterosexual, Homosexual] {
                        let v = profile(viewer_gender, vp);
                        let c = profile(candidate_gender, cp);
                        assert_eq!(
                            is_compatible_orientation(&v, &c),
                            is_compatible_orientation(&c, &v),
                            "one-sided pair: {:?} vs {:?}",
                            (viewer_gender, vp),
                            (candidate_gender, cp)
                        );
                    }
                }
            }
        }
    }
}
