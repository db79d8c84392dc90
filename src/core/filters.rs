use crate::core::{completeness::is_profile_complete, orientation::is_compatible_orientation};
use crate::models::{Profile, UserIdentity};
use crate::services::{ProfileStore, StoreError, UserStore};

/// A profile that passed every exclusion rule for one viewer
#[derive(Debug, Clone)]
pub struct AdmittedCandidate {
    pub profile: Profile,
    pub user: UserIdentity,
}

/// Check the rules that need nothing but the two profiles
///
/// Stages 1-3 of the candidate pipeline: not the viewer, complete, and
/// orientation-compatible from the viewer's side.
#[inline]
pub fn passes_profile_rules(viewer: &Profile, candidate: &Profile) -> bool {
    candidate.user_id != viewer.user_id
        && is_profile_complete(candidate)
        && is_compatible_orientation(viewer, candidate)
}

/// Check block, like and match relations between viewer and candidate
///
/// Stages 4-6. Returns `Ok(false)` as soon as one relation excludes the
/// candidate, without querying the remaining ones.
pub async fn passes_relationship_rules<P>(
    store: &P,
    viewer_id: i64,
    candidate_id: i64,
) -> Result<bool, StoreError>
where
    P: ProfileStore + ?Sized,
{
    if store.is_blocked(viewer_id, candidate_id).await? {
        return Ok(false);
    }
    if store.has_liked(viewer_id, candidate_id).await? {
        return Ok(false);
    }
    if store.is_matched(viewer_id, candidate_id).await? {
        return Ok(false);
    }
    Ok(true)
}

/// Run the full exclusion pipeline over every profile in the store
///
/// Enumeration is best effort: a store failure while checking relations or
/// loading a candidate's user record drops that candidate only. Calls are
/// issued one after another.
pub async fn collect_candidates<P, U>(
    viewer: &Profile,
    profiles: Vec<Profile>,
    profile_store: &P,
    user_store: &U,
) -> Vec<AdmittedCandidate>
where
    P: ProfileStore + ?Sized,
    U: UserStore + ?Sized,
{
    let total = profiles.len();
    let mut admitted = Vec::new();

    for profile in profiles {
        if !passes_profile_rules(viewer, &profile) {
            continue;
        }

        match passes_relationship_rules(profile_store, viewer.user_id, profile.user_id).await {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                tracing::warn!(
                    "Skipping candidate {} for viewer {}: relationship check failed: {}",
                    profile.user_id,
                    viewer.user_id,
                    e
                );
                continue;
            }
        }

        let user = match user_store.get_user(profile.user_id).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(
                    "Skipping candidate {} for viewer {}: user lookup failed: {}",
                    profile.user_id,
                    viewer.user_id,
                    e
                );
                continue;
            }
        };

        admitted.push(AdmittedCandidate { profile, user });
    }

    tracing::debug!(
        "Admitted {} of {} profiles for viewer {}",
        admitted.len(),
        total,
        viewer.user_id
    );

    admitted
}
