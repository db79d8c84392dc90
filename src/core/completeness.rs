use crate::models::{Gender, Profile, SexualPreference};

/// Check whether a profile carries every field required to take part in discovery
///
/// A profile is complete when gender and preference are set, the biography
/// is not blank, the birth date is known, at least one tag is attached and
/// one photo is flagged as the profile photo.
#[inline]
pub fn is_profile_complete(profile: &Profile) -> bool {
    profile.gender != Gender::Unspecified
        && profile.sexual_preference != SexualPreference::Unspecified
        && !profile.biography.trim().is_empty()
        && profile.birth_date.is_some()
        && !profile.tags.is_empty()
        && profile.photos.iter().any(|photo| photo.is_profile)
}
