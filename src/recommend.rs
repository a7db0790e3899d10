use fnv::FnvHashSet;
use tracing::debug;

use crate::errors::{NetworkError, Result};
use crate::profiles::VenueProfiles;
use crate::similarity::most_similar_users;

pub const DEFAULT_COUNT: usize = 5;

/// Which venues of the most similar user are dropped before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VenueFilter {
    /// Drops venues whose identifier equals the decimal rendering of the
    /// target user's id. Venue identifiers never take that shape in
    /// check-in data, so in practice every venue passes through; kept as
    /// the default for compatibility with the original recommender.
    #[default]
    ByUserId,
    /// Drops venues that already occur in the target user's own visit
    /// sequence.
    ByVisitedVenues,
}

/// Recommends up to `count` venues for `specific_user`, drawn in visit
/// order from the profile of the user at rank 1 of the similarity ranking
/// (rank 0 is normally the self row). The result may be shorter than
/// `count`, or empty when the population has no other user.
pub fn recommend_venues(
    profiles: &VenueProfiles,
    specific_user: u64,
    count: usize,
    filter: VenueFilter,
) -> Result<Vec<String>> {
    if count == 0 {
        return Err(NetworkError::InvalidArgument(
            "recommendation count must be positive".to_owned(),
        ));
    }

    let ranking = most_similar_users(profiles, specific_user)?;
    let most_similar = match ranking.get(1) {
        Some(row) => row.user,
        None => return Ok(Vec::new()),
    };

    let user = profiles
        .index_of(specific_user)
        .ok_or(NetworkError::UnknownUser(specific_user))? as usize;
    let similar = profiles
        .index_of(most_similar)
        .ok_or(NetworkError::UnknownUser(most_similar))? as usize;

    let visited: FnvHashSet<u32> = profiles.sequence(user).iter().copied().collect();
    let user_id_digits = specific_user.to_string();

    let recommendations: Vec<String> = profiles
        .sequence(similar)
        .iter()
        .filter(|&&venue| match filter {
            VenueFilter::ByUserId => profiles.venue_name(venue) != user_id_digits.as_str(),
            VenueFilter::ByVisitedVenues => !visited.contains(&venue),
        })
        .take(count)
        .map(|&venue| profiles.venue_name(venue).to_owned())
        .collect();

    debug!(
        user = specific_user,
        similar_user = most_similar,
        returned = recommendations.len(),
        "recommended venues"
    );

    Ok(recommendations)
}
