use tracing::debug;

use crate::errors::{NetworkError, Result};
use crate::profiles::VenueProfiles;
use crate::row_accumulator::RowAccumulator;
use crate::types::SimilarityRow;

/// Ranks the whole population, the target user included, by overlap with
/// `specific_user`'s profile.
///
/// The overlap with a row's user is the number of entries of
/// `specific_user`'s visit sequence that occur in that user's profile, so
/// revisits in the source sequence count once per visit. The self row
/// always carries the full sequence length and is therefore the usual
/// normalization base for `percentage_overlap`. Rows are ordered by
/// descending overlap, ties by ascending user id.
pub fn most_similar_users(
    profiles: &VenueProfiles,
    specific_user: u64,
) -> Result<Vec<SimilarityRow>> {
    let user = profiles
        .index_of(specific_user)
        .ok_or(NetworkError::UnknownUser(specific_user))? as usize;

    let visit_counts = profiles.visit_counts();
    let visitors = profiles.visitors();

    let data = visit_counts.data();
    let indices = visit_counts.indices();
    let indptr = visit_counts.indptr();
    let indices_t = visitors.indices();
    let indptr_t = visitors.indptr();

    // Credit every visitor of a venue with the venue's multiplicity in the
    // source sequence; the per-user sum is exactly the per-entry overlap.
    let mut accumulator = RowAccumulator::new(profiles.num_users());
    for venue_index in indptr.outer_inds_sz(user) {
        let multiplicity = data[venue_index];
        for visitor_index in indptr_t.outer_inds_sz(indices[venue_index]) {
            accumulator.add_to(indices_t[visitor_index], multiplicity);
        }
    }

    let mut overlap_counts = vec![0u32; profiles.num_users()];
    for (other, count) in accumulator.counts_and_clear() {
        overlap_counts[other] = count;
    }

    let mut rows: Vec<SimilarityRow> = overlap_counts
        .into_iter()
        .enumerate()
        .map(|(index, overlap_count)| SimilarityRow {
            user: profiles.user_id(index),
            overlap_count,
            percentage_overlap: 0.0,
        })
        .collect();

    rows.sort_unstable_by(|a, b| {
        b.overlap_count
            .cmp(&a.overlap_count)
            .then(a.user.cmp(&b.user))
    });

    let top = rows[0].overlap_count;
    if top == 0 {
        return Err(NetworkError::DegenerateProfile(specific_user));
    }

    for row in rows.iter_mut() {
        row.percentage_overlap = round2(row.overlap_count as f64 / top as f64 * 100.0);
    }

    debug!(
        user = specific_user,
        rows = rows.len(),
        top_overlap = top,
        "ranked users by overlap"
    );

    Ok(rows)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NetworkType;

    fn profiles(entries: &[(u64, Vec<&str>)]) -> VenueProfiles {
        VenueProfiles::from_sequences(entries, NetworkType::Taste)
    }

    #[test]
    fn test_overlap_counts_source_entries() {
        let profiles = profiles(&[
            (1, vec!["x", "x", "y"]),
            (2, vec!["x", "y", "y"]),
            (3, vec!["z"]),
        ]);

        let ranking = most_similar_users(&profiles, 1).unwrap();

        assert_eq!(ranking.len(), 3);
        // Both x entries and the y entry of user 1 occur in user 2's
        // profile, so users 1 and 2 tie at the full sequence length.
        assert_eq!(ranking[0].user, 1);
        assert_eq!(ranking[0].overlap_count, 3);
        assert_eq!(ranking[1].user, 2);
        assert_eq!(ranking[1].overlap_count, 3);
        assert_eq!(ranking[2].user, 3);
        assert_eq!(ranking[2].overlap_count, 0);
    }

    #[test]
    fn test_percentages_relative_to_top_row() {
        let profiles = profiles(&[
            (1, vec!["x", "x", "y"]),
            (2, vec!["x"]),
            (3, vec!["q"]),
        ]);

        let ranking = most_similar_users(&profiles, 1).unwrap();

        assert_eq!(ranking[0].user, 1);
        assert_eq!(ranking[0].percentage_overlap, 100.0);
        assert_eq!(ranking[1].user, 2);
        assert_eq!(ranking[1].overlap_count, 2);
        assert_eq!(ranking[1].percentage_overlap, 66.67);
        assert_eq!(ranking[2].percentage_overlap, 0.0);
    }

    #[test]
    fn test_ranking_is_monotonic() {
        let profiles = profiles(&[
            (1, vec!["a", "b", "c", "d"]),
            (2, vec!["a", "b", "c"]),
            (3, vec!["a"]),
            (4, vec!["e"]),
        ]);

        let ranking = most_similar_users(&profiles, 1).unwrap();

        for pair in ranking.windows(2) {
            assert!(pair[0].overlap_count >= pair[1].overlap_count);
        }
        for row in &ranking {
            assert!(row.percentage_overlap >= 0.0 && row.percentage_overlap <= 100.0);
        }
    }

    #[test]
    fn test_unknown_user() {
        let profiles = profiles(&[(1, vec!["x"])]);

        let error = most_similar_users(&profiles, 99).unwrap_err();
        assert!(matches!(error, NetworkError::UnknownUser(99)));
    }

    #[test]
    fn test_isolated_user_is_degenerate() {
        let profiles = profiles(&[(1, Vec::new()), (2, vec!["a"])]);

        let error = most_similar_users(&profiles, 1).unwrap_err();
        assert!(matches!(error, NetworkError::DegenerateProfile(1)));
    }
}
