use fnv::FnvHashMap;
use sprs::{CsMat, TriMat};
use tracing::debug;

use crate::types::{CheckIn, NetworkType};

/// Per-user venue profiles over a fixed user population, built once from a
/// batch of check-in records and immutable afterwards.
///
/// External identifiers are interned to dense indices in first-appearance
/// order. Per user the ordered visit sequence is kept (revisits included),
/// alongside a sparse user×venue visit-count matrix and its transpose, the
/// venue→visitors index that the graph builder and the similarity ranker
/// walk instead of comparing all user pairs.
pub struct VenueProfiles {
    network_type: NetworkType,
    user_ids: Vec<u64>,
    user_indices: FnvHashMap<u64, u32>,
    venue_names: Vec<String>,
    sequences: Vec<Vec<u32>>,
    visit_counts: CsMat<u32>,
    visitors: CsMat<u32>,
}

impl VenueProfiles {
    /// Builds profiles from check-in records. The profile key of each
    /// record is its venue id for [`NetworkType::Colocation`] and its
    /// venue category id for [`NetworkType::Taste`]. Every distinct user
    /// in the records gets a profile.
    pub fn build(records: &[CheckIn], network_type: NetworkType) -> Self {
        let mut grouped: Vec<(u64, Vec<&str>)> = Vec::new();
        let mut slots: FnvHashMap<u64, usize> = FnvHashMap::default();

        for record in records {
            let slot = *slots.entry(record.user_id).or_insert_with(|| {
                grouped.push((record.user_id, Vec::new()));
                grouped.len() - 1
            });
            grouped[slot].1.push(network_type.key(record));
        }

        Self::from_sequences(&grouped, network_type)
    }

    /// Builds profiles from an explicit `user → venue sequence` mapping.
    /// Sequences keep their order and multiplicity; empty sequences are
    /// allowed and produce an isolated user.
    pub fn from_sequences<S: AsRef<str>>(
        profiles: &[(u64, Vec<S>)],
        network_type: NetworkType,
    ) -> Self {
        let mut user_ids = Vec::new();
        let mut user_indices = FnvHashMap::default();
        let mut venue_names: Vec<String> = Vec::new();
        let mut venue_indices: FnvHashMap<String, u32> = FnvHashMap::default();
        let mut sequences: Vec<Vec<u32>> = Vec::new();

        for (user_id, venues) in profiles {
            let user = *user_indices.entry(*user_id).or_insert_with(|| {
                user_ids.push(*user_id);
                sequences.push(Vec::new());
                (user_ids.len() - 1) as u32
            });

            for venue in venues {
                let venue = match venue_indices.get(venue.as_ref()) {
                    Some(&index) => index,
                    None => {
                        let index = venue_names.len() as u32;
                        venue_names.push(venue.as_ref().to_owned());
                        venue_indices.insert(venue.as_ref().to_owned(), index);
                        index
                    }
                };
                sequences[user as usize].push(venue);
            }
        }

        let mut triplets = TriMat::new((user_ids.len(), venue_names.len()));
        for (user, sequence) in sequences.iter().enumerate() {
            for &venue in sequence {
                triplets.add_triplet(user, venue as usize, 1u32);
            }
        }
        // Duplicate triplets are summed, so matrix entries are visit counts.
        let visit_counts: CsMat<u32> = triplets.to_csr();

        let mut visitors = visit_counts.to_owned();
        visitors.transpose_mut();
        let visitors = visitors.to_csr();

        debug!(
            users = user_ids.len(),
            venues = venue_names.len(),
            network_type = %network_type,
            "built venue profiles"
        );

        Self {
            network_type,
            user_ids,
            user_indices,
            venue_names,
            sequences,
            visit_counts,
            visitors,
        }
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    pub fn num_users(&self) -> usize {
        self.user_ids.len()
    }

    pub fn num_venues(&self) -> usize {
        self.venue_names.len()
    }

    /// External user ids in interning order.
    pub fn user_ids(&self) -> &[u64] {
        &self.user_ids
    }

    pub fn contains_user(&self, user: u64) -> bool {
        self.user_indices.contains_key(&user)
    }

    pub(crate) fn index_of(&self, user: u64) -> Option<u32> {
        self.user_indices.get(&user).copied()
    }

    pub(crate) fn user_id(&self, index: usize) -> u64 {
        self.user_ids[index]
    }

    pub(crate) fn venue_name(&self, index: u32) -> &str {
        &self.venue_names[index as usize]
    }

    pub(crate) fn sequence(&self, index: usize) -> &[u32] {
        &self.sequences[index]
    }

    pub(crate) fn visit_counts(&self) -> &CsMat<u32> {
        &self.visit_counts
    }

    pub(crate) fn visitors(&self) -> &CsMat<u32> {
        &self.visitors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkin(user_id: u64, venue_id: &str, category_id: &str) -> CheckIn {
        CheckIn {
            user_id,
            venue_id: venue_id.to_owned(),
            venue_category_id: category_id.to_owned(),
        }
    }

    #[test]
    fn test_profiles_keep_order_and_revisits() {
        let records = vec![
            checkin(1, "a", "cafe"),
            checkin(2, "b", "bar"),
            checkin(1, "a", "cafe"),
            checkin(1, "c", "park"),
        ];

        let profiles = VenueProfiles::build(&records, NetworkType::Colocation);

        assert_eq!(profiles.num_users(), 2);
        assert_eq!(profiles.num_venues(), 3);
        assert_eq!(profiles.user_ids(), &[1, 2]);

        let user_1 = profiles.index_of(1).unwrap() as usize;
        let names: Vec<&str> = profiles
            .sequence(user_1)
            .iter()
            .map(|&venue| profiles.venue_name(venue))
            .collect();
        assert_eq!(names, vec!["a", "a", "c"]);
    }

    #[test]
    fn test_visit_counts_sum_revisits() {
        let records = vec![
            checkin(1, "a", "cafe"),
            checkin(1, "a", "cafe"),
            checkin(1, "b", "bar"),
        ];

        let profiles = VenueProfiles::build(&records, NetworkType::Colocation);

        let user = profiles.index_of(1).unwrap() as usize;
        let venue_a = 0;
        let venue_b = 1;
        assert_eq!(profiles.visit_counts().get(user, venue_a), Some(&2));
        assert_eq!(profiles.visit_counts().get(user, venue_b), Some(&1));
        assert_eq!(profiles.visitors().get(venue_a, user), Some(&2));
    }

    #[test]
    fn test_taste_profiles_use_category_key() {
        let records = vec![checkin(1, "a", "cafe"), checkin(2, "b", "cafe")];

        let colocation = VenueProfiles::build(&records, NetworkType::Colocation);
        let taste = VenueProfiles::build(&records, NetworkType::Taste);

        assert_eq!(colocation.num_venues(), 2);
        assert_eq!(taste.num_venues(), 1);
    }

    #[test]
    fn test_from_sequences_allows_isolated_users() {
        let profiles = VenueProfiles::from_sequences(
            &[(5, vec!["a"]), (6, Vec::new())],
            NetworkType::Colocation,
        );

        assert_eq!(profiles.num_users(), 2);
        assert!(profiles.contains_user(6));
        let user_6 = profiles.index_of(6).unwrap() as usize;
        assert!(profiles.sequence(user_6).is_empty());
    }

    #[test]
    fn test_empty_batch() {
        let profiles = VenueProfiles::build(&[], NetworkType::Taste);

        assert_eq!(profiles.num_users(), 0);
        assert_eq!(profiles.num_venues(), 0);
        assert!(!profiles.contains_user(1));
    }
}
