use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use fnv::FnvHashSet;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::errors::{NetworkError, Result};
use crate::profiles::VenueProfiles;
use crate::row_accumulator::RowAccumulator;
use crate::types::{InteractionEdge, NetworkType};

/// How candidate user pairs are discovered. Both strategies produce the
/// same edge set; they differ only in cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStrategy {
    /// Tests every ordered user pair for profile overlap. Quadratic in the
    /// number of users, parallelized across source users.
    Pairwise,
    /// Enumerates candidates through the venue→visitors index, so only
    /// users that actually share a venue are ever paired.
    #[default]
    CoVisitation,
}

/// Cooperative cancellation flag, checked once per source user during a
/// scan. A cancelled build aborts with [`NetworkError::Cancelled`] and
/// produces no partial output.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Deduplicated undirected edge set over the profile population. An edge
/// `{u, v}` is present iff the two users' profiles share at least one
/// venue under the profiles' network type. No self-loops, each unordered
/// pair at most once, edges sorted by `(source, target)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionGraph {
    network_type: NetworkType,
    edges: Vec<InteractionEdge>,
}

impl InteractionGraph {
    pub fn build(
        profiles: &VenueProfiles,
        strategy: ScanStrategy,
        cancel: &CancelToken,
    ) -> Result<Self> {
        let discovered = match strategy {
            ScanStrategy::Pairwise => pairwise_scan(profiles, cancel)?,
            ScanStrategy::CoVisitation => co_visitation_scan(profiles, cancel)?,
        };

        let mut edges: Vec<InteractionEdge> = discovered.into_iter().collect();
        edges.sort_unstable();

        info!(
            edges = edges.len(),
            users = profiles.num_users(),
            strategy = ?strategy,
            "built interaction graph"
        );

        Ok(Self {
            network_type: profiles.network_type(),
            edges,
        })
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    pub fn edges(&self) -> &[InteractionEdge] {
        &self.edges
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, a: u64, b: u64) -> bool {
        self.edges.binary_search(&InteractionEdge::new(a, b)).is_ok()
    }
}

/// Walks each user's venues and, per venue, the venue's visitor list.
/// Every true edge is discovered twice, once from each endpoint; the
/// canonicalized key collapses both into one entry.
fn co_visitation_scan(
    profiles: &VenueProfiles,
    cancel: &CancelToken,
) -> Result<FnvHashSet<InteractionEdge>> {
    let visit_counts = profiles.visit_counts();
    let visitors = profiles.visitors();

    let indices = visit_counts.indices();
    let indptr = visit_counts.indptr();
    let indices_t = visitors.indices();
    let indptr_t = visitors.indptr();

    let mut accumulator = RowAccumulator::new(profiles.num_users());
    let mut edges = FnvHashSet::default();

    for user in 0..profiles.num_users() {
        if cancel.is_cancelled() {
            return Err(NetworkError::Cancelled);
        }

        for venue_index in indptr.outer_inds_sz(user) {
            for visitor_index in indptr_t.outer_inds_sz(indices[venue_index]) {
                accumulator.add_to(indices_t[visitor_index], 1);
            }
        }

        for (co_visitor, _shared_venues) in accumulator.counts_and_clear() {
            if co_visitor != user {
                edges.insert(InteractionEdge::new(
                    profiles.user_id(user),
                    profiles.user_id(co_visitor),
                ));
            }
        }
    }

    debug!(candidate_edges = edges.len(), "co-visitation scan finished");
    Ok(edges)
}

/// The literal ordered-pair membership scan: for every `(u, v)` with
/// `u != v`, an edge is recorded when some entry of `u`'s sequence occurs
/// in `v`'s profile. Rows are independent and run in parallel.
fn pairwise_scan(
    profiles: &VenueProfiles,
    cancel: &CancelToken,
) -> Result<FnvHashSet<InteractionEdge>> {
    let num_users = profiles.num_users();

    let memberships: Vec<FnvHashSet<u32>> = (0..num_users)
        .map(|user| profiles.sequence(user).iter().copied().collect())
        .collect();

    let per_user: Vec<Vec<InteractionEdge>> = (0..num_users)
        .into_par_iter()
        .map(|user| {
            if cancel.is_cancelled() {
                return Vec::new();
            }

            let mut found = Vec::new();
            for target in 0..num_users {
                if target != user
                    && profiles
                        .sequence(user)
                        .iter()
                        .any(|venue| memberships[target].contains(venue))
                {
                    found.push(InteractionEdge::new(
                        profiles.user_id(user),
                        profiles.user_id(target),
                    ));
                }
            }
            found
        })
        .collect();

    if cancel.is_cancelled() {
        return Err(NetworkError::Cancelled);
    }

    debug!("pairwise scan finished");
    Ok(per_user.into_iter().flatten().collect())
}
