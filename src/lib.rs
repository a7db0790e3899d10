//! Co-visitation networks and venue recommendation from location
//! check-ins.
//!
//! Check-in records (`userId`, `venueId`, `venueCategoryId`) are turned
//! into per-user venue profiles, from which the crate derives
//!
//! * an undirected [`InteractionGraph`] connecting users whose profiles
//!   share at least one venue (colocation) or venue category (taste), and
//! * per-user similarity rankings and venue recommendations built on the
//!   same profiles.
//!
//! ```
//! use covisit::{
//!     CancelToken, CheckIn, InteractionGraph, NetworkType, ScanStrategy, VenueProfiles,
//! };
//!
//! let records = vec![
//!     CheckIn { user_id: 1, venue_id: "v1".into(), venue_category_id: "cafe".into() },
//!     CheckIn { user_id: 2, venue_id: "v1".into(), venue_category_id: "cafe".into() },
//!     CheckIn { user_id: 3, venue_id: "v9".into(), venue_category_id: "park".into() },
//! ];
//!
//! let profiles = VenueProfiles::build(&records, NetworkType::Colocation);
//! let graph = InteractionGraph::build(&profiles, ScanStrategy::default(), &CancelToken::new())?;
//!
//! assert_eq!(graph.num_edges(), 1);
//! assert!(graph.contains(1, 2));
//! # Ok::<(), covisit::NetworkError>(())
//! ```

pub mod checkins;
pub mod edgelist;
pub mod errors;
pub mod interaction_graph;
pub mod profiles;
pub mod recommend;
mod row_accumulator;
pub mod similarity;
pub mod types;

pub use crate::checkins::{read_checkins, read_checkins_from_path};
pub use crate::edgelist::{write_edge_list, write_edge_list_to_path};
pub use crate::errors::{NetworkError, Result};
pub use crate::interaction_graph::{CancelToken, InteractionGraph, ScanStrategy};
pub use crate::profiles::VenueProfiles;
pub use crate::recommend::{recommend_venues, VenueFilter, DEFAULT_COUNT};
pub use crate::similarity::most_similar_users;
pub use crate::types::{CheckIn, InteractionEdge, NetworkType, SimilarityRow};
