// Core algorithm exports
pub mod exclusion;
pub mod filters;
pub mod normalize;
pub mod ranker;
pub mod scoring;
pub mod session;

pub use exclusion::ExclusionSet;
pub use filters::{apply_exclusions, is_strong_match, working_set};
pub use normalize::{normalize, labels_match, count_shared, parse_slots, shared_slots};
pub use ranker::Ranker;
pub use scoring::calculate_affinity;
pub use session::RankingSession;
