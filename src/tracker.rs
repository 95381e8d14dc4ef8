mod centroid_tracker;
mod compliance_state;
pub mod matching;
mod rect;
mod track;

pub use centroid_tracker::{Association, CentroidTracker, TrackerConfig};
pub use compliance_state::ComplianceState;
pub use matching::AssignmentResult;
pub use rect::{Point, Rect};
pub use track::{Track, TrackId};
