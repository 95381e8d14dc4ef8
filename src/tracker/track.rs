//! Single hand track for centroid tracking.

use crate::tracker::compliance_state::ComplianceState;
use crate::tracker::rect::Point;

/// Stable identity of a hand track. Assigned monotonically, never reused.
pub type TrackId = u64;

/// Single hand track.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Unique track identifier
    pub track_id: TrackId,
    /// Last known position
    pub centroid: Point,
    /// Current compliance state
    pub state: ComplianceState,
    /// Whether a scooper was near the hand during the current episode.
    /// Only meaningful while `state` is `InZone`.
    pub scooper_seen: bool,
    /// Consecutive frames without a matching detection
    pub missed_frames: u32,
}

impl Track {
    pub fn new(track_id: TrackId, centroid: Point) -> Self {
        Self {
            track_id,
            centroid,
            state: ComplianceState::Idle,
            scooper_seen: false,
            missed_frames: 0,
        }
    }

    /// Bind the track to a new detection.
    pub fn update(&mut self, centroid: Point) {
        self.centroid = centroid;
        self.missed_frames = 0;
    }

    pub fn mark_missed(&mut self) {
        self.missed_frames = self.missed_frames.saturating_add(1);
    }

    pub fn is_expired(&self, max_missed: u32) -> bool {
        self.missed_frames > max_missed
    }

    /// Start a fresh compliance episode.
    pub fn enter_zone(&mut self) {
        self.state = ComplianceState::InZone;
        self.scooper_seen = false;
    }

    pub fn mark_scooper_seen(&mut self) {
        self.scooper_seen = true;
    }

    /// End the current episode, returning whether it was compliant.
    pub fn leave_zone(&mut self) -> bool {
        self.state = ComplianceState::Idle;
        self.scooper_seen
    }
}
