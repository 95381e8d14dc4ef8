//! Centroid tracker for hand identities.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::tracker::matching::{self, AssignmentResult};
use crate::tracker::rect::Point;
use crate::tracker::track::{Track, TrackId};

/// How existing tracks are paired with incoming centroids.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Association {
    /// One-pass greedy nearest neighbour without a distance gate.
    #[default]
    Greedy,
    /// Globally optimal matching; pairs farther apart than `max_distance` are rejected.
    Optimal { max_distance: f32 },
}

/// Configuration for the CentroidTracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// A track is removed once it has gone unmatched for more than this many frames.
    pub max_missed: u32,
    pub association: Association,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_missed: 30,
            association: Association::Greedy,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if let Association::Optimal { max_distance } = self.association {
            if !(max_distance.is_finite() && max_distance > 0.0) {
                return Err(Error::invalid_config(format!(
                    "max_distance must be a positive finite number, got {max_distance}"
                )));
            }
        }
        Ok(())
    }
}

/// Owns every hand track and the id counter.
///
/// Tracks live in a `BTreeMap`, so iteration is by ascending id, which is
/// also creation order since ids are never reused.
#[derive(Debug, Clone)]
pub struct CentroidTracker {
    tracks: BTreeMap<TrackId, Track>,
    next_id: TrackId,
    frame_count: u64,
    config: TrackerConfig,
}

impl CentroidTracker {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tracks: BTreeMap::new(),
            next_id: 1,
            frame_count: 0,
            config,
        })
    }

    /// Incorporate one frame of hand centroids and return the live track positions.
    pub fn update(&mut self, centroids: &[Point]) -> BTreeMap<TrackId, Point> {
        self.frame_count += 1;

        if centroids.is_empty() {
            let ids: Vec<TrackId> = self.tracks.keys().copied().collect();
            for id in ids {
                self.miss(id);
            }
        } else if self.tracks.is_empty() {
            for &c in centroids {
                self.register(c);
            }
        } else {
            self.associate(centroids);
        }

        self.positions()
    }

    fn associate(&mut self, centroids: &[Point]) {
        let ids: Vec<TrackId> = self.tracks.keys().copied().collect();
        let track_points: Vec<Point> = self
            .tracks
            .values()
            .map(|t| t.centroid)
            .collect();
        let dists = matching::euclidean_distance(&track_points, centroids);

        let AssignmentResult {
            matches,
            unmatched_tracks,
            unmatched_detections,
        } = match self.config.association {
            Association::Greedy => matching::greedy_assignment(&dists),
            Association::Optimal { max_distance } => {
                matching::linear_assignment(&dists, max_distance)
            }
        };

        for (row, col) in matches {
            if let Some(track) = self.tracks.get_mut(&ids[row]) {
                track.update(centroids[col]);
            }
        }

        for col in unmatched_detections {
            self.register(centroids[col]);
        }

        for row in unmatched_tracks {
            self.miss(ids[row]);
        }
    }

    fn register(&mut self, centroid: Point) -> TrackId {
        let id = self.next_id;
        self.next_id += 1;
        self.tracks.insert(id, Track::new(id, centroid));
        tracing::debug!(
            track_id = id,
            x = centroid.x,
            y = centroid.y,
            "registered track"
        );
        id
    }

    fn miss(&mut self, id: TrackId) {
        let Some(track) = self.tracks.get_mut(&id) else {
            return;
        };
        track.mark_missed();
        if track.is_expired(self.config.max_missed) {
            self.tracks.remove(&id);
            tracing::debug!(
                track_id = id,
                "removed track after {} missed frames",
                self.config.max_missed + 1
            );
        }
    }

    /// Current position of every live track.
    pub fn positions(&self) -> BTreeMap<TrackId, Point> {
        self.tracks.iter().map(|(&id, t)| (id, t.centroid)).collect()
    }

    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn tracks_mut(&mut self) -> impl Iterator<Item = &mut Track> {
        self.tracks.values_mut()
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Id the next registered track will receive.
    pub fn next_id(&self) -> TrackId {
        self.next_id
    }

    /// Number of frames passed to [`CentroidTracker::update`] so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}
