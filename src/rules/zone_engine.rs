//! Per-track scooper compliance state machine.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::tracker::{ComplianceState, Point, Rect, Track, TrackId};

/// Tunables for the rule engine.
#[derive(Debug, Clone)]
pub struct RuleConfig {
    /// A scooper counts as "in hand" when both axis offsets to the hand are strictly below this.
    pub proximity: f32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self { proximity: 20.0 }
    }
}

impl RuleConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.proximity.is_finite() && self.proximity > 0.0) {
            return Err(Error::invalid_config(format!(
                "proximity must be a positive finite number, got {}",
                self.proximity
            )));
        }
        Ok(())
    }
}

/// A hand touched a pizza container without using a scooper in the zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViolationEvent {
    pub track_id: TrackId,
    pub frame_id: u64,
}

/// Applies the scooper rule to every live track, once per frame.
#[derive(Debug, Clone)]
pub struct ZoneRuleEngine {
    zones: Vec<Rect>,
    config: RuleConfig,
}

impl ZoneRuleEngine {
    pub fn new(zones: Vec<Rect>, config: RuleConfig) -> Result<Self> {
        if zones.is_empty() {
            return Err(Error::MissingZoneConfiguration);
        }
        if let Some((i, zone)) = zones.iter().enumerate().find(|(_, z)| !z.is_valid()) {
            return Err(Error::invalid_config(format!(
                "zone {i} has invalid geometry: {zone:?}"
            )));
        }
        config.validate()?;
        Ok(Self { zones, config })
    }

    pub fn zones(&self) -> &[Rect] {
        &self.zones
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    pub fn in_zone(&self, p: &Point) -> bool {
        self.zones.iter().any(|z| z.contains_strict(p))
    }

    fn near_scooper(&self, p: &Point, scoopers: &[Point]) -> bool {
        let r = self.config.proximity;
        scoopers
            .iter()
            .any(|s| (p.x - s.x).abs() < r && (p.y - s.y).abs() < r)
    }

    /// Advance one track's state machine. Returns true when the track violated the rule.
    pub fn step(&self, track: &mut Track, scoopers: &[Point], pizzas: &[Rect]) -> bool {
        let c = track.centroid;
        match track.state {
            ComplianceState::Idle => {
                if self.in_zone(&c) {
                    track.enter_zone();
                    tracing::debug!(track_id = track.track_id, "hand entered zone");
                }
                false
            }
            ComplianceState::InZone => {
                if self.in_zone(&c) && self.near_scooper(&c, scoopers) {
                    track.mark_scooper_seen();
                }
                if pizzas.iter().any(|p| p.contains_strict(&c)) {
                    !track.leave_zone()
                } else {
                    false
                }
            }
        }
    }

    /// Run the rule over every track for one frame, in the order given.
    pub fn evaluate<'a>(
        &self,
        frame_id: u64,
        tracks: impl IntoIterator<Item = &'a mut Track>,
        scoopers: &[Point],
        pizzas: &[Rect],
    ) -> Vec<ViolationEvent> {
        let mut events = Vec::new();
        for track in tracks {
            if self.step(track, scoopers, pizzas) {
                tracing::info!(
                    track_id = track.track_id,
                    frame_id,
                    "pizza touched without scooper"
                );
                events.push(ViolationEvent {
                    track_id: track.track_id,
                    frame_id,
                });
            }
        }
        events
    }
}
