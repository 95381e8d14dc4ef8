//! Hand tracking and scooper-compliance verdicts for food preparation zones.
//!
//! A hand that enters a configured zone and then touches a pizza container
//! must have had a scooper near it while in the zone. Per frame, detections
//! flow through [`CentroidTracker`] (stable hand identities), then
//! [`ZoneRuleEngine`] (per-track compliance state machine), and the resulting
//! events are folded into a single [`FrameVerdict`].

pub mod config;
pub mod error;
pub mod integration;
pub mod rules;
pub mod tracker;

pub use config::Config;
pub use error::{Error, Result};
pub use integration::{
    ComplianceEngine, CompliancePipeline, Detection, DetectionBuilder, DetectionClass,
    DetectionFrame, DetectionSource, FrameRecord, ReplayStats, replay,
};
pub use rules::{FrameVerdict, RuleConfig, ViolationEvent, ZoneRuleEngine, aggregate};
pub use tracker::{
    Association, CentroidTracker, ComplianceState, Point, Rect, Track, TrackId, TrackerConfig,
};
