//! Integration module for connecting object detection backends with the
//! compliance engine.
//!
//! The detector itself is a black box behind [`DetectionSource`]; this module
//! turns its labeled boxes into [`DetectionFrame`]s and drives the tracker and
//! rule engine one frame at a time.

mod builder;
mod detection;
mod detector;
mod pipeline;
mod replay;

pub use builder::DetectionBuilder;
pub use detection::{Detection, DetectionClass, DetectionFrame};
pub use detector::DetectionSource;
pub use pipeline::{ComplianceEngine, CompliancePipeline};
pub use replay::{FrameRecord, ReplayStats, replay};
