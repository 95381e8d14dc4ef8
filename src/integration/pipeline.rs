//! Frame-by-frame compliance processing.

use crate::config::Config;
use crate::error::Result;
use crate::integration::{DetectionFrame, DetectionSource};
use crate::rules::{FrameVerdict, ZoneRuleEngine};
use crate::tracker::CentroidTracker;

/// Tracker plus rule engine: one detection frame in, one verdict out.
///
/// All track state is owned here and mutated through `&mut self`, so frames
/// are processed strictly one after another.
#[derive(Debug, Clone)]
pub struct ComplianceEngine {
    tracker: CentroidTracker,
    rules: ZoneRuleEngine,
}

impl ComplianceEngine {
    pub fn new(config: Config) -> Result<Self> {
        let Config {
            zones,
            tracker,
            rules,
        } = config;
        Ok(Self {
            tracker: CentroidTracker::new(tracker)?,
            rules: ZoneRuleEngine::new(zones, rules)?,
        })
    }

    /// Update the tracker with this frame's hands, then apply the rule to every live track.
    pub fn process(&mut self, frame: &DetectionFrame) -> FrameVerdict {
        self.tracker.update(&frame.hands);
        let events = self.rules.evaluate(
            frame.frame_id,
            self.tracker.tracks_mut(),
            &frame.scoopers,
            &frame.pizzas,
        );
        let verdict = FrameVerdict::new(frame.frame_id, events);

        tracing::debug!(
            frame_id = frame.frame_id,
            frames_seen = self.tracker.frame_count(),
            hands = frame.hands.len(),
            scoopers = frame.scoopers.len(),
            pizzas = frame.pizzas.len(),
            tracks = self.tracker.len(),
            violation = verdict.violation,
            "frame processed"
        );
        verdict
    }

    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    pub fn rules(&self) -> &ZoneRuleEngine {
        &self.rules
    }
}

/// Runs a detector and the compliance engine on each incoming image.
pub struct CompliancePipeline<D: DetectionSource> {
    detector: D,
    engine: ComplianceEngine,
}

impl<D: DetectionSource> CompliancePipeline<D> {
    pub fn new(detector: D, config: Config) -> Result<Self> {
        Ok(Self {
            detector,
            engine: ComplianceEngine::new(config)?,
        })
    }

    /// Detect objects in one image and return the frame's verdict.
    ///
    /// Malformed detections are logged and skipped; only a detector failure
    /// produces an error.
    pub fn process_frame(
        &mut self,
        frame_id: u64,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<FrameVerdict, D::Error> {
        let detections = self.detector.detect(input, width, height)?;
        let (frame, _dropped) = DetectionFrame::from_detections(frame_id, detections);
        Ok(self.engine.process(&frame))
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    pub fn engine(&self) -> &ComplianceEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::{Detection, DetectionBuilder};
    use crate::tracker::{ComplianceState, Rect};

    struct MockDetector {
        frames: std::vec::IntoIter<Vec<Detection>>,
    }

    impl DetectionSource for MockDetector {
        type Error = std::convert::Infallible;

        fn detect(
            &mut self,
            _input: &[u8],
            _width: u32,
            _height: u32,
        ) -> Result<Vec<Detection>, Self::Error> {
            Ok(self.frames.next().unwrap_or_default())
        }
    }

    #[test]
    fn test_compliance_pipeline() {
        let hand = || DetectionBuilder::hand().at(50.0, 50.0).build();
        let pizza = DetectionBuilder::pizza()
            .tlbr(40.0, 40.0, 60.0, 60.0)
            .build();
        let detector = MockDetector {
            frames: vec![vec![hand()], vec![hand()], vec![hand(), pizza]]
                .into_iter(),
        };
        let config = Config::with_zones(vec![Rect::new(0.0, 0.0, 100.0, 100.0)]);
        let mut pipeline = CompliancePipeline::new(detector, config).unwrap();

        let v1 = pipeline.process_frame(1, &[], 640, 480).unwrap();
        let v2 = pipeline.process_frame(2, &[], 640, 480).unwrap();
        let v3 = pipeline.process_frame(3, &[], 640, 480).unwrap();

        assert!(!v1.violation);
        assert!(!v2.violation);
        assert!(v3.violation);
        assert_eq!(v3.events[0].track_id, 1);
        assert_eq!(pipeline.engine().tracker().frame_count(), 3);
        assert_eq!(
            pipeline.engine().tracker().get(1).map(|t| t.state),
            Some(ComplianceState::Idle)
        );
    }
}
