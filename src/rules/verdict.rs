use serde::Serialize;

use crate::rules::zone_engine::ViolationEvent;

/// True when at least one track violated the rule this frame.
pub fn aggregate(events: &[ViolationEvent]) -> bool {
    !events.is_empty()
}

/// Per-frame output record handed to downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameVerdict {
    pub frame_id: u64,
    pub violation: bool,
    pub events: Vec<ViolationEvent>,
}

impl FrameVerdict {
    pub fn new(frame_id: u64, events: Vec<ViolationEvent>) -> Self {
        Self {
            frame_id,
            violation: aggregate(&events),
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate() {
        assert!(!aggregate(&[]));
        let event = ViolationEvent {
            track_id: 1,
            frame_id: 3,
        };
        assert!(aggregate(&[event]));

        let verdict = FrameVerdict::new(3, vec![event]);
        assert!(verdict.violation);
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["frame_id"], 3);
        assert_eq!(json["violation"], true);
        assert_eq!(json["events"][0]["track_id"], 1);
    }
}
