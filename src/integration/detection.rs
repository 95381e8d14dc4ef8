//! Detector output and its per-frame, per-class grouping.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::tracker::{Point, Rect};

/// Object classes the rule cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionClass {
    Hand,
    Scooper,
    Pizza,
}

impl FromStr for DetectionClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hand" => Ok(Self::Hand),
            "scooper" => Ok(Self::Scooper),
            "pizza" => Ok(Self::Pizza),
            other => Err(format!("unknown class label {other:?}")),
        }
    }
}

/// Raw detection as produced by a detector backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Class label, one of `hand`, `scooper`, `pizza`
    pub label: String,
    /// Bounding box in TLBR format (x1, y1, x2, y2)
    pub bbox: [f32; 4],
    /// Detection confidence score
    #[serde(default)]
    pub score: f32,
}

impl Detection {
    pub fn new(label: impl Into<String>, x1: f32, y1: f32, x2: f32, y2: f32, score: f32) -> Self {
        Self {
            label: label.into(),
            bbox: [x1, y1, x2, y2],
            score,
        }
    }

    pub fn rect(&self) -> Rect {
        let [x1, y1, x2, y2] = self.bbox;
        Rect::from_tlbr(x1, y1, x2, y2)
    }
}

/// All usable detections of one frame, grouped by class.
///
/// Hands and scoopers are reduced to the center of their box; pizza
/// containers keep the full rectangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionFrame {
    pub frame_id: u64,
    pub hands: Vec<Point>,
    pub scoopers: Vec<Point>,
    pub pizzas: Vec<Rect>,
}

impl DetectionFrame {
    pub fn new(frame_id: u64) -> Self {
        Self {
            frame_id,
            ..Self::default()
        }
    }

    /// Group raw detections by class.
    ///
    /// Detections with an unknown label or a degenerate box are dropped and
    /// returned as [`Error::MalformedDetection`]; the rest of the frame is kept.
    pub fn from_detections(
        frame_id: u64,
        detections: impl IntoIterator<Item = Detection>,
    ) -> (Self, Vec<Error>) {
        let mut frame = Self::new(frame_id);
        let mut dropped = Vec::new();

        for det in detections {
            let class = match det.label.parse::<DetectionClass>() {
                Ok(class) => class,
                Err(reason) => {
                    dropped.push(Error::malformed(frame_id, reason));
                    continue;
                }
            };
            let rect = det.rect();
            if !rect.is_valid() {
                dropped.push(Error::malformed(
                    frame_id,
                    format!("{} has invalid bbox {:?}", det.label, det.bbox),
                ));
                continue;
            }
            match class {
                DetectionClass::Hand => frame.hands.push(rect.center()),
                DetectionClass::Scooper => frame.scoopers.push(rect.center()),
                DetectionClass::Pizza => frame.pizzas.push(rect),
            }
        }

        for err in &dropped {
            tracing::warn!("dropping detection: {err}");
        }

        (frame, dropped)
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty() && self.scoopers.is_empty() && self.pizzas.is_empty()
    }
}
