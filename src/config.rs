//! Startup configuration: zone rectangles and tunables.
//!
//! The on-disk format is the JSON file written by the ROI selection tool:
//!
//! ```json
//! { "rois": [[x, y, w, h], ...] }
//! ```
//!
//! Optional keys: `proximity` (scooper window, default 20), `max_missed`
//! (disappearance ceiling, default 30) and `max_distance`, which switches the
//! tracker to optimal association gated at that distance.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::rules::RuleConfig;
use crate::tracker::{Association, Rect, TrackerConfig};

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    rois: Vec<[f32; 4]>,
    proximity: Option<f32>,
    max_missed: Option<u32>,
    max_distance: Option<f32>,
}

/// Everything the compliance engine needs at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Zones in which scooper use is required, TLWH
    pub zones: Vec<Rect>,
    pub tracker: TrackerConfig,
    pub rules: RuleConfig,
}

impl Config {
    /// Default tunables with the given zones.
    pub fn with_zones(zones: Vec<Rect>) -> Self {
        Self {
            zones,
            tracker: TrackerConfig::default(),
            rules: RuleConfig::default(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(contents)?;

        let mut config = Self::with_zones(
            file.rois
                .iter()
                .map(|&[x, y, w, h]| Rect::new(x, y, w, h))
                .collect(),
        );
        if let Some(proximity) = file.proximity {
            config.rules.proximity = proximity;
        }
        if let Some(max_missed) = file.max_missed {
            config.tracker.max_missed = max_missed;
        }
        if let Some(max_distance) = file.max_distance {
            config.tracker.association = Association::Optimal { max_distance };
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.zones.is_empty() {
            return Err(Error::MissingZoneConfiguration);
        }
        for (i, zone) in self.zones.iter().enumerate() {
            if !zone.is_valid() {
                return Err(Error::invalid_config(format!(
                    "roi {i} must have positive width and height, got {:?}",
                    zone.to_tlwh()
                )));
            }
        }
        self.tracker.validate()?;
        self.rules.validate()
    }
}
