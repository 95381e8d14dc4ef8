//! Scooper rule evaluation and per-frame verdicts.

mod verdict;
mod zone_engine;

pub use verdict::{FrameVerdict, aggregate};
pub use zone_engine::{RuleConfig, ViolationEvent, ZoneRuleEngine};
