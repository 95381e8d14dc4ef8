use serde::Serialize;

/// Where a hand track is in its scooper-compliance episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceState {
    /// Outside any episode; waiting for the hand to enter a zone
    #[default]
    Idle,
    /// Inside an episode that started when the hand entered a zone
    InZone,
}
