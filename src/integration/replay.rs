//! Offline replay of recorded detector output.

use std::io::{BufRead, Write};

use serde::Deserialize;

use crate::error::Result;
use crate::integration::{ComplianceEngine, Detection, DetectionFrame};

/// One line of replay input.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameRecord {
    pub frame_id: u64,
    #[serde(default)]
    pub detections: Vec<Detection>,
}

/// Counters reported once the input is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub frames: u64,
    pub violation_frames: u64,
    pub skipped_lines: u64,
}

/// Feed JSON-lines frame records through `engine` in input order.
///
/// Every verdict is written to `out` as one JSON line. Verdicts with a
/// violation are also written to `violations`. Lines that do not decode as a
/// [`FrameRecord`] are logged and skipped; blank lines are ignored.
pub fn replay<R, W, V>(
    engine: &mut ComplianceEngine,
    reader: R,
    mut out: W,
    mut violations: Option<V>,
) -> Result<ReplayStats>
where
    R: BufRead,
    W: Write,
    V: Write,
{
    let mut stats = ReplayStats::default();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: FrameRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("skipping line {}: {}", lineno + 1, e);
                stats.skipped_lines += 1;
                continue;
            }
        };

        let (frame, _dropped) =
            DetectionFrame::from_detections(record.frame_id, record.detections);
        let verdict = engine.process(&frame);
        stats.frames += 1;

        serde_json::to_writer(&mut out, &verdict)?;
        out.write_all(b"\n")?;

        if verdict.violation {
            stats.violation_frames += 1;
            tracing::info!(
                frame_id = verdict.frame_id,
                "violation at frame {}",
                verdict.frame_id
            );
            if let Some(v) = violations.as_mut() {
                serde_json::to_writer(&mut *v, &verdict)?;
                v.write_all(b"\n")?;
            }
        } else {
            tracing::debug!(frame_id = verdict.frame_id, "frame ok");
        }
    }

    out.flush()?;
    if let Some(v) = violations.as_mut() {
        v.flush()?;
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::tracker::Rect;

    const INPUT: &str = concat!(
        r#"{"frame_id": 1, "detections": [{"label": "hand", "bbox": [45, 45, 55, 55]}]}"#,
        "\n",
        "this is not json\n",
        "\n",
        r#"{"frame_id": 2, "detections": ["#,
        r#"{"label": "hand", "bbox": [45, 45, 55, 55]}, "#,
        r#"{"label": "pizza", "bbox": [40, 40, 60, 60]}]}"#,
        "\n",
    );

    fn engine() -> ComplianceEngine {
        let zones = vec![Rect::new(0.0, 0.0, 100.0, 100.0)];
        ComplianceEngine::new(Config::with_zones(zones)).unwrap()
    }

    fn lines(buf: &[u8]) -> Vec<serde_json::Value> {
        std::str::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_replay_routes_verdicts() {
        let mut out = Vec::new();
        let mut violations = Vec::new();
        let mut engine = engine();
        let sink = Some(&mut violations);
        let stats = replay(&mut engine, INPUT.as_bytes(), &mut out, sink).unwrap();

        assert_eq!(
            stats,
            ReplayStats {
                frames: 2,
                violation_frames: 1,
                skipped_lines: 1,
            }
        );

        let all = lines(&out);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0]["frame_id"], 1);
        assert_eq!(all[0]["violation"], false);
        assert_eq!(all[1]["frame_id"], 2);
        assert_eq!(all[1]["violation"], true);

        let flagged = lines(&violations);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0]["frame_id"], 2);
        assert_eq!(flagged[0]["events"][0]["track_id"], 1);
    }

    #[test]
    fn test_replay_without_violation_sink() {
        let mut out = Vec::new();
        let mut engine = engine();
        let stats = replay(&mut engine, INPUT.as_bytes(), &mut out, None::<Vec<u8>>).unwrap();
        assert_eq!(stats.violation_frames, 1);
        assert_eq!(lines(&out).len(), 2);
    }

    #[test]
    fn test_replay_empty_input() {
        let mut out = Vec::new();
        let mut engine = engine();
        let stats = replay(&mut engine, &b""[..], &mut out, None::<Vec<u8>>).unwrap();
        assert_eq!(stats, ReplayStats::default());
        assert!(out.is_empty());
    }
}
