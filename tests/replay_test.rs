use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "scoopwatch-{}-{}",
        name,
        std::process::id()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_replay_binary_splits_streams() {
    let dir = scratch_dir("replay");
    let rois = dir.join("rois.json");
    let violations = dir.join("violations.jsonl");
    fs::write(&rois, r#"{"rois": [[0, 0, 100, 100]]}"#).unwrap();
    let _ = fs::remove_file(&violations);

    let input = [
        r#"{"frame_id": 1, "detections": [{"label": "hand", "bbox": [45, 45, 55, 55]}]}"#,
        "garbage line",
        concat!(
            r#"{"frame_id": 2, "detections": ["#,
            r#"{"label": "hand", "bbox": [45, 45, 55, 55]}, "#,
            r#"{"label": "pizza", "bbox": [40, 40, 60, 60]}]}"#
        ),
    ]
    .join("\n");

    let mut child = Command::new(env!("CARGO_BIN_EXE_scoopwatch"))
        .arg("--config")
        .arg(&rois)
        .arg("--violations")
        .arg(&violations)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let verdicts: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(verdicts.len(), 2);
    assert_eq!(verdicts[0]["frame_id"], 1);
    assert_eq!(verdicts[0]["violation"], false);
    assert_eq!(verdicts[1]["frame_id"], 2);
    assert_eq!(verdicts[1]["violation"], true);

    let flagged = fs::read_to_string(&violations).unwrap();
    let flagged: Vec<serde_json::Value> = flagged
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0]["frame_id"], 2);
    assert_eq!(flagged[0]["events"][0]["track_id"], 1);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_replay_binary_rejects_empty_zone_list() {
    let dir = scratch_dir("nozones");
    let rois = dir.join("rois.json");
    fs::write(&rois, r#"{"rois": []}"#).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_scoopwatch"))
        .arg("--config")
        .arg(&rois)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let _ = fs::remove_dir_all(&dir);
}
