//! JSON-lines frame records
//!
//! One line per frame: a face object, an array of faces (first one is used), or
//! `null` when the detector saw nobody.

use anyhow::Context;
use dms::FaceObservation;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FrameRecord {
    Many(Vec<FaceObservation>),
    One(FaceObservation),
}

/// Parse one non-blank line into the face to classify (`None` = no face)
pub fn parse_frame(line: &str, line_no: usize) -> anyhow::Result<Option<FaceObservation>> {
    let record: Option<FrameRecord> = serde_json::from_str(line)
        .with_context(|| format!("line {line_no}: not a face record"))?;

    Ok(match record {
        None => None,
        Some(FrameRecord::One(face)) => Some(face),
        Some(FrameRecord::Many(faces)) => faces.into_iter().next(),
    })
}
