//! DMS Replay
//!
//! Feeds recorded face observations through [`DmsModule`] frame by frame and writes
//! the resulting driver state stream.

pub mod input;
pub mod settings;

use std::collections::HashMap;
use std::io::{BufRead, Write};

use anyhow::Context;
use clap::ValueEnum;
use dms::{DmsAnalysis, DmsModule, DriverState};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Output line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `<frame>\t<state>`
    #[default]
    Text,
    /// One JSON analysis object per frame
    Json,
}

#[derive(Serialize)]
struct FrameReport<'a> {
    frame: usize,
    status: &'static str,
    #[serde(flatten)]
    analysis: &'a DmsAnalysis,
}

/// Frame totals for one replay
#[derive(Debug, Clone, Default)]
pub struct ReplaySummary {
    pub frames: usize,
    pub alert_frames: usize,
    counts: HashMap<DriverState, usize>,
}

impl ReplaySummary {
    /// Frames that ended in `state`
    pub fn count(&self, state: DriverState) -> usize {
        self.counts.get(&state).copied().unwrap_or(0)
    }

    fn record(&mut self, analysis: &DmsAnalysis) {
        self.frames += 1;
        if analysis.has_alert() {
            self.alert_frames += 1;
        }
        *self.counts.entry(analysis.state).or_insert(0) += 1;
    }
}

/// Replay every frame in `reader`, writing one line per frame to `out`
pub fn run_replay<R: BufRead, W: Write>(
    dms: &mut DmsModule,
    reader: R,
    out: &mut W,
    format: OutputFormat,
) -> anyhow::Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("reading line {line_no}"))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let face = input::parse_frame(line, line_no)?;
        let analysis = dms.analyze(face.as_ref());
        summary.record(&analysis);
        let frame = summary.frames;

        match format {
            OutputFormat::Text => writeln!(out, "{frame}\t{}", analysis.state)?,
            OutputFormat::Json => {
                let report = FrameReport {
                    frame,
                    status: analysis.state.status_message(),
                    analysis: &analysis,
                };
                serde_json::to_writer(&mut *out, &report)?;
                writeln!(out)?;
            }
        }
        debug!(frame, state = %analysis.state, "Frame classified");
    }

    out.flush()?;
    info!(
        frames = summary.frames,
        alert_frames = summary.alert_frames,
        "Replay finished"
    );
    Ok(summary)
}

/// Initialize logging on stderr (stdout carries the state stream)
pub fn init_logging(verbose: bool, json: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow::anyhow!("failed to set tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dms::DmsConfig;

    fn module() -> DmsModule {
        DmsModule::new(DmsConfig::default()).unwrap()
    }

    #[test]
    fn test_text_replay() {
        let closed = r#"{"leftEyeOpen": 0.0, "rightEyeOpen": 0.0}"#;
        let mut input = String::new();
        for _ in 0..16 {
            input.push_str(closed);
            input.push('\n');
        }
        input.push_str("\nnull\n");

        let mut out = Vec::new();
        let summary =
            run_replay(&mut module(), input.as_bytes(), &mut out, OutputFormat::Text).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 17);
        assert_eq!(lines[0], "1\tattentive");
        assert_eq!(lines[15], "16\tdrowsy");
        assert_eq!(lines[16], "17\tno-driver");

        assert_eq!(summary.frames, 17);
        assert_eq!(summary.alert_frames, 1);
        assert_eq!(summary.count(DriverState::Attentive), 15);
        assert_eq!(summary.count(DriverState::NoDriver), 1);
    }

    #[test]
    fn test_json_replay() {
        let mut out = Vec::new();
        run_replay(&mut module(), "{}\n".as_bytes(), &mut out, OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["frame"], 1);
        assert_eq!(value["state"], "Attentive");
        assert_eq!(value["status"], "Driver Attentive");
        assert_eq!(value["face_detected"], true);
    }

    #[test]
    fn test_bad_line_aborts() {
        let mut out = Vec::new();
        let input = "null\n\"oops\"\n";
        let err = run_replay(&mut module(), input.as_bytes(), &mut out, OutputFormat::Text)
            .unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
