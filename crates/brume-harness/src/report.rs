use std::path::Path;

use brume_core::BrumeError;

use crate::checks::CheckOutcome;
use crate::runner::Frame;

/// Results of one scene under one shading variant.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SceneReport {
    pub scene: String,
    pub variant: String,
    pub checks: Vec<CheckOutcome>,
}

impl SceneReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

/// The full harness run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Report {
    pub adapter: String,
    pub width: u32,
    pub height: u32,
    pub scenes: Vec<SceneReport>,
}

impl Report {
    pub fn passed(&self) -> bool {
        self.scenes.iter().all(|s| s.passed())
    }
}

/// Save the report as pretty-printed JSON.
pub fn save_report(path: &Path, report: &Report) -> Result<(), BrumeError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| BrumeError::ReportIo(e.to_string()))?;
    }
    let json =
        serde_json::to_string_pretty(report).map_err(|e| BrumeError::ReportIo(e.to_string()))?;
    std::fs::write(path, json).map_err(|e| BrumeError::ReportIo(e.to_string()))
}

/// Dump a frame as binary PPM (P6), alpha dropped.
pub fn write_ppm(path: &Path, frame: &Frame) -> Result<(), BrumeError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| BrumeError::ReportIo(e.to_string()))?;
    }

    let mut out = format!("P6\n{} {}\n255\n", frame.width, frame.height).into_bytes();
    out.reserve((frame.width * frame.height * 3) as usize);
    for rgba in frame.pixels.chunks_exact(4) {
        out.extend_from_slice(&rgba[..3]);
    }

    std::fs::write(path, out).map_err(|e| BrumeError::ReportIo(e.to_string()))
}

/// Human-readable summary for the console.
pub fn format_summary(report: &Report) -> String {
    let mut out = String::new();
    out.push_str("| Scene | Variant | Checks | Failed |\n");
    out.push_str("|-------|---------|--------|--------|\n");

    for scene in &report.scenes {
        let failed = scene.checks.iter().filter(|c| !c.passed).count();
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            scene.scene,
            scene.variant,
            scene.checks.len(),
            failed,
        ));
    }

    out
}
