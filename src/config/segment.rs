use crate::kernel::QuickshiftParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct SegmentToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    #[serde(default)]
    pub quickshift: QuickshiftParams,
    pub output: SegmentOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct SegmentOutputConfig {
    /// PNG where each segment is painted with its mean colour.
    #[serde(rename = "labels_image")]
    pub labels_image: PathBuf,
    #[serde(rename = "summary_json")]
    pub summary_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<SegmentToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(json: &str) -> Result<SegmentToolConfig, serde_json::Error> {
    serde_json::from_str(json)
}
