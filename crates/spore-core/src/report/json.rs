use super::HarnessReport;
use std::path::Path;

pub fn write_json(report: &HarnessReport, out: &Path) -> std::io::Result<()> {
    std::fs::write(out, to_json_string(report)?)
}

pub fn to_json_string(report: &HarnessReport) -> std::io::Result<String> {
    serde_json::to_string_pretty(report).map_err(std::io::Error::from)
}
