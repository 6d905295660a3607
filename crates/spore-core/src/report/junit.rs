use super::{CheckStatus, HarnessReport};
use std::path::Path;

pub fn write_junit(report: &HarnessReport, out: &Path) -> std::io::Result<()> {
    std::fs::write(out, render_junit(report))
}

pub fn render_junit(report: &HarnessReport) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(
        r#"<testsuite name="{}" tests="{}" failures="{}">"#,
        escape(&report.suite),
        report.summary.total,
        report.summary.failed
    ));
    xml.push('\n');

    for r in &report.results {
        let secs = r.duration_ms as f64 / 1000.0;
        xml.push_str(&format!(
            r#"  <testcase name="{}" time="{:.3}">"#,
            escape(&r.name),
            secs
        ));
        if r.status == CheckStatus::Failed {
            let label = r.label.as_deref().unwrap_or("failed");
            let body = r
                .diagnostic
                .as_ref()
                .map(|d| d.context.to_string())
                .unwrap_or_default();
            xml.push_str(&format!(
                r#"<failure message="{}">{}</failure>"#,
                escape(label),
                escape(&body)
            ));
        }
        xml.push_str("</testcase>\n");
    }

    xml.push_str("</testsuite>\n");
    xml
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
