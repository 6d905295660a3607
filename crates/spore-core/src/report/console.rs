use super::{CheckStatus, HarnessReport};

pub fn format_result_line(name: &str, status: CheckStatus, label: Option<&str>) -> String {
    match status {
        CheckStatus::Passed => format!("✅ {}", name),
        CheckStatus::Failed => format!("❌ {} ({})", name, label.unwrap_or("failed")),
    }
}

pub fn print_summary(report: &HarnessReport) {
    for r in &report.results {
        eprintln!("{}", format_result_line(&r.name, r.status, r.label.as_deref()));
        if let Some(d) = &r.diagnostic {
            eprint!("{}", d.format_terminal());
        }
    }
    eprintln!(
        "Results ({}): pass={} fail={}",
        report.suite, report.summary.passed, report.summary.failed
    );
}
