use crate::cli::args::{ReportFormat, VerifyArgs};
use crate::exit_codes;
use anyhow::Context;
use spore_core::config::load_config;
use spore_core::dump::load_dump;
use spore_core::report::{console, json, junit};
use spore_core::{Comparison, Harness, HarnessReport, TraceVerifier, TracingNodeTest};
use std::path::Path;

pub fn run(args: VerifyArgs) -> anyhow::Result<i32> {
    let node = match load_dump(&args.trace_file) {
        Ok(node) => node,
        Err(e) => {
            eprint!("{}", e.to_diagnostic().format_terminal());
            return Ok(exit_codes::INPUT_ERROR);
        }
    };

    let (suite, tests) = match &args.config {
        Some(path) => {
            let cfg = match load_config(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprint!("{}", e.to_diagnostic().format_terminal());
                    return Ok(exit_codes::INPUT_ERROR);
                }
            };
            let tests = cfg
                .checks
                .iter()
                .map(|c| {
                    TracingNodeTest::new(c.time_step.unwrap_or(node.horizon()))
                        .named(c.name.clone())
                        .with_verifier(c.verifier())
                })
                .collect::<Vec<_>>();
            (cfg.suite, tests)
        }
        None => {
            let mut verifier = TraceVerifier::new(args.traces);
            if let Some(tolerance) = args.tolerance {
                let comparison = Comparison::Absolute { tolerance };
                comparison.validate().context("invalid --tolerance")?;
                verifier = verifier.with_comparison(comparison);
            }
            let time_step = args.time_step.unwrap_or(node.horizon());
            (
                "spore".to_string(),
                vec![TracingNodeTest::new(time_step).with_verifier(verifier)],
            )
        }
    };

    let mut harness = Harness::new(suite);
    for test in tests {
        harness.register_tracing_node(test, &node);
    }
    let report = harness.run();

    console::print_summary(&report);
    emit(&report, args.format, args.out.as_deref())?;

    Ok(if report.passed() {
        exit_codes::SUCCESS
    } else {
        exit_codes::CHECK_FAILED
    })
}

fn emit(report: &HarnessReport, format: ReportFormat, out: Option<&Path>) -> anyhow::Result<()> {
    let rendered = match format {
        ReportFormat::Console => return Ok(()),
        ReportFormat::Json => json::to_json_string(report)?,
        ReportFormat::Junit => junit::render_junit(report),
    };
    match out {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("failed to write report {}", path.display()))?,
        None => println!("{}", rendered),
    }
    Ok(())
}
