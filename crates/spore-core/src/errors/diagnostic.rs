use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub severity: String,
    pub source: String,
    pub message: String,
    pub context: serde_json::Value,
    pub fix_steps: Vec<String>,
}

impl Diagnostic {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            severity: "error".into(),
            source: "unknown".into(),
            message: message.into(),
            context: serde_json::json!({}),
            fix_steps: vec![],
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = context;
        self
    }

    pub fn with_fix_step(mut self, step: impl Into<String>) -> Self {
        self.fix_steps.push(step.into());
        self
    }

    pub fn format_terminal(&self) -> String {
        let mut s = format!("❌ [{}] {}\n", self.code, self.message);
        s.push_str(&format!("  source: {}\n", self.source));

        if self.context.as_object().is_some_and(|o| !o.is_empty()) {
            if let Ok(json) = serde_json::to_string_pretty(&self.context) {
                for line in json.lines() {
                    s.push_str(&format!("  {}\n", line));
                }
            }
        }

        if !self.fix_steps.is_empty() {
            s.push_str("\nFix:\n");
            for (i, step) in self.fix_steps.iter().enumerate() {
                s.push_str(&format!("  {}. {}\n", i + 1, step));
            }
        }
        s
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format_terminal())
    }
}

impl std::error::Error for Diagnostic {}

pub mod codes {
    // Assertion failures (exit 1)
    pub const E_TRACE_COUNT: &str = "E_TRACE_COUNT";
    pub const E_TRACE_CONTENT: &str = "E_TRACE_CONTENT";
    pub const E_TRACE_MISSING: &str = "E_TRACE_MISSING";
    pub const E_ASSERT: &str = "E_ASSERT";

    // Input errors (exit 2)
    pub const E_CFG_PARSE: &str = "E_CFG_PARSE";
    pub const E_CFG_VERSION: &str = "E_CFG_VERSION";
    pub const E_DUMP_PARSE: &str = "E_DUMP_PARSE";
    pub const E_DUMP_SHAPE: &str = "E_DUMP_SHAPE";
    pub const E_PATH_NOT_FOUND: &str = "E_PATH_NOT_FOUND";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_format_includes_context_and_fixes() {
        let d = Diagnostic::new(codes::E_TRACE_CONTENT, "trace content")
            .with_source("verify")
            .with_context(serde_json::json!({ "time_index": 2, "trace_id": 3 }))
            .with_fix_step("inspect trace 3");
        let out = d.format_terminal();
        assert!(out.starts_with("❌ [E_TRACE_CONTENT] trace content"));
        assert!(out.contains("source: verify"));
        assert!(out.contains("\"trace_id\": 3"));
        assert!(out.contains("1. inspect trace 3"));
    }

    #[test]
    fn empty_context_is_omitted() {
        let d = Diagnostic::new(codes::E_CFG_PARSE, "bad yaml");
        let out = d.format_terminal();
        assert!(out.starts_with("❌ [E_CFG_PARSE] bad yaml"));
        assert!(!out.contains('{'));
    }
}
