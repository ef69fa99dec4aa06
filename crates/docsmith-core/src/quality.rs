//! Code quality report returned by the backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of a single-file quality analysis. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    #[serde(default)]
    pub summary: Option<String>,

    /// Metric name to scalar value, in the order the backend sent them.
    #[serde(default)]
    pub metrics: Option<Map<String, Value>>,

    #[serde(default)]
    pub issues: Option<Vec<QualityIssue>>,

    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
}

/// One finding. The backend may omit any field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    #[serde(default)]
    pub severity: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    /// Usually a number, but left loose so odd payloads still render.
    #[serde(default)]
    pub line: Option<Value>,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Rule identifier from the underlying analyzer, when reported.
    #[serde(default)]
    pub rule: Option<String>,
}

/// Display bucket for an issue's severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityClass {
    Error,
    Warning,
    Info,
}

impl SeverityClass {
    pub fn css_class(&self) -> &'static str {
        match self {
            SeverityClass::Error => "severity-error",
            SeverityClass::Warning => "severity-warning",
            SeverityClass::Info => "severity-info",
        }
    }
}

/// A metric ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
}

impl QualityReport {
    /// Metric cards in backend order, skipping null values.
    pub fn metric_cards(&self) -> Vec<MetricCard> {
        self.metrics
            .iter()
            .flatten()
            .filter(|(_, value)| !value.is_null())
            .map(|(name, value)| MetricCard {
                label: humanize_metric(name),
                value: scalar_to_string(value),
            })
            .collect()
    }

    pub fn issues(&self) -> &[QualityIssue] {
        self.issues.as_deref().unwrap_or(&[])
    }

    pub fn suggestions(&self) -> &[String] {
        self.suggestions.as_deref().unwrap_or(&[])
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref().filter(|s| !s.is_empty())
    }
}

impl QualityIssue {
    pub fn severity_label(&self) -> String {
        self.severity
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("info")
            .to_uppercase()
    }

    pub fn severity_class(&self) -> SeverityClass {
        match self.severity_label().as_str() {
            "ERROR" | "CRITICAL" | "BLOCKER" | "MAJOR" => SeverityClass::Error,
            "WARNING" | "WARN" | "MINOR" => SeverityClass::Warning,
            _ => SeverityClass::Info,
        }
    }

    pub fn message_text(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or("No description available")
    }

    /// Line 0 is how the analyzer says "no line".
    pub fn line_label(&self) -> String {
        match &self.line {
            None | Some(Value::Null) => "N/A".to_string(),
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => "N/A".to_string(),
            Some(Value::String(s)) if s.is_empty() || s == "0" => "N/A".to_string(),
            Some(value) => scalar_to_string(value),
        }
    }

    pub fn kind_label(&self) -> &str {
        self.kind
            .as_deref()
            .filter(|k| !k.is_empty())
            .unwrap_or("General")
    }
}

/// `lines_of_code` becomes `LINES OF CODE`.
pub fn humanize_metric(name: &str) -> String {
    name.replace('_', " ").to_uppercase()
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_cards_skip_nulls_and_keep_order() {
        let report: QualityReport = serde_json::from_str(
            r#"{"metrics": {"lines_of_code": 120, "coverage": null, "duplicate_lines_percentage": 3.5, "grade": "B"}}"#,
        )
        .unwrap();

        let cards = report.metric_cards();

        assert_eq!(
            cards,
            vec![
                MetricCard { label: "LINES OF CODE".into(), value: "120".into() },
                MetricCard { label: "DUPLICATE LINES PERCENTAGE".into(), value: "3.5".into() },
                MetricCard { label: "GRADE".into(), value: "B".into() },
            ]
        );
    }

    #[test]
    fn missing_issue_fields_fall_back_to_placeholders() {
        let issue = QualityIssue::default();
        assert_eq!(issue.severity_label(), "INFO");
        assert_eq!(issue.severity_class(), SeverityClass::Info);
        assert_eq!(issue.message_text(), "No description available");
        assert_eq!(issue.line_label(), "N/A");
        assert_eq!(issue.kind_label(), "General");
    }

    #[test]
    fn issue_fields_are_read_from_backend_shape() {
        let report: QualityReport = serde_json::from_str(
            r#"{"issues": [{"severity": "warning", "message": "Avoid bare except", "line": 12, "type": "code_smell", "rule": "python:S5754"}]}"#,
        )
        .unwrap();
        let issue = &report.issues()[0];

        assert_eq!(issue.severity_label(), "WARNING");
        assert_eq!(issue.severity_class(), SeverityClass::Warning);
        assert_eq!(issue.line_label(), "12");
        assert_eq!(issue.kind_label(), "code_smell");
        assert_eq!(issue.rule.as_deref(), Some("python:S5754"));
    }

    #[test]
    fn line_zero_means_no_line() {
        let report: QualityReport = serde_json::from_str(
            r#"{"issues": [{"line": 0}, {"line": ""}, {"line": 7}]}"#,
        )
        .unwrap();
        let labels: Vec<String> = report.issues().iter().map(|i| i.line_label()).collect();

        assert_eq!(labels, vec!["N/A", "N/A", "7"]);
    }

    #[test]
    fn empty_payload_is_a_valid_report() {
        let report: QualityReport = serde_json::from_str("{}").unwrap();
        assert!(report.summary().is_none());
        assert!(report.metric_cards().is_empty());
        assert!(report.issues().is_empty());
        assert!(report.suggestions().is_empty());
    }
}
