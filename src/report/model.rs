//! The automation opportunity report — terminal artifact of the workflow.

use serde::{Deserialize, Serialize};

/// Structured persuasive report produced by the second generative call.
///
/// Every field carries `#[serde(default)]` so generation drift degrades
/// gracefully: a missing list becomes empty, a missing scalar becomes the
/// empty string. The report is only considered generated once the full parse
/// succeeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationReport {
    pub scope_title: String,
    pub executive_summary: String,
    pub current_pain_points: Vec<String>,
    pub transformation_vision: String,
    pub recommended_solution: String,
    pub estimated_implementation_time: String,
    pub estimated_cost_savings: String,
    pub estimated_hours_saved: String,
    pub quick_wins: Vec<String>,
    pub roi_breakdown: String,
    pub next_steps: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_report_roundtrip() {
        let report = AutomationReport {
            scope_title: "Reclaim 15 Hours Every Week".to_string(),
            executive_summary: "Summary.".to_string(),
            current_pain_points: vec!["p1".into(), "p2".into(), "p3".into()],
            transformation_vision: "Vision.".to_string(),
            recommended_solution: "Solution.".to_string(),
            estimated_implementation_time: "2-3 weeks".to_string(),
            estimated_cost_savings: "₹4,50,000/year".to_string(),
            estimated_hours_saved: "15-20 hours/week".to_string(),
            quick_wins: vec!["w1".into()],
            roi_breakdown: "Math.".to_string(),
            next_steps: vec!["s1".into(), "s2".into()],
        };
        let json = serde_json::to_string(&report).unwrap();
        let parsed: AutomationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn missing_list_field_becomes_empty_list() {
        let json = r#"{
            "scope_title": "T",
            "executive_summary": "S",
            "current_pain_points": ["a", "b", "c"],
            "transformation_vision": "V",
            "recommended_solution": "R",
            "estimated_implementation_time": "2 weeks",
            "estimated_cost_savings": "₹2L/year",
            "estimated_hours_saved": "10 hours/week",
            "roi_breakdown": "M",
            "next_steps": ["n1"]
        }"#;
        let report: AutomationReport = serde_json::from_str(json).unwrap();
        assert!(report.quick_wins.is_empty());
        assert_eq!(report.current_pain_points.len(), 3);
    }

    #[test]
    fn missing_scalar_field_becomes_empty_string() {
        let json = r#"{"scope_title": "T"}"#;
        let report: AutomationReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.scope_title, "T");
        assert_eq!(report.executive_summary, "");
        assert_eq!(report.roi_breakdown, "");
        assert!(report.next_steps.is_empty());
    }
}
