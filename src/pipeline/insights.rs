// ============================================================================
// src/pipeline/insights.rs - Rule-based insight cards
// ============================================================================
//
// Design Patterns:
// - Plugin Registry: each rule group is an `InsightRule`; the registry runs
//   them in registration order, which is also display order
//
// Rules are independent. Any subset may fire; a rule whose threshold is not
// exceeded contributes nothing.
//
// ============================================================================

use super::kpi::PortfolioTotals;
use crate::core::Severity;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Risk,
    Budget,
    Timeline,
    Performance,
}

/// What the card's call-to-action does when applied to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightAction {
    FilterHighRisk,
    FilterLowEfficiency,
    ViewBudget,
    ViewDelays,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub id: &'static str,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub category: InsightCategory,
    pub action_label: &'static str,
    pub action: InsightAction,
    pub confidence: u8,
}

/// A single insight rule group
pub trait InsightRule: Send + Sync {
    /// Rule name for debugging
    fn name(&self) -> &'static str;

    fn evaluate(&self, totals: &PortfolioTotals) -> Option<Insight>;
}

// ============================================================================
// RULES
// ============================================================================

pub struct RiskRule;

impl InsightRule for RiskRule {
    fn name(&self) -> &'static str {
        "risk"
    }

    fn evaluate(&self, totals: &PortfolioTotals) -> Option<Insight> {
        let critical = totals.risk_alerts;
        if critical == 0 {
            return None;
        }

        Some(Insight {
            id: "insight-1",
            title: format!("{} projects need immediate attention", critical),
            description: format!(
                "Based on risk analysis, {} projects have risk scores above 70 and may require \
                 intervention to prevent delays or failures.",
                critical
            ),
            severity: if critical > 5 {
                Severity::Critical
            } else {
                Severity::Warning
            },
            category: InsightCategory::Risk,
            action_label: "View Critical Projects",
            action: InsightAction::FilterHighRisk,
            confidence: 94,
        })
    }
}

pub struct BudgetRule;

impl InsightRule for BudgetRule {
    fn name(&self) -> &'static str {
        "budget"
    }

    fn evaluate(&self, totals: &PortfolioTotals) -> Option<Insight> {
        let percent = totals.budget_percent();
        if percent <= 90.0 {
            return None;
        }

        Some(Insight {
            id: "insight-2",
            title: "Budget utilization exceeds 90%".to_string(),
            description: format!(
                "Current spending is at {:.1}% of allocated budget. Consider reviewing project \
                 priorities or requesting additional funds.",
                percent
            ),
            severity: if percent > 100.0 {
                Severity::Critical
            } else {
                Severity::Warning
            },
            category: InsightCategory::Budget,
            action_label: "View Budget Details",
            action: InsightAction::ViewBudget,
            confidence: 88,
        })
    }
}

pub struct TimelineRule;

impl InsightRule for TimelineRule {
    fn name(&self) -> &'static str {
        "timeline"
    }

    fn evaluate(&self, totals: &PortfolioTotals) -> Option<Insight> {
        let delayed = totals.delayed;
        if delayed <= 3 {
            return None;
        }

        Some(Insight {
            id: "insight-3",
            title: format!("Forecast: {} projects may delay next month", delayed),
            description: format!(
                "Based on current trends, {} projects are showing delay patterns. Early \
                 intervention could prevent timeline slippage.",
                delayed
            ),
            severity: Severity::Warning,
            category: InsightCategory::Timeline,
            action_label: "See Forecast",
            action: InsightAction::ViewDelays,
            confidence: 76,
        })
    }
}

pub struct PerformanceRule;

impl InsightRule for PerformanceRule {
    fn name(&self) -> &'static str {
        "performance"
    }

    fn evaluate(&self, totals: &PortfolioTotals) -> Option<Insight> {
        let low = totals.low_efficiency;
        if low == 0 {
            return None;
        }

        Some(Insight {
            id: "insight-4",
            title: "Efficiency optimization opportunity".to_string(),
            description: format!(
                "{} projects have efficiency scores below 50%. Consider resource reallocation \
                 or process improvements.",
                low
            ),
            severity: Severity::Info,
            category: InsightCategory::Performance,
            action_label: "View Details",
            action: InsightAction::FilterLowEfficiency,
            confidence: 82,
        })
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

pub struct InsightRegistry {
    rules: Vec<Box<dyn InsightRule>>,
}

impl InsightRegistry {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        tracing::trace!(rule = rule.name(), "registered insight rule");
        self.rules.push(rule);
    }

    /// The four built-in rule groups in display order
    pub fn with_default_rules() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(RiskRule));
        registry.register(Box::new(BudgetRule));
        registry.register(Box::new(TimelineRule));
        registry.register(Box::new(PerformanceRule));
        registry
    }

    pub fn evaluate(&self, totals: &PortfolioTotals) -> Vec<Insight> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(totals))
            .collect()
    }

    pub fn list_rules(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }
}

impl Default for InsightRegistry {
    fn default() -> Self {
        Self::with_default_rules()
    }
}
