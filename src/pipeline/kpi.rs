use crate::core::{Project, ProjectStatus};
use crate::trend;
use serde::Serialize;
use std::fmt;

/// Risk score above which a project counts as a risk alert.
pub const RISK_ALERT_THRESHOLD: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    /// Direction implied by a signed change
    pub fn from_change(change_percent: f64) -> Self {
        if change_percent > 0.0 {
            Trend::Up
        } else if change_percent < 0.0 {
            Trend::Down
        } else {
            Trend::Neutral
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Neutral => "→",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum KpiValue {
    Count(usize),
    Percent(f64),
}

impl KpiValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            KpiValue::Count(n) => *n as f64,
            KpiValue::Percent(p) => *p,
        }
    }
}

impl fmt::Display for KpiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KpiValue::Count(n) => write!(f, "{}", n),
            KpiValue::Percent(p) => write!(f, "{:.1}%", p),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub label: &'static str,
    pub value: KpiValue,
    pub change_percent: f64,
    pub trend: Trend,
    pub sparkline: Vec<f64>,
}

/// Display metadata for one KPI card.
///
/// The change is fixed per KPI rather than computed from retained history;
/// the trend arrow follows its sign.
#[derive(Debug, Clone, Copy)]
struct KpiDefinition {
    label: &'static str,
    change_percent: f64,
}

const ACTIVE_PROJECTS: KpiDefinition = KpiDefinition {
    label: "Active Projects",
    change_percent: 12.5,
};

const ON_TIME_DELIVERY: KpiDefinition = KpiDefinition {
    label: "On-Time Delivery",
    change_percent: 5.2,
};

const BUDGET_USED: KpiDefinition = KpiDefinition {
    label: "Budget Used",
    change_percent: -2.1,
};

const RISK_ALERTS: KpiDefinition = KpiDefinition {
    label: "Risk Alerts",
    change_percent: -8.3,
};

/// Sums and counts over a project set, gathered in one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PortfolioTotals {
    pub total: usize,
    pub on_time: usize,
    pub budget_allocated: u64,
    pub budget_spent: u64,
    pub risk_alerts: usize,
    pub delayed: usize,
    pub low_efficiency: usize,
}

impl PortfolioTotals {
    pub fn collect(projects: &[Project]) -> Self {
        projects.iter().fold(Self::default(), |mut acc, p| {
            acc.total += 1;
            if p.status == ProjectStatus::OnTrack || p.delay_days == 0 {
                acc.on_time += 1;
            }
            acc.budget_allocated += p.budget_allocated;
            acc.budget_spent += p.budget_spent;
            if p.risk > RISK_ALERT_THRESHOLD {
                acc.risk_alerts += 1;
            }
            if p.delay_days > 0 {
                acc.delayed += 1;
            }
            if p.efficiency < 50 {
                acc.low_efficiency += 1;
            }
            acc
        })
    }

    /// Share of projects on time, unrounded. 0 for an empty set.
    pub fn on_time_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.on_time as f64 / self.total as f64 * 100.0
    }

    /// Aggregate burn rate, unrounded. 0 when nothing was allocated.
    pub fn budget_percent(&self) -> f64 {
        if self.budget_allocated == 0 {
            return 0.0;
        }
        self.budget_spent as f64 / self.budget_allocated as f64 * 100.0
    }
}

/// Round half away from zero to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// The four KPI cards over a (filtered) project set, in display order.
pub fn compute_kpis(projects: &[Project], sparkline_points: usize) -> Vec<Kpi> {
    let totals = PortfolioTotals::collect(projects);

    [
        (ACTIVE_PROJECTS, KpiValue::Count(totals.total)),
        (ON_TIME_DELIVERY, KpiValue::Percent(round1(totals.on_time_percent()))),
        (BUDGET_USED, KpiValue::Percent(round1(totals.budget_percent()))),
        (RISK_ALERTS, KpiValue::Count(totals.risk_alerts)),
    ]
    .into_iter()
    .map(|(definition, value)| Kpi {
        label: definition.label,
        value,
        change_percent: definition.change_percent,
        trend: Trend::from_change(definition.change_percent),
        sparkline: trend::generate(value.as_f64(), definition.change_percent, sparkline_points),
    })
    .collect()
}
