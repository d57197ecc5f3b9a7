//! Derived View Pipeline
//!
//! Pure functions from (store, filters) to everything the dashboard shows.
//! `DerivedViews::compute` runs the filter-dependent ones in one go; the
//! activity feed depends on the store alone and is derived separately with
//! [`derive_activities`]. The session caches each until its inputs change.

pub mod activity;
pub mod breakdown;
pub mod insights;
pub mod kpi;
pub mod subsets;

pub use activity::{derive_activities, Activity, ActivityKind};
pub use breakdown::{department_stats, BudgetPoint, Breakdowns, DepartmentStats, RiskRewardPoint};
pub use insights::{Insight, InsightAction, InsightCategory, InsightRegistry, InsightRule};
pub use kpi::{compute_kpis, Kpi, KpiValue, PortfolioTotals, Trend, RISK_ALERT_THRESHOLD};
pub use subsets::{critical_projects, top_performers};

use crate::config::DashboardConfig;
use crate::core::Project;
use crate::filter::{FilterSpec, PreparedFilter};
use chrono::{DateTime, Utc};

/// Everything the filters shape, derived from one (store version, filter
/// version) pair.
#[derive(Debug, Clone, Default)]
pub struct DerivedViews {
    pub filtered: Vec<Project>,
    pub kpis: Vec<Kpi>,
    pub insights: Vec<Insight>,
    pub critical: Vec<Project>,
    pub top_performers: Vec<Project>,
    pub breakdowns: Breakdowns,
}

/// Inputs to a single recomputation
pub struct PipelineContext<'a> {
    pub config: &'a DashboardConfig,
    pub registry: &'a InsightRegistry,
    pub now: DateTime<Utc>,
}

impl DerivedViews {
    pub fn compute(store: &[Project], filters: &FilterSpec, ctx: &PipelineContext<'_>) -> Self {
        let filtered: Vec<Project> = PreparedFilter::new(filters, ctx.now)
            .apply(store)
            .into_iter()
            .cloned()
            .collect();

        let totals = PortfolioTotals::collect(&filtered);
        let config = ctx.config;

        let views = Self {
            kpis: compute_kpis(&filtered, config.sparkline_points),
            insights: ctx.registry.evaluate(&totals),
            critical: critical_projects(&filtered, config.subset_limit),
            top_performers: top_performers(&filtered, config.subset_limit),
            breakdowns: Breakdowns::compute(&filtered),
            filtered,
        };

        tracing::debug!(
            store = store.len(),
            filtered = views.filtered.len(),
            insights = views.insights.len(),
            "recomputed derived views"
        );

        views
    }
}
