// ============================================================================
// Portfolio Dashboard Library
// ============================================================================

pub mod config;
pub mod core;
pub mod export;
pub mod facade;
pub mod filter;
pub mod notify;
pub mod pipeline;
pub mod storage;
pub mod table;
pub mod trend;

// Re-export main types for convenience
pub use config::DashboardConfig;
pub use self::core::{
    Clock, DashboardError, Department, FixedClock, FixedSequence, Lcg, Project, ProjectPhase,
    ProjectStatus, RandomSource, Region, Result, Severity, SystemClock,
};
pub use export::ExportFormat;
pub use facade::{DashboardSession, LoadState};
pub use filter::{DatePreset, FilterSpec};
pub use notify::{NotificationKind, Notifier, NullNotifier, Toast, ToastLog};
pub use pipeline::{
    Activity, ActivityKind, Breakdowns, BudgetPoint, DepartmentStats, Insight, InsightAction,
    InsightCategory, InsightRegistry, InsightRule, Kpi, KpiValue, PortfolioTotals, RiskRewardPoint,
    Trend,
};
pub use storage::{ProjectGenerator, ProjectSource};
pub use table::{SortColumn, SortDirection, SortKey, TableView};

/// Load a session with the demo defaults and no simulated latency.
///
/// # Examples
///
/// ```
/// use portfolio_dashboard::{DashboardConfig, FilterSpec, Department};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut session = portfolio_dashboard::load_session(DashboardConfig::default()).await?;
/// assert_eq!(session.filtered_projects()?.len(), 48);
///
/// session.set_filters(FilterSpec::new().with_departments([Department::It]));
/// for kpi in session.kpis()? {
///     println!("{}: {}", kpi.label, kpi.value);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn load_session(config: DashboardConfig) -> Result<DashboardSession> {
    let mut session = DashboardSession::new(config.without_load_delay())?;
    session.load().await?;
    Ok(session)
}
