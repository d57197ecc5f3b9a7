// ============================================================================
// src/facade/session.rs - DashboardSession, the single entry point
// ============================================================================
//
// The session owns the store, the filter criteria and the table view, plus
// its collaborators (data source, notifier, clock, random source). All
// mutation goes through `&mut self`; every mutation ends with `refresh`.
// Filter-shaped views are keyed on (store version, filter version); the
// activity feed is keyed on the store version alone, so filter changes never
// redraw its jitter.
//
// ============================================================================

use crate::config::DashboardConfig;
use crate::core::{
    Clock, DashboardError, Department, Lcg, Project, ProjectStatus, RandomSource, Region, Result,
    SystemClock,
};
use crate::export::{self, ExportFormat};
use crate::filter::FilterSpec;
use crate::notify::{NotificationKind, Notifier, Toast, ToastLog};
use crate::pipeline::{
    department_stats, derive_activities, Activity, Breakdowns, DepartmentStats, DerivedViews,
    Insight, InsightAction, InsightRegistry, Kpi, PipelineContext, RISK_ALERT_THRESHOLD,
};
use crate::storage::{ProjectGenerator, ProjectSource, ProjectStore};
use crate::table::{SortColumn, SortKey, TableView};
use std::path::{Path, PathBuf};

/// Whether the first load has completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
}

struct CachedViews {
    store_version: u64,
    filter_version: u64,
    views: DerivedViews,
}

struct CachedFeed {
    store_version: u64,
    activities: Vec<Activity>,
}

pub struct DashboardSession {
    config: DashboardConfig,
    store: ProjectStore,
    filters: FilterSpec,
    filter_version: u64,
    table: TableView,
    registry: InsightRegistry,
    cache: Option<CachedViews>,
    feed: Option<CachedFeed>,
    source: Box<dyn ProjectSource>,
    notifier: Box<dyn Notifier>,
    clock: Box<dyn Clock>,
    random: Box<dyn RandomSource>,
}

impl DashboardSession {
    /// Session over the seeded generator with an in-memory toast log.
    pub fn new(config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store: ProjectStore::new(),
            filters: FilterSpec::default(),
            filter_version: 0,
            table: TableView::new(config.page_size),
            registry: InsightRegistry::with_default_rules(),
            cache: None,
            feed: None,
            source: Box::new(ProjectGenerator::new(config.seed)),
            notifier: Box::new(ToastLog::new()),
            clock: Box::new(SystemClock),
            random: Box::new(Lcg::new(config.seed)),
            config,
        })
    }

    pub fn with_source(mut self, source: impl ProjectSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Box::new(random);
        self
    }

    pub fn with_registry(mut self, registry: InsightRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Names of the insight rules evaluated on every recomputation
    pub fn insight_rules(&self) -> Vec<&'static str> {
        self.registry.list_rules()
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn state(&self) -> LoadState {
        if self.store.is_loaded() {
            LoadState::Ready
        } else {
            LoadState::Loading
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state() == LoadState::Loading
    }

    // ========================================================================
    // LOADING
    // ========================================================================

    /// Wait out the simulated latency, then populate the store.
    ///
    /// Returns the number of loaded projects.
    pub async fn load(&mut self) -> Result<usize> {
        if !self.config.load_delay.is_zero() {
            tracing::debug!(delay_ms = self.config.load_delay.as_millis() as u64, "simulating load latency");
            tokio::time::sleep(self.config.load_delay).await;
        }

        let projects = self.source.load(self.config.project_count);
        let count = projects.len();
        let version = self.store.replace(projects, self.clock.now());
        self.refresh();

        tracing::info!(source = self.source.name(), count, version, "dashboard loaded");
        self.notify(NotificationKind::Success, "Dashboard loaded successfully");
        Ok(count)
    }

    /// Replace the whole store with a fresh load.
    pub async fn reload(&mut self) -> Result<usize> {
        self.load().await
    }

    // ========================================================================
    // FILTERS
    // ========================================================================

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    /// Replace the criteria; notifies "Filters applied: ..." with a summary.
    pub fn set_filters(&mut self, filters: FilterSpec) {
        self.filters = filters;
        self.filters_changed(None);
    }

    pub fn update_filters<F>(&mut self, update: F)
    where
        F: FnOnce(&mut FilterSpec),
    {
        update(&mut self.filters);
        self.filters_changed(None);
    }

    pub fn clear_filters(&mut self) {
        self.filters = FilterSpec::default();
        self.filters_changed(Some("Filters cleared".to_string()));
    }

    pub fn filter_by_department(&mut self, department: Department) {
        self.filters.departments = [department].into_iter().collect();
        self.filters_changed(Some(format!("Filtered by {}", department)));
    }

    pub fn filter_by_region(&mut self, region: Region) {
        self.filters.regions = [region].into_iter().collect();
        self.filters_changed(Some(format!("Filtered by {}", region)));
    }

    pub fn filter_by_status(&mut self, status: ProjectStatus) {
        self.filters.statuses = [status].into_iter().collect();
        self.filters_changed(Some(format!("Filtered by {}", status)));
    }

    /// Carry out an insight card's call-to-action.
    pub fn apply_insight_action(&mut self, action: InsightAction) {
        let message = match action {
            InsightAction::FilterHighRisk => {
                // Caps at the alert threshold: the result keeps risk <= 70, not the alerts.
                self.filters.max_risk = i32::from(RISK_ALERT_THRESHOLD);
                self.filters_changed(Some("Filtered to show high-risk projects".to_string()));
                return;
            }
            InsightAction::FilterLowEfficiency => "Showing low-efficiency projects",
            InsightAction::ViewBudget => "Viewing budget analysis",
            InsightAction::ViewDelays => "Viewing delay analysis",
        };
        self.notify(NotificationKind::Info, message);
    }

    /// Bump the filter version, recompute, then send exactly one
    /// notification: `message`, or a summary of the new criteria.
    fn filters_changed(&mut self, message: Option<String>) {
        self.filter_version += 1;
        tracing::debug!(version = self.filter_version, "filters changed");
        self.refresh();

        let message =
            message.unwrap_or_else(|| format!("Filters applied: {}", self.filters.summary()));
        self.notify(NotificationKind::Info, message);
    }

    // ========================================================================
    // RECOMPUTATION
    // ========================================================================

    fn refresh(&mut self) {
        if !self.store.is_loaded() {
            return;
        }

        let store_version = self.store.version();
        let now = self.clock.now();

        if self.feed.as_ref().is_none_or(|f| f.store_version != store_version) {
            let activities = derive_activities(
                self.store.projects(),
                now,
                self.random.as_mut(),
                self.config.activity_window,
                self.config.activity_limit,
            );
            self.feed = Some(CachedFeed {
                store_version,
                activities,
            });
        }

        let fresh = self.cache.as_ref().is_some_and(|c| {
            c.store_version == store_version && c.filter_version == self.filter_version
        });
        if fresh {
            return;
        }

        let ctx = PipelineContext {
            config: &self.config,
            registry: &self.registry,
            now,
        };
        let views = DerivedViews::compute(self.store.projects(), &self.filters, &ctx);

        self.cache = Some(CachedViews {
            store_version,
            filter_version: self.filter_version,
            views,
        });
        self.table.reset_page();
    }

    fn views(&self) -> Result<&DerivedViews> {
        match &self.cache {
            Some(cached) => Ok(&cached.views),
            None => {
                tracing::warn!("derived views requested before the first load");
                Err(DashboardError::NotLoaded(
                    "derived views are available after load()".into(),
                ))
            }
        }
    }

    // ========================================================================
    // DERIVED VIEWS
    // ========================================================================

    pub fn filtered_projects(&self) -> Result<&[Project]> {
        Ok(&self.views()?.filtered)
    }

    pub fn kpis(&self) -> Result<&[Kpi]> {
        Ok(&self.views()?.kpis)
    }

    /// Recent activity over the unfiltered store
    pub fn activities(&self) -> Result<&[Activity]> {
        self.views()?;
        Ok(self.feed.as_ref().map(|f| f.activities.as_slice()).unwrap_or_default())
    }

    pub fn insights(&self) -> Result<&[Insight]> {
        Ok(&self.views()?.insights)
    }

    pub fn critical_projects(&self) -> Result<&[Project]> {
        Ok(&self.views()?.critical)
    }

    pub fn top_performers(&self) -> Result<&[Project]> {
        Ok(&self.views()?.top_performers)
    }

    pub fn breakdowns(&self) -> Result<&Breakdowns> {
        Ok(&self.views()?.breakdowns)
    }

    /// Unfiltered lookup by id
    pub fn project(&self, id: &str) -> Result<&Project> {
        if !self.store.is_loaded() {
            return Err(DashboardError::NotLoaded(format!("cannot look up '{}'", id)));
        }
        self.store
            .get(id)
            .ok_or_else(|| DashboardError::ProjectNotFound(id.to_string()))
    }

    /// Per-department summary over the unfiltered store
    pub fn department_stats(&self) -> Result<Vec<DepartmentStats>> {
        self.views()?;
        Ok(department_stats(self.store.projects()))
    }

    // ========================================================================
    // TABLE
    // ========================================================================

    pub fn table(&self) -> &TableView {
        &self.table
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.table.sort()
    }

    /// Tri-state column click
    pub fn select_sort(&mut self, column: SortColumn) -> Option<SortKey> {
        self.table.select_sort(column)
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) {
        self.table.set_sort(sort);
    }

    fn filtered_len(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| c.views.filtered.len())
    }

    pub fn set_page(&mut self, page: usize) -> usize {
        let total = self.filtered_len();
        self.table.set_page(page, total)
    }

    pub fn next_page(&mut self) -> usize {
        let total = self.filtered_len();
        self.table.next_page(total)
    }

    pub fn prev_page(&mut self) -> usize {
        let total = self.filtered_len();
        self.table.prev_page(total)
    }

    pub fn total_pages(&self) -> usize {
        self.table.total_pages(self.filtered_len())
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        self.table.page_numbers(self.filtered_len())
    }

    /// Sorted rows of the current page
    pub fn current_page(&self) -> Result<Vec<Project>> {
        Ok(self.table.visible(&self.views()?.filtered))
    }

    // ========================================================================
    // EXPORT
    // ========================================================================

    /// Render the filtered list without touching the filesystem.
    pub fn render_export(&self, format: ExportFormat) -> Result<String> {
        let filtered = &self.views()?.filtered;
        match format {
            ExportFormat::Csv => Ok(export::to_csv(filtered)),
            ExportFormat::Json => export::to_json(filtered, &self.filters),
        }
    }

    /// Write the filtered list to `path` (or the format's default file name).
    pub fn export(&mut self, format: ExportFormat, path: Option<&Path>) -> Result<PathBuf> {
        let contents = self.render_export(format)?;
        let target = path.map_or_else(|| PathBuf::from(format.default_filename()), Path::to_path_buf);

        match export::write_atomic(&target, &contents) {
            Ok(written) => {
                let message = match format {
                    ExportFormat::Csv => "Projects exported to CSV",
                    ExportFormat::Json => "Dashboard exported to JSON",
                };
                self.notify(NotificationKind::Success, message);
                Ok(written)
            }
            Err(e) => {
                self.notify(NotificationKind::Error, format!("Export failed: {}", e));
                Err(e)
            }
        }
    }

    /// Write one project as JSON into `dir` as `project-{id}.json`.
    pub fn export_project(&mut self, id: &str, dir: &Path) -> Result<PathBuf> {
        let project = self.project(id)?;
        let contents = export::project_to_json(project)?;
        let target = dir.join(export::project_filename(project));

        let written = export::write_atomic(&target, &contents)?;
        self.notify(NotificationKind::Success, "Project exported successfully");
        Ok(written)
    }

    // ========================================================================
    // NOTIFICATIONS
    // ========================================================================

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let toast = Toast::new(kind, message, self.clock.now(), self.config.toast_duration);
        self.notifier.notify(toast);
    }

    /// Notifications still on screen after pruning expired ones
    pub fn notifications(&mut self) -> &[Toast] {
        let now = self.clock.now();
        self.notifier.prune_expired(now);
        self.notifier.active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FixedClock, FixedSequence};
    use chrono::{TimeZone, Utc};

    fn session() -> DashboardSession {
        let now = Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap();
        DashboardSession::new(DashboardConfig::new().without_load_delay())
            .unwrap()
            .with_clock(FixedClock(now))
            .with_random(FixedSequence::constant(0.0))
    }

    #[test]
    fn test_views_unavailable_before_load() {
        let s = session();
        assert!(s.is_loading());
        assert!(matches!(s.kpis(), Err(DashboardError::NotLoaded(_))));
        assert!(matches!(s.project("PRJ-0001"), Err(DashboardError::NotLoaded(_))));
        assert!(s.current_page().is_err());
        assert_eq!(s.total_pages(), 0);
    }

    #[tokio::test]
    async fn test_load_populates_and_notifies() {
        let mut s = session();
        assert_eq!(s.load().await.unwrap(), 48);
        assert_eq!(s.state(), LoadState::Ready);
        assert_eq!(s.filtered_projects().unwrap().len(), 48);
        assert_eq!(s.total_pages(), 6);

        let messages: Vec<String> = s.notifications().iter().map(|t| t.message.clone()).collect();
        assert_eq!(messages, ["Dashboard loaded successfully"]);
    }

    #[tokio::test]
    async fn test_filter_change_resets_page() {
        let mut s = session();
        s.load().await.unwrap();
        s.set_page(4);
        assert_eq!(s.table().page(), 4);

        s.update_filters(|f| f.search = "cloud".into());
        assert_eq!(s.table().page(), 1);
        assert!(s
            .filtered_projects()
            .unwrap()
            .iter()
            .all(|p| p.name.to_lowercase().contains("cloud")));
    }

    #[tokio::test]
    async fn test_quick_filter_replaces_dimension() {
        let mut s = session();
        s.load().await.unwrap();
        s.update_filters(|f| f.departments = [Department::It, Department::Hr].into_iter().collect());
        s.filter_by_department(Department::Finance);

        assert_eq!(s.filters().departments.len(), 1);
        assert!(s.filters().departments.contains(&Department::Finance));
        assert!(s
            .filtered_projects()
            .unwrap()
            .iter()
            .all(|p| p.department == Department::Finance));
        let messages: Vec<String> = s.notifications().iter().map(|t| t.message.clone()).collect();
        assert_eq!(
            messages,
            [
                "Dashboard loaded successfully",
                "Filters applied: 2 Departments, All Regions, All Statuses",
                "Filtered by Finance",
            ]
        );
    }

    #[tokio::test]
    async fn test_high_risk_action_caps_max_risk() {
        let mut s = session();
        s.load().await.unwrap();
        s.apply_insight_action(InsightAction::FilterHighRisk);
        assert_eq!(s.filters().max_risk, 70);
        assert!(s.filtered_projects().unwrap().iter().all(|p| p.risk <= 70));

        s.apply_insight_action(InsightAction::ViewBudget);
        assert_eq!(s.filters().max_risk, 70);

        s.clear_filters();
        assert!(s.filters().is_default());

        let messages: Vec<String> = s.notifications().iter().map(|t| t.message.clone()).collect();
        assert_eq!(
            &messages[1..],
            [
                "Filtered to show high-risk projects",
                "Viewing budget analysis",
                "Filters cleared",
            ]
        );
    }

    #[tokio::test]
    async fn test_feed_survives_filter_changes() {
        let mut s = DashboardSession::new(DashboardConfig::new().without_load_delay())
            .unwrap()
            .with_clock(FixedClock(Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap()));
        s.load().await.unwrap();
        let before = s.activities().unwrap().to_vec();
        assert!(!before.is_empty());

        s.set_filters(FilterSpec::new().with_max_risk(50));
        s.filter_by_region(Region::Europe);
        s.clear_filters();
        assert_eq!(s.activities().unwrap(), before.as_slice());
    }

    #[tokio::test]
    async fn test_lookup_ignores_filters() {
        let mut s = session();
        s.load().await.unwrap();
        s.set_filters(FilterSpec::new().with_max_risk(0));
        assert!(s.filtered_projects().unwrap().is_empty());

        assert_eq!(s.project("PRJ-0001").unwrap().id, "PRJ-0001");
        assert!(matches!(s.project("PRJ-9999"), Err(DashboardError::ProjectNotFound(_))));

        let stats = s.department_stats().unwrap();
        assert_eq!(stats.iter().map(|d| d.total).sum::<usize>(), 48);
    }

    #[tokio::test]
    async fn test_reload_is_deterministic() {
        let mut s = session();
        s.load().await.unwrap();
        let before = s.filtered_projects().unwrap().to_vec();
        s.reload().await.unwrap();
        assert_eq!(s.filtered_projects().unwrap(), before.as_slice());
    }
}
