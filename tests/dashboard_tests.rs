mod common;

use chrono::{Duration, TimeZone, Utc};
use common::{loaded_with, project, projects, seeded_session};
use portfolio_dashboard::{
    ActivityKind, DatePreset, Department, FilterSpec, Insight, InsightAction, InsightCategory,
    InsightRegistry, InsightRule, KpiValue, PortfolioTotals, ProjectStatus, Region, Severity,
};

#[tokio::test]
async fn test_seeded_store_with_default_filters() {
    let mut session = seeded_session();
    assert_eq!(session.load().await.unwrap(), 48);

    let filtered = session.filtered_projects().unwrap();
    assert_eq!(filtered.len(), 48);
    assert_eq!(filtered[0].id, "PRJ-0001");
    assert_eq!(filtered[47].id, "PRJ-0048");

    let kpis = session.kpis().unwrap();
    assert_eq!(kpis[0].value, KpiValue::Count(48));
    assert_eq!(kpis[1].value, KpiValue::Percent(47.9));
    assert_eq!(kpis[2].value, KpiValue::Percent(60.7));
    assert_eq!(kpis[3].value, KpiValue::Count(13));

    let categories: Vec<InsightCategory> =
        session.insights().unwrap().iter().map(|i| i.category).collect();
    assert_eq!(categories, [InsightCategory::Risk, InsightCategory::Timeline]);
    assert_eq!(session.insights().unwrap()[0].severity, Severity::Critical);
    assert_eq!(
        session.insights().unwrap()[0].title,
        "13 projects need immediate attention"
    );

    let critical = session.critical_projects().unwrap();
    assert_eq!(critical.len(), 5);
    assert!(critical.windows(2).all(|w| w[0].risk >= w[1].risk));

    let top = session.top_performers().unwrap();
    assert_eq!(top.len(), 5);
    assert!(top.windows(2).all(|w| w[0].efficiency >= w[1].efficiency));
}

#[tokio::test]
async fn test_max_risk_zero_keeps_only_riskless_projects() {
    let mut session = seeded_session();
    session.load().await.unwrap();

    session.set_filters(FilterSpec::new().with_max_risk(0));
    let filtered = session.filtered_projects().unwrap();
    assert!(filtered.iter().all(|p| p.risk == 0));

    let kpis = session.kpis().unwrap();
    assert_eq!(kpis[0].value, KpiValue::Count(filtered.len()));
}

#[tokio::test]
async fn test_empty_selection_zeroes_every_kpi() {
    let mut session = loaded_with(projects(10)).await;
    session.set_filters(FilterSpec::new().with_search("no such project"));

    assert!(session.filtered_projects().unwrap().is_empty());
    for kpi in session.kpis().unwrap() {
        assert_eq!(kpi.value.as_f64(), 0.0);
        assert_eq!(kpi.sparkline.len(), 30);
    }
    assert!(session.insights().unwrap().is_empty());
    assert!(session.critical_projects().unwrap().is_empty());
    assert_eq!(session.total_pages(), 0);
    assert!(session.current_page().unwrap().is_empty());
}

#[tokio::test]
async fn test_dimensions_combine_with_and() {
    let mut a = project("PRJ-0001");
    a.department = Department::It;
    a.region = Region::Europe;
    let mut b = project("PRJ-0002");
    b.department = Department::It;
    b.region = Region::AsiaPacific;
    let mut c = project("PRJ-0003");
    c.department = Department::Hr;
    c.region = Region::Europe;

    let mut session = loaded_with(vec![a, b, c]).await;
    session.set_filters(
        FilterSpec::new()
            .with_departments([Department::It, Department::Finance])
            .with_regions([Region::Europe]),
    );

    let ids: Vec<&str> = session
        .filtered_projects()
        .unwrap()
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, ["PRJ-0001"]);
}

#[tokio::test]
async fn test_search_matches_owner_and_region_case_insensitively() {
    let mut a = project("PRJ-0001");
    a.owner = "Benjamin White".to_string();
    let mut b = project("PRJ-0002");
    b.region = Region::LatinAmerica;

    let mut session = loaded_with(vec![a, b]).await;

    session.set_filters(FilterSpec::new().with_search("BENJAMIN"));
    assert_eq!(session.filtered_projects().unwrap().len(), 1);

    session.set_filters(FilterSpec::new().with_search("latin"));
    assert_eq!(session.filtered_projects().unwrap()[0].id, "PRJ-0002");

    session.set_filters(FilterSpec::new().with_search("prj-000"));
    assert_eq!(session.filtered_projects().unwrap().len(), 2);
}

#[tokio::test]
async fn test_date_preset_uses_session_clock() {
    let mut recent = project("PRJ-0001");
    recent.start_date = common::now() - Duration::days(10);
    let mut older = project("PRJ-0002");
    older.start_date = common::now() - Duration::days(60);
    let mut last_year = project("PRJ-0003");
    last_year.start_date = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();

    let mut session = loaded_with(vec![recent, older, last_year]).await;

    session.set_filters(FilterSpec::new().with_date_preset(DatePreset::Last30Days));
    assert_eq!(session.filtered_projects().unwrap().len(), 1);

    session.set_filters(FilterSpec::new().with_date_preset(DatePreset::Last90Days));
    assert_eq!(session.filtered_projects().unwrap().len(), 2);

    session.set_filters(FilterSpec::new().with_date_preset(DatePreset::YearToDate));
    assert_eq!(session.filtered_projects().unwrap().len(), 2);

    session.set_filters(FilterSpec::new().with_date_preset(DatePreset::All));
    assert_eq!(session.filtered_projects().unwrap().len(), 3);
}

#[tokio::test]
async fn test_risk_insight_severity_depends_on_count() {
    let risky = |n: usize| {
        let mut list = projects(10);
        for p in list.iter_mut().take(n) {
            p.risk = 75;
        }
        list
    };

    let session = loaded_with(risky(6)).await;
    let insight = &session.insights().unwrap()[0];
    assert_eq!(insight.category, InsightCategory::Risk);
    assert_eq!(insight.severity, Severity::Critical);

    let session = loaded_with(risky(3)).await;
    let insight = &session.insights().unwrap()[0];
    assert_eq!(insight.category, InsightCategory::Risk);
    assert_eq!(insight.severity, Severity::Warning);
}

#[tokio::test]
async fn test_activities_read_the_unfiltered_store() {
    let mut list = projects(20);
    list[0].status = ProjectStatus::Blocked;
    list[1].progress = 100;
    list[2].risk = 85;
    list[3].budget_spent = 198_000;
    list[16].status = ProjectStatus::Blocked;

    let mut session = loaded_with(list).await;
    session.set_filters(FilterSpec::new().with_max_risk(0));
    assert!(session.filtered_projects().unwrap().is_empty());

    let kinds: Vec<ActivityKind> = session.activities().unwrap().iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        [
            ActivityKind::StatusChange,
            ActivityKind::Completion,
            ActivityKind::Alert,
            ActivityKind::Budget
        ]
    );

    let feed = session.activities().unwrap();
    assert_eq!(feed[3].message, "Budget alert: Operations at 99%");
    assert!(feed.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
}

#[tokio::test]
async fn test_breakdowns_follow_filters_and_department_stats_do_not() {
    let mut list = projects(4);
    list[0].department = Department::Finance;
    list[0].delay_days = 5;
    list[1].department = Department::Finance;
    list[1].delay_days = 2;

    let mut session = loaded_with(list).await;
    session.filter_by_department(Department::Finance);

    let breakdowns = session.breakdowns().unwrap();
    assert_eq!(breakdowns.department_counts, vec![(Department::Finance, 2)]);
    let delays: Vec<u32> = breakdowns.delays.iter().map(|d| d.delay_days).collect();
    assert_eq!(delays, [2, 5]);

    let stats = session.department_stats().unwrap();
    let ops = stats.iter().find(|s| s.department == Department::Operations).unwrap();
    assert_eq!(ops.total, 2);
}

#[tokio::test]
async fn test_project_details() {
    let mut p = project("PRJ-0042");
    p.budget_allocated = 100_000;
    p.budget_spent = 120_000;
    p.risk = 90;
    p.delay_days = 10;

    let session = loaded_with(vec![p]).await;
    let found = session.project("PRJ-0042").unwrap();

    assert_eq!(found.burn_rate(), 120);
    assert_eq!(found.duration_days(), 90);
    // 90 * 0.4 + 10 * 2 + 20 * 0.5
    assert_eq!(found.severity().score(), 66.0);
    assert!(found.severity().explanation().contains("elevated"));
}

#[tokio::test]
async fn test_activity_feed_is_stable_across_filter_changes() {
    let mut session = seeded_session();
    session.load().await.unwrap();
    let before = session.activities().unwrap().to_vec();
    assert!(!before.is_empty());

    session.set_filters(FilterSpec::new().with_max_risk(50));
    assert_eq!(session.activities().unwrap(), before.as_slice());

    session.update_filters(|f| f.search = "cloud".into());
    session.filter_by_department(Department::It);
    session.apply_insight_action(InsightAction::FilterHighRisk);
    assert_eq!(session.activities().unwrap(), before.as_slice());
}

#[tokio::test]
async fn test_every_filter_change_sends_one_notification() {
    let mut session = loaded_with(projects(3)).await;

    session.set_filters(
        FilterSpec::new()
            .with_departments([Department::Finance])
            .with_max_risk(50),
    );
    session.update_filters(|f| f.date_preset = DatePreset::Last90Days);
    session.filter_by_status(ProjectStatus::Blocked);
    session.clear_filters();

    let messages: Vec<String> = session
        .notifications()
        .iter()
        .map(|t| t.message.clone())
        .collect();
    assert_eq!(
        messages,
        [
            "Dashboard loaded successfully",
            "Filters applied: Finance, All Regions, All Statuses, risk <= 50",
            "Filters applied: Finance, All Regions, All Statuses, Last 90 days, risk <= 50",
            "Filtered by Blocked",
            "Filters cleared",
        ]
    );
}

struct StalledPortfolio;

impl InsightRule for StalledPortfolio {
    fn name(&self) -> &'static str {
        "stalled"
    }

    fn evaluate(&self, totals: &PortfolioTotals) -> Option<Insight> {
        (totals.total > 0 && totals.on_time == totals.total).then(|| Insight {
            id: "stalled",
            title: format!("All {} projects on schedule", totals.total),
            description: "Nothing is running late.".to_string(),
            severity: Severity::Success,
            category: InsightCategory::Performance,
            action_label: "View Delays",
            action: InsightAction::ViewDelays,
            confidence: 99,
        })
    }
}

#[tokio::test]
async fn test_custom_insight_registry() {
    let mut registry = InsightRegistry::new();
    registry.register(Box::new(StalledPortfolio));

    let mut session = seeded_session()
        .with_source(common::FixedSource(projects(4)))
        .with_registry(registry);
    session.load().await.unwrap();

    assert_eq!(session.insight_rules(), ["stalled"]);
    let insights = session.insights().unwrap();
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].title, "All 4 projects on schedule");
}

#[tokio::test]
async fn test_scatter_and_budget_trend_follow_filters() {
    let mut list = projects(3);
    list[0].risk = 75;
    list[1].start_date = list[1].start_date - Duration::days(10);
    list[1].region = Region::Europe;
    list[2].region = Region::Europe;

    let mut session = loaded_with(list).await;
    session.filter_by_region(Region::Europe);

    let breakdowns = session.breakdowns().unwrap();
    let scatter: Vec<(&str, Severity)> = breakdowns
        .risk_reward
        .iter()
        .map(|p| (p.project_id.as_str(), p.band))
        .collect();
    assert_eq!(scatter, [("PRJ-0002", Severity::Success), ("PRJ-0003", Severity::Success)]);

    let budget: Vec<&str> = breakdowns.budget_trend.iter().map(|b| b.project_id.as_str()).collect();
    assert_eq!(budget, ["PRJ-0002", "PRJ-0003"]);
    // fewer than five points: every point forecasts from the latest spend
    let forecast: Vec<f64> = breakdowns.budget_trend.iter().filter_map(|b| b.forecast).collect();
    assert_eq!(forecast.len(), 2);
    assert!((forecast[0] - 106_000.0).abs() < 1e-6);
    assert!((forecast[1] - 108_000.0).abs() < 1e-6);
}
