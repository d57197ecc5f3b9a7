use portfolio_dashboard::core::BurnLevel;
use portfolio_dashboard::pipeline::breakdown::{DelayEntry, EfficiencyCell, PhaseRow, RadarMetrics};
use portfolio_dashboard::{
    Activity, Breakdowns, BudgetPoint, Department, DepartmentStats, FilterSpec, Insight, Kpi,
    Project, ProjectStatus, RiskRewardPoint,
};

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

/// One column of a rendered table: a header plus how to draw a cell.
struct Column<'a, T> {
    header: &'a str,
    align: Align,
    cell: Box<dyn Fn(&T) -> String + 'a>,
}

fn text<'a, T>(header: &'a str, cell: impl Fn(&T) -> String + 'a) -> Column<'a, T> {
    Column {
        header,
        align: Align::Left,
        cell: Box::new(cell),
    }
}

fn number<'a, T>(header: &'a str, cell: impl Fn(&T) -> String + 'a) -> Column<'a, T> {
    Column {
        header,
        align: Align::Right,
        cell: Box::new(cell),
    }
}

fn pad(value: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{:<width$}", value),
        Align::Right => format!("{:>width$}", value),
    }
}

/// Lay `items` out under `columns`, sized to the widest cell per column.
fn print_rows<T>(items: &[T], columns: &[Column<'_, T>]) {
    if items.is_empty() {
        println!("  (none)");
        return;
    }

    let cells: Vec<Vec<String>> = items
        .iter()
        .map(|item| columns.iter().map(|c| (c.cell)(item)).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .fold(c.header.chars().count(), usize::max)
        })
        .collect();

    let line = |values: Vec<String>| println!("  {}", values.join("  ").trim_end());

    line(
        columns
            .iter()
            .zip(&widths)
            .map(|(c, &w)| pad(c.header, w, c.align))
            .collect(),
    );
    line(widths.iter().map(|&w| "─".repeat(w)).collect());
    for row in cells {
        line(
            row.iter()
                .zip(columns.iter().zip(&widths))
                .map(|(value, (c, &w))| pad(value, w, c.align))
                .collect(),
        );
    }
}

fn sparkline(values: &[f64]) -> String {
    const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    values
        .iter()
        .map(|v| {
            if span <= f64::EPSILON {
                BARS[0]
            } else {
                let idx = ((v - min) / span * (BARS.len() - 1) as f64).round() as usize;
                BARS[idx.min(BARS.len() - 1)]
            }
        })
        .collect()
}

pub fn print_filters(filters: &FilterSpec) {
    println!("Filters: {}", filters.summary());
}

pub fn print_kpis(kpis: &[Kpi]) {
    print_rows(
        kpis,
        &[
            text("KPI", |k: &Kpi| k.label.to_string()),
            number("Value", |k: &Kpi| k.value.to_string()),
            number("Change", |k: &Kpi| format!("{} {:+.1}%", k.trend.arrow(), k.change_percent)),
            text("Trend", |k: &Kpi| sparkline(&k.sparkline)),
        ],
    );
}

pub fn print_insights(insights: &[Insight], rules: &[&str]) {
    if insights.is_empty() {
        println!("No insights for the current selection ({} rules checked)", rules.len());
        return;
    }
    for insight in insights {
        println!(
            "[{}] {} ({}% confidence)\n    {}\n    -> {}",
            insight.severity, insight.title, insight.confidence, insight.description, insight.action_label
        );
    }
}

pub fn print_projects(projects: &[Project]) {
    print_rows(
        projects,
        &[
            text("ID", |p: &Project| p.id.clone()),
            text("Name", |p: &Project| p.name.clone()),
            text("Department", |p: &Project| p.department.to_string()),
            text("Status", |p: &Project| p.status.to_string()),
            number("Risk", |p: &Project| p.risk.to_string()),
            number("Progress", |p: &Project| format!("{}%", p.progress)),
        ],
    );
}

pub fn print_activities(activities: &[Activity]) {
    print_rows(
        activities,
        &[
            text("When", |a: &Activity| a.timestamp.format("%Y-%m-%d %H:%M").to_string()),
            text("Severity", |a: &Activity| a.severity.to_string()),
            text("Kind", |a: &Activity| a.kind.as_str().to_string()),
            text("Message", |a: &Activity| a.message.clone()),
        ],
    );
}

pub fn print_breakdowns(b: &Breakdowns) {
    println!("Status");
    print_rows(
        &b.status_counts,
        &[
            text("Status", |(s, _): &(ProjectStatus, usize)| s.to_string()),
            number("Projects", |(_, n): &(ProjectStatus, usize)| n.to_string()),
        ],
    );

    println!("\nWorkload by department");
    print_rows(
        &b.department_counts,
        &[
            text("Department", |(d, _): &(Department, usize)| d.to_string()),
            number("Projects", |(_, n): &(Department, usize)| n.to_string()),
        ],
    );

    println!("\nDelays");
    print_rows(
        &b.delays,
        &[
            text("ID", |d: &DelayEntry| d.project_id.clone()),
            text("Name", |d: &DelayEntry| d.name.chars().take(20).collect()),
            number("Days", |d: &DelayEntry| d.delay_days.to_string()),
        ],
    );

    println!("\nEfficiency by department and region");
    print_rows(
        &b.efficiency_heatmap,
        &[
            text("Department", |c: &EfficiencyCell| c.department.to_string()),
            text("Region", |c: &EfficiencyCell| c.region.to_string()),
            number("Avg efficiency", |c: &EfficiencyCell| c.average_efficiency.to_string()),
        ],
    );

    println!("\nPhase by department");
    let mut phase_columns = vec![text("Phase", |row: &PhaseRow| row.phase.to_string())];
    phase_columns.extend(b.departments.iter().enumerate().map(|(i, d)| {
        number(d.as_str(), move |row: &PhaseRow| {
            row.counts.get(i).map_or_else(String::new, ToString::to_string)
        })
    }));
    print_rows(&b.phase_matrix, &phase_columns);

    println!("\nDepartment profile");
    print_rows(
        &b.radar,
        &[
            text("Department", |r: &RadarMetrics| r.department.to_string()),
            number("Progress", |r: &RadarMetrics| format!("{:.1}", r.progress)),
            number("Efficiency", |r: &RadarMetrics| format!("{:.1}", r.efficiency)),
            number("Safety", |r: &RadarMetrics| format!("{:.1}", r.safety)),
            number("Reward", |r: &RadarMetrics| format!("{:.1}", r.reward)),
            number("Burn", |r: &RadarMetrics| format!("{:.1}", r.budget_burn)),
        ],
    );

    println!("\nBudget over time");
    print_rows(
        &b.budget_trend,
        &[
            text("Start", |p: &BudgetPoint| p.start_date.format("%b %d").to_string()),
            text("ID", |p: &BudgetPoint| p.project_id.clone()),
            number("Allocated", |p: &BudgetPoint| p.allocated.to_string()),
            number("Spent", |p: &BudgetPoint| p.spent.to_string()),
            number("Forecast", |p: &BudgetPoint| {
                p.forecast.map_or_else(String::new, |f| format!("{:.0}", f))
            }),
        ],
    );

    println!("\nRisk vs reward");
    print_rows(
        &b.risk_reward,
        &[
            text("ID", |p: &RiskRewardPoint| p.project_id.clone()),
            number("Risk", |p: &RiskRewardPoint| p.risk.to_string()),
            number("Reward", |p: &RiskRewardPoint| p.reward.to_string()),
            text("Band", |p: &RiskRewardPoint| p.band.to_string()),
        ],
    );
}

pub fn print_department_stats(stats: &[DepartmentStats]) {
    print_rows(
        stats,
        &[
            text("Department", |s: &DepartmentStats| s.department.to_string()),
            number("Projects", |s: &DepartmentStats| s.total.to_string()),
            number("Avg risk", |s: &DepartmentStats| s.average_risk.to_string()),
            number("Avg efficiency", |s: &DepartmentStats| s.average_efficiency.to_string()),
        ],
    );
}

pub fn print_project_details(p: &Project) {
    let burn = match p.burn_level() {
        BurnLevel::Healthy => "healthy",
        BurnLevel::Warning => "warning",
        BurnLevel::Over => "over budget",
    };

    println!("{} {}", p.id, p.name);
    println!("  {} / {} / {} / {}", p.department, p.region, p.status, p.phase);
    println!("  owner     {}", p.owner);
    println!(
        "  timeline  {} -> {} ({} days, {} days delayed)",
        p.start_date.format("%Y-%m-%d"),
        p.end_date.format("%Y-%m-%d"),
        p.duration_days(),
        p.delay_days
    );
    println!(
        "  budget    {} of {} ({}%, {})",
        p.budget_spent,
        p.budget_allocated,
        p.burn_rate(),
        burn
    );
    println!(
        "  scores    risk {}, reward {}, efficiency {}, progress {}%",
        p.risk, p.reward, p.efficiency, p.progress
    );
    println!("\n{}", p.severity().explanation());
}
