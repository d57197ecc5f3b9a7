// ============================================================================
// src/pipeline/breakdown.rs - Chart-ready aggregates
// ============================================================================
//
// Everything except `department_stats` is computed over the filtered set.
// Groupings keep first-appearance order of their keys so a chart renders
// categories in the order the data introduced them.
//
// ============================================================================

use crate::core::{Department, Project, ProjectPhase, ProjectStatus, Region, Severity};
use chrono::{DateTime, Utc};
use serde::Serialize;

const DELAY_CHART_LIMIT: usize = 10;
/// Trailing points of the budget trend that carry a forecast value
const FORECAST_POINTS: usize = 5;
const FORECAST_STEP: f64 = 0.02;

/// One point of the budget trend, ordered by start date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPoint {
    pub project_id: String,
    pub start_date: DateTime<Utc>,
    pub allocated: u64,
    pub spent: u64,
    /// Projected spend, present on the last five points only
    pub forecast: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRewardPoint {
    pub project_id: String,
    pub name: String,
    pub risk: u8,
    pub reward: u8,
    /// critical above 70 risk, warning above 40, success otherwise
    pub band: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayEntry {
    pub project_id: String,
    pub name: String,
    pub delay_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyCell {
    pub department: Department,
    pub region: Region,
    pub average_efficiency: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseRow {
    pub phase: ProjectPhase,
    /// One count per entry of `Breakdowns::departments`
    pub counts: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarMetrics {
    pub department: Department,
    pub progress: f64,
    pub efficiency: f64,
    /// `100 - average risk`, higher is safer
    pub safety: f64,
    pub reward: f64,
    pub budget_burn: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentStats {
    pub department: Department,
    pub total: usize,
    pub average_risk: u32,
    pub average_efficiency: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdowns {
    pub status_counts: Vec<(ProjectStatus, usize)>,
    pub department_counts: Vec<(Department, usize)>,
    pub departments: Vec<Department>,
    pub delays: Vec<DelayEntry>,
    pub efficiency_heatmap: Vec<EfficiencyCell>,
    pub phase_matrix: Vec<PhaseRow>,
    pub radar: Vec<RadarMetrics>,
    pub budget_trend: Vec<BudgetPoint>,
    pub risk_reward: Vec<RiskRewardPoint>,
}

impl Breakdowns {
    pub fn compute(projects: &[Project]) -> Self {
        let departments = first_seen(projects.iter().map(|p| p.department));
        Self {
            status_counts: count_by(projects, |p| p.status),
            department_counts: count_by(projects, |p| p.department),
            delays: delays(projects),
            efficiency_heatmap: efficiency_heatmap(projects),
            phase_matrix: phase_matrix(projects, &departments),
            radar: radar(projects, &departments),
            budget_trend: budget_trend(projects),
            risk_reward: risk_reward(projects),
            departments,
        }
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

fn first_seen<K: PartialEq>(keys: impl Iterator<Item = K>) -> Vec<K> {
    let mut seen = Vec::new();
    for key in keys {
        if !seen.contains(&key) {
            seen.push(key);
        }
    }
    seen
}

fn count_by<K, F>(projects: &[Project], key: F) -> Vec<(K, usize)>
where
    K: PartialEq + Copy,
    F: Fn(&Project) -> K,
{
    let mut counts: Vec<(K, usize)> = Vec::new();
    for project in projects {
        let k = key(project);
        match counts.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, count)) => *count += 1,
            None => counts.push((k, 1)),
        }
    }
    counts
}

fn average<'a>(projects: impl Iterator<Item = &'a Project>, metric: impl Fn(&Project) -> f64) -> f64 {
    let (sum, n) = projects.fold((0.0, 0usize), |(sum, n), p| (sum + metric(p), n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Delayed projects, least delayed first, capped at ten.
fn delays(projects: &[Project]) -> Vec<DelayEntry> {
    let mut delayed: Vec<&Project> = projects.iter().filter(|p| p.delay_days > 0).collect();
    delayed.sort_by_key(|p| p.delay_days);
    delayed
        .into_iter()
        .take(DELAY_CHART_LIMIT)
        .map(|p| DelayEntry {
            project_id: p.id.clone(),
            name: p.name.clone(),
            delay_days: p.delay_days,
        })
        .collect()
}

/// Average efficiency per department/region pair; empty pairs are omitted.
fn efficiency_heatmap(projects: &[Project]) -> Vec<EfficiencyCell> {
    let departments = first_seen(projects.iter().map(|p| p.department));
    let regions = first_seen(projects.iter().map(|p| p.region));

    let mut cells = Vec::new();
    for &department in &departments {
        for &region in &regions {
            let mut matching = projects
                .iter()
                .filter(|p| p.department == department && p.region == region)
                .peekable();
            if matching.peek().is_none() {
                continue;
            }
            let avg = average(matching, |p| f64::from(p.efficiency));
            cells.push(EfficiencyCell {
                department,
                region,
                average_efficiency: avg.round() as u32,
            });
        }
    }
    cells
}

fn phase_matrix(projects: &[Project], departments: &[Department]) -> Vec<PhaseRow> {
    ProjectPhase::ALL
        .iter()
        .map(|&phase| PhaseRow {
            phase,
            counts: departments
                .iter()
                .map(|&d| {
                    projects
                        .iter()
                        .filter(|p| p.department == d && p.phase == phase)
                        .count()
                })
                .collect(),
        })
        .collect()
}

fn radar(projects: &[Project], departments: &[Department]) -> Vec<RadarMetrics> {
    departments
        .iter()
        .map(|&department| {
            let members = || projects.iter().filter(move |p| p.department == department);
            RadarMetrics {
                department,
                progress: average(members(), |p| f64::from(p.progress)),
                efficiency: average(members(), |p| f64::from(p.efficiency)),
                safety: 100.0 - average(members(), |p| f64::from(p.risk)),
                reward: average(members(), |p| f64::from(p.reward)),
                budget_burn: average(members(), Project::burn_ratio_percent),
            }
        })
        .collect()
}

/// Allocated and spent per project by ascending start date.
///
/// The last five points also carry a forecast that grows the final spend by
/// 2% per step.
fn budget_trend(projects: &[Project]) -> Vec<BudgetPoint> {
    let mut sorted: Vec<&Project> = projects.iter().collect();
    sorted.sort_by_key(|p| p.start_date);

    let n = sorted.len();
    let last_spent = sorted.last().map_or(0.0, |p| p.budget_spent as f64);
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, p)| BudgetPoint {
            project_id: p.id.clone(),
            start_date: p.start_date,
            allocated: p.budget_allocated,
            spent: p.budget_spent,
            forecast: (i + FORECAST_POINTS >= n)
                .then(|| last_spent * (1.0 + (i + FORECAST_POINTS - n) as f64 * FORECAST_STEP)),
        })
        .collect()
}

fn risk_reward(projects: &[Project]) -> Vec<RiskRewardPoint> {
    projects
        .iter()
        .map(|p| RiskRewardPoint {
            project_id: p.id.clone(),
            name: p.name.clone(),
            risk: p.risk,
            reward: p.reward,
            band: match p.risk {
                71.. => Severity::Critical,
                41..=70 => Severity::Warning,
                _ => Severity::Success,
            },
        })
        .collect()
}

/// Per-department summary over the whole store, in `Department::ALL` order.
///
/// Departments without projects report zeros.
pub fn department_stats(projects: &[Project]) -> Vec<DepartmentStats> {
    Department::ALL
        .iter()
        .map(|&department| {
            let members = || projects.iter().filter(move |p| p.department == department);
            DepartmentStats {
                department,
                total: members().count(),
                average_risk: average(members(), |p| f64::from(p.risk)).round() as u32,
                average_efficiency: average(members(), |p| f64::from(p.efficiency)).round() as u32,
            }
        })
        .collect()
}
