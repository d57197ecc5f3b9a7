// ============================================================================
// src/pipeline/activity.rs - Recent activity feed
// ============================================================================
//
// Activities are synthesized from the unfiltered store, not from the filtered
// view. Only the first `window` records (store order) are considered; each
// yields at most one activity by first-matching rule. Timestamps step back
// 15 minutes per index plus up to 10 minutes of jitter, so record `i` is
// always more recent than record `i + 1`.
//
// ============================================================================

use crate::core::{Project, ProjectStatus, RandomSource, Severity};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

const MINUTES_PER_INDEX: i64 = 15;
const JITTER_MINUTES: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    StatusChange,
    Completion,
    Alert,
    Budget,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::StatusChange => "status_change",
            ActivityKind::Completion => "completion",
            ActivityKind::Alert => "alert",
            ActivityKind::Budget => "budget",
        }
    }

    /// 1-based position of the rule that produced this kind
    fn rule_number(&self) -> u8 {
        match self {
            ActivityKind::StatusChange => 1,
            ActivityKind::Completion => 2,
            ActivityKind::Alert => 3,
            ActivityKind::Budget => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub kind: ActivityKind,
    pub project_id: String,
    pub project_name: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
}

/// First matching rule for a project, or `None` when nothing noteworthy happened.
pub fn classify(project: &Project) -> Option<(ActivityKind, Severity, String)> {
    if project.status == ProjectStatus::Blocked {
        return Some((
            ActivityKind::StatusChange,
            Severity::Critical,
            format!("{} moved to Blocked status", project.name),
        ));
    }

    if project.progress == 100 {
        return Some((
            ActivityKind::Completion,
            Severity::Success,
            format!("{} completed successfully", project.name),
        ));
    }

    if project.risk > 80 {
        return Some((
            ActivityKind::Alert,
            Severity::Warning,
            format!("High risk alert for {}", project.name),
        ));
    }

    if project.budget_spent as f64 > project.budget_allocated as f64 * 0.95 {
        return Some((
            ActivityKind::Budget,
            Severity::Warning,
            format!(
                "Budget alert: {} at {}%",
                project.department,
                project.burn_rate()
            ),
        ));
    }

    None
}

/// Build the feed: newest first, at most `limit` entries.
///
/// One jitter value is drawn per considered record, whether or not it
/// produces an activity.
pub fn derive_activities(
    projects: &[Project],
    now: DateTime<Utc>,
    random: &mut dyn RandomSource,
    window: usize,
    limit: usize,
) -> Vec<Activity> {
    let mut activities: Vec<Activity> = projects
        .iter()
        .take(window)
        .enumerate()
        .filter_map(|(index, project)| {
            let minutes_ago = index as i64 * MINUTES_PER_INDEX + random.next_below(JITTER_MINUTES) as i64;
            let timestamp = now - Duration::minutes(minutes_ago);

            classify(project).map(|(kind, severity, message)| Activity {
                id: format!("act-{}-{}", index, kind.rule_number()),
                kind,
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                message,
                timestamp,
                severity,
            })
        })
        .collect();

    activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    activities.truncate(limit);
    activities
}
