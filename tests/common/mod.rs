#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use portfolio_dashboard::{
    DashboardConfig, DashboardSession, Department, FixedClock, FixedSequence, Project,
    ProjectPhase, ProjectSource, ProjectStatus, Region,
};

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap()
}

/// A project that passes every default filter and triggers no rule.
pub fn project(id: &str) -> Project {
    let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    Project {
        id: id.to_string(),
        name: format!("Project {id}"),
        department: Department::Operations,
        region: Region::NorthAmerica,
        status: ProjectStatus::InProgress,
        phase: ProjectPhase::Execution,
        owner: "Mia Thompson".to_string(),
        start_date: start,
        end_date: start + Duration::days(90),
        budget_allocated: 200_000,
        budget_spent: 100_000,
        risk: 30,
        reward: 60,
        efficiency: 75,
        delay_days: 0,
        progress: 50,
    }
}

pub fn projects(n: usize) -> Vec<Project> {
    (1..=n).map(|i| project(&format!("PRJ-{i:04}"))).collect()
}

/// Serves a fixed project list on every load.
pub struct FixedSource(pub Vec<Project>);

impl ProjectSource for FixedSource {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn load(&mut self, _count: usize) -> Vec<Project> {
        self.0.clone()
    }
}

/// Seeded generator, frozen clock, no load delay.
pub fn seeded_session() -> DashboardSession {
    DashboardSession::new(DashboardConfig::new().without_load_delay())
        .unwrap()
        .with_clock(FixedClock(now()))
}

pub async fn loaded_with(projects: Vec<Project>) -> DashboardSession {
    let mut session = DashboardSession::new(DashboardConfig::new().without_load_delay())
        .unwrap()
        .with_clock(FixedClock(now()))
        .with_random(FixedSequence::constant(0.0))
        .with_source(FixedSource(projects));
    session.load().await.unwrap();
    session
}
