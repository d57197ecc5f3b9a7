use super::{Department, ProjectPhase, ProjectStatus, Region};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single portfolio project.
///
/// Records are immutable once generated; a reload replaces the whole set.
/// `budget_spent` may exceed `budget_allocated`, which is how over-budget
/// projects are represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub department: Department,
    pub region: Region,
    pub status: ProjectStatus,
    pub phase: ProjectPhase,
    pub owner: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub budget_allocated: u64,
    pub budget_spent: u64,
    pub risk: u8,
    pub reward: u8,
    pub efficiency: u8,
    pub delay_days: u32,
    pub progress: u8,
}

/// Coarse classification of a burn rate for badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnLevel {
    Healthy,
    Warning,
    Over,
}

impl Project {
    /// `budget_spent / budget_allocated * 100`, unrounded. 0 when nothing was allocated.
    pub fn burn_ratio_percent(&self) -> f64 {
        if self.budget_allocated == 0 {
            return 0.0;
        }
        self.budget_spent as f64 / self.budget_allocated as f64 * 100.0
    }

    /// Burn rate rounded to a whole percent.
    pub fn burn_rate(&self) -> u32 {
        self.burn_ratio_percent().round() as u32
    }

    pub fn burn_level(&self) -> BurnLevel {
        match self.burn_rate() {
            rate if rate > 100 => BurnLevel::Over,
            rate if rate > 90 => BurnLevel::Warning,
            _ => BurnLevel::Healthy,
        }
    }

    /// Calendar length of the project, rounded up to whole days.
    pub fn duration_days(&self) -> i64 {
        let seconds = (self.end_date - self.start_date).num_seconds();
        (seconds + 86_399).div_euclid(86_400)
    }

    pub fn severity(&self) -> SeverityBreakdown {
        let burn_rate = self.burn_rate();
        let risk_points = f64::from(self.risk) * 0.4;
        let delay_points = f64::from(self.delay_days) * 2.0;
        let burn_points = if burn_rate > 100 {
            f64::from(burn_rate - 100) * 0.5
        } else {
            0.0
        };

        SeverityBreakdown {
            risk: self.risk,
            delay_days: self.delay_days,
            burn_rate,
            risk_points,
            delay_points,
            burn_points,
        }
    }
}

/// Weighted severity score behind the project detail explanation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityBreakdown {
    pub risk: u8,
    pub delay_days: u32,
    pub burn_rate: u32,
    pub risk_points: f64,
    pub delay_points: f64,
    pub burn_points: f64,
}

impl SeverityBreakdown {
    pub fn score(&self) -> f64 {
        self.risk_points + self.delay_points + self.burn_points
    }

    pub fn explanation(&self) -> String {
        let score = self.score();
        let verdict = if score > 80.0 {
            "This indicates critical attention required with immediate intervention needed."
        } else if score > 50.0 {
            "This suggests elevated concern and close monitoring is recommended."
        } else if score > 25.0 {
            "This shows moderate risk with standard oversight sufficient."
        } else {
            "This indicates low risk with the project proceeding well."
        };

        format!(
            "This project has a severity score of {} calculated from: \
             Risk ({}) contributing {:.1} points, \
             Delays ({} days) adding {:.1} points, \
             and Budget burn rate ({}%) adding {:.1} points. {}",
            score.round(),
            self.risk,
            self.risk_points,
            self.delay_days,
            self.delay_points,
            self.burn_rate,
            self.burn_points,
            verdict
        )
    }
}
