use crate::core::{DashboardError, Department, ProjectStatus, Region, Result};
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Start-date window applied by the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DatePreset {
    #[serde(rename = "Last 30 days")]
    Last30Days,
    #[serde(rename = "Last 90 days")]
    Last90Days,
    #[serde(rename = "YTD")]
    YearToDate,
    #[serde(rename = "All")]
    #[default]
    All,
}

impl DatePreset {
    pub const ALL: &'static [DatePreset] = &[
        DatePreset::Last30Days,
        DatePreset::Last90Days,
        DatePreset::YearToDate,
        DatePreset::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatePreset::Last30Days => "Last 30 days",
            DatePreset::Last90Days => "Last 90 days",
            DatePreset::YearToDate => "YTD",
            DatePreset::All => "All",
        }
    }

    /// Earliest admissible start date, or `None` when the preset is `All`.
    ///
    /// Rolling presets keep the time of day of `now`; YTD starts at UTC
    /// midnight on January 1st of `now`'s year.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            DatePreset::Last30Days => Some(now - Duration::days(30)),
            DatePreset::Last90Days => Some(now - Duration::days(90)),
            DatePreset::YearToDate => Utc.with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0).single(),
            DatePreset::All => None,
        }
    }
}

impl fmt::Display for DatePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatePreset {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "last30days" | "30d" | "30" => Ok(DatePreset::Last30Days),
            "last90days" | "90d" | "90" => Ok(DatePreset::Last90Days),
            "ytd" | "yeartodate" => Ok(DatePreset::YearToDate),
            "all" => Ok(DatePreset::All),
            _ => Err(DashboardError::Parse(format!("unknown date preset '{}'", s))),
        }
    }
}

/// The live filter criteria of a dashboard session.
///
/// Empty selection sets mean "no restriction". Bounds are deliberately
/// signed and unvalidated: an out-of-range bound just matches fewer or more
/// projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    pub departments: BTreeSet<Department>,
    pub regions: BTreeSet<Region>,
    pub statuses: BTreeSet<ProjectStatus>,
    pub date_preset: DatePreset,
    pub search: String,
    pub max_risk: i32,
    pub min_reward: i32,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            departments: BTreeSet::new(),
            regions: BTreeSet::new(),
            statuses: BTreeSet::new(),
            date_preset: DatePreset::All,
            search: String::new(),
            max_risk: 100,
            min_reward: 0,
        }
    }
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_departments(mut self, departments: impl IntoIterator<Item = Department>) -> Self {
        self.departments = departments.into_iter().collect();
        self
    }

    pub fn with_regions(mut self, regions: impl IntoIterator<Item = Region>) -> Self {
        self.regions = regions.into_iter().collect();
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = ProjectStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    pub fn with_date_preset(mut self, preset: DatePreset) -> Self {
        self.date_preset = preset;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_max_risk(mut self, max_risk: i32) -> Self {
        self.max_risk = max_risk;
        self
    }

    pub fn with_min_reward(mut self, min_reward: i32) -> Self {
        self.min_reward = min_reward;
        self
    }

    /// True when nothing is restricted
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Short label for a multi-select dimension, e.g. "All Regions" or "3 Regions".
    pub fn selection_label<T: fmt::Display>(selected: &BTreeSet<T>, plural: &str) -> String {
        match selected.len() {
            0 => format!("All {}", plural),
            1 => selected
                .iter()
                .next()
                .map(ToString::to_string)
                .unwrap_or_default(),
            n => format!("{} {}", n, plural),
        }
    }

    /// One-line description of the active criteria, as shown in the
    /// filter-changed notification.
    pub fn summary(&self) -> String {
        let mut parts = vec![
            Self::selection_label(&self.departments, "Departments"),
            Self::selection_label(&self.regions, "Regions"),
            Self::selection_label(&self.statuses, "Statuses"),
        ];
        if self.date_preset != DatePreset::All {
            parts.push(self.date_preset.to_string());
        }
        if !self.search.trim().is_empty() {
            parts.push(format!("\"{}\"", self.search.trim()));
        }
        if self.max_risk < 100 {
            parts.push(format!("risk <= {}", self.max_risk));
        }
        if self.min_reward > 0 {
            parts.push(format!("reward >= {}", self.min_reward));
        }
        parts.join(", ")
    }
}
