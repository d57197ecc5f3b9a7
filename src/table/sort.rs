// ============================================================================
// src/table/sort.rs - Column sorting for the project table
// ============================================================================
//
// Design Patterns:
// - Comparator Pattern: each column extracts a `Value`, the comparator
//   applies the direction
//
// Sorting is stable, so rows with equal keys keep their filtered order.
//
// ============================================================================

use crate::core::{DashboardError, Project, Result, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    Name,
    Department,
    Status,
    Risk,
    Progress,
}

impl SortColumn {
    pub const ALL: &'static [SortColumn] = &[
        SortColumn::Name,
        SortColumn::Department,
        SortColumn::Status,
        SortColumn::Risk,
        SortColumn::Progress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Name => "name",
            SortColumn::Department => "department",
            SortColumn::Status => "status",
            SortColumn::Risk => "risk",
            SortColumn::Progress => "progress",
        }
    }

    /// Sort key of `project` in this column
    pub fn extract(&self, project: &Project) -> Value {
        match self {
            SortColumn::Name => Value::from(project.name.as_str()),
            SortColumn::Department => Value::from(project.department.as_str()),
            SortColumn::Status => Value::from(project.status.as_str()),
            SortColumn::Risk => Value::Integer(i64::from(project.risk)),
            SortColumn::Progress => Value::Integer(i64::from(project.progress)),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortColumn {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        SortColumn::ALL
            .iter()
            .copied()
            .find(|column| column.as_str() == wanted)
            .ok_or_else(|| DashboardError::Parse(format!("unknown sort column '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Active sort: one column in one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(column: SortColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(column: SortColumn) -> Self {
        Self {
            column,
            direction: SortDirection::Desc,
        }
    }

    /// Next state after the user selects `column`.
    ///
    /// Same column cycles asc -> desc -> unsorted; a different column always
    /// starts ascending.
    pub fn cycle(current: Option<SortKey>, column: SortColumn) -> Option<SortKey> {
        match current {
            Some(key) if key.column == column => match key.direction {
                SortDirection::Asc => Some(SortKey::desc(column)),
                SortDirection::Desc => None,
            },
            _ => Some(SortKey::asc(column)),
        }
    }
}

pub struct ProjectComparator {
    key: SortKey,
}

impl ProjectComparator {
    pub fn new(key: SortKey) -> Self {
        Self { key }
    }

    pub fn compare(&self, a: &Project, b: &Project) -> Ordering {
        let lhs = self.key.column.extract(a);
        let rhs = self.key.column.extract(b);
        self.key.direction.apply(lhs.compare(&rhs))
    }
}

/// Rows in display order. `None` leaves the filtered order untouched.
pub fn sort_projects(projects: &[Project], key: Option<SortKey>) -> Vec<Project> {
    let mut rows = projects.to_vec();
    if let Some(key) = key {
        let comparator = ProjectComparator::new(key);
        rows.sort_by(|a, b| comparator.compare(a, b));
    }
    rows
}
