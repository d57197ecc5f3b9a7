// ============================================================================
// src/filter/predicate.rs - Project inclusion predicate
// ============================================================================
//
// Dimensions combine with AND; membership inside a multi-select dimension is
// OR. Evaluation short-circuits in a fixed order (cheap set lookups first,
// text search and the date window last). The order only affects cost, never
// the result.
//
// ============================================================================

use super::{FilterSpec, SearchPattern};
use crate::core::Project;
use chrono::{DateTime, Utc};

/// Decide whether `project` passes `spec` at instant `now`.
///
/// Pure. Prefer [`PreparedFilter`] when testing many projects against the
/// same spec.
pub fn matches(project: &Project, spec: &FilterSpec, now: DateTime<Utc>) -> bool {
    PreparedFilter::new(spec, now).matches(project)
}

/// A filter spec with its search needle and date cutoff resolved once.
#[derive(Debug, Clone)]
pub struct PreparedFilter<'a> {
    spec: &'a FilterSpec,
    search: SearchPattern,
    cutoff: Option<DateTime<Utc>>,
}

impl<'a> PreparedFilter<'a> {
    pub fn new(spec: &'a FilterSpec, now: DateTime<Utc>) -> Self {
        Self {
            spec,
            search: SearchPattern::new(&spec.search),
            cutoff: spec.date_preset.cutoff(now),
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        let spec = self.spec;

        if !spec.departments.is_empty() && !spec.departments.contains(&project.department) {
            return false;
        }

        if !spec.regions.is_empty() && !spec.regions.contains(&project.region) {
            return false;
        }

        if !spec.statuses.is_empty() && !spec.statuses.contains(&project.status) {
            return false;
        }

        if !self.search.matches_project(project) {
            return false;
        }

        if i32::from(project.risk) > spec.max_risk {
            return false;
        }

        if i32::from(project.reward) < spec.min_reward {
            return false;
        }

        match self.cutoff {
            Some(cutoff) => project.start_date >= cutoff,
            None => true,
        }
    }

    /// Filter a slice, preserving its order
    pub fn apply<'p>(&self, projects: &'p [Project]) -> Vec<&'p Project> {
        projects.iter().filter(|project| self.matches(project)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::project::fixtures::project;
    use crate::core::{Department, ProjectStatus, Region};
    use crate::filter::DatePreset;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_default_spec_matches() {
        assert!(matches(&project("PRJ-0001"), &FilterSpec::default(), now()));
    }

    #[test]
    fn test_multi_select_is_or_within_dimension() {
        let spec = FilterSpec::new().with_departments([Department::It, Department::Finance]);
        let mut p = project("PRJ-0001");
        assert!(matches(&p, &spec, now()));
        p.department = Department::Hr;
        assert!(!matches(&p, &spec, now()));
    }

    #[test]
    fn test_dimensions_combine_with_and() {
        let spec = FilterSpec::new()
            .with_regions([Region::Europe])
            .with_statuses([ProjectStatus::Blocked]);
        let mut p = project("PRJ-0001");
        assert!(!matches(&p, &spec, now()));
        p.status = ProjectStatus::Blocked;
        assert!(matches(&p, &spec, now()));
    }

    #[test]
    fn test_risk_and_reward_bounds_are_inclusive() {
        let mut p = project("PRJ-0001");
        p.risk = 70;
        p.reward = 30;
        assert!(matches(&p, &FilterSpec::new().with_max_risk(70), now()));
        assert!(!matches(&p, &FilterSpec::new().with_max_risk(69), now()));
        assert!(matches(&p, &FilterSpec::new().with_min_reward(30), now()));
        assert!(!matches(&p, &FilterSpec::new().with_min_reward(31), now()));
    }

    #[test]
    fn test_out_of_range_bounds_do_not_error() {
        let p = project("PRJ-0001");
        assert!(!matches(&p, &FilterSpec::new().with_max_risk(-5), now()));
        assert!(matches(&p, &FilterSpec::new().with_min_reward(-5), now()));
        assert!(!matches(&p, &FilterSpec::new().with_min_reward(500), now()));
    }

    #[test]
    fn test_date_window() {
        let spec = FilterSpec::new().with_date_preset(DatePreset::Last30Days);
        let mut p = project("PRJ-0001");
        p.start_date = now() - Duration::days(30);
        assert!(matches(&p, &spec, now()));
        p.start_date = now() - Duration::days(31);
        assert!(!matches(&p, &spec, now()));
    }

    #[test]
    fn test_ytd_window_uses_january_first() {
        let spec = FilterSpec::new().with_date_preset(DatePreset::YearToDate);
        let mut p = project("PRJ-0001");
        p.start_date = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert!(matches(&p, &spec, now()));
        p.start_date = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert!(!matches(&p, &spec, now()));
    }

    #[test]
    fn test_apply_preserves_order() {
        let mut a = project("PRJ-0001");
        a.risk = 90;
        let b = project("PRJ-0002");
        let c = project("PRJ-0003");
        let all = vec![a, b, c];

        let spec = FilterSpec::new().with_max_risk(50);
        let prepared = PreparedFilter::new(&spec, now());
        let ids: Vec<&str> = prepared.apply(&all).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["PRJ-0002", "PRJ-0003"]);
    }
}
