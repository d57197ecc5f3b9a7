use super::kpi::RISK_ALERT_THRESHOLD;
use crate::core::Project;

/// High-risk projects, riskiest first.
///
/// Ties keep their filtered order (stable sort).
pub fn critical_projects(projects: &[Project], limit: usize) -> Vec<Project> {
    let mut critical: Vec<Project> = projects
        .iter()
        .filter(|p| p.risk > RISK_ALERT_THRESHOLD)
        .cloned()
        .collect();
    critical.sort_by(|a, b| b.risk.cmp(&a.risk));
    critical.truncate(limit);
    critical
}

/// Most efficient projects regardless of risk.
pub fn top_performers(projects: &[Project], limit: usize) -> Vec<Project> {
    let mut ranked = projects.to_vec();
    ranked.sort_by(|a, b| b.efficiency.cmp(&a.efficiency));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::project::fixtures::project;

    fn with(id: &str, risk: u8, efficiency: u8) -> Project {
        let mut p = project(id);
        p.risk = risk;
        p.efficiency = efficiency;
        p
    }

    #[test]
    fn test_critical_filters_sorts_and_caps() {
        let projects = vec![
            with("A", 75, 10),
            with("B", 95, 10),
            with("C", 70, 10),
            with("D", 88, 10),
            with("E", 71, 10),
            with("F", 99, 10),
            with("G", 80, 10),
            with("H", 72, 10),
        ];
        let ids: Vec<String> = critical_projects(&projects, 5).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["F", "B", "D", "G", "A"]);
    }

    #[test]
    fn test_critical_ties_keep_input_order() {
        let projects = vec![with("A", 80, 0), with("B", 80, 0)];
        let ids: Vec<String> = critical_projects(&projects, 5).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["A", "B"]);
    }

    #[test]
    fn test_top_performers_ignore_risk() {
        let projects = vec![with("A", 99, 60), with("B", 10, 95), with("C", 50, 70)];
        let ids: Vec<String> = top_performers(&projects, 2).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["B", "C"]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(critical_projects(&[], 5).is_empty());
        assert!(top_performers(&[], 5).is_empty());
    }
}
