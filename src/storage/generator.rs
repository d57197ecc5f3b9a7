// ============================================================================
// src/storage/generator.rs - Seeded synthetic project data
// ============================================================================

use crate::core::{
    Department, Lcg, Project, ProjectPhase, ProjectStatus, RandomSource, Region, DEFAULT_SEED,
};
use chrono::{DateTime, Duration, Utc};

/// Anything that can populate the project store.
///
/// The synthetic generator is the only implementation shipped; a real data
/// source plugs in here without touching the pipeline.
pub trait ProjectSource {
    fn name(&self) -> &'static str;

    fn load(&mut self, count: usize) -> Vec<Project>;
}

/// Start dates fall between 2024-01-01 and 2025-12-31 (UTC midnight).
const WINDOW_START_SECS: i64 = 1_704_067_200;
const WINDOW_END_SECS: i64 = 1_767_139_200;

const PROJECT_NAMES: [&str; 20] = [
    "Digital Transformation Initiative",
    "Cloud Migration Project",
    "ERP System Upgrade",
    "Customer Portal Redesign",
    "Data Analytics Platform",
    "Mobile App Development",
    "Cybersecurity Enhancement",
    "Supply Chain Optimization",
    "AI Integration Program",
    "Warehouse Automation",
    "Financial Reporting System",
    "HR Management Platform",
    "Marketing Campaign Suite",
    "Inventory Management System",
    "Quality Assurance Framework",
    "Vendor Management Portal",
    "Employee Training Platform",
    "Business Intelligence Dashboard",
    "API Gateway Implementation",
    "Legacy System Modernization",
];

const OWNERS: [&str; 16] = [
    "Sarah Johnson",
    "Michael Chen",
    "Emma Williams",
    "James Rodriguez",
    "Olivia Brown",
    "William Davis",
    "Sophia Martinez",
    "Lucas Anderson",
    "Isabella Taylor",
    "Alexander Lee",
    "Mia Thompson",
    "Benjamin White",
    "Charlotte Harris",
    "Daniel Clark",
    "Amelia Lewis",
    "Matthew Walker",
];

/// Deterministic project generator.
///
/// Each call to [`generate`](Self::generate) restarts the LCG from the
/// configured seed, so reloading yields the same portfolio.
#[derive(Debug, Clone)]
pub struct ProjectGenerator {
    seed: u64,
}

impl Default for ProjectGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl ProjectGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn generate(&self, count: usize) -> Vec<Project> {
        let mut random = Lcg::new(self.seed);
        Self::generate_with(&mut random, count)
    }

    /// Generate from an arbitrary random source.
    ///
    /// Draw order per project is fixed: start date, duration, allocation,
    /// spend ratio, progress, risk, reward, delay (only when risk > 40),
    /// department, region, phase, owner.
    pub fn generate_with(random: &mut dyn RandomSource, count: usize) -> Vec<Project> {
        let window_start = DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(WINDOW_START_SECS);
        let window_end = DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(WINDOW_END_SECS);

        (0..count)
            .map(|index| Self::generate_one(random, index, window_start, window_end))
            .collect()
    }

    fn generate_one(
        random: &mut dyn RandomSource,
        index: usize,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Project {
        let span_ms = (window_end - window_start).num_milliseconds() as f64;
        let start_date = window_start + Duration::milliseconds((random.next_f64() * span_ms) as i64);
        let duration_days = random.next_below(180) as i64 + 30;
        let end_date = start_date + Duration::days(duration_days);

        let budget_allocated = random.next_below(900_000) + 100_000;
        let spent_ratio = random.next_f64() * 1.3;
        let budget_spent = (budget_allocated as f64 * spent_ratio).floor() as u64;

        let progress = random.next_below(100) as u8;
        let risk = random.next_below(100) as u8;
        let reward = random.next_below(100) as u8;
        let efficiency = (100.0 - f64::from(risk) / 2.0 + f64::from(progress) / 3.0)
            .clamp(0.0, 100.0)
            .floor() as u8;

        let delay_days = if risk > 70 {
            random.next_below(30) as u32
        } else if risk > 40 {
            random.next_below(15) as u32
        } else {
            0
        };

        let status = derive_status(risk, delay_days, progress);

        Project {
            id: format!("PRJ-{:04}", index + 1),
            name: project_name(index),
            department: pick(random, Department::ALL),
            region: pick(random, Region::ALL),
            status,
            phase: pick(random, ProjectPhase::ALL),
            owner: pick(random, &OWNERS).to_string(),
            start_date,
            end_date,
            budget_allocated,
            budget_spent,
            risk,
            reward,
            efficiency,
            delay_days,
            progress,
        }
    }
}

impl ProjectSource for ProjectGenerator {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn load(&mut self, count: usize) -> Vec<Project> {
        self.generate(count)
    }
}

/// Status is fixed at generation time; afterwards it is plain state.
pub fn derive_status(risk: u8, delay_days: u32, progress: u8) -> ProjectStatus {
    if risk > 80 || delay_days > 20 {
        ProjectStatus::Blocked
    } else if delay_days > 10 {
        ProjectStatus::Delayed
    } else if progress < 100 {
        ProjectStatus::InProgress
    } else {
        ProjectStatus::OnTrack
    }
}

fn project_name(index: usize) -> String {
    let base = PROJECT_NAMES[index % PROJECT_NAMES.len()];
    if index >= PROJECT_NAMES.len() {
        format!("{} Phase {}", base, index / PROJECT_NAMES.len() + 1)
    } else {
        base.to_string()
    }
}

fn pick<T: Copy>(random: &mut dyn RandomSource, options: &[T]) -> T {
    options[random.next_below(options.len() as u64) as usize]
}
