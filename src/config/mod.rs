use crate::core::{DashboardError, Result, DEFAULT_SEED};
use std::time::Duration;

/// Dashboard session configuration
///
/// Every knob has the demo default; override with the builder methods or
/// from `PORTFOLIO_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Number of projects produced by each load
    pub project_count: usize,

    /// Seed for the deterministic generator
    pub seed: u64,

    /// Rows per table page
    pub page_size: usize,

    /// Simulated latency before the store is first populated
    pub load_delay: Duration,

    /// How many store records (in store order) may produce activities
    pub activity_window: usize,

    /// Maximum activities kept after sorting by recency
    pub activity_limit: usize,

    /// Size of the critical-project and top-performer lists
    pub subset_limit: usize,

    /// Points per KPI sparkline
    pub sparkline_points: usize,

    /// Default lifetime of a notification
    pub toast_duration: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardConfig {
    pub fn new() -> Self {
        Self {
            project_count: 48,
            seed: DEFAULT_SEED,
            page_size: 8,
            load_delay: Duration::from_millis(900),
            activity_window: 15,
            activity_limit: 10,
            subset_limit: 5,
            sparkline_points: 30,
            toast_duration: Duration::from_millis(3000),
        }
    }

    /// Set the number of generated projects
    pub fn project_count(mut self, count: usize) -> Self {
        self.project_count = count;
        self
    }

    /// Set the generator seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set table page size
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Set simulated load latency
    pub fn load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    /// Skip the simulated load latency entirely
    pub fn without_load_delay(mut self) -> Self {
        self.load_delay = Duration::ZERO;
        self
    }

    pub fn activity_window(mut self, window: usize) -> Self {
        self.activity_window = window;
        self
    }

    pub fn activity_limit(mut self, limit: usize) -> Self {
        self.activity_limit = limit;
        self
    }

    pub fn subset_limit(mut self, limit: usize) -> Self {
        self.subset_limit = limit;
        self
    }

    pub fn sparkline_points(mut self, points: usize) -> Self {
        self.sparkline_points = points;
        self
    }

    pub fn toast_duration(mut self, duration: Duration) -> Self {
        self.toast_duration = duration;
        self
    }

    /// Read overrides from the process environment
    ///
    /// Recognized variables: `PORTFOLIO_PROJECT_COUNT`, `PORTFOLIO_SEED`,
    /// `PORTFOLIO_PAGE_SIZE`, `PORTFOLIO_LOAD_DELAY_MS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(raw) = lookup("PORTFOLIO_PROJECT_COUNT") {
            config.project_count = parse_var("PORTFOLIO_PROJECT_COUNT", &raw)?;
        }
        if let Some(raw) = lookup("PORTFOLIO_SEED") {
            config.seed = parse_var("PORTFOLIO_SEED", &raw)?;
        }
        if let Some(raw) = lookup("PORTFOLIO_PAGE_SIZE") {
            config.page_size = parse_var("PORTFOLIO_PAGE_SIZE", &raw)?;
        }
        if let Some(raw) = lookup("PORTFOLIO_LOAD_DELAY_MS") {
            let millis: u64 = parse_var("PORTFOLIO_LOAD_DELAY_MS", &raw)?;
            config.load_delay = Duration::from_millis(millis);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(DashboardError::Config("page_size must be > 0".to_string()));
        }

        if self.sparkline_points == 0 {
            return Err(DashboardError::Config(
                "sparkline_points must be > 0".to_string(),
            ));
        }

        if self.activity_limit > self.activity_window {
            return Err(DashboardError::Config(
                "activity_limit cannot exceed activity_window".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| DashboardError::Config(format!("invalid {key}='{raw}'")))
}
