pub mod clock;
pub mod error;
pub mod project;
pub mod random;
pub mod types;
pub mod value;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DashboardError, Result};
pub use project::{BurnLevel, Project, SeverityBreakdown};
pub use random::{FixedSequence, Lcg, RandomSource, DEFAULT_SEED};
pub use types::{Department, ProjectPhase, ProjectStatus, Region, Severity};
pub use value::Value;
