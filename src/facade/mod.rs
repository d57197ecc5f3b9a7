pub mod session;

pub use session::{DashboardSession, LoadState};
