use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dashboard is still loading: {0}")]
    NotLoaded(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Project '{0}' not found")]
    ProjectNotFound(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<tempfile::PersistError> for DashboardError {
    fn from(err: tempfile::PersistError) -> Self {
        Self::Io(err.error.to_string())
    }
}
