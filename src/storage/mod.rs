pub mod generator;
pub mod store;

pub use generator::{ProjectGenerator, ProjectSource};
pub use store::ProjectStore;
