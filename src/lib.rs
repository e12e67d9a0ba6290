pub mod condition;
pub mod project;

pub use condition::ProjectCondition;
pub use project::{MsBuildProject, ProjectError};
