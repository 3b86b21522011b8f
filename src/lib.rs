pub mod config;
pub mod environment;
pub mod git;
pub mod hook;
pub mod render;
pub mod segments;
pub mod theme;

pub use environment::{EnvironmentSnapshot, environment_snapshot};
pub use git::{GitStatus, Repository};
pub use hook::HookData;
