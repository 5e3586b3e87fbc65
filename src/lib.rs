pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliCommand, CliConfig};

pub use adapters::{http::HttpGradeApi, storage::LocalStorage};
pub use app::build_coordinator;
pub use config::TrackerConfig;
pub use crate::core::coordinator::{Command, GradeEntryCoordinator, Outcome};
pub use crate::core::gpa::aggregate;
pub use crate::core::scale::to_four_point;
pub use utils::error::{TrackerError, Result};
