pub mod commands;
pub mod session;

use crate::adapters::http::HttpGradeApi;
use crate::adapters::storage::LocalStorage;
use crate::config::TrackerConfig;
use crate::core::coordinator::GradeEntryCoordinator;
use crate::core::notify::Notifier;
use crate::core::ConfigProvider;
use crate::utils::error::Result;

pub type HttpCoordinator = GradeEntryCoordinator<HttpGradeApi, LocalStorage, TrackerConfig>;

/// Wires the HTTP backend and local export directory from a validated config.
pub fn build_coordinator(config: TrackerConfig) -> Result<HttpCoordinator> {
    let api = HttpGradeApi::with_timeout(config.api_base_url(), config.request_timeout())?;
    let storage = LocalStorage::new(config.output_path().to_string());
    let notifier = Notifier::new(config.notification_ttl());
    let semesters = config.semesters();

    tracing::debug!(
        "Backend {}, {} semesters, exports to {}",
        config.api_base_url(),
        semesters.len(),
        config.output_path()
    );

    Ok(GradeEntryCoordinator::new(
        api, storage, config, semesters, notifier,
    ))
}
