//! Health reporting utilities.

use serde::Serialize;

/// Coarse service state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// The server accepts requests.
    Ok,
}

/// Body of the health endpoint.
///
/// The server reports `ok` while it runs even without a model; callers read
/// `model_loaded` to know whether generation will succeed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// Service state.
    pub status: HealthStatus,
    /// Human-readable summary.
    pub message: String,
    /// Whether a model instance is loaded.
    pub model_loaded: bool,
    /// Identifier of the loaded model.
    pub model_name: Option<String>,
}

impl HealthReport {
    /// Builds a report from the loaded model's identifier, if any.
    #[must_use]
    pub fn from_model(model_name: Option<String>) -> Self {
        Self {
            status: HealthStatus::Ok,
            message: "Server is running".to_owned(),
            model_loaded: model_name.is_some(),
            model_name,
        }
    }
}
