use career_survey::config::SurveyDataConfig;
use career_survey::error::AppError;
use career_survey::workflows::survey::{AnswerSet, DirectoryDefinitionSource};
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Command-line directories replace the configured search path entirely.
pub(crate) fn definition_source(
    config: &SurveyDataConfig,
    overrides: Vec<PathBuf>,
) -> DirectoryDefinitionSource {
    if overrides.is_empty() {
        DirectoryDefinitionSource::new(config.data_dirs.clone())
    } else {
        DirectoryDefinitionSource::new(overrides)
    }
}

pub(crate) fn read_answers(path: &Path) -> Result<AnswerSet, AppError> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|err| {
        AppError::Render(format!(
            "answers file '{}' is not a JSON object: {err}",
            path.display()
        ))
    })
}
