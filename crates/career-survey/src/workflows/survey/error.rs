use axum::http::StatusCode;

use super::answers::MalformedAnswer;
use super::catalog::SourceError;
use super::definition::DefinitionError;

/// Failure raised while scoring a submission. Scoring is all-or-nothing.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    #[error("survey definition '{selector}' not found")]
    DefinitionNotFound { selector: String },
    #[error(transparent)]
    MalformedAnswer(#[from] MalformedAnswer),
    #[error("survey '{survey_id}' declares no scorable targets")]
    NoScorableTargets { survey_id: String },
    #[error("internal aggregation error: {0}")]
    InternalAggregation(String),
}

impl SurveyError {
    /// Transport status for the boundary layer.
    pub fn status_code(&self) -> StatusCode {
        match self {
            SurveyError::DefinitionNotFound { .. } => StatusCode::NOT_FOUND,
            SurveyError::MalformedAnswer(_) | SurveyError::NoScorableTargets { .. } => {
                StatusCode::BAD_REQUEST
            }
            SurveyError::InternalAggregation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DefinitionError> for SurveyError {
    fn from(value: DefinitionError) -> Self {
        Self::InternalAggregation(value.to_string())
    }
}

impl From<SourceError> for SurveyError {
    fn from(value: SourceError) -> Self {
        match value {
            SourceError::NotFound(selector) => Self::DefinitionNotFound { selector },
            other => Self::InternalAggregation(other.to_string()),
        }
    }
}
