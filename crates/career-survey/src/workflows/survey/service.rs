use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use super::answers::AnswerSet;
use super::catalog::{spec_check_slug, DefinitionSource};
use super::definition::SurveyDefinition;
use super::error::SurveyError;
use super::result::{SpecCheckResult, SurveyResult};
use super::scoring::{ReasonSynthesizer, ScoringEngine};

/// General survey submission as received from the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveySubmission {
    /// Definition slug, e.g. `survey-general`.
    pub survey_id: String,
    pub answers: AnswerSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Spec-check submission scoped to one job category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecCheckSubmission {
    pub job_category: String,
    pub answers: AnswerSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Service composing the definition source and the scoring engine.
pub struct SurveyService<S> {
    source: Arc<S>,
    engine: Arc<ScoringEngine>,
}

impl<S> SurveyService<S>
where
    S: DefinitionSource + 'static,
{
    pub fn new(source: Arc<S>, synthesizer: ReasonSynthesizer) -> Self {
        Self {
            source,
            engine: Arc::new(ScoringEngine::new(synthesizer)),
        }
    }

    /// Score a general career survey.
    pub fn submit_general(
        &self,
        submission: SurveySubmission,
    ) -> Result<SurveyResult, SurveyError> {
        let SurveySubmission {
            survey_id,
            answers,
            user_id,
        } = submission;

        let outcome = self.general_definition(&survey_id).and_then(|definition| {
            self.engine
                .score_general(&definition, &answers, Local::now())
        });

        match &outcome {
            Ok(result) => info!(
                survey_id = %result.survey_id,
                user_id = user_id.as_deref().unwrap_or("anonymous"),
                recommended = %result.recommended_job.job_id,
                "scored career survey"
            ),
            Err(err) => warn!(%survey_id, error = %err, "career survey rejected"),
        }
        outcome
    }

    /// Score a spec-check survey for one job category.
    pub fn submit_spec_check(
        &self,
        submission: SpecCheckSubmission,
    ) -> Result<SpecCheckResult, SurveyError> {
        let SpecCheckSubmission {
            job_category,
            answers,
            user_id,
        } = submission;

        let outcome = self.spec_check(&job_category).and_then(|definition| {
            self.engine
                .score_spec_check(&definition, &answers, Local::now())
        });

        match &outcome {
            Ok(result) => info!(
                job_category = %result.job_category,
                user_id = user_id.as_deref().unwrap_or("anonymous"),
                recommended = %result.recommended_specialization.subtype_id,
                "scored spec-check survey"
            ),
            Err(err) => warn!(%job_category, error = %err, "spec-check survey rejected"),
        }
        outcome
    }

    /// Raw spec-check document, as served to clients rendering the form.
    pub fn spec_check_definition(&self, job_category: &str) -> Result<Value, SurveyError> {
        let document = self.source.load(&spec_check_slug(job_category))?;
        Ok(document)
    }

    pub fn general_definition(&self, survey_id: &str) -> Result<SurveyDefinition, SurveyError> {
        let document = self.source.load(survey_id)?;
        Ok(SurveyDefinition::general_from_value(survey_id, document)?)
    }

    pub fn spec_check(&self, job_category: &str) -> Result<SurveyDefinition, SurveyError> {
        let document = self.spec_check_definition(job_category)?;
        Ok(SurveyDefinition::spec_check_from_value(document)?)
    }
}
