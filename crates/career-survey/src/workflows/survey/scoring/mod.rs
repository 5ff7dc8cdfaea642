pub mod aggregate;
pub mod normalize;
pub mod rank;
pub mod reasons;

pub use aggregate::{aggregate, Aggregate, ContributionMap, RawScoreMap};
pub use normalize::{normalize, NormalizedScoreMap};
pub use rank::{combined_score, GeneralRanking, RankedSubtype, RankedTarget, SpecCheckRanking};
pub use reasons::{ReasonSynthesizer, SpecializationNarrative, TraitLabels};

use chrono::{DateTime, Local};

use super::answers::AnswerSet;
use super::definition::SurveyDefinition;
use super::error::SurveyError;
use super::result::{assemble_general, assemble_spec_check, SpecCheckResult, SurveyResult};

/// Stateless scorer; every call allocates its own score maps.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    synthesizer: ReasonSynthesizer,
}

impl ScoringEngine {
    pub fn new(synthesizer: ReasonSynthesizer) -> Self {
        Self { synthesizer }
    }

    pub fn score_general(
        &self,
        definition: &SurveyDefinition,
        answers: &AnswerSet,
        submitted_at: DateTime<Local>,
    ) -> Result<SurveyResult, SurveyError> {
        let Aggregate {
            raw_scores,
            contributions,
        } = aggregate(definition, answers)?;
        let normalized = normalize(&raw_scores);

        let ranking =
            rank::rank_general(definition, &normalized).ok_or_else(|| no_targets(definition))?;

        let recommended = &ranking.recommended;
        let reason = self
            .synthesizer
            .job_reason(&recommended.name, contributions.get(&recommended.target_id));
        let insights = self.synthesizer.job_insights(&recommended.name);

        Ok(assemble_general(
            definition,
            submitted_at,
            normalized,
            ranking,
            reason,
            insights,
        ))
    }

    pub fn score_spec_check(
        &self,
        definition: &SurveyDefinition,
        answers: &AnswerSet,
        submitted_at: DateTime<Local>,
    ) -> Result<SpecCheckResult, SurveyError> {
        let Aggregate {
            raw_scores,
            contributions,
        } = aggregate(definition, answers)?;
        let normalized = normalize(&raw_scores);

        let ranking =
            rank::rank_spec_check(definition, &normalized).ok_or_else(|| no_targets(definition))?;

        let recommended = &ranking.recommended;
        let narrative = self
            .synthesizer
            .specialization_narrative(&recommended.name, contributions.get(&recommended.subtype_id));
        let insights = self
            .synthesizer
            .spec_check_insights(&recommended.name, &narrative);

        Ok(assemble_spec_check(
            definition,
            submitted_at,
            normalized,
            ranking,
            narrative,
            insights,
        ))
    }
}

fn no_targets(definition: &SurveyDefinition) -> SurveyError {
    SurveyError::NoScorableTargets {
        survey_id: definition.id.clone(),
    }
}
