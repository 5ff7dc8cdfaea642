use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::definition::SurveyDefinition;
use super::scoring::normalize::NormalizedScoreMap;
use super::scoring::rank::{GeneralRanking, RankedSubtype, RankedTarget, SpecCheckRanking};
use super::scoring::reasons::SpecializationNarrative;

/// One entry in a job shortlist, or the single recommended job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecommendation {
    pub job_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub score: f64,
    pub rank: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Response payload for a general career survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResult {
    pub survey_id: String,
    pub submitted_at: DateTime<Local>,
    pub total_questions: usize,
    pub job_scores: NormalizedScoreMap,
    pub preference_top3: Vec<JobRecommendation>,
    pub fit_top3: Vec<JobRecommendation>,
    pub recommended_job: JobRecommendation,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecializationScore {
    pub subtype_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Response payload for a spec-check survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecCheckResult {
    pub job_category: String,
    pub submitted_at: DateTime<Local>,
    pub total_questions: usize,
    pub score_map: NormalizedScoreMap,
    pub top_specializations: Vec<SpecializationScore>,
    pub preference_top3: Vec<SpecializationScore>,
    pub fit_top3: Vec<SpecializationScore>,
    pub recommended_specialization: SpecializationScore,
    pub insights: Vec<String>,
}

pub(crate) fn assemble_general(
    definition: &SurveyDefinition,
    submitted_at: DateTime<Local>,
    normalized: NormalizedScoreMap,
    ranking: GeneralRanking,
    reason: String,
    insights: Vec<String>,
) -> SurveyResult {
    let preference_top3 = shortlist(&ranking.preference_top, |target| target.preference_score);
    let fit_top3 = shortlist(&ranking.fit_top, |target| target.fit_score);
    let recommended = ranking.recommended;

    SurveyResult {
        survey_id: definition.id.clone(),
        submitted_at,
        total_questions: definition.questions.len(),
        job_scores: normalized,
        preference_top3,
        fit_top3,
        recommended_job: JobRecommendation {
            job_id: recommended.target_id,
            name: recommended.name,
            icon: recommended.icon,
            score: recommended.combined_score,
            rank: 1,
            reason: Some(reason),
        },
        insights,
    }
}

pub(crate) fn assemble_spec_check(
    definition: &SurveyDefinition,
    submitted_at: DateTime<Local>,
    normalized: NormalizedScoreMap,
    ranking: SpecCheckRanking,
    narrative: SpecializationNarrative,
    insights: Vec<String>,
) -> SpecCheckResult {
    let top: Vec<SpecializationScore> = ranking.top().iter().map(specialization).collect();
    let mut recommended = specialization(&ranking.recommended);
    recommended.reason = Some(narrative.reason);

    SpecCheckResult {
        job_category: definition.id.clone(),
        submitted_at,
        total_questions: definition.questions.len(),
        score_map: normalized,
        top_specializations: ranking.ranked.iter().map(specialization).collect(),
        preference_top3: top.clone(),
        fit_top3: top,
        recommended_specialization: recommended,
        insights,
    }
}

fn shortlist(
    targets: &[RankedTarget],
    score: impl Fn(&RankedTarget) -> f64,
) -> Vec<JobRecommendation> {
    targets
        .iter()
        .enumerate()
        .map(|(index, target)| JobRecommendation {
            job_id: target.target_id.clone(),
            name: target.name.clone(),
            icon: target.icon.clone(),
            score: score(target),
            rank: index + 1,
            reason: None,
        })
        .collect()
}

fn specialization(subtype: &RankedSubtype) -> SpecializationScore {
    SpecializationScore {
        subtype_id: subtype.subtype_id.clone(),
        name: subtype.name.clone(),
        description: subtype.description.clone(),
        score: subtype.score,
        reason: None,
    }
}
