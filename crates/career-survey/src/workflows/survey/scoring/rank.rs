use std::cmp::Ordering;

use super::super::definition::{ScoringRules, SurveyDefinition};
use super::normalize::{round2, NormalizedScoreMap};

/// Size of the preference and fit shortlists.
pub const TOP_N: usize = 3;

/// A job category scored on both axes.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTarget {
    pub target_id: String,
    pub name: String,
    pub icon: Option<String>,
    pub preference_score: f64,
    pub fit_score: f64,
    pub combined_score: f64,
}

/// Job categories in declaration order plus the derived shortlists.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralRanking {
    pub targets: Vec<RankedTarget>,
    pub preference_top: Vec<RankedTarget>,
    pub fit_top: Vec<RankedTarget>,
    pub recommended: RankedTarget,
}

/// A specialization subtype on the single spec-check axis.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSubtype {
    pub subtype_id: String,
    pub name: String,
    pub description: Option<String>,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpecCheckRanking {
    /// Every subtype, score descending, ties in declaration order.
    pub ranked: Vec<RankedSubtype>,
    pub recommended: RankedSubtype,
}

impl SpecCheckRanking {
    /// Shared slice reported as both the preference and fit shortlist.
    pub fn top(&self) -> &[RankedSubtype] {
        &self.ranked[..self.ranked.len().min(TOP_N)]
    }
}

/// Blend the two axes using the definition's scoring rule.
pub fn combined_score(preference_score: f64, fit_score: f64, rules: &ScoringRules) -> f64 {
    preference_score * rules.preference_weight + fit_score * rules.fit_weight
}

/// Rank job categories. Both axes carry the same normalized score until a
/// second scoring source exists. Returns `None` when no targets are declared.
pub fn rank_general(
    definition: &SurveyDefinition,
    normalized: &NormalizedScoreMap,
) -> Option<GeneralRanking> {
    let targets: Vec<RankedTarget> = definition
        .targets
        .iter()
        .map(|target| {
            let score = normalized.get(&target.id).copied().unwrap_or(0.0);
            let preference_score = score;
            let fit_score = score;
            let combined = combined_score(preference_score, fit_score, &definition.scoring_rules);
            RankedTarget {
                target_id: target.id.clone(),
                name: target.name.clone(),
                icon: target.icon.clone(),
                preference_score: round2(preference_score),
                fit_score: round2(fit_score),
                combined_score: round2(combined),
            }
        })
        .collect();

    let recommended = first_max_by(&targets, |target| target.combined_score)?.clone();
    let preference_top = top_by(&targets, |target| target.preference_score);
    let fit_top = top_by(&targets, |target| target.fit_score);

    Some(GeneralRanking {
        targets,
        preference_top,
        fit_top,
        recommended,
    })
}

/// Rank specialization subtypes. Returns `None` when no subtypes are declared.
pub fn rank_spec_check(
    definition: &SurveyDefinition,
    normalized: &NormalizedScoreMap,
) -> Option<SpecCheckRanking> {
    let mut ranked: Vec<RankedSubtype> = definition
        .targets
        .iter()
        .map(|target| RankedSubtype {
            subtype_id: target.id.clone(),
            name: target.name.clone(),
            description: target.description.clone(),
            score: normalized.get(&target.id).copied().unwrap_or(0.0),
        })
        .collect();

    sort_descending(&mut ranked, |subtype| subtype.score);
    let recommended = ranked.first()?.clone();

    Some(SpecCheckRanking {
        ranked,
        recommended,
    })
}

/// Stable descending sort; equal scores keep their input order.
fn sort_descending<T>(items: &mut [T], score: impl Fn(&T) -> f64) {
    items.sort_by(|left, right| {
        score(right)
            .partial_cmp(&score(left))
            .unwrap_or(Ordering::Equal)
    });
}

fn top_by<T: Clone>(items: &[T], score: impl Fn(&T) -> f64) -> Vec<T> {
    let mut sorted = items.to_vec();
    sort_descending(&mut sorted, score);
    sorted.truncate(TOP_N);
    sorted
}

/// First item holding the maximum score.
fn first_max_by<T>(items: &[T], score: impl Fn(&T) -> f64) -> Option<&T> {
    let mut best: Option<&T> = None;
    for item in items {
        match best {
            Some(current) if score(item) <= score(current) => {}
            _ => best = Some(item),
        }
    }
    best
}
