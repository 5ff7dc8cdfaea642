use indexmap::IndexMap;
use tracing::debug;

use super::super::answers::{AnswerSet, MalformedAnswer};
use super::super::definition::{
    ChoiceOption, ChoiceValue, QuestionKind, SurveyDefinition, WeightMap,
};

/// Choice weights are scaled onto the same range as a five-point likert answer.
pub const CHOICE_MULTIPLIER: f64 = 5.0;

/// Target id -> accumulated raw score, seeded for every declared target.
pub type RawScoreMap = IndexMap<String, f64>;

/// Target id -> grouping label -> accumulated delta, in first-credit order.
pub type ContributionMap = IndexMap<String, IndexMap<String, f64>>;

/// Raw scores plus the per-label breakdown that feeds reason text.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub raw_scores: RawScoreMap,
    pub contributions: ContributionMap,
}

struct Tally {
    raw_scores: RawScoreMap,
    contributions: ContributionMap,
}

impl Tally {
    fn seeded(definition: &SurveyDefinition) -> Self {
        let raw_scores = definition
            .targets
            .iter()
            .map(|target| (target.id.clone(), 0.0))
            .collect();
        let contributions = definition
            .targets
            .iter()
            .map(|target| (target.id.clone(), IndexMap::new()))
            .collect();

        Self {
            raw_scores,
            contributions,
        }
    }

    /// Weights naming undeclared targets are dropped.
    fn credit(&mut self, target_id: &str, label: &str, delta: f64) {
        let Some(score) = self.raw_scores.get_mut(target_id) else {
            return;
        };
        *score += delta;

        if let Some(groups) = self.contributions.get_mut(target_id) {
            *groups.entry(label.to_string()).or_insert(0.0) += delta;
        }
    }

    fn credit_weights(&mut self, weights: &WeightMap, label: &str, scale: f64) {
        for (target_id, weight) in weights {
            self.credit(target_id, label, weight * scale);
        }
    }

    fn finish(self) -> Aggregate {
        Aggregate {
            raw_scores: self.raw_scores,
            contributions: self.contributions,
        }
    }
}

/// Fold every answered question into raw scores and contributions.
///
/// Questions are visited in declaration order. Unanswered questions and
/// questions with nothing to score are skipped without inspecting the answer.
pub fn aggregate(
    definition: &SurveyDefinition,
    answers: &AnswerSet,
) -> Result<Aggregate, MalformedAnswer> {
    let mut tally = Tally::seeded(definition);

    for question in &definition.questions {
        if question.kind.is_inert() {
            continue;
        }
        let label = question.group_label.as_str();

        match &question.kind {
            QuestionKind::Likert { weights } => {
                if let Some(value) = answers.number(&question.id)? {
                    tally.credit_weights(weights, label, value);
                }
            }
            QuestionKind::SingleChoice { options } => {
                let Some(answer) = answers.choice(&question.id)? else {
                    continue;
                };
                if let Some(option) = options.iter().find(|option| option.value == answer) {
                    tally.credit_weights(&option.weights, label, CHOICE_MULTIPLIER);
                }
            }
            QuestionKind::MultipleChoice { options } => {
                let Some(selected) = answers.choices(&question.id)? else {
                    continue;
                };
                for option in options.iter().filter(|option| is_selected(option, &selected)) {
                    tally.credit_weights(&option.weights, label, CHOICE_MULTIPLIER);
                }
            }
            QuestionKind::Text { weights } => {
                let Some(text) = answers.text(&question.id)? else {
                    continue;
                };
                if !text.trim().is_empty() {
                    tally.credit_weights(weights, label, 1.0);
                }
            }
        }
    }

    let aggregate = tally.finish();
    debug!(
        survey_id = %definition.id,
        targets = aggregate.raw_scores.len(),
        answered = answers.len(),
        "aggregated survey answers"
    );
    Ok(aggregate)
}

fn is_selected(option: &ChoiceOption, selected: &[ChoiceValue]) -> bool {
    selected.iter().any(|value| *value == option.value)
}
