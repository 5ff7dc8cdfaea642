use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Target id -> weight, in declaration order.
pub type WeightMap = IndexMap<String, f64>;

/// Grouping label used when a question carries neither a category nor text.
pub const FALLBACK_GROUP_LABEL: &str = "Other experience";

const DEFAULT_PREFERENCE_WEIGHT: f64 = 0.4;
const DEFAULT_FIT_WEIGHT: f64 = 0.6;

/// A job category or specialization subtype being scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Blend applied to preference and fit axes. Weights are not required to sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    #[serde(default = "default_preference_weight")]
    pub preference_weight: f64,
    #[serde(default = "default_fit_weight")]
    pub fit_weight: f64,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            preference_weight: DEFAULT_PREFERENCE_WEIGHT,
            fit_weight: DEFAULT_FIT_WEIGHT,
        }
    }
}

fn default_preference_weight() -> f64 {
    DEFAULT_PREFERENCE_WEIGHT
}

fn default_fit_weight() -> f64 {
    DEFAULT_FIT_WEIGHT
}

/// Scalar value carried by a choice option or a choice answer.
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl ChoiceValue {
    /// Returns `None` for lists, objects, and null.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Number(number) => number.as_f64().map(Self::Number),
            Value::Bool(flag) => Some(Self::Flag(*flag)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    pub value: ChoiceValue,
    pub weights: WeightMap,
}

/// Question variants, each carrying only what its scoring rule needs.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    Likert { weights: WeightMap },
    SingleChoice { options: Vec<ChoiceOption> },
    MultipleChoice { options: Vec<ChoiceOption> },
    Text { weights: WeightMap },
}

impl QuestionKind {
    /// True when the question has no weights or options to score against.
    pub fn is_inert(&self) -> bool {
        match self {
            QuestionKind::Likert { weights } | QuestionKind::Text { weights } => weights.is_empty(),
            QuestionKind::SingleChoice { options } | QuestionKind::MultipleChoice { options } => {
                options.is_empty()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: String,
    /// Category or literal question text; attribution only.
    pub group_label: String,
    pub kind: QuestionKind,
}

/// Validated questionnaire ready for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyDefinition {
    pub id: String,
    pub targets: Vec<Target>,
    pub questions: Vec<Question>,
    pub scoring_rules: ScoringRules,
}

impl SurveyDefinition {
    /// Decode a general survey document. The selector slug becomes the survey id.
    pub fn general_from_value(slug: &str, document: Value) -> Result<Self, DefinitionError> {
        let raw: RawGeneralSurvey = serde_json::from_value(document)?;
        let targets = validate_targets(raw.job_categories)?;
        let questions = raw
            .questions
            .into_iter()
            .map(RawQuestion::into_question)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: slug.to_string(),
            targets,
            questions,
            scoring_rules: raw.scoring_rules.unwrap_or_default(),
        })
    }

    /// Decode a spec-check document; every question scores like a likert item
    /// grouped under its own text.
    pub fn spec_check_from_value(document: Value) -> Result<Self, DefinitionError> {
        let raw: RawSpecCheckSurvey = serde_json::from_value(document)?;
        let targets = validate_targets(raw.subtypes)?;
        let questions = raw
            .questions
            .into_iter()
            .map(|question| Question {
                id: question.id,
                group_label: question.text,
                kind: QuestionKind::Likert {
                    weights: question.weights.unwrap_or_default(),
                },
            })
            .collect();

        Ok(Self {
            id: raw.job_category,
            targets,
            questions,
            scoring_rules: ScoringRules::default(),
        })
    }
}

/// Structural problems found while decoding a definition document.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("malformed survey definition: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("question '{question_id}' has unsupported type '{kind}'")]
    UnsupportedQuestionKind { question_id: String, kind: String },
    #[error("question '{question_id}' has an option whose value is not a scalar")]
    InvalidOptionValue { question_id: String },
    #[error("target '{0}' is declared more than once")]
    DuplicateTarget(String),
}

fn validate_targets(targets: Vec<Target>) -> Result<Vec<Target>, DefinitionError> {
    let mut seen = HashSet::new();
    for target in &targets {
        if !seen.insert(target.id.as_str()) {
            return Err(DefinitionError::DuplicateTarget(target.id.clone()));
        }
    }
    Ok(targets)
}

#[derive(Debug, Deserialize)]
struct RawGeneralSurvey {
    questions: Vec<RawQuestion>,
    job_categories: Vec<Target>,
    #[serde(default)]
    scoring_rules: Option<ScoringRules>,
}

#[derive(Debug, Deserialize)]
struct RawSpecCheckSurvey {
    job_category: String,
    subtypes: Vec<Target>,
    questions: Vec<RawSpecCheckQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawSpecCheckQuestion {
    #[serde(deserialize_with = "deserialize_question_id")]
    id: String,
    text: String,
    #[serde(default)]
    weights: Option<WeightMap>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(deserialize_with = "deserialize_question_id")]
    id: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    weights: Option<WeightMap>,
    #[serde(default)]
    options: Option<Vec<RawOption>>,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    value: Value,
    #[serde(default)]
    weights: Option<WeightMap>,
}

impl RawQuestion {
    fn into_question(self) -> Result<Question, DefinitionError> {
        let group_label = match (self.category, self.text) {
            (Some(category), _) if !category.is_empty() => category,
            (_, Some(text)) => text,
            _ => FALLBACK_GROUP_LABEL.to_string(),
        };

        let weights = self.weights.unwrap_or_default();
        let kind = match self.kind.as_deref().unwrap_or("likert") {
            "likert" => QuestionKind::Likert { weights },
            "text" => QuestionKind::Text { weights },
            "single_choice" => QuestionKind::SingleChoice {
                options: decode_options(&self.id, self.options)?,
            },
            "multiple_choice" => QuestionKind::MultipleChoice {
                options: decode_options(&self.id, self.options)?,
            },
            other => {
                return Err(DefinitionError::UnsupportedQuestionKind {
                    question_id: self.id,
                    kind: other.to_string(),
                })
            }
        };

        Ok(Question {
            id: self.id,
            group_label,
            kind,
        })
    }
}

fn decode_options(
    question_id: &str,
    options: Option<Vec<RawOption>>,
) -> Result<Vec<ChoiceOption>, DefinitionError> {
    options
        .unwrap_or_default()
        .into_iter()
        .map(|option| {
            let value = ChoiceValue::from_json(&option.value).ok_or_else(|| {
                DefinitionError::InvalidOptionValue {
                    question_id: question_id.to_string(),
                }
            })?;
            Ok(ChoiceOption {
                value,
                weights: option.weights.unwrap_or_default(),
            })
        })
        .collect()
}

/// Question ids appear as strings or integers in survey documents.
fn deserialize_question_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Text(text) => Ok(text),
        RawId::Integer(number) => Ok(number.to_string()),
    }
}
