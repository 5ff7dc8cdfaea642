use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::definition::ChoiceValue;

/// Shape a question kind requires from its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerShape {
    Number,
    Scalar,
    List,
    Text,
}

impl fmt::Display for AnswerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AnswerShape::Number => "a number",
            AnswerShape::Scalar => "a single value",
            AnswerShape::List => "a list of values",
            AnswerShape::Text => "text",
        };
        f.write_str(label)
    }
}

/// An answer that cannot be coerced to what its question requires.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("answer to question '{question_id}' must be {expected}")]
pub struct MalformedAnswer {
    pub question_id: String,
    pub expected: AnswerShape,
}

/// Raw answers keyed by question id, exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, Value>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, question_id: impl Into<String>, value: Value) -> Self {
        self.0.insert(question_id.into(), value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `null` counts as unanswered.
    fn raw(&self, question_id: &str) -> Option<&Value> {
        self.0.get(question_id).filter(|value| !value.is_null())
    }

    /// Numeric answer; numeric strings are accepted.
    pub fn number(&self, question_id: &str) -> Result<Option<f64>, MalformedAnswer> {
        let Some(value) = self.raw(question_id) else {
            return Ok(None);
        };

        let number = match value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        };

        match number {
            Some(number) if number.is_finite() => Ok(Some(number)),
            _ => Err(malformed(question_id, AnswerShape::Number)),
        }
    }

    pub fn choice(&self, question_id: &str) -> Result<Option<ChoiceValue>, MalformedAnswer> {
        let Some(value) = self.raw(question_id) else {
            return Ok(None);
        };

        ChoiceValue::from_json(value)
            .map(Some)
            .ok_or_else(|| malformed(question_id, AnswerShape::Scalar))
    }

    pub fn choices(&self, question_id: &str) -> Result<Option<Vec<ChoiceValue>>, MalformedAnswer> {
        let Some(value) = self.raw(question_id) else {
            return Ok(None);
        };

        let Value::Array(items) = value else {
            return Err(malformed(question_id, AnswerShape::List));
        };

        items
            .iter()
            .map(|item| {
                ChoiceValue::from_json(item).ok_or_else(|| malformed(question_id, AnswerShape::List))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Scalars are stringified; lists and objects are rejected.
    pub fn text(&self, question_id: &str) -> Result<Option<String>, MalformedAnswer> {
        let Some(value) = self.raw(question_id) else {
            return Ok(None);
        };

        match value {
            Value::String(text) => Ok(Some(text.clone())),
            Value::Number(number) => Ok(Some(number.to_string())),
            Value::Bool(flag) => Ok(Some(flag.to_string())),
            _ => Err(malformed(question_id, AnswerShape::Text)),
        }
    }
}

impl FromIterator<(String, Value)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn malformed(question_id: &str, expected: AnswerShape) -> MalformedAnswer {
    MalformedAnswer {
        question_id: question_id.to_string(),
        expected,
    }
}
