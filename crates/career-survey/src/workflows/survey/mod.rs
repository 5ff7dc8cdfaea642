//! Career questionnaire scoring.
//!
//! A submission flows through definition decoding, answer aggregation,
//! normalization against the submission's own maximum, ranking, and reason
//! synthesis before being packaged for the HTTP layer. Every step is pure;
//! definitions are loaded through a [`DefinitionSource`] before scoring starts.

pub mod answers;
pub mod catalog;
pub mod definition;
mod error;
pub mod result;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use answers::{AnswerSet, AnswerShape, MalformedAnswer};
pub use catalog::{
    spec_check_slug, DefinitionSource, DirectoryDefinitionSource, InMemoryDefinitionSource,
    SourceError,
};
pub use definition::{
    ChoiceOption, ChoiceValue, DefinitionError, Question, QuestionKind, ScoringRules,
    SurveyDefinition, Target,
};
pub use error::SurveyError;
pub use result::{JobRecommendation, SpecCheckResult, SpecializationScore, SurveyResult};
pub use router::survey_router;
pub use scoring::{ReasonSynthesizer, ScoringEngine, TraitLabels};
pub use service::{SpecCheckSubmission, SurveyService, SurveySubmission};
