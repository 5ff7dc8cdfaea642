use std::cmp::Ordering;
use std::collections::HashMap;

use indexmap::IndexMap;

/// Label used when a contribution key is blank.
const CORE_COMPETENCY_LABEL: &str = "Core competency";

/// Closing insight shared by both survey modes.
pub const SAVE_FOR_DEEPER_ANALYSIS: &str =
    "Save your top matches to a spec check to analyze the detailed competencies behind each role.";

const DEFAULT_TRAIT_LABELS: [(&str, &str); 25] = [
    ("creativity", "Creative planning"),
    ("analytical", "Data analysis"),
    ("numerical", "Numerical sense"),
    ("interpersonal", "Interpersonal communication"),
    ("process", "Process improvement"),
    ("people_management", "People and organization management"),
    ("product", "Product and service planning"),
    ("branding", "Brand sense"),
    ("growth", "Growth experimentation"),
    ("presentation", "Persuasion and presentation"),
    ("customer", "Customer observation"),
    ("planning", "Planning and operations"),
    ("content", "Content creation"),
    ("agility", "Shifting priorities"),
    ("data_driven", "Data-driven decision making"),
    ("relationship", "Relationship building"),
    ("systems", "Systematic problem solving"),
    ("pricing", "Pricing and P&L sense"),
    ("tools", "Tool proficiency"),
    ("collaboration", "Collaboration and coordination"),
    ("market_analysis", "Market and competitor analysis"),
    ("routine", "Preference for routine work"),
    ("ux", "UX observation"),
    ("compliance", "Regulatory compliance"),
    ("fast_feedback", "Fast execution and feedback"),
];

/// Immutable lookup from internal trait keys to display labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitLabels {
    labels: HashMap<String, String>,
}

impl Default for TraitLabels {
    fn default() -> Self {
        DEFAULT_TRAIT_LABELS
            .iter()
            .map(|(key, label)| (key.to_string(), label.to_string()))
            .collect()
    }
}

impl FromIterator<(String, String)> for TraitLabels {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().collect(),
        }
    }
}

impl TraitLabels {
    /// Unknown keys become title-cased words.
    pub fn translate(&self, key: &str) -> String {
        if key.is_empty() {
            return CORE_COMPETENCY_LABEL.to_string();
        }
        match self.labels.get(key) {
            Some(label) => label.clone(),
            None => title_case(&key.replace(['_', '-'], " ")),
        }
    }
}

/// A letter is uppercased when the character before it is not a letter.
fn title_case(text: &str) -> String {
    let mut titled = String::with_capacity(text.len());
    let mut after_letter = false;
    for ch in text.chars() {
        if after_letter {
            titled.extend(ch.to_lowercase());
        } else {
            titled.extend(ch.to_uppercase());
        }
        after_letter = ch.is_alphabetic();
    }
    titled
}

/// Reason and insight text for a recommended specialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecializationNarrative {
    pub reason: String,
    pub insight: String,
}

/// Turns contribution breakdowns into human-readable justifications.
#[derive(Debug, Clone, Default)]
pub struct ReasonSynthesizer {
    labels: TraitLabels,
}

impl ReasonSynthesizer {
    pub fn new(labels: TraitLabels) -> Self {
        Self { labels }
    }

    /// Names the two strongest traits behind the recommended job.
    pub fn job_reason(&self, job_name: &str, contributions: Option<&IndexMap<String, f64>>) -> String {
        let top = contributions.map(|groups| top_keys(groups, 2)).unwrap_or_default();
        if top.is_empty() {
            return format!("{job_name} showed the highest overall fit.");
        }

        let traits = top
            .iter()
            .map(|key| self.labels.translate(key))
            .collect::<Vec<_>>()
            .join(" · ");
        format!("You scored highest on {traits}, the competencies the {job_name} role calls for.")
    }

    pub fn job_insights(&self, job_name: &str) -> Vec<String> {
        vec![
            format!("{job_name} recorded the highest score on both preference and fit."),
            SAVE_FOR_DEEPER_ANALYSIS.to_string(),
        ]
    }

    /// Quotes the two questions that lifted the recommended subtype most.
    pub fn specialization_narrative(
        &self,
        subtype_name: &str,
        contributions: Option<&IndexMap<String, f64>>,
    ) -> SpecializationNarrative {
        let top = contributions.map(|groups| top_keys(groups, 2)).unwrap_or_default();
        if top.is_empty() {
            return SpecializationNarrative {
                reason: format!("Your experience related to {subtype_name} scored consistently high."),
                insight: format!("{subtype_name} drew your strongest experience scores."),
            };
        }

        let summary = top.join(" / ");
        SpecializationNarrative {
            reason: format!("Your answers to '{summary}' scored especially high."),
            insight: format!("You responded especially strongly to '{summary}'."),
        }
    }

    pub fn spec_check_insights(
        &self,
        subtype_name: &str,
        narrative: &SpecializationNarrative,
    ) -> Vec<String> {
        vec![
            format!("{subtype_name} recorded the highest score among the specializations."),
            narrative.insight.clone(),
            SAVE_FOR_DEEPER_ANALYSIS.to_string(),
        ]
    }
}

/// Keys by accumulated value descending; ties keep first-credit order.
fn top_keys(groups: &IndexMap<String, f64>, limit: usize) -> Vec<&str> {
    let mut entries: Vec<(&String, &f64)> = groups.iter().collect();
    entries.sort_by(|left, right| right.1.partial_cmp(left.1).unwrap_or(Ordering::Equal));
    entries
        .into_iter()
        .take(limit)
        .map(|(key, _)| key.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(entries: &[(&str, f64)]) -> IndexMap<String, f64> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), *value))
            .collect()
    }

    #[test]
    fn translates_known_and_unknown_keys() {
        let labels = TraitLabels::default();
        assert_eq!(labels.translate("analytical"), "Data analysis");
        assert_eq!(labels.translate("field_SALES-ops"), "Field Sales Ops");
        assert_eq!(labels.translate("b2b_sales"), "B2B Sales");
        assert_eq!(labels.translate("3d_modeling"), "3D Modeling");
        assert_eq!(labels.translate(""), CORE_COMPETENCY_LABEL);
    }

    #[test]
    fn injected_table_overrides_defaults() {
        let labels: TraitLabels = [("analytical".to_string(), "Analysis".to_string())]
            .into_iter()
            .collect();
        let synthesizer = ReasonSynthesizer::new(labels);

        let reason = synthesizer.job_reason("Marketer", Some(&groups(&[("analytical", 3.0)])));

        assert!(reason.contains("Analysis"));
        assert!(!reason.contains("Data analysis"));
    }

    #[test]
    fn job_reason_names_top_two_traits() {
        let synthesizer = ReasonSynthesizer::default();
        let contributions = groups(&[("planning", 2.0), ("growth", 9.0), ("branding", 5.0)]);

        let reason = synthesizer.job_reason("Marketer", Some(&contributions));

        assert_eq!(
            reason,
            "You scored highest on Growth experimentation · Brand sense, the competencies the Marketer role calls for."
        );
    }

    #[test]
    fn job_reason_ties_keep_first_credited_trait() {
        let synthesizer = ReasonSynthesizer::default();
        let contributions = groups(&[("tools", 4.0), ("ux", 4.0), ("pricing", 4.0)]);

        let reason = synthesizer.job_reason("PM", Some(&contributions));

        assert!(reason.contains("Tool proficiency · UX observation"));
    }

    #[test]
    fn job_reason_falls_back_without_contributions() {
        let synthesizer = ReasonSynthesizer::default();
        assert_eq!(
            synthesizer.job_reason("Marketer", Some(&IndexMap::new())),
            "Marketer showed the highest overall fit."
        );
        assert_eq!(
            synthesizer.job_reason("Marketer", None),
            "Marketer showed the highest overall fit."
        );
    }

    #[test]
    fn specialization_narrative_quotes_top_questions() {
        let synthesizer = ReasonSynthesizer::default();
        let contributions = groups(&[
            ("Ran a paid campaign", 3.0),
            ("Wrote brand copy", 8.0),
            ("Built a dashboard", 5.0),
        ]);

        let narrative = synthesizer.specialization_narrative("Brand", Some(&contributions));

        assert_eq!(
            narrative.reason,
            "Your answers to 'Wrote brand copy / Built a dashboard' scored especially high."
        );
        let insights = synthesizer.spec_check_insights("Brand", &narrative);
        assert_eq!(insights.len(), 3);
        assert_eq!(insights[2], SAVE_FOR_DEEPER_ANALYSIS);
    }

    #[test]
    fn specialization_narrative_falls_back_to_subtype_name() {
        let synthesizer = ReasonSynthesizer::default();
        let narrative = synthesizer.specialization_narrative("Growth", None);
        assert!(narrative.reason.contains("Growth"));
        assert!(narrative.insight.contains("Growth"));
    }

    #[test]
    fn both_modes_close_with_the_save_prompt() {
        let synthesizer = ReasonSynthesizer::default();
        let insights = synthesizer.job_insights("Marketer");
        assert_eq!(insights.len(), 2);
        assert_eq!(insights.last().map(String::as_str), Some(SAVE_FOR_DEEPER_ANALYSIS));
    }
}
